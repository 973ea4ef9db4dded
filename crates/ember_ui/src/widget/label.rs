use std::sync::Arc;

use ember_core::{ConfigResult, Font, Image, LabelLook, Surface, Theme};

use super::face::caption;
use super::{EventCtx, Placement, Widget, WidgetBase};
use crate::event::{Outcome, WidgetKind};
use crate::input::RawEvent;

/// Static text, optionally with an icon. Never consumes events.
#[derive(Debug)]
pub struct Label {
    base: WidgetBase,
    look: LabelLook,
    font: Arc<dyn Font>,
    antialias: bool,
    text: String,
    icon: Option<Image>,
    image: Image,
}

impl Label {
    /// Builds a label.
    ///
    /// # Errors
    ///
    /// [`ember_core::ConfigError::MissingFont`] when the theme has no font.
    pub fn new(
        theme: &Theme,
        placement: Placement,
        name: impl Into<String>,
        text: impl Into<String>,
        icon: Option<Image>,
    ) -> ConfigResult<Self> {
        let font = Arc::clone(theme.font.face(WidgetKind::Label.as_str())?);
        let mut label = Self {
            base: WidgetBase::new(name, placement),
            look: theme.label.clone(),
            font,
            antialias: theme.font.antialias,
            text: text.into(),
            icon,
            image: Image::new(ember_core::Size::ZERO),
        };
        label.rebuild();
        Ok(label)
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and rebuilds the image. The owner must be told to
    /// redraw.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let content = caption(
            self.font.as_ref(),
            self.antialias,
            &self.text,
            self.look.text_color,
            self.icon.as_ref(),
        );
        self.image = self.look.image.wrap(&content, None, None);
        self.base.set_size(self.image.size());
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Label
    }

    fn handle_event(&mut self, _event: &RawEvent, _ctx: &mut EventCtx) -> Outcome {
        Outcome::Unconsumed
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.blit(&self.image, self.base.rect().top_left());
    }
}
