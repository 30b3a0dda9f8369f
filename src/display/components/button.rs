use std::error::Error;

use embedded_canvas::Canvas;
use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    primitives::{Primitive, Rectangle, RoundedRectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};

use super::DisplayComponent;
use crate::{display::Theme, state::UiEvent};

pub struct Button {
    pub name: &'static str,
    pub label: String,
    pub area: Rectangle,
    pub event: UiEvent,
    pub enabled: bool,
}

impl Button {
    pub fn new(
        name: &'static str,
        label: impl Into<String>,
        area: Rectangle,
        event: UiEvent,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            area,
            event,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn fill_color(&self, theme: &Theme, pressed: bool) -> Rgb888 {
        if !self.enabled {
            theme.button_disabled
        } else if pressed {
            theme.button_active
        } else {
            theme.button
        }
    }
}

impl DisplayComponent for Button {
    fn get_name(&self) -> &'static str {
        self.name
    }

    fn area(&self) -> Rectangle {
        self.area
    }

    fn draw(
        &self,
        target: &mut Canvas<Rgb888>,
        theme: &Theme,
        pressed: bool,
    ) -> Result<(), Box<dyn Error>> {
        let size = self.area.size;

        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::zero(), size),
            Size::new(theme.corner_radius, theme.corner_radius),
        )
        .into_styled(theme.fill(self.fill_color(theme, pressed)))
        .draw(target)?;

        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(
            &self.label,
            Point::new(size.width as i32 / 2, size.height as i32 / 2),
            theme.button_text_style(),
            centered,
        )
        .draw(target)?;

        Ok(())
    }

    fn on_press(&self) -> Option<UiEvent> {
        if self.enabled {
            Some(self.event)
        } else {
            None
        }
    }
}
