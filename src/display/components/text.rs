use std::error::Error;

use embedded_canvas::Canvas;
use embedded_graphics::{pixelcolor::Rgb888, prelude::Point, primitives::Rectangle};
use u8g2_fonts::{
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use super::DisplayComponent;
use crate::display::Theme;

/// A single line of text, vertically centered in its area.
pub struct TextLabel {
    pub name: &'static str,
    pub text: String,
    pub area: Rectangle,
    pub font: &'static FontRenderer,
    pub color: Rgb888,
    pub alignment: HorizontalAlignment,
}

impl TextLabel {
    pub fn new(
        name: &'static str,
        text: impl Into<String>,
        area: Rectangle,
        font: &'static FontRenderer,
        color: Rgb888,
    ) -> Self {
        Self {
            name,
            text: text.into(),
            area,
            font,
            color,
            alignment: HorizontalAlignment::Left,
        }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = HorizontalAlignment::Center;
        self
    }

    fn anchor(&self) -> Point {
        let width = self.area.size.width as i32;
        let x = match self.alignment {
            HorizontalAlignment::Left => 0,
            HorizontalAlignment::Center => width / 2,
            HorizontalAlignment::Right => width - 1,
        };
        Point::new(x, self.area.size.height as i32 / 2)
    }
}

impl DisplayComponent for TextLabel {
    fn get_name(&self) -> &'static str {
        self.name
    }

    fn area(&self) -> Rectangle {
        self.area
    }

    fn draw(
        &self,
        target: &mut Canvas<Rgb888>,
        _theme: &Theme,
        _pressed: bool,
    ) -> Result<(), Box<dyn Error>> {
        if self.text.is_empty() {
            return Ok(());
        }
        self.font
            .render_aligned(
                self.text.as_str(),
                self.anchor(),
                VerticalPosition::Center,
                self.alignment,
                FontColor::Transparent(self.color),
                target,
            )
            .map_err(|err| format!("Could not draw {}: {:?}", self.name, err))?;
        Ok(())
    }
}
