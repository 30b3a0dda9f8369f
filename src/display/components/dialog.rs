use std::error::Error;

use embedded_canvas::Canvas;
use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    primitives::{Primitive, Rectangle},
    Drawable,
};
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use super::DisplayComponent;
use crate::display::{Theme, DIALOG_FONT};

const LINE_HEIGHT: i32 = 24;
/// Characters per line at the dialog font width.
pub const WRAP_WIDTH: usize = 56;

/// Modal box with a wrapped message; the OK button is a separate component.
pub struct DialogBox {
    pub name: &'static str,
    pub area: Rectangle,
    pub lines: Vec<String>,
    pub is_error: bool,
}

impl DialogBox {
    pub fn new(name: &'static str, area: Rectangle, message: &str, is_error: bool) -> Self {
        Self {
            name,
            area,
            lines: wrap_text(message, WRAP_WIDTH),
            is_error,
        }
    }
}

/// Splits on newlines, then wraps each line at word boundaries to `width` characters.
pub fn wrap_text(message: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in message.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            // Hard split words longer than a full line
            while word.chars().count() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
            }
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }
    lines
}

impl DisplayComponent for DialogBox {
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
        _pressed: bool,
    ) -> Result<(), Box<dyn Error>> {
        let size = self.area.size;
        let frame = Rectangle::new(Point::zero(), size);

        // Draw fill
        frame.into_styled(theme.fill(theme.background)).draw(target)?;
        // Draw outline
        frame.into_styled(theme.outline(theme.accent)).draw(target)?;

        let color = if self.is_error { theme.accent } else { theme.text };
        let center_x = size.width as i32 / 2;
        // Leave room for the OK button along the bottom
        let text_height = size.height as i32 - 80;
        let top = ((text_height - LINE_HEIGHT * self.lines.len() as i32) / 2).max(theme.margin);

        for (i, line) in self.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            DIALOG_FONT
                .render_aligned(
                    line.as_str(),
                    Point::new(center_x, top + LINE_HEIGHT * i as i32),
                    VerticalPosition::Top,
                    HorizontalAlignment::Center,
                    FontColor::Transparent(color),
                    target,
                )
                .map_err(|err| format!("Could not draw dialog text: {:?}", err))?;
        }
        Ok(())
    }
}
