use std::error::Error;

use embedded_canvas::Canvas;
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point},
    primitives::{ContainsPoint, Rectangle},
    Drawable,
};

use super::Theme;
use crate::state::UiEvent;

pub mod button;
pub mod dialog;
pub mod text;

pub use button::Button;
pub use dialog::DialogBox;
pub use text::TextLabel;

/// A rectangular piece of a screen that draws itself in local coordinates.
pub trait DisplayComponent {
    fn get_name(&self) -> &'static str;
    fn area(&self) -> Rectangle;
    fn draw(
        &self,
        target: &mut Canvas<Rgb888>,
        theme: &Theme,
        pressed: bool,
    ) -> Result<(), Box<dyn Error>>;

    /// The event a touch inside `area` produces, if any.
    fn on_press(&self) -> Option<UiEvent> {
        None
    }

    fn contains(&self, point: Point) -> bool {
        self.area().contains(point)
    }
}

/// Draws `component` on its own canvas and places it at its area on `target`.
pub fn draw_component<D>(
    component: &dyn DisplayComponent,
    target: &mut D,
    theme: &Theme,
    pressed: bool,
) -> Result<(), Box<dyn Error>>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: Error + 'static,
{
    let area = component.area();
    let mut canvas = Canvas::<Rgb888>::new(area.size);
    component.draw(&mut canvas, theme, pressed)?;
    canvas.place_at(area.top_left).draw(target)?;
    Ok(())
}
