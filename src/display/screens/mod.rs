use std::error::Error;

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    prelude::DrawTarget,
    primitives::Rectangle,
};

use super::components::{draw_component, Button, DialogBox, DisplayComponent};
use super::Theme;
use crate::state::{AppState, Dialog, Screen, UiEvent};

pub mod printer;
pub mod settings;

pub type Components = Vec<Box<dyn DisplayComponent>>;

/// A touch that landed on an enabled button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub name: &'static str,
    pub event: UiEvent,
}

pub fn components(state: &AppState) -> Components {
    match state.screen {
        Screen::Printer => printer::components(state),
        Screen::Settings => settings::components(state),
    }
}

pub fn dialog_components(dialog: &Dialog) -> Components {
    let area = Rectangle::new(Point::new(100, 110), Size::new(600, 260));
    let is_error = matches!(dialog, Dialog::Error(_));

    vec![
        Box::new(DialogBox::new("dialog", area, dialog.message(), is_error)),
        Box::new(Button::new(
            "dialog_ok",
            "OK",
            Rectangle::new(Point::new(340, 290), Size::new(120, 56)),
            UiEvent::DismissDialog,
        )),
    ]
}

/// Only the top layer reacts to touches, so an open dialog blocks the screen below.
pub fn hit_test(state: &AppState, point: Point) -> Option<Hit> {
    let layer = match &state.dialog {
        Some(dialog) => dialog_components(dialog),
        None => components(state),
    };

    layer
        .iter()
        .filter(|component| component.contains(point))
        .find_map(|component| {
            component.on_press().map(|event| Hit {
                name: component.get_name(),
                event,
            })
        })
}

pub fn draw<D>(target: &mut D, state: &AppState, theme: &Theme) -> Result<(), Box<dyn Error>>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: Error + 'static,
{
    target.clear(theme.background)?;

    for component in components(state) {
        let pressed = state.pressed == Some(component.get_name());
        draw_component(component.as_ref(), target, theme, pressed)?;
    }

    if let Some(dialog) = &state.dialog {
        for component in dialog_components(dialog) {
            let pressed = state.pressed == Some(component.get_name());
            draw_component(component.as_ref(), target, theme, pressed)?;
        }
    }
    Ok(())
}
