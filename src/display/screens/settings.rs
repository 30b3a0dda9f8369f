use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

use super::Components;
use crate::display::components::{Button, TextLabel};
use crate::display::{BODY_FONT, DISPLAY_FONT, THEME, TITLE_FONT};
use crate::state::{AppState, UiEvent};

pub const DRYING_TIME_LABEL: &str = "Tørketid (hours):";

const STEP_SIZE: Size = Size::new(70, 70);

/// A caption with `-` value `+` below it, starting at `y`.
fn stepper(
    names: [&'static str; 4],
    caption: &str,
    value: u32,
    y: i32,
    event: fn(i32) -> UiEvent,
) -> Components {
    let [caption_name, minus, value_name, plus] = names;
    vec![
        Box::new(TextLabel::new(
            caption_name,
            caption,
            Rectangle::new(Point::new(50, y - 50), Size::new(400, 40)),
            &BODY_FONT,
            THEME.text,
        )),
        Box::new(Button::new(
            minus,
            "-",
            Rectangle::new(Point::new(50, y), STEP_SIZE),
            event(-1),
        )),
        Box::new(
            TextLabel::new(
                value_name,
                value.to_string(),
                Rectangle::new(Point::new(130, y), Size::new(100, 70)),
                &DISPLAY_FONT,
                THEME.text,
            )
            .centered(),
        ),
        Box::new(Button::new(
            plus,
            "+",
            Rectangle::new(Point::new(240, y), STEP_SIZE),
            event(1),
        )),
    ]
}

pub fn components(state: &AppState) -> Components {
    let config = state.config();

    let mut components: Components = vec![Box::new(TextLabel::new(
        "settings_title",
        "Settings",
        Rectangle::new(Point::new(50, 10), Size::new(400, 60)),
        &TITLE_FONT,
        THEME.accent,
    ))];

    components.extend(stepper(
        ["copies_title", "copies_minus", "copies_value", "copies_plus"],
        "Number of copies:",
        config.num_copies(),
        140,
        UiEvent::AdjustCopies,
    ));
    components.extend(stepper(
        ["drying_title", "drying_minus", "drying_value", "drying_plus"],
        DRYING_TIME_LABEL,
        config.drying_time(),
        290,
        UiEvent::AdjustDrying,
    ));

    components.push(Box::new(Button::new(
        "save",
        "Save",
        Rectangle::new(Point::new(500, 140), Size::new(240, 80)),
        UiEvent::SaveSettings,
    )));
    components.push(Box::new(Button::new(
        "back",
        "Back",
        Rectangle::new(Point::new(500, 290), Size::new(240, 80)),
        UiEvent::CloseSettings,
    )));
    components
}
