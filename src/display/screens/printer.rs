use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

use super::Components;
use crate::display::components::{Button, TextLabel};
use crate::display::{BODY_FONT, DISPLAY_FONT, THEME, TITLE_FONT};
use crate::state::{keypad::KeypadKey, AppState, UiEvent};

pub const PRINTING_MESSAGE: &str = "Printing...";

const KEYPAD_ORIGIN: Point = Point::new(470, 70);
const KEY_SIZE: Size = Size::new(90, 80);
const KEY_STEP_X: i32 = 100;
const KEY_STEP_Y: i32 = 90;

/// Rows top to bottom, the way the keypad is printed on a phone.
pub const KEYPAD_LAYOUT: [[KeypadKey; 3]; 4] = [
    [KeypadKey::Digit(7), KeypadKey::Digit(8), KeypadKey::Digit(9)],
    [KeypadKey::Digit(4), KeypadKey::Digit(5), KeypadKey::Digit(6)],
    [KeypadKey::Digit(1), KeypadKey::Digit(2), KeypadKey::Digit(3)],
    [KeypadKey::Clear, KeypadKey::Digit(0), KeypadKey::Backspace],
];

pub fn key_name(key: KeypadKey) -> &'static str {
    match key {
        KeypadKey::Digit(0) => "key_0",
        KeypadKey::Digit(1) => "key_1",
        KeypadKey::Digit(2) => "key_2",
        KeypadKey::Digit(3) => "key_3",
        KeypadKey::Digit(4) => "key_4",
        KeypadKey::Digit(5) => "key_5",
        KeypadKey::Digit(6) => "key_6",
        KeypadKey::Digit(7) => "key_7",
        KeypadKey::Digit(8) => "key_8",
        KeypadKey::Digit(9) => "key_9",
        KeypadKey::Digit(_) => "key_invalid",
        KeypadKey::Backspace => "key_backspace",
        KeypadKey::Clear => "key_clear",
    }
}

fn keypad() -> Components {
    let mut keys: Components = Vec::with_capacity(12);
    for (row, keys_in_row) in KEYPAD_LAYOUT.iter().enumerate() {
        for (col, key) in keys_in_row.iter().enumerate() {
            let top_left = KEYPAD_ORIGIN + Point::new(col as i32 * KEY_STEP_X, row as i32 * KEY_STEP_Y);
            keys.push(Box::new(Button::new(
                key_name(*key),
                key.label(),
                Rectangle::new(top_left, KEY_SIZE),
                UiEvent::Key(*key),
            )));
        }
    }
    keys
}

pub fn components(state: &AppState) -> Components {
    let mut components: Components = vec![
        Box::new(TextLabel::new(
            "batch_title",
            "Batch number",
            Rectangle::new(Point::new(50, 60), Size::new(400, 40)),
            &BODY_FONT,
            THEME.text,
        )),
        Box::new(
            TextLabel::new(
                "batch_code",
                state.keypad.code().as_str(),
                Rectangle::new(Point::new(50, 170), Size::new(400, 70)),
                &DISPLAY_FONT,
                THEME.accent,
            )
            .centered(),
        ),
        Box::new(
            Button::new(
                "print",
                "PRINT LABEL",
                Rectangle::new(Point::new(90, 270), Size::new(320, 80)),
                UiEvent::Submit,
            )
            .enabled(state.can_submit()),
        ),
        Box::new(Button::new(
            "settings",
            "SET",
            Rectangle::new(Point::new(710, 0), Size::new(80, 50)),
            UiEvent::OpenSettings,
        )),
    ];

    if state.is_showing_feedback() {
        components.push(Box::new(
            TextLabel::new(
                "printing",
                PRINTING_MESSAGE,
                Rectangle::new(Point::new(50, 110), Size::new(400, 50)),
                &TITLE_FONT,
                THEME.muted,
            )
            .centered(),
        ));
    }

    components.extend(keypad());
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::screens::hit_test;
    use crate::display::screens::tests::{center_of, state, tap};
    use crate::state::Screen;

    fn names(state: &AppState) -> Vec<&'static str> {
        components(state).iter().map(|c| c.get_name()).collect()
    }

    #[test]
    fn keypad_has_twelve_distinct_keys() {
        let keys = keypad();
        assert_eq!(keys.len(), 12);

        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a.get_name(), b.get_name());
                assert!(a.area().intersection(&b.area()).is_zero_sized());
            }
        }
    }

    #[test]
    fn components_stay_on_screen() {
        let (state, _scratch) = state("bounds");
        let screen = Rectangle::new(
            Point::zero(),
            Size::new(crate::display::WIDTH, crate::display::HEIGHT),
        );
        for component in components(&state) {
            let area = component.area();
            assert_eq!(screen.intersection(&area), area, "{}", component.get_name());
        }
    }

    #[test]
    fn typing_updates_the_code() {
        let (mut state, _scratch) = state("typing");
        tap(&mut state, "key_4");
        tap(&mut state, "key_2");
        assert_eq!(state.keypad.code().as_str(), "00042");

        tap(&mut state, "key_backspace");
        assert_eq!(state.keypad.code().as_str(), "0004");

        tap(&mut state, "key_clear");
        assert_eq!(state.keypad.code().as_str(), "000");
    }

    #[test]
    fn print_button_disables_while_printing() {
        let (mut state, _scratch) = state("feedback");
        assert!(!names(&state).contains(&"printing"));

        tap(&mut state, "print");
        assert!(state.is_showing_feedback());
        assert!(names(&state).contains(&"printing"));

        let print = center_of(&state, "print");
        assert_eq!(hit_test(&state, print), None);
    }

    #[test]
    fn settings_button_switches_screen() {
        let (mut state, _scratch) = state("open_settings");
        tap(&mut state, "settings");
        assert_eq!(state.screen, Screen::Settings);
    }
}
