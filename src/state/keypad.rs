use std::time::Instant;

use debug_print::debug_println;

use super::gesture::GestureTracker;
use super::{GESTURE_PRESSES, GESTURE_WINDOW};

/// Fixed start of every batch number.
pub const PREFIX: &str = "000";
/// Prefix plus seven digits.
pub const MAX_LENGTH: usize = 10;

/// A batch number that always starts with [`PREFIX`] and never exceeds [`MAX_LENGTH`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchCode(String);

impl BatchCode {
    pub fn new() -> Self {
        Self(PREFIX.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_prefix_only(&self) -> bool {
        self.0 == PREFIX
    }

    pub fn is_full(&self) -> bool {
        self.len() >= MAX_LENGTH
    }

    /// Appends a digit, ignoring anything that is not `0..=9` or would overflow.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || self.is_full() {
            return false;
        }
        self.0.push(char::from(b'0' + digit));
        true
    }

    /// Removes the last digit; the prefix is never touched.
    pub fn pop(&mut self) -> bool {
        if self.len() <= PREFIX.len() {
            return false;
        }
        self.0.pop();
        true
    }

    pub fn clear(&mut self) {
        self.0.truncate(PREFIX.len());
    }
}

impl Default for BatchCode {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(u8),
    Backspace,
    Clear,
}

impl KeypadKey {
    pub fn label(&self) -> String {
        match self {
            KeypadKey::Digit(d) => d.to_string(),
            KeypadKey::Backspace => "<".to_string(),
            KeypadKey::Clear => "C".to_string(),
        }
    }
}

/// What a key press did, so the caller can react to the hidden gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeypadOutcome {
    Changed,
    Unchanged,
    GestureFired,
}

/// The batch entry state machine behind the numeric keypad.
#[derive(Clone, Debug)]
pub struct Keypad {
    code: BatchCode,
    gesture: GestureTracker,
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            code: BatchCode::new(),
            gesture: GestureTracker::new(GESTURE_WINDOW, GESTURE_PRESSES),
        }
    }

    pub fn code(&self) -> &BatchCode {
        &self.code
    }

    pub fn press(&mut self, key: KeypadKey, now: Instant) -> KeypadOutcome {
        match key {
            KeypadKey::Digit(digit) => {
                if self.code.push_digit(digit) {
                    KeypadOutcome::Changed
                } else {
                    KeypadOutcome::Unchanged
                }
            }
            KeypadKey::Backspace => {
                if self.code.is_prefix_only() && self.gesture.record(now) {
                    debug_println!("backspace gesture completed");
                    return KeypadOutcome::GestureFired;
                }
                if self.code.pop() {
                    KeypadOutcome::Changed
                } else {
                    KeypadOutcome::Unchanged
                }
            }
            KeypadKey::Clear => {
                let changed = !self.code.is_prefix_only();
                self.code.clear();
                if changed {
                    KeypadOutcome::Changed
                } else {
                    KeypadOutcome::Unchanged
                }
            }
        }
    }

    /// Back to the bare prefix after a print cycle.
    pub fn reset(&mut self) {
        self.code.clear();
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn type_digits(keypad: &mut Keypad, digits: &[u8]) {
        let now = Instant::now();
        for digit in digits {
            keypad.press(KeypadKey::Digit(*digit), now);
        }
    }

    #[test]
    fn starts_with_prefix() {
        let keypad = Keypad::new();
        assert_eq!(keypad.code().as_str(), "000");
        assert!(keypad.code().is_prefix_only());
    }

    #[test]
    fn digits_keep_prefix_and_bounds() {
        for count in 0..=7usize {
            let mut keypad = Keypad::new();
            let digits: Vec<u8> = (0..count).map(|i| (i % 10) as u8).collect();
            type_digits(&mut keypad, &digits);

            let code = keypad.code().as_str();
            assert!(code.starts_with(PREFIX));
            assert_eq!(code.len(), 3 + count);
        }
    }

    #[test]
    fn digits_past_max_length_are_ignored() {
        let mut keypad = Keypad::new();
        type_digits(&mut keypad, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(keypad.code().as_str(), "0001234567");

        let outcome = keypad.press(KeypadKey::Digit(8), Instant::now());
        assert_eq!(outcome, KeypadOutcome::Unchanged);
        assert_eq!(keypad.code().as_str(), "0001234567");
        assert_eq!(keypad.code().len(), MAX_LENGTH);
    }

    #[test]
    fn non_digit_values_are_ignored() {
        let mut keypad = Keypad::new();
        assert_eq!(
            keypad.press(KeypadKey::Digit(12), Instant::now()),
            KeypadOutcome::Unchanged
        );
        assert_eq!(keypad.code().as_str(), "000");
    }

    #[test]
    fn clear_always_yields_prefix() {
        let mut keypad = Keypad::new();
        keypad.press(KeypadKey::Clear, Instant::now());
        assert_eq!(keypad.code().as_str(), "000");

        type_digits(&mut keypad, &[9, 8, 7, 6, 5, 4, 3]);
        keypad.press(KeypadKey::Clear, Instant::now());
        assert_eq!(keypad.code().as_str(), "000");
    }

    #[test]
    fn backspace_never_goes_below_prefix() {
        let mut keypad = Keypad::new();
        type_digits(&mut keypad, &[4, 2]);

        let start = Instant::now();
        for i in 0..4 {
            keypad.press(KeypadKey::Backspace, start + Duration::from_secs(10 * i));
            assert!(keypad.code().len() >= 3);
        }
        assert_eq!(keypad.code().as_str(), "000");
    }

    fn empty_backspaces(
        keypad: &mut Keypad,
        start: Instant,
        step: Duration,
    ) -> Vec<KeypadOutcome> {
        (0..5)
            .map(|i| keypad.press(KeypadKey::Backspace, start + step * i))
            .collect()
    }

    fn fired(outcomes: &[KeypadOutcome]) -> usize {
        outcomes
            .iter()
            .filter(|o| **o == KeypadOutcome::GestureFired)
            .count()
    }

    #[test]
    fn gesture_fires_on_empty_backspaces() {
        let mut keypad = Keypad::new();
        let outcomes = empty_backspaces(&mut keypad, Instant::now(), Duration::from_millis(900));

        assert_eq!(outcomes[4], KeypadOutcome::GestureFired);
        assert_eq!(fired(&outcomes), 1);
    }

    #[test]
    fn gesture_fires_with_presses_a_second_apart() {
        let mut keypad = Keypad::new();
        let start = Instant::now();
        let outcomes = empty_backspaces(&mut keypad, start, Duration::from_secs(1));

        assert_eq!(outcomes[4], KeypadOutcome::GestureFired);
        assert_eq!(fired(&outcomes), 1);

        // The tracker starts over after firing.
        let restart = start + Duration::from_secs(5);
        let again = empty_backspaces(&mut keypad, restart, Duration::from_secs(1));
        assert_eq!(fired(&again[..4]), 0);
        assert_eq!(again[4], KeypadOutcome::GestureFired);
    }

    #[test]
    fn backspace_with_digits_does_not_count() {
        let mut keypad = Keypad::new();
        type_digits(&mut keypad, &[1, 2, 3, 4, 5]);
        let start = Instant::now();

        // Five presses delete the digits, none of them on a bare prefix.
        for i in 0..5 {
            let outcome = keypad.press(KeypadKey::Backspace, start + Duration::from_millis(100 * i));
            assert_eq!(outcome, KeypadOutcome::Changed);
        }
        assert_eq!(keypad.code().as_str(), "000");

        // Only presses on the bare prefix count towards the gesture.
        let later = start + Duration::from_millis(500);
        let outcomes = empty_backspaces(&mut keypad, later, Duration::from_millis(100));
        assert_eq!(fired(&outcomes[..4]), 0);
        assert_eq!(outcomes[4], KeypadOutcome::GestureFired);
    }

    #[test]
    fn reset_returns_to_prefix() {
        let mut keypad = Keypad::new();
        type_digits(&mut keypad, &[5, 5, 5]);
        keypad.reset();
        assert_eq!(keypad.code(), &BatchCode::new());
    }
}
