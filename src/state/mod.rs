use std::time::Duration;

pub mod app;
pub mod feedback;
pub mod gesture;
pub mod keypad;

pub use app::{AppState, Dialog, Screen, UiEvent};

/// Backspace presses on an empty code within this window are counted.
pub const GESTURE_WINDOW: Duration = Duration::from_secs(5);
pub const GESTURE_PRESSES: usize = 5;
/// How long the print button stays disabled after a submit.
pub const FEEDBACK_WINDOW: Duration = Duration::from_millis(3000);
