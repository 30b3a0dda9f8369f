use std::time::Instant;

use chrono::NaiveDateTime;
use debug_print::debug_println;

use crate::{
    config::ConfigManager,
    label::build_label,
    log,
    printer::{thread::PrinterResponse, LabelKind, PrintRequest},
};

use super::{
    feedback::FeedbackWindow,
    keypad::{Keypad, KeypadKey, KeypadOutcome},
    FEEDBACK_WINDOW,
};

pub const SAVED_MESSAGE: &str = "Settings saved successfully!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Printer,
    Settings,
}

/// A modal message that blocks input until acknowledged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialog {
    Error(String),
    Info(String),
}

impl Dialog {
    pub fn message(&self) -> &str {
        match self {
            Dialog::Error(message) | Dialog::Info(message) => message,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Key(KeypadKey),
    Submit,
    OpenSettings,
    CloseSettings,
    AdjustCopies(i32),
    AdjustDrying(i32),
    SaveSettings,
    DismissDialog,
}

/// Everything the kiosk screens show, owned by the UI loop.
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub keypad: Keypad,
    pub feedback: Option<FeedbackWindow>,
    pub dialog: Option<Dialog>,
    /// The job the print thread is working on
    pub printing: Option<LabelKind>,
    /// Name of the button currently held down
    pub pressed: Option<&'static str>,
    config: ConfigManager,
}

fn adjusted(current: u32, delta: i32) -> u32 {
    (i64::from(current) + i64::from(delta)).max(1) as u32
}

impl AppState {
    pub fn new(config: ConfigManager) -> Self {
        Self {
            screen: Screen::Printer,
            keypad: Keypad::new(),
            feedback: None,
            dialog: None,
            printing: None,
            pressed: None,
            config,
        }
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// Batch numbers are optional, so any code length may be printed.
    pub fn can_submit(&self) -> bool {
        self.screen == Screen::Printer
            && self.dialog.is_none()
            && self.feedback.is_none()
            && self.printing.is_none()
    }

    pub fn is_showing_feedback(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn handle(
        &mut self,
        event: UiEvent,
        now: Instant,
        wall_clock: NaiveDateTime,
    ) -> Option<PrintRequest> {
        if self.dialog.is_some() && event != UiEvent::DismissDialog {
            return None;
        }

        match event {
            UiEvent::Key(key) => {
                if self.screen != Screen::Printer {
                    return None;
                }
                match self.keypad.press(key, now) {
                    KeypadOutcome::GestureFired if self.can_submit() => {
                        return self.start(PrintRequest::EasterEgg, now);
                    }
                    KeypadOutcome::GestureFired => {
                        println!("{} Easter egg ignored while printing", log::WARN);
                    }
                    KeypadOutcome::Changed => {
                        debug_println!("batch code {}", self.keypad.code());
                    }
                    KeypadOutcome::Unchanged => {}
                }
                None
            }
            UiEvent::Submit => {
                if !self.can_submit() {
                    return None;
                }
                let content = match build_label(
                    wall_clock,
                    self.config.drying_time(),
                    self.keypad.code().as_str(),
                ) {
                    Ok(content) => content,
                    Err(err) => {
                        self.show_error(format!("Error: {}", err));
                        return None;
                    }
                };
                let copies = self.config.num_copies();
                self.start(PrintRequest::Batch { content, copies }, now)
            }
            UiEvent::OpenSettings => {
                println!("{} Settings", log::SCREEN);
                self.screen = Screen::Settings;
                None
            }
            UiEvent::CloseSettings => {
                println!("{} Printer", log::SCREEN);
                self.screen = Screen::Printer;
                None
            }
            UiEvent::AdjustCopies(delta) => {
                let value = adjusted(self.config.num_copies(), delta);
                if let Err(err) = self.config.set_num_copies(value) {
                    self.show_error(format!("Error: {}", err));
                }
                None
            }
            UiEvent::AdjustDrying(delta) => {
                let value = adjusted(self.config.drying_time(), delta);
                if let Err(err) = self.config.set_drying_time(value) {
                    self.show_error(format!("Error: {}", err));
                }
                None
            }
            UiEvent::SaveSettings => {
                // Values are already written on every adjustment.
                self.dialog = Some(Dialog::Info(SAVED_MESSAGE.to_string()));
                self.screen = Screen::Printer;
                None
            }
            UiEvent::DismissDialog => {
                self.dialog = None;
                None
            }
        }
    }

    fn start(&mut self, request: PrintRequest, now: Instant) -> Option<PrintRequest> {
        println!(
            "{} Printing {} for batch {}",
            log::STATE,
            request.kind(),
            self.keypad.code()
        );
        self.feedback = Some(FeedbackWindow::open(now, FEEDBACK_WINDOW));
        self.printing = Some(request.kind());
        Some(request)
    }

    fn show_error(&mut self, message: String) {
        println!("{} {}", log::ERROR, message);
        self.dialog = Some(Dialog::Error(message));
    }

    /// Closes an elapsed feedback window and clears the batch code.
    pub fn poll(&mut self, now: Instant) {
        if let Some(window) = self.feedback {
            if window.is_expired(now) {
                self.feedback = None;
                self.keypad.reset();
                debug_println!("feedback window closed");
            }
        }
    }

    pub fn on_response(&mut self, response: PrinterResponse) {
        match response {
            PrinterResponse::Busy(_) => {}
            PrinterResponse::Done(kind) => {
                println!("{} {} printed", log::STATE, kind);
                self.printing = None;
            }
            PrinterResponse::Failed { message, .. } => {
                self.printing = None;
                // Once the window has closed the keypad may already hold a new code.
                if self.feedback.take().is_some() {
                    self.keypad.reset();
                }
                self.show_error(message);
            }
        }
    }
}
