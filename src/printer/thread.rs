use image::GrayImage;
use tokio::sync::mpsc::{Receiver, Sender};

use super::{Dispatcher, LabelKind};
use crate::log;

#[derive(Debug, Clone)]
pub enum PrinterCommand {
    Print {
        image: GrayImage,
        copies: u32,
        kind: LabelKind,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterResponse {
    Busy(LabelKind),
    Done(LabelKind),
    Failed { kind: LabelKind, message: String },
}

impl std::fmt::Display for PrinterResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrinterResponse::Busy(kind) => write!(f, "Busy printing {}", kind),
            PrinterResponse::Done(kind) => write!(f, "{} printed", kind),
            PrinterResponse::Failed { kind, message } => {
                write!(f, "{} failed: {}", kind, message)
            }
        }
    }
}

/// Runs the print worker until a `Shutdown` arrives or the UI side hangs up.
///
/// Blocks on every call, so it belongs on `spawn_blocking`.
pub(crate) fn run_thread(
    mut dispatcher: Dispatcher,
    tx: Sender<PrinterResponse>,
    mut rx: Receiver<PrinterCommand>,
) {
    println!(
        "{} Starting print thread ({})",
        log::THREAD,
        if dispatcher.is_dry_run() {
            "test mode"
        } else {
            "live"
        }
    );

    while let Some(command) = rx.blocking_recv() {
        let (image, copies, kind) = match command {
            PrinterCommand::Print {
                image,
                copies,
                kind,
            } => (image, copies, kind),
            PrinterCommand::Shutdown => break,
        };

        if tx.blocking_send(PrinterResponse::Busy(kind)).is_err() {
            break;
        }

        let response = match dispatcher.dispatch(&image, copies, kind) {
            Ok(()) => PrinterResponse::Done(kind),
            Err(err) => {
                println!("{} Error: {}", log::ERROR, err);
                PrinterResponse::Failed {
                    kind,
                    message: err.user_message(),
                }
            }
        };

        if tx.blocking_send(response).is_err() {
            break;
        }
    }

    println!("{} Print thread stopped", log::THREAD);
}
