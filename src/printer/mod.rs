use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;

use crate::label::{self, LabelContent, LabelError};
use crate::log;

pub mod thread;
pub mod transport;

use thread::PrinterCommand;
use transport::PrintTransport;

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("Permission denied: '{device}'")]
    PermissionDenied { device: String },
    #[error("{0}")]
    Transport(String),
    #[error("Could not write label image: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl PrintError {
    /// Sorts a transport failure into the permission case or the generic one.
    pub fn classify(detail: String, device: &str) -> Self {
        if detail.contains("Permission denied") && detail.contains(device) {
            PrintError::PermissionDenied {
                device: device.to_string(),
            }
        } else {
            PrintError::Transport(detail)
        }
    }

    /// Text for the operator's error dialog.
    pub fn user_message(&self) -> String {
        match self {
            PrintError::PermissionDenied { device } => format!(
                "Printer permission denied.\nPlease run:\nsudo chmod 666 {}",
                device
            ),
            other => format!("Error: {}", other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Batch,
    EasterEgg,
}

impl LabelKind {
    /// File name of the rendered artifact handed to the transport.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            LabelKind::Batch => "temp_receipt.png",
            LabelKind::EasterEgg => "temp_easter_egg.png",
        }
    }
}

impl std::fmt::Display for LabelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelKind::Batch => write!(f, "Labels"),
            LabelKind::EasterEgg => write!(f, "Easter egg"),
        }
    }
}

/// A print the UI asked for, not yet rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrintRequest {
    Batch { content: LabelContent, copies: u32 },
    EasterEgg,
}

impl PrintRequest {
    pub fn kind(&self) -> LabelKind {
        match self {
            PrintRequest::Batch { .. } => LabelKind::Batch,
            PrintRequest::EasterEgg => LabelKind::EasterEgg,
        }
    }

    pub fn render(&self) -> Result<PrinterCommand, LabelError> {
        match self {
            PrintRequest::Batch { content, copies } => Ok(PrinterCommand::Print {
                image: label::render_label(content)?,
                copies: *copies,
                kind: LabelKind::Batch,
            }),
            PrintRequest::EasterEgg => Ok(PrinterCommand::Print {
                image: label::render_easter_egg()?,
                copies: 1,
                kind: LabelKind::EasterEgg,
            }),
        }
    }
}

pub enum PrintMode {
    /// Only writes a preview, no printer needed
    DryRun,
    Live(Box<dyn PrintTransport + Send>),
}

pub struct Dispatcher {
    mode: PrintMode,
    artifact_dir: PathBuf,
}

impl Dispatcher {
    pub fn dry_run(artifact_dir: impl AsRef<Path>) -> Self {
        Self {
            mode: PrintMode::DryRun,
            artifact_dir: artifact_dir.as_ref().to_path_buf(),
        }
    }

    pub fn live(transport: Box<dyn PrintTransport + Send>, artifact_dir: impl AsRef<Path>) -> Self {
        Self {
            mode: PrintMode::Live(transport),
            artifact_dir: artifact_dir.as_ref().to_path_buf(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self.mode, PrintMode::DryRun)
    }

    pub fn artifact_path(&self, kind: LabelKind) -> PathBuf {
        self.artifact_dir.join(kind.artifact_name())
    }

    /// Sends `copies` prints of `image`. Never retries.
    pub fn dispatch(
        &mut self,
        image: &GrayImage,
        copies: u32,
        kind: LabelKind,
    ) -> Result<(), PrintError> {
        let path = self.artifact_path(kind);

        match &mut self.mode {
            PrintMode::DryRun => {
                println!("{} Test Mode: {} would be printed", log::PRINT, kind);
                match image.save(&path) {
                    Ok(()) => println!(
                        "{} Preview of {} copies saved as {}",
                        log::PRINT,
                        copies,
                        path.display()
                    ),
                    Err(err) => println!(
                        "{} Could not save preview {}: {}",
                        log::WARN,
                        path.display(),
                        err
                    ),
                }
                Ok(())
            }
            PrintMode::Live(transport) => {
                image.save(&path)?;

                for copy in 1..=copies {
                    println!(
                        "{} Sending {} copy {}/{} to {}",
                        log::PRINT,
                        kind,
                        copy,
                        copies,
                        transport.device()
                    );
                    transport.send(&path)?;
                }

                std::fs::remove_file(&path)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every send and optionally fails with a fixed detail.
    pub(crate) struct FakeTransport {
        pub sent: Arc<Mutex<Vec<PathBuf>>>,
        pub fail_with: Option<String>,
    }

    impl FakeTransport {
        pub fn new(fail_with: Option<&str>) -> (Self, Arc<Mutex<Vec<PathBuf>>>) {
            let sent = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    sent: sent.clone(),
                    fail_with: fail_with.map(str::to_string),
                },
                sent,
            )
        }
    }

    impl PrintTransport for FakeTransport {
        fn device(&self) -> &str {
            transport::DEFAULT_DEVICE
        }

        fn send(&mut self, image_path: &Path) -> Result<(), PrintError> {
            assert!(image_path.exists(), "artifact must exist while sending");
            self.sent
                .lock()
                .expect("lock")
                .push(image_path.to_path_buf());
            match &self.fail_with {
                Some(detail) => Err(PrintError::classify(detail.clone(), self.device())),
                None => Ok(()),
            }
        }
    }

    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "label_kiosk_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }

    fn small_image() -> GrayImage {
        GrayImage::from_pixel(8, 4, image::Luma([255]))
    }

    #[test]
    fn dry_run_never_touches_transport() {
        let dir = scratch_dir("dry_run");
        let mut dispatcher = Dispatcher::dry_run(&dir);

        dispatcher
            .dispatch(&small_image(), 3, LabelKind::Batch)
            .expect("dry run never fails");

        assert!(dispatcher.is_dry_run());
        assert!(dir.join("temp_receipt.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn dry_run_survives_unwritable_preview() {
        let dir = scratch_dir("dry_run_missing").join("does/not/exist");
        let mut dispatcher = Dispatcher::dry_run(&dir);

        assert!(dispatcher
            .dispatch(&small_image(), 1, LabelKind::EasterEgg)
            .is_ok());
    }

    #[test]
    fn live_sends_each_copy_and_cleans_up() {
        let dir = scratch_dir("live_ok");
        let (transport, sent) = FakeTransport::new(None);
        let mut dispatcher = Dispatcher::live(Box::new(transport), &dir);

        dispatcher
            .dispatch(&small_image(), 2, LabelKind::Batch)
            .expect("prints");

        let sent = sent.lock().expect("lock");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], dir.join("temp_receipt.png"));
        assert!(!dir.join("temp_receipt.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn live_failure_stops_and_keeps_artifact() {
        let dir = scratch_dir("live_fail");
        let (transport, sent) =
            FakeTransport::new(Some("[Errno 13] Permission denied: '/dev/usb/lp0'"));
        let mut dispatcher = Dispatcher::live(Box::new(transport), &dir);

        let err = dispatcher
            .dispatch(&small_image(), 3, LabelKind::Batch)
            .expect_err("should fail");

        assert!(matches!(err, PrintError::PermissionDenied { .. }));
        assert_eq!(sent.lock().expect("lock").len(), 1);
        assert!(dir.join("temp_receipt.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn permission_denied_needs_the_device() {
        let device = transport::DEFAULT_DEVICE;

        let denied = PrintError::classify(
            "[Errno 13] Permission denied: '/dev/usb/lp0'".to_string(),
            device,
        );
        assert_eq!(
            denied.user_message(),
            "Printer permission denied.\nPlease run:\nsudo chmod 666 /dev/usb/lp0"
        );

        let elsewhere = PrintError::classify(
            "Permission denied: '/tmp/other'".to_string(),
            device,
        );
        assert!(matches!(elsewhere, PrintError::Transport(_)));
        assert_eq!(
            elsewhere.user_message(),
            "Error: Permission denied: '/tmp/other'"
        );
    }

    #[test]
    fn easter_egg_request_prints_once() {
        match PrintRequest::EasterEgg.render().expect("render") {
            PrinterCommand::Print { copies, kind, .. } => {
                assert_eq!(copies, 1);
                assert_eq!(kind, LabelKind::EasterEgg);
            }
            _ => panic!("expected a print command"),
        }
    }
}
