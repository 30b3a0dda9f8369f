use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use debug_print::debug_println;

use super::PrintError;
use crate::log;

pub const DEFAULT_PROGRAM: &str = "brother_ql";
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Something that can push one rendered label file to a printer.
pub trait PrintTransport {
    fn device(&self) -> &str;
    fn send(&mut self, image_path: &Path) -> Result<(), PrintError>;
}

/// Conversion and connection flags handed to the `brother_ql` tool.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportOptions {
    pub program: String,
    pub model: String,
    pub backend: String,
    pub device: String,
    /// Tape identifier, `62` is 62mm endless
    pub label: String,
    pub rotate: String,
    pub threshold: f32,
    pub dither: bool,
    pub compress: bool,
    pub red: bool,
    pub dpi_600: bool,
    pub high_quality: bool,
    pub cut: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            model: "QL-800".to_string(),
            backend: "linux_kernel".to_string(),
            device: DEFAULT_DEVICE.to_string(),
            label: "62".to_string(),
            rotate: "auto".to_string(),
            threshold: 70.0,
            dither: false,
            compress: false,
            red: false,
            dpi_600: false,
            high_quality: true,
            cut: true,
        }
    }
}

/// Prints through the external `brother_ql` command line tool, one blocking call per copy.
pub struct BrotherQl {
    options: TransportOptions,
}

impl BrotherQl {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    pub fn args(&self, image_path: &Path) -> Vec<OsString> {
        let o = &self.options;
        let mut args: Vec<OsString> = vec![
            "--backend".into(),
            o.backend.clone().into(),
            "--model".into(),
            o.model.clone().into(),
            "--printer".into(),
            format!("file://{}", o.device).into(),
            "print".into(),
            "--label".into(),
            o.label.clone().into(),
            "--rotate".into(),
            o.rotate.clone().into(),
            "--threshold".into(),
            o.threshold.to_string().into(),
        ];

        if o.dither {
            args.push("--dither".into());
        }
        if o.compress {
            args.push("--compress".into());
        }
        if o.red {
            args.push("--red".into());
        }
        if o.dpi_600 {
            args.push("--600dpi".into());
        }
        if !o.high_quality {
            args.push("--lq".into());
        }
        if !o.cut {
            args.push("--no-cut".into());
        }

        args.push(image_path.as_os_str().to_os_string());
        args
    }
}

impl PrintTransport for BrotherQl {
    fn device(&self) -> &str {
        &self.options.device
    }

    fn send(&mut self, image_path: &Path) -> Result<(), PrintError> {
        let args = self.args(image_path);
        debug_println!("{} {:?}", self.options.program, args);

        let output = Command::new(&self.options.program)
            .args(&args)
            .output()
            .map_err(|err| {
                PrintError::classify(
                    format!("Could not start {}: {}", self.options.program, err),
                    &self.options.device,
                )
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| format!("{} exited with {}", self.options.program, output.status));

        println!("{} {}", log::ERROR, stderr.trim());

        // The whole stderr is searched so a traceback above the last line still classifies.
        if stderr.contains("Permission denied") && stderr.contains(&self.options.device) {
            return Err(PrintError::PermissionDenied {
                device: self.options.device.clone(),
            });
        }
        Err(PrintError::classify(detail, &self.options.device))
    }
}
