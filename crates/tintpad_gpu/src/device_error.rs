//! Reporting for errors raised asynchronously by the graphics device.
//!
//! These are logged with a category label and otherwise ignored; there is no
//! automatic recovery.

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceErrorKind {
    Validation,
    OutOfMemory,
    Internal,
    Unknown,
    DeviceLost,
}

impl DeviceErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceErrorKind::Validation => "Validation",
            DeviceErrorKind::OutOfMemory => "Out of memory",
            DeviceErrorKind::Internal => "Internal",
            DeviceErrorKind::Unknown => "Unknown",
            DeviceErrorKind::DeviceLost => "Device lost",
        }
    }

    /// Classify an uncaptured wgpu error.
    pub fn of(error: &wgpu::Error) -> Self {
        #[allow(unreachable_patterns)]
        match error {
            wgpu::Error::Validation { .. } => DeviceErrorKind::Validation,
            wgpu::Error::OutOfMemory { .. } => DeviceErrorKind::OutOfMemory,
            wgpu::Error::Internal { .. } => DeviceErrorKind::Internal,
            _ => DeviceErrorKind::Unknown,
        }
    }
}

impl fmt::Display for DeviceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a report line: `"<label> error: <message>"`.
pub fn format_report(kind: DeviceErrorKind, message: &str) -> String {
    format!("{} error: {}", kind.label(), message)
}

pub fn report(kind: DeviceErrorKind, message: &str) {
    log::error!("{}", format_report(kind, message));
}

/// Route uncaptured device errors and device loss to the log.
pub fn install_handlers(device: &wgpu::Device) {
    device.on_uncaptured_error(Arc::new(|error: wgpu::Error| {
        report(DeviceErrorKind::of(&error), &error.to_string());
    }));

    device.set_device_lost_callback(|reason, message| {
        report(
            DeviceErrorKind::DeviceLost,
            &format!("{:?}: {}", reason, message),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(DeviceErrorKind::Validation.label(), "Validation");
        assert_eq!(DeviceErrorKind::OutOfMemory.label(), "Out of memory");
        assert_eq!(DeviceErrorKind::Unknown.label(), "Unknown");
        assert_eq!(DeviceErrorKind::DeviceLost.label(), "Device lost");
    }

    #[test]
    fn test_report_format() {
        assert_eq!(
            format_report(DeviceErrorKind::Validation, "bad bind group"),
            "Validation error: bad bind group"
        );
        assert_eq!(
            format_report(DeviceErrorKind::DeviceLost, "gone"),
            "Device lost error: gone"
        );
    }
}
