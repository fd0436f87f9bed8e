use std::path::PathBuf;

use thiserror::Error;
use tintpad_gpu::GpuError;

/// Startup failures. Any of these ends the process with a nonzero status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Canvas setup failed: {0}")]
    Canvas(String),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] GpuError),

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Unknown key name in config: {0:?}")]
    UnknownKey(String),

    #[error("Unsupported config version {found} (expected {expected})")]
    ConfigVersion { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, AppError>;
