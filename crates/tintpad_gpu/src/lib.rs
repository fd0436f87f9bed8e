//! tintpad_gpu - wgpu device setup and swap-chain lifecycle for tintpad.
//!
//! The swap chain is rebuilt (never resized in place) whenever the observed
//! canvas size changes. Size acquisition and the surface itself sit behind
//! small traits so the lifecycle logic can be tested without a GPU.

pub mod canvas;
pub mod config;
pub mod context;
pub mod device_error;
pub mod error;
pub mod msaa;
pub mod swap_chain;

pub use canvas::{CanvasSize, CanvasSizeSource, WindowCanvas};
#[cfg(target_arch = "wasm32")]
pub use canvas::HtmlCanvas;
pub use config::{ClearColor, GpuConfig};
pub use context::GpuContext;
pub use device_error::DeviceErrorKind;
pub use error::{GpuError, Result};
pub use msaa::MsaaTarget;
pub use swap_chain::{PresentTarget, Reconcile, SurfaceDependent, SwapChainManager, WgpuSurface};
