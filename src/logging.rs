//! Logger setup. Native builds log to stderr through env_logger (`RUST_LOG`
//! still overrides the configured level); the browser build logs to the
//! devtools console.

use crate::config::LogLevel;

#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init();
    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    let Some(level) = level.to_level_filter().to_level() else {
        return;
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }
}
