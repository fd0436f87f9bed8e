/// Native entry point. Exits with status 1 when startup fails.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;
    use tintpad::{AppConfig, logging};

    let config = match AppConfig::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tintpad: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.log_level);

    match tintpad::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Application error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
