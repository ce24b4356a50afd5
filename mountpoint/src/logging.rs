//! Browser logging.
//!
//! Log records go to the JavaScript console through `console_log`, and panics are reported
//! there by `console_error_panic_hook`. Outside the browser both are left uninstalled, so
//! tests and native tools can bring their own logger.

pub fn init(level: log::Level) {
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        // a logger installed earlier wins
        _ = console_log::init_with_level(level);
    }

    #[cfg(not(target_family = "wasm"))]
    log::trace!("console logging unavailable, keeping existing logger at {level}");
}
