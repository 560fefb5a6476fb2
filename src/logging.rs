// src/logging.rs

/// Route `log` records to the browser console and panics to `console.error`.
/// Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialised");
    }
}
