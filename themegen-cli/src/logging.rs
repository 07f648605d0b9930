//! Logging utilities for the themegen CLI.
//!
//! The logging backend is the standard `log` crate with `env_logger`,
//! initialized in `main.rs`. Verbosity follows the `RUST_LOG` environment
//! variable (`info` by default, `debug`/`trace` for more detail).

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
