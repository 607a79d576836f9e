//! Output helpers shared by CLI commands.
//!
//! Global flags are stashed in environment variables by `main.rs` so any
//! module can check them without threading state around.

/// Whether `--json` was passed (machine-readable output).
pub fn is_json() -> bool {
    std::env::var("FLECTA_JSON").is_ok()
}

/// Whether `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("FLECTA_QUIET").is_ok()
}

/// Print a JSON value to stdout, one object per line.
pub fn print_json(value: &serde_json::Value) {
    println!("{value}");
}
