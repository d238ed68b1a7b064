//! GitHub Actions workflow commands.
//!
//! The runner reads these from stdout. Messages are escaped so a multi-line
//! error still arrives as one annotation.

use std::io::Write;

/// Registers `value` as a secret so the runner redacts it from the log.
pub fn add_mask(value: &str) {
    if value.is_empty() {
        return;
    }
    issue("add-mask", value);
}

/// Emits an error annotation.
pub fn error(message: &str) {
    issue("error", message);
}

/// Emits a warning annotation.
pub fn warning(message: &str) {
    issue("warning", message);
}

fn issue(command: &str, data: &str) {
    let mut stdout = std::io::stdout().lock();
    // Nothing sensible to do if stdout is gone.
    let _ = writeln!(stdout, "{}", format_command(command, data));
}

fn format_command(command: &str, data: &str) -> String {
    format!("::{}::{}", command, escape_data(data))
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
