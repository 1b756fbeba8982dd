//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Style};

fn paint(style: Style) -> Style {
    if super::colors_enabled() {
        style
    } else {
        Style::new()
    }
}

/// Print a success message to stderr.
///
/// ```no_run
/// use devpack_cli::ui::success;
///
/// success("Your application is running at http://localhost:8080");
/// ```
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".style(paint(Style::new().green().bold())), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".style(paint(Style::new().blue().bold())), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".style(paint(Style::new().yellow().bold())),
        message.style(paint(Style::new().yellow()))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
    }
}
