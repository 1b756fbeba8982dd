//! Desktop notifications for failed compilations.
//!
//! Notifications are best-effort: a notifier that fails is logged at debug
//! level and otherwise ignored, so a missing `notify-send` never takes the
//! build down with it.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::JoinHandle;

use devpack_config::{CompileError, ErrorHook, Severity};

pub const NOTIFICATION_TITLE: &str = "Webpack Dev Server";
pub const NOTIFICATION_MESSAGE: &str = "Compilation Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub subtitle: String,
    pub message: String,
}

impl Notification {
    /// Notification for a failed compilation, subtitled with the offending
    /// file (empty when the error carries none).
    pub fn compilation_error(error: &CompileError) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            subtitle: error.file_name().unwrap_or_default().to_string(),
            message: NOTIFICATION_MESSAGE.to_string(),
        }
    }
}

/// Delivers a notification to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> io::Result<()>;
}

/// Shells out to the platform notifier: `osascript` on macOS,
/// `notify-send` elsewhere. Not supported on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> io::Result<()> {
        spawn_detached(notification_command(notification)?).map(|_| ())
    }
}

/// Start `command` without blocking the caller. A background thread waits
/// on the child so it does not linger as a zombie.
fn spawn_detached(mut command: Command) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(std::thread::spawn(move || match child.wait() {
        Ok(status) => Some(status),
        Err(err) => {
            tracing::debug!(error = %err, "failed to reap notifier process");
            None
        }
    }))
}

fn notification_command(notification: &Notification) -> io::Result<Command> {
    if cfg!(target_os = "macos") {
        let script = format!(
            "display notification {} with title {} subtitle {}",
            applescript_string(&notification.message),
            applescript_string(&notification.title),
            applescript_string(&notification.subtitle),
        );
        let mut command = Command::new("osascript");
        command.arg("-e").arg(script);
        Ok(command)
    } else if cfg!(target_os = "windows") {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "desktop notifications are not supported on Windows",
        ))
    } else {
        let body = if notification.subtitle.is_empty() {
            notification.message.clone()
        } else {
            format!("{}\n{}", notification.subtitle, notification.message)
        };
        let mut command = Command::new("notify-send");
        command.arg(&notification.title).arg(body);
        Ok(command)
    }
}

fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Build the `onErrors` hook for the friendly-errors reporter.
///
/// Only `Severity::Error` reports notify, using the first error. An empty
/// error list notifies nothing.
pub fn notifier_callback(notifier: Arc<dyn Notifier>) -> ErrorHook {
    ErrorHook::new(move |severity, errors| {
        if severity != Severity::Error {
            return;
        }
        let Some(first) = errors.first() else {
            return;
        };

        let notification = Notification::compilation_error(first);
        if let Err(err) = notifier.notify(&notification) {
            tracing::debug!(error = %err, "desktop notification failed");
        }
    })
}
