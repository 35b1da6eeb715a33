//! User-facing notifications (the blocking alerts of the page).

use std::fmt;
use tracing::{info, warn};

/// A message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    RequestSent,
    RequestFailed,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::RequestSent => "Mentorship request sent!",
            Notice::RequestFailed => "Failed to send request",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Delivers notices to the user.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Prints notices to stdout and records them in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::RequestSent => info!(%notice, "notify"),
            Notice::RequestFailed => warn!(%notice, "notify"),
        }
        println!("{notice}");
    }
}
