/// Shown when the render surface cannot be created
pub const SURFACE_FAILED: &str = "Failed to load graphics engine.";
/// Shown when an export could not be produced or saved
pub const EXPORT_FAILED: &str = "Export failed.";

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    /// Time in seconds (see [`crate::util::time`]) after which it disappears
    pub expires_at: f64,
}

/// A single auto-dismissing message; a new one replaces the old
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn show(&mut self, message: impl Into<String>, now: f64, duration_secs: f64) {
        let message = message.into();
        log::info!("notice: {message}");
        self.current = Some(Notice {
            message,
            expires_at: now + duration_secs,
        });
    }

    /// The notice still visible at `now`, if any
    pub fn active(&self, now: f64) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| now < notice.expires_at)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
