//! Transient status notifications.
//!
//! A [`StatusBoard`] tracks live notifications and their expiry. Each entry
//! carries an opaque handle (a DOM element in the browser, `()` in tests) so
//! the view can remove exactly the entry whose timer fired.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Alert class used by the page stylesheet.
    pub fn alert_class(self) -> String {
        format!("alert-{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
    pub expires_at_ms: u64,
}

impl StatusMessage {
    /// Time left before the message should be removed, as seen at `now_ms`.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms)
    }
}

#[derive(Debug)]
pub struct StatusBoard<H> {
    ttl_ms: u64,
    next_id: u64,
    entries: Vec<(StatusMessage, H)>,
}

impl<H> StatusBoard<H> {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Register a new notification created at `now_ms`.
    pub fn post(&mut self, text: &str, severity: Severity, now_ms: u64, handle: H) -> StatusMessage {
        let message = StatusMessage {
            id: self.next_id,
            text: text.to_owned(),
            severity,
            expires_at_ms: now_ms.saturating_add(self.ttl_ms),
        };
        self.next_id += 1;
        self.entries.push((message.clone(), handle));
        message
    }

    /// Remove a single notification when its own timer fires or it is dismissed.
    /// Returns `None` if it is already gone.
    pub fn remove(&mut self, id: u64) -> Option<(StatusMessage, H)> {
        let index = self.entries.iter().position(|(message, _)| message.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn messages(&self) -> impl Iterator<Item = &StatusMessage> {
        self.entries.iter().map(|(message, _)| message)
    }
}
