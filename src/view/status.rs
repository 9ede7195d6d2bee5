//! Transient status messages
//!
//! Each view owns one [`StatusBoard`] holding at most one message. Showing a
//! message replaces the previous one. Expiry is a deadline checked on read,
//! and every message has its own id, so an old expiry can never hide a newer
//! message.

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Styling class of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    /// CSS-style class name
    pub fn class(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

/// The message currently shown in a status region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub id: u64,
    pub kind: StatusKind,
    pub text: String,
    /// `None` keeps the message until it is replaced
    pub expires_at: Option<Instant>,
}

impl StatusMessage {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.expires_at.map(|deadline| now < deadline).unwrap_or(true)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.text)
    }
}

/// Single-slot message region
#[derive(Debug, Default)]
pub struct StatusBoard {
    current: Option<StatusMessage>,
    next_id: u64,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current message. Returns the new message id.
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>, ttl: Option<Duration>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;

        self.current = Some(StatusMessage {
            id,
            kind,
            text: text.into(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        });

        id
    }

    pub fn success(&mut self, text: impl Into<String>, ttl: Duration) -> u64 {
        self.show(StatusKind::Success, text, Some(ttl))
    }

    pub fn error(&mut self, text: impl Into<String>, ttl: Option<Duration>) -> u64 {
        self.show(StatusKind::Error, text, ttl)
    }

    /// Message visible right now, if any
    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&StatusMessage> {
        self.current.as_ref().filter(|m| m.is_visible_at(now))
    }

    /// Hide the message with the given id. A message that has already been
    /// replaced is left alone. Returns whether anything was hidden.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().map(|m| m.id) == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
