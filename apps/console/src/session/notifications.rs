//! Transient success/error messages.
//!
//! A notification slides in shortly after it is created, stays for three seconds,
//! then slides out and is dropped once the exit animation has had time to finish.
//! Phases are derived from the creation instant, so nothing has to be scheduled.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

pub const SLIDE_IN_DELAY: Duration = Duration::from_millis(100);
pub const DISPLAY_FOR: Duration = Duration::from_millis(3000);
pub const REMOVE_AFTER_EXIT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Shown,
    Leaving,
    Expired,
}

impl Phase {
    pub fn at(elapsed: Duration) -> Self {
        if elapsed < SLIDE_IN_DELAY {
            Phase::Entering
        } else if elapsed < DISPLAY_FOR {
            Phase::Shown
        } else if elapsed < DISPLAY_FOR + REMOVE_AFTER_EXIT {
            Phase::Leaving
        } else {
            Phase::Expired
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    pub fn phase(&self, now: Instant) -> Phase {
        Phase::at(self.elapsed(now))
    }
}

/// Notifications are not queued or coordinated; several may be live at once.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: VecDeque<Notification>,
}

impl NotificationCenter {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            created_at: Instant::now(),
        };
        let id = notification.id;
        tracing::debug!("notify[{}]: {}", severity.as_str(), notification.message);
        self.items.push_back(notification);
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> Uuid {
        self.push(Severity::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> Uuid {
        self.push(Severity::Error, message)
    }

    /// Drops expired notifications and returns the rest, oldest first.
    pub fn live(&mut self, now: Instant) -> Vec<Notification> {
        self.items.retain(|n| n.phase(now) != Phase::Expired);
        self.items.iter().cloned().collect()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}
