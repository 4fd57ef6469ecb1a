//! Shared UI context
//!
//! The one piece of state every view may read and write: which project is
//! open, how big the terminal is, and the footer notification.

use std::time::{Duration, Instant};

/// Severity of a footer notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub level: NotificationLevel,
    pub expires_at: Instant,
}

/// Process-wide UI state, owned by the shell and lent to views
#[derive(Debug, Clone)]
pub struct Context {
    project_id: String,
    project_name: String,
    width: u16,
    height: u16,
    notification: Option<Notification>,
    notification_ttl: Duration,
}

impl Context {
    pub fn new(project_id: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: project_name.into(),
            width: 0,
            height: 0,
            notification: None,
            notification_ttl: Duration::from_secs(4),
        }
    }

    /// Set how long notifications stay visible
    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn set_project(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.project_id = id.into();
        self.project_name = name.into();
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Show an informational notification. Replaces any current one.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.push_notification(text.into(), NotificationLevel::Info);
    }

    /// Show an error notification. Replaces any current one.
    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.push_notification(text.into(), NotificationLevel::Error);
    }

    fn push_notification(&mut self, text: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            text,
            level,
            expires_at: Instant::now() + self.notification_ttl,
        });
    }

    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Current notification, unless it has expired at `now`
    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| now < n.expires_at)
    }

    /// Drop the notification once it has expired
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now >= n.expires_at)
        {
            self.notification = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context() {
        let ctx = Context::new("p-1", "Production");
        assert_eq!(ctx.project_id(), "p-1");
        assert_eq!(ctx.project_name(), "Production");
        assert_eq!(ctx.viewport(), (0, 0));
        assert!(ctx.notification(Instant::now()).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut ctx = Context::new("p", "p");
        ctx.notify("first");
        ctx.notify_error("second");
        let n = ctx.notification(Instant::now()).unwrap();
        assert_eq!(n.text, "second");
        assert_eq!(n.level, NotificationLevel::Error);
    }

    #[test]
    fn test_notification_expires() {
        let mut ctx = Context::new("p", "p").with_notification_ttl(Duration::from_secs(2));
        ctx.notify("saved");
        let now = Instant::now();
        assert!(ctx.notification(now).is_some());

        let later = now + Duration::from_secs(3);
        assert!(ctx.notification(later).is_none());

        ctx.expire_notification(now);
        assert!(ctx.notification(now).is_some());
        ctx.expire_notification(later);
        assert!(ctx.notification(now).is_none());
    }

    #[test]
    fn test_setters() {
        let mut ctx = Context::new("a", "A");
        ctx.set_project("b", "B");
        ctx.set_viewport(120, 40);
        assert_eq!(ctx.project_id(), "b");
        assert_eq!(ctx.project_name(), "B");
        assert_eq!(ctx.viewport(), (120, 40));
        ctx.notify("x");
        ctx.clear_notification();
        assert!(ctx.notification(Instant::now()).is_none());
    }
}
