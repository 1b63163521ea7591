//! Notification port - User-facing status messages

pub trait NotificationPort: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}
