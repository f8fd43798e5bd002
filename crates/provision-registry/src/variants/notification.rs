//! Built-in notification channels

use crate::capability::{Capability, Delivery, Notifier};

/// E-mail notifications
#[derive(Debug, Clone, Default)]
pub struct EmailNotifier {
    _private: (),
}

impl Capability for EmailNotifier {
    fn label(&self) -> &'static str {
        "email"
    }
}

impl Notifier for EmailNotifier {
    fn send(&self, message: &str) -> Delivery {
        tracing::info!(message, "sending e-mail notification");
        Delivery::new(self.label(), message)
    }
}

/// SMS notifications
#[derive(Debug, Clone, Default)]
pub struct SmsNotifier {
    _private: (),
}

impl Capability for SmsNotifier {
    fn label(&self) -> &'static str {
        "sms"
    }
}

impl Notifier for SmsNotifier {
    fn send(&self, message: &str) -> Delivery {
        tracing::info!(message, "sending SMS notification");
        Delivery::new(self.label(), message)
    }
}
