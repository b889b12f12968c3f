//! Trigger contract for the checkout-reminder transport.
//!
//! Delivery (SMTP, push, whatever) lives outside this crate; the sweep
//! only needs something to hand the reminder to. Failures are the
//! caller's problem to log, never to propagate.

use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::time;
use chrono::{DateTime, Utc};

pub trait CheckoutNotifier: Sync {
    fn send_checkout_reminder(
        &self,
        email: &str,
        name: &str,
        user_id: &str,
        check_in: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// Default transport: prints the reminder to the console. Useful for the
/// CLI and as a stand-in where no mail transport is wired up.
pub struct ConsoleNotifier {
    note: String,
}

impl ConsoleNotifier {
    /// `note` is the configurable reminder text appended to every message
    /// (the `reminder_note` config field).
    pub fn new(note: impl Into<String>) -> Self {
        Self { note: note.into() }
    }
}

impl CheckoutNotifier for ConsoleNotifier {
    fn send_checkout_reminder(
        &self,
        email: &str,
        name: &str,
        user_id: &str,
        check_in: DateTime<Utc>,
    ) -> AppResult<()> {
        messages::info(format!(
            "Checkout reminder → {name} <{email}> (user {user_id}), checked in at {}. {}",
            time::format_local(check_in),
            self.note
        ));
        Ok(())
    }
}
