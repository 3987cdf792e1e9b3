//! Form state notifications
//!
//! Each form owns a watch channel carrying its latest snapshot. Listeners
//! only ever observe the most recent state; an unread snapshot is replaced,
//! not queued. Dropping a receiver unsubscribes it.

use serde::Serialize;
use tokio::sync::watch;

use crate::domain::value_objects::FormId;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot<D> {
    pub form_id: FormId,
    /// Monotonic per form; a later snapshot supersedes every earlier one
    pub revision: u64,
    pub category: Option<String>,
    pub is_valid: bool,
    pub form_data: D,
}

pub struct Notifier<D> {
    tx: watch::Sender<FormSnapshot<D>>,
}

impl<D: Clone> Notifier<D> {
    pub fn new(initial: FormSnapshot<D>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot<D>> {
        self.tx.subscribe()
    }

    /// Replace the current snapshot. Delivery is best effort: with no
    /// listeners the value is simply stored.
    pub fn publish(&self, category: Option<String>, is_valid: bool, form_data: D) {
        self.tx.send_modify(|current| {
            current.revision += 1;
            current.category = category;
            current.is_valid = is_valid;
            current.form_data = form_data;
        });
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<D> std::fmt::Debug for Notifier<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.tx.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> Notifier<u32> {
        Notifier::new(FormSnapshot {
            form_id: FormId::from_string("f-1"),
            revision: 0,
            category: None,
            is_valid: false,
            form_data: 0,
        })
    }

    #[test]
    fn test_last_write_wins() {
        let notifier = notifier();
        let mut rx = notifier.subscribe();
        notifier.publish(Some("a".into()), false, 1);
        notifier.publish(Some("b".into()), true, 2);

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.revision, 2);
        assert_eq!(seen.form_data, 2);
        assert!(seen.is_valid);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_publish_without_listeners() {
        let notifier = notifier();
        notifier.publish(None, true, 5);
        assert_eq!(notifier.subscribe().borrow().form_data, 5);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_by_drop() {
        let notifier = notifier();
        let rx = notifier.subscribe();
        assert_eq!(notifier.listener_count(), 1);
        drop(rx);
        assert_eq!(notifier.listener_count(), 0);
    }
}
