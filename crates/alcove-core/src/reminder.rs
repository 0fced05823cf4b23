//! Reminder scheduling.
//!
//! The scheduler consumes reconciled event lists and arms one timer per
//! event whose reminder instant is still in the future. Every list change
//! rebuilds the whole timer set, so removed or rescheduled events can
//! never fire stale notifications. Timers live in the running process
//! only; nothing fires while the app is closed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::models::Event;

/// System notification permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
    Undecided,
}

/// Delivery surface for reminder notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Current permission state.
    fn permission(&self) -> NotificationPermission;

    /// Ask the user for permission. The scheduler calls this at most once.
    async fn request_permission(&self);

    /// Deliver a notification.
    fn notify(&self, title: &str, body: &str);
}

/// Arms and fires reminder timers for the event list.
pub struct ReminderScheduler {
    sink: Arc<dyn NotificationSink>,
    timers: Mutex<Vec<JoinHandle<()>>>,
    permission_requested: AtomicBool,
}

impl ReminderScheduler {
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>) -> Arc<Self> {
        Arc::new(Self {
            sink,
            timers: Mutex::new(Vec::new()),
            permission_requested: AtomicBool::new(false),
        })
    }

    /// Follow event list emissions, rebuilding timers on every change.
    /// The current list is processed immediately, so events that were
    /// hydrated before the scheduler started still get reminders.
    pub fn run(self: &Arc<Self>, mut events: watch::Receiver<Vec<Event>>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let current = events.borrow_and_update().clone();
                scheduler.rebuild(current).await;
                if events.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    /// Drop every armed timer, then arm one per event with a reminder
    /// instant still in the future. Past-due and unparseable instants are
    /// skipped, never retroactively fired.
    pub async fn rebuild(&self, events: Vec<Event>) {
        let mut timers = self.timers.lock().await;
        for timer in timers.drain(..) {
            timer.abort();
        }

        if self.sink.permission() == NotificationPermission::Undecided
            && !self.permission_requested.swap(true, Ordering::SeqCst)
        {
            self.sink.request_permission().await;
        }

        let now = Utc::now();
        for event in events {
            let Some(instant) = event.reminder_instant() else {
                continue;
            };
            if instant <= now {
                tracing::debug!(id = event.id, "skipping past-due reminder");
                continue;
            }

            let delay = (instant - now).to_std().unwrap_or_default();
            let sink = Arc::clone(&self.sink);
            timers.push(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if sink.permission() == NotificationPermission::Granted {
                    sink.notify(
                        &event.title,
                        &format!("{} at {}", event.date, event.time),
                    );
                } else {
                    tracing::debug!(id = event.id, "reminder due without permission");
                }
            }));
        }

        if !timers.is_empty() {
            tracing::debug!(count = timers.len(), "armed reminder timers");
        }
    }

    /// Number of timers armed and not yet fired.
    pub async fn armed_timers(&self) -> usize {
        let timers = self.timers.lock().await;
        timers.iter().filter(|timer| !timer.is_finished()).count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    struct RecordingSink {
        permission: StdMutex<NotificationPermission>,
        requests: AtomicUsize,
        delivered: StdMutex<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn granted() -> Arc<Self> {
            Arc::new(Self {
                permission: StdMutex::new(NotificationPermission::Granted),
                requests: AtomicUsize::new(0),
                delivered: StdMutex::new(Vec::new()),
            })
        }

        fn undecided() -> Arc<Self> {
            Arc::new(Self {
                permission: StdMutex::new(NotificationPermission::Undecided),
                requests: AtomicUsize::new(0),
                delivered: StdMutex::new(Vec::new()),
            })
        }

        fn delivered(&self) -> Vec<(String, String)> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        fn permission(&self) -> NotificationPermission {
            *self.permission.lock().unwrap()
        }

        async fn request_permission(&self) {
            self.requests.fetch_add(1, Ordering::SeqCst);
            *self.permission.lock().unwrap() = NotificationPermission::Granted;
        }

        fn notify(&self, title: &str, body: &str) {
            self.delivered
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
        }
    }

    fn event_with_reminder(title: &str, seconds_from_now: i64) -> Event {
        let mut event = Event::new(title, "2025-06-02", "09:00");
        let instant = Utc::now() + chrono::Duration::seconds(seconds_from_now);
        event.reminder_at = Some(instant.to_rfc3339());
        event
    }

    #[tokio::test(start_paused = true)]
    async fn test_future_reminder_arms_one_timer_and_fires() {
        let sink = RecordingSink::granted();
        let scheduler = ReminderScheduler::new(sink.clone());

        scheduler
            .rebuild(vec![event_with_reminder("Dentist", 5)])
            .await;
        assert_eq!(scheduler.armed_timers().await, 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, "Dentist");
        assert_eq!(delivered[0].1, "2025-06-02 at 09:00");
        assert_eq!(scheduler.armed_timers().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removing_event_cancels_timer() {
        let sink = RecordingSink::granted();
        let scheduler = ReminderScheduler::new(sink.clone());

        scheduler
            .rebuild(vec![event_with_reminder("Dentist", 5)])
            .await;
        scheduler.rebuild(Vec::new()).await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(sink.delivered().is_empty());
        assert_eq!(scheduler.armed_timers().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_due_reminder_never_fires() {
        let sink = RecordingSink::granted();
        let scheduler = ReminderScheduler::new(sink.clone());

        scheduler
            .rebuild(vec![event_with_reminder("Missed", -5)])
            .await;
        assert_eq!(scheduler.armed_timers().await, 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(sink.delivered().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_without_reminder_arms_nothing() {
        let sink = RecordingSink::granted();
        let scheduler = ReminderScheduler::new(sink.clone());

        scheduler
            .rebuild(vec![Event::new("Standup", "2025-06-02", "09:00")])
            .await;
        assert_eq!(scheduler.armed_timers().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_reminder_is_skipped() {
        let sink = RecordingSink::granted();
        let scheduler = ReminderScheduler::new(sink.clone());

        let mut event = Event::new("Broken", "2025-06-02", "09:00");
        event.reminder_at = Some("soon".to_string());
        scheduler.rebuild(vec![event]).await;
        assert_eq!(scheduler.armed_timers().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_requested_once() {
        let sink = RecordingSink::undecided();
        let scheduler = ReminderScheduler::new(sink.clone());

        scheduler
            .rebuild(vec![event_with_reminder("First", 5)])
            .await;
        scheduler
            .rebuild(vec![event_with_reminder("Second", 5)])
            .await;
        scheduler.rebuild(Vec::new()).await;

        assert_eq!(sink.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminder_due_without_permission_stays_silent() {
        let sink = Arc::new(RecordingSink {
            permission: StdMutex::new(NotificationPermission::Denied),
            requests: AtomicUsize::new(0),
            delivered: StdMutex::new(Vec::new()),
        });
        let scheduler = ReminderScheduler::new(sink.clone());

        scheduler
            .rebuild(vec![event_with_reminder("Quiet", 2)])
            .await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(sink.delivered().is_empty());
        assert_eq!(sink.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_follows_list_changes() {
        let sink = RecordingSink::granted();
        let scheduler = ReminderScheduler::new(sink.clone());
        let (sender, receiver) = watch::channel(vec![event_with_reminder("Dentist", 5)]);

        let handle = scheduler.run(receiver);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(scheduler.armed_timers().await, 1);

        sender.send_replace(Vec::new());
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(scheduler.armed_timers().await, 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(sink.delivered().is_empty());
        handle.abort();
    }
}
