use std::collections::VecDeque;
use std::time::Duration;

use super::popup::PopupRequest;

pub const DEFAULT_POPUP_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledPopup {
    due_at: Duration,
    request: PopupRequest,
}

/// Pop-ups waiting out the display delay.
///
/// Scheduling is one-shot: every request is handed back exactly once after
/// its delay has elapsed, in scheduling order. Nothing cancels a single
/// request; only replacing the whole session through `clear` drops them.
/// The request carries no geometry; the host measures anchor and viewport
/// when it finally shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupSchedule {
    delay: Duration,
    pending: VecDeque<ScheduledPopup>,
}

impl Default for PopupSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_POPUP_DELAY)
    }
}

impl PopupSchedule {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: VecDeque::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// `now` is the host clock (time since the session started).
    pub fn schedule(&mut self, request: PopupRequest, now: Duration) {
        self.pending.push_back(ScheduledPopup {
            due_at: now + self.delay,
            request,
        });
    }

    /// Next request whose delay has elapsed, if any.
    pub fn pop_due(&mut self, now: Duration) -> Option<PopupRequest> {
        if self.pending.front()?.due_at > now {
            return None;
        }
        self.pending.pop_front().map(|scheduled| scheduled.request)
    }

    /// Every request whose delay has elapsed.
    pub fn drain_due(&mut self, now: Duration) -> Vec<PopupRequest> {
        std::iter::from_fn(|| self.pop_due(now)).collect()
    }

    /// Drops every pending request. Used when a loaded save replaces the
    /// session the requests were raised for.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::PopupSchedule;
    use crate::tutorial::PopupRequest;

    #[test]
    fn requests_wait_for_the_delay() {
        let mut schedule = PopupSchedule::new(Duration::from_millis(800));
        schedule.schedule(PopupRequest::centered("hello"), Duration::from_secs(1));

        assert!(schedule.pop_due(Duration::from_millis(1_799)).is_none());
        let due = schedule
            .pop_due(Duration::from_millis(1_800))
            .expect("delay elapsed");
        assert_eq!(due.text, "hello");
        assert!(schedule.is_empty());
    }

    #[test]
    fn due_requests_come_back_in_order_exactly_once() {
        let mut schedule = PopupSchedule::default();
        schedule.schedule(PopupRequest::centered("first"), Duration::ZERO);
        schedule.schedule(PopupRequest::centered("second"), Duration::ZERO);
        schedule.schedule(PopupRequest::centered("later"), Duration::from_secs(5));

        let due = schedule.drain_due(Duration::from_secs(1));
        let texts = due.iter().map(|r| r.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(schedule.len(), 1);
        assert!(schedule.drain_due(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn clear_drops_pending_requests_but_keeps_the_delay() {
        let mut schedule = PopupSchedule::new(Duration::from_millis(300));
        schedule.schedule(PopupRequest::centered("stale"), Duration::ZERO);

        schedule.clear();

        assert!(schedule.is_empty());
        assert!(schedule.pop_due(Duration::from_secs(10)).is_none());
        assert_eq!(schedule.delay(), Duration::from_millis(300));

        schedule.schedule(PopupRequest::centered("fresh"), Duration::from_secs(10));
        let due = schedule
            .pop_due(Duration::from_millis(10_300))
            .expect("new requests still arrive");
        assert_eq!(due.text, "fresh");
    }
}
