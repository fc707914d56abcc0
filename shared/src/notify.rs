use std::collections::VecDeque;

/// Where transient error messages go. The core never reads anything back.
pub trait NotificationSink {
    fn show(&mut self, message: &str, duration_ms: u32);
}

/// Recording sink, handy for tests and headless drivers.
impl NotificationSink for Vec<(String, u32)> {
    fn show(&mut self, message: &str, duration_ms: u32) {
        self.push((message.to_string(), duration_ms));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub duration_ms: u32,
}

/// FIFO of visible toasts. The front end arms one expiry timer per toast
/// returned by [`ToastQueue::take_unscheduled`] and calls
/// [`ToastQueue::dismiss`] when it fires.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    next_id: u64,
    scheduled_up_to: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn take_unscheduled(&mut self) -> Vec<Toast> {
        let fresh: Vec<Toast> = self
            .toasts
            .iter()
            .filter(|t| t.id > self.scheduled_up_to)
            .cloned()
            .collect();
        self.scheduled_up_to = self.next_id;
        fresh
    }
}

impl NotificationSink for ToastQueue {
    fn show(&mut self, message: &str, duration_ms: u32) {
        self.next_id += 1;
        log::debug!("toast #{}: {}", self.next_id, message);
        self.toasts.push_back(Toast {
            id: self.next_id,
            message: message.to_string(),
            duration_ms,
        });
    }
}
