/// Coalesces work requested several times between two frames into a single
/// run. Only the most recent request survives.
#[derive(Debug, Clone)]
pub struct FrameScheduler<T> {
    pending: Option<T>,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` for the next frame, replacing anything still pending.
    /// Returns `true` when nothing was pending yet.
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending.replace(value).is_none()
    }

    /// Drop the pending request without running it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Hand out the request for this frame.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_request_wins() {
        let mut scheduler = FrameScheduler::new();
        assert!(scheduler.schedule(1));
        assert!(!scheduler.schedule(2));
        assert!(!scheduler.schedule(3));
        assert_eq!(scheduler.take(), Some(3));
        assert_eq!(scheduler.take(), None);
    }

    #[test]
    fn cancel_drops_pending() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule("scroll");
        assert_eq!(scheduler.cancel(), Some("scroll"));
        assert_eq!(scheduler.take(), None);
        assert!(scheduler.schedule("again"));
    }
}
