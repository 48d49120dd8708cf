use std::time::Duration;
use tokio::time::Instant;

/// Quiet-period debounce for the search box. Every input change restarts
/// the timer; the value only settles once the full period elapses without
/// another change. The empty string is a valid settled value (it maps to
/// the popular-movies listing).
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<String>,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            deadline: None,
        }
    }

    /// Record a new input value and restart the quiet-period timer.
    pub fn update(&mut self, value: String) {
        self.pending = Some(value);
        self.deadline = Some(Instant::now() + self.quiet_period);
    }

    /// The instant at which the pending value settles, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Take the settled value once the quiet period has elapsed. Returns
    /// none while a change is still inside the quiet period.
    pub fn take_settled(&mut self) -> Option<String> {
        let deadline = self.deadline?;
        if Instant::now() < deadline {
            return None;
        }
        self.deadline = None;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn rapid_changes_collapse_to_last_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.update("d".to_string());
        advance(Duration::from_millis(200)).await;
        assert!(debouncer.take_settled().is_none());

        debouncer.update("du".to_string());
        advance(Duration::from_millis(400)).await;
        assert!(debouncer.take_settled().is_none());

        debouncer.update("dune".to_string());
        advance(Duration::from_millis(500)).await;

        assert_eq!(debouncer.take_settled(), Some("dune".to_string()));
        assert!(debouncer.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_string_settles() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.update(String::new());
        advance(Duration::from_millis(500)).await;

        assert_eq!(debouncer.take_settled(), Some(String::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_settles_without_input() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        assert!(debouncer.deadline().is_none());
        advance(Duration::from_secs(10)).await;
        assert!(debouncer.take_settled().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn settling_is_one_shot() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.update("alien".to_string());
        advance(Duration::from_millis(500)).await;

        assert!(debouncer.take_settled().is_some());
        assert!(debouncer.take_settled().is_none());
        assert!(debouncer.deadline().is_none());
    }
}
