use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub const CELEBRATION_DURATION: Duration = Duration::from_secs(3);

#[derive(Default)]
struct TimerState {
    active: bool,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Triggering while already active cancels the pending reset and starts a
/// fresh window instead of stacking timers.
#[derive(Clone)]
pub struct Celebration {
    duration: Duration,
    state: Arc<Mutex<TimerState>>,
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new(CELEBRATION_DURATION)
    }
}

impl Celebration {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: Arc::new(Mutex::new(TimerState::default())),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn trigger(&self) {
        let mut state = self.state.lock();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation = state.generation.wrapping_add(1);
        state.active = true;

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let duration = self.duration;
        state.timer = Some(tokio::spawn(async move {
            sleep(duration).await;
            let mut state = shared.lock();
            // a newer trigger owns the flag now
            if state.generation == generation {
                state.active = false;
                state.timer = None;
            }
        }));
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn clears_after_three_seconds() {
        let celebration = Celebration::default();
        assert!(!celebration.is_active());

        celebration.trigger();
        assert!(celebration.is_active());

        sleep(Duration::from_millis(2_900)).await;
        assert!(celebration.is_active());

        sleep(Duration::from_millis(200)).await;
        assert!(!celebration.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_resets_the_window() {
        let celebration = Celebration::default();
        celebration.trigger();
        sleep(Duration::from_secs(2)).await;

        celebration.trigger();
        sleep(Duration::from_secs(2)).await;
        assert!(celebration.is_active());

        sleep(Duration::from_millis(1_100)).await;
        assert!(!celebration.is_active());
    }
}
