//! Delayed one-shot tasks advanced by real time.
//!
//! Gun decay, respawn and camera shake are modeled as [`DelayedTask`]s
//! owned by whoever started them. Cancellation is a state transition.

use starlance_core::enums::TaskState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayedTask {
    state: TaskState,
    duration: f64,
    elapsed: f64,
}

impl DelayedTask {
    /// A task that begins counting on its first `advance`.
    pub fn new(duration: f64) -> Self {
        Self {
            state: TaskState::Pending,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// A task that is already running.
    pub fn started(duration: f64) -> Self {
        Self {
            state: TaskState::Active,
            ..Self::new(duration)
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Pending or Active.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TaskState::Pending | TaskState::Active)
    }

    /// Fraction of the duration elapsed, in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Cancel a running task. Finished tasks are left as they are.
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.state = TaskState::Cancelled;
        }
    }

    /// Advance by `dt` real seconds. Returns true on the call that completes it.
    pub fn advance(&mut self, dt: f64) -> bool {
        match self.state {
            TaskState::Pending => self.state = TaskState::Active,
            TaskState::Active => {}
            TaskState::Cancelled | TaskState::Completed => return false,
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = TaskState::Completed;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_completes_once() {
        let mut task = DelayedTask::new(0.1);
        assert_eq!(task.state(), TaskState::Pending);
        assert!(!task.advance(0.05));
        assert_eq!(task.state(), TaskState::Active);
        assert!(task.advance(0.05));
        assert_eq!(task.state(), TaskState::Completed);
        assert!(!task.advance(0.05));
        assert_eq!(task.progress(), 1.0);
    }

    #[test]
    fn test_cancelled_task_never_completes() {
        let mut task = DelayedTask::started(1.0);
        task.advance(0.5);
        task.cancel();
        assert_eq!(task.state(), TaskState::Cancelled);
        assert!(!task.advance(10.0));
        assert!((task.progress() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cancel_after_completion_is_noop() {
        let mut task = DelayedTask::started(0.0);
        assert!(task.advance(0.0));
        task.cancel();
        assert_eq!(task.state(), TaskState::Completed);
    }
}
