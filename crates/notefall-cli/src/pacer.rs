use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Fixed-rate frame pacing with a stop flag.
///
/// Frames are scheduled against deadlines rather than slept back to back, so
/// time spent inside a frame does not stretch the frame period. The frame
/// loop, the keyboard reader and the ctrl-c handler share one pacer; stopping
/// it wakes a pending frame wait immediately.
pub struct FramePacer {
    period: Duration,
    stopped: AtomicBool,
    /// Deadline of the next frame
    deadline: Mutex<Instant>,
    wake: Condvar,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            stopped: AtomicBool::new(false),
            deadline: Mutex::new(Instant::now() + period),
            wake: Condvar::new(),
        }
    }

    pub fn from_rate(frames_per_second: f64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / frames_per_second))
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.wake.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Block until the next frame is due.
    ///
    /// Returns `false` once the pacer is stopped. A loop that fell more than
    /// a frame behind starts counting again from now instead of bursting.
    pub fn next_frame(&self) -> bool {
        if self.is_stopped() {
            return false;
        }

        let Ok(guard) = self.deadline.lock() else {
            return false;
        };
        let due = *guard;
        let timeout = due.saturating_duration_since(Instant::now());
        let Ok((mut deadline, _)) = self
            .wake
            .wait_timeout_while(guard, timeout, |_| !self.is_stopped())
        else {
            return false;
        };
        if self.is_stopped() {
            return false;
        }

        let now = Instant::now();
        *deadline = (due + self.period).max(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_frames_follow_the_period() {
        let start = Instant::now();
        let pacer = FramePacer::new(Duration::from_millis(20));
        for _ in 0..3 {
            assert!(pacer.next_frame());
        }
        assert!(start.elapsed() >= Duration::from_millis(60));
        assert!(!pacer.is_stopped());
    }

    #[test]
    fn test_slow_frame_is_not_added_to_the_period() {
        let start = Instant::now();
        let pacer = FramePacer::new(Duration::from_millis(50));
        // Work inside the frame eats most of the period
        thread::sleep(Duration::from_millis(40));
        assert!(pacer.next_frame());
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(85));
    }

    #[test]
    fn test_stop_interrupts_frame_wait() {
        let pacer = Arc::new(FramePacer::new(Duration::from_secs(10)));
        let frame_loop = Arc::clone(&pacer);

        let handle = thread::spawn(move || {
            let start = Instant::now();
            (frame_loop.next_frame(), start.elapsed())
        });

        thread::sleep(Duration::from_millis(50));
        pacer.stop();

        let (running, elapsed) = handle.join().unwrap();
        assert!(!running);
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn test_stopped_pacer_returns_immediately() {
        let pacer = FramePacer::from_rate(0.1);
        pacer.stop();
        let start = Instant::now();
        assert!(!pacer.next_frame());
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
