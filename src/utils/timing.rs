//! Timing helpers for the load comparisons.

use log::{debug, info};
use std::time::{Duration, Instant};

/// A timer for measuring operation durations
#[derive(Debug)]
pub struct Timer {
    start_time: Instant,
    operation_name: String,
    checkpoints: Vec<(String, Instant)>,
}

impl Timer {
    pub fn start(operation_name: &str) -> Self {
        debug!("⏱️ Starting timer for: {}", operation_name);
        Self {
            start_time: Instant::now(),
            operation_name: operation_name.to_string(),
            checkpoints: Vec::new(),
        }
    }

    /// Add a checkpoint to track intermediate timing
    pub fn checkpoint(&mut self, checkpoint_name: &str) {
        let now = Instant::now();
        self.checkpoints.push((checkpoint_name.to_string(), now));
        debug!(
            "📍 {} - {}: {:.3}ms",
            self.operation_name,
            checkpoint_name,
            now.duration_since(self.start_time).as_secs_f64() * 1000.0
        );
    }

    /// Time from the previous checkpoint (or the start) to `name`.
    pub fn lap(&self, name: &str) -> Option<Duration> {
        let idx = self.checkpoints.iter().position(|(n, _)| n == name)?;
        let previous = match idx {
            0 => self.start_time,
            i => self.checkpoints[i - 1].1,
        };
        Some(self.checkpoints[idx].1.duration_since(previous))
    }

    /// Finish the timer and log the total duration
    pub fn finish(self) -> Duration {
        let total_duration = self.start_time.elapsed();
        info!(
            "🕐 {} completed in {:.3}ms",
            self.operation_name,
            total_duration.as_secs_f64() * 1000.0
        );

        let mut last_time = self.start_time;
        for (name, time) in &self.checkpoints {
            info!(
                "   └─ {}: {:.3}ms",
                name,
                time.duration_since(last_time).as_secs_f64() * 1000.0
            );
            last_time = *time;
        }

        total_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_split_the_total() {
        let mut timer = Timer::start("load");
        std::thread::sleep(Duration::from_millis(5));
        timer.checkpoint("read");
        std::thread::sleep(Duration::from_millis(5));
        timer.checkpoint("cache");

        let read = timer.lap("read").unwrap();
        let cache = timer.lap("cache").unwrap();
        assert!(read >= Duration::from_millis(5));
        assert!(cache >= Duration::from_millis(5));
        assert_eq!(timer.lap("missing"), None);

        let total = timer.finish();
        assert!(total >= read + cache);
    }
}
