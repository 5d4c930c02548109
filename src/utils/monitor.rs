use chrono::{DateTime, Local};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PhaseTiming {
    pub phase: String,
    pub elapsed: Duration,
}

/// Wall-clock bookkeeping for one smoke run.
pub struct RunMonitor {
    started_at: DateTime<Local>,
    start_time: Instant,
    last_mark: Mutex<Instant>,
    phases: Mutex<Vec<PhaseTiming>>,
    enabled: bool,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            started_at: Local::now(),
            start_time: now,
            last_mark: Mutex::new(now),
            phases: Mutex::new(Vec::new()),
            enabled,
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Records the time spent since the previous mark under `phase`.
    pub fn mark(&self, phase: &str) {
        let now = Instant::now();
        let elapsed = match self.last_mark.lock() {
            Ok(mut last) => {
                let elapsed = now.duration_since(*last);
                *last = now;
                elapsed
            }
            Err(_) => return,
        };

        if let Ok(mut phases) = self.phases.lock() {
            phases.push(PhaseTiming {
                phase: phase.to_string(),
                elapsed,
            });
        }

        if self.enabled {
            tracing::info!("📊 {} took {:.1}s", phase, elapsed.as_secs_f64());
        }
    }

    pub fn phases(&self) -> Vec<PhaseTiming> {
        self.phases
            .lock()
            .map(|phases| phases.clone())
            .unwrap_or_default()
    }

    pub fn log_final_stats(&self) {
        tracing::info!("⏱️ Total time: {:?}", self.elapsed());
        if self.enabled {
            for timing in self.phases() {
                tracing::info!("📊   {}: {:?}", timing.phase, timing.elapsed);
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_are_recorded_in_order() {
        let monitor = RunMonitor::new(false);
        monitor.mark("setup");
        monitor.mark("test");
        let phases: Vec<String> = monitor.phases().into_iter().map(|p| p.phase).collect();
        assert_eq!(phases, vec!["setup", "test"]);
        assert!(!monitor.is_enabled());
    }

    #[test]
    fn test_elapsed_grows() {
        let monitor = RunMonitor::new(true);
        std::thread::sleep(Duration::from_millis(5));
        assert!(monitor.elapsed() >= Duration::from_millis(5));
        assert!(monitor.started_at() <= Local::now());
    }
}
