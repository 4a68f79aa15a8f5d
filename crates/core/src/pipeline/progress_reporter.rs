use std::time::Instant;

/// Frame-count progress capability handed to each stage at construction.
///
/// The stage owns the calls: `start` once with the precomputed total,
/// `advance(1)` for every frame written, and `finish` exactly once when
/// the stage ends, on error paths too. Totals are advisory, so `advance`
/// may stop short of the total or run past it.
pub trait ProgressReporter: Send {
    fn start(&mut self, total: usize);

    fn advance(&mut self, n: usize);

    fn finish(&mut self);
}

/// Reporter that discards all events. Used in tests and wherever the
/// caller has its own progress surface.
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn start(&mut self, _total: usize) {}
    fn advance(&mut self, _n: usize) {}
    fn finish(&mut self) {}
}

/// Reporter that emits throttled `log::info!` lines plus a throughput
/// summary on finish.
///
/// Output is limited to every `throttle_frames` frames to avoid
/// excessive I/O on long videos.
pub struct LogProgressReporter {
    label: String,
    throttle_frames: usize,
    current: usize,
    total: usize,
    started: Option<Instant>,
}

impl LogProgressReporter {
    pub fn new(label: &str, throttle_frames: usize) -> Self {
        Self {
            label: label.to_string(),
            throttle_frames: throttle_frames.max(1),
            current: 0,
            total: 0,
            started: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl Default for LogProgressReporter {
    fn default() -> Self {
        Self::new("Processing", 25)
    }
}

impl ProgressReporter for LogProgressReporter {
    fn start(&mut self, total: usize) {
        self.current = 0;
        self.total = total;
        self.started = Some(Instant::now());
        log::info!("{}: 0/{total} frames", self.label);
    }

    fn advance(&mut self, n: usize) {
        self.current += n;
        if self.current % self.throttle_frames == 0 || self.current == self.total {
            if self.total > 0 {
                let pct = self.current as f64 / self.total as f64 * 100.0;
                log::info!(
                    "{}: {}/{} frames ({pct:.1}%)",
                    self.label,
                    self.current,
                    self.total
                );
            } else {
                log::info!("{}: {} frames", self.label, self.current);
            }
        }
    }

    fn finish(&mut self) {
        // take() makes a second finish a no-op
        let Some(started) = self.started.take() else {
            return;
        };
        let elapsed = started.elapsed().as_secs_f64();
        if elapsed > 0.0 && self.current > 0 {
            let fps = self.current as f64 / elapsed;
            log::info!(
                "{}: done, {} frames in {elapsed:.1}s ({fps:.1} fps)",
                self.label,
                self.current
            );
        } else {
            log::info!("{}: done, {} frames", self.label, self.current);
        }
    }
}
