//! Time facilities for the frame loop.
//!
//! [`Time`] counts frames per second for the window title. [`Interval`] is a
//! recurring timer driven by explicit instants, so it can be polled once per
//! frame and tested without sleeping.
//!
//! # Example
//!
//! ```ignore
//! use glowtrail::time::Interval;
//! use std::time::{Duration, Instant};
//!
//! let mut themes = Interval::new(Duration::from_secs(6), Instant::now());
//!
//! // In the frame loop:
//! if themes.poll(Instant::now()) {
//!     registry.advance();
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame-rate counter for the window title.
///
/// FPS is resampled every half second from the frames counted since the
/// previous sample.
#[derive(Debug)]
pub struct Time {
    /// Total frames since start.
    frame_count: u64,
    /// Frames per second at the last sample.
    fps: f32,
    /// Frame count at the last sample.
    sample_frame: u64,
    /// When the last sample was taken.
    sample_time: Instant,
    /// How often to resample.
    sample_interval: Duration,
}

impl Time {
    /// Create a counter starting from now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            frame_count: 0,
            fps: 0.0,
            sample_frame: 0,
            sample_time: now,
            sample_interval: Duration::from_millis(500),
        }
    }

    /// Count a frame. Call once per frame.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        self.frame_count += 1;

        let since = now.duration_since(self.sample_time);
        if since >= self.sample_interval {
            let frames = self.frame_count - self.sample_frame;
            self.fps = frames as f32 / since.as_secs_f32();
            self.sample_frame = self.frame_count;
            self.sample_time = now;
        }
    }

    /// Frames per second at the last sample.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// A recurring timer.
///
/// Fires at most once per [`poll`](Interval::poll) and re-arms one full
/// period after the instant it fired, so a long stall delays the next
/// firing instead of producing a burst.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    /// Create a timer that first fires one `period` after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// Returns `true` if the timer is due, and re-arms it.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.period;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_zero_before_first_sample() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        assert_eq!(time.fps(), 0.0);
        time.update_at(start + Duration::from_millis(100));
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn test_fps_after_interval() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        for i in 1..=30 {
            time.update_at(start + Duration::from_millis(i * 20));
        }
        // 30 frames over 600ms, FPS sampled at the first frame past 500ms
        assert!((time.fps() - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_interval_fires_after_period() {
        let start = Instant::now();
        let mut interval = Interval::new(Duration::from_millis(6000), start);

        assert!(!interval.poll(start));
        assert!(!interval.poll(start + Duration::from_millis(5999)));
        assert!(interval.poll(start + Duration::from_millis(6000)));
        assert!(!interval.poll(start + Duration::from_millis(6001)));
    }

    #[test]
    fn test_interval_rearms_from_firing_time() {
        let start = Instant::now();
        let mut interval = Interval::new(Duration::from_secs(5), start);

        // Stall for three periods: fires once, then waits a full period
        let late = start + Duration::from_secs(15);
        assert!(interval.poll(late));
        assert!(!interval.poll(late + Duration::from_secs(4)));
        assert!(interval.poll(late + Duration::from_secs(5)));
    }
}
