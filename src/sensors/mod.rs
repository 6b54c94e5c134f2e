//! Seams for the two hardware effects the compass needs: a heading
//! source and a haptic motor. Real terminals have neither, so the
//! default implementations simulate a wrist (arrow keys steer the
//! heading) and map the pulse to the terminal bell. Mocks live here
//! too so integration tests can script readings.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::models::CompassSample;

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Source of compass headings. `sample` returns `None` when no reading
/// is available this tick (stopped, or nothing new from the device).
pub trait HeadingSource: Send {
    fn start(&mut self);
    fn stop(&mut self);
    fn sample(&mut self) -> Option<CompassSample>;
}

/// One short buzz. `stop` cancels anything still playing; both must be
/// safe to call at any time, in any order.
pub trait Haptics: Send {
    fn pulse(&mut self);
    fn stop(&mut self);
}

// ─── Simulated compass ───────────────────────────────────────────────────────

/// Hand-steered heading for terminal use. Cloned handles share state,
/// so the UI can keep one for key handling while the session owns the
/// other as its `HeadingSource`.
#[derive(Debug, Clone)]
pub struct SimulatedCompass {
    inner: Arc<Mutex<SimulatedState>>,
}

#[derive(Debug)]
struct SimulatedState {
    heading: f64,
    calibrated: bool,
    running: bool,
}

impl SimulatedCompass {
    pub fn new(initial_heading: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SimulatedState {
                heading: initial_heading.rem_euclid(360.0),
                calibrated: true,
                running: false,
            })),
        }
    }

    /// Turn the simulated wrist by `delta` degrees (negative = left).
    pub fn rotate(&self, delta: f64) {
        let mut state = self.inner.lock().unwrap();
        state.heading = (state.heading + delta).rem_euclid(360.0);
    }

    /// Flip between calibrated and uncalibrated readings.
    pub fn toggle_calibration(&self) {
        let mut state = self.inner.lock().unwrap();
        state.calibrated = !state.calibrated;
    }

    pub fn heading(&self) -> f64 {
        self.inner.lock().unwrap().heading
    }

    pub fn is_calibrated(&self) -> bool {
        self.inner.lock().unwrap().calibrated
    }
}

impl HeadingSource for SimulatedCompass {
    fn start(&mut self) {
        self.inner.lock().unwrap().running = true;
    }

    fn stop(&mut self) {
        self.inner.lock().unwrap().running = false;
    }

    fn sample(&mut self) -> Option<CompassSample> {
        let state = self.inner.lock().unwrap();
        if !state.running {
            return None;
        }
        if !state.calibrated {
            return Some(CompassSample::uncalibrated());
        }
        Some(CompassSample::valid(state.heading))
    }
}

// ─── Terminal haptics ────────────────────────────────────────────────────────

/// Maps the haptic pulse to the terminal bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn pulse(&mut self) {
        use std::io::Write;
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }

    fn stop(&mut self) {}
}

// ─── Mocks ───────────────────────────────────────────────────────────────────

/// Scripted heading source for tests: replays a queue of samples, then
/// goes quiet.
#[derive(Debug, Clone, Default)]
pub struct MockCompass {
    inner: Arc<Mutex<MockCompassState>>,
}

#[derive(Debug, Default)]
struct MockCompassState {
    queue: VecDeque<CompassSample>,
    starts: usize,
    stops: usize,
}

impl MockCompass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, sample: CompassSample) {
        self.inner.lock().unwrap().queue.push_back(sample);
    }

    pub fn start_count(&self) -> usize {
        self.inner.lock().unwrap().starts
    }

    pub fn stop_count(&self) -> usize {
        self.inner.lock().unwrap().stops
    }
}

impl HeadingSource for MockCompass {
    fn start(&mut self) {
        self.inner.lock().unwrap().starts += 1;
    }

    fn stop(&mut self) {
        self.inner.lock().unwrap().stops += 1;
    }

    fn sample(&mut self) -> Option<CompassSample> {
        self.inner.lock().unwrap().queue.pop_front()
    }
}

/// Records pulses instead of buzzing.
#[derive(Debug, Clone, Default)]
pub struct MockHaptics {
    inner: Arc<Mutex<MockHapticsState>>,
}

#[derive(Debug, Default)]
struct MockHapticsState {
    pulses: usize,
    stops: usize,
}

impl MockHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulse_count(&self) -> usize {
        self.inner.lock().unwrap().pulses
    }

    pub fn stop_count(&self) -> usize {
        self.inner.lock().unwrap().stops
    }
}

impl Haptics for MockHaptics {
    fn pulse(&mut self) {
        self.inner.lock().unwrap().pulses += 1;
    }

    fn stop(&mut self) {
        self.inner.lock().unwrap().stops += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_compass_wraps_heading() {
        let compass = SimulatedCompass::new(350.0);
        compass.rotate(15.0);
        assert_eq!(compass.heading(), 5.0);
        compass.rotate(-10.0);
        assert_eq!(compass.heading(), 355.0);
    }

    #[test]
    fn test_simulated_compass_silent_until_started() {
        let mut compass = SimulatedCompass::new(90.0);
        assert!(compass.sample().is_none());

        compass.start();
        let sample = compass.sample().unwrap();
        assert_eq!(sample.heading, Some(90.0));
        assert!(sample.calibrated);

        compass.stop();
        assert!(compass.sample().is_none());
    }

    #[test]
    fn test_simulated_compass_reports_uncalibrated() {
        let mut compass = SimulatedCompass::new(90.0);
        compass.start();
        compass.toggle_calibration();

        let sample = compass.sample().unwrap();
        assert!(!sample.calibrated);
        assert_eq!(sample.heading, None);
    }

    #[test]
    fn test_mock_compass_replays_queue_in_order() {
        let mut compass = MockCompass::new();
        compass.push(CompassSample::valid(10.0));
        compass.push(CompassSample::uncalibrated());

        assert_eq!(compass.sample().unwrap().heading, Some(10.0));
        assert!(!compass.sample().unwrap().calibrated);
        assert!(compass.sample().is_none());
    }

    #[test]
    fn test_mock_haptics_counts_pulses() {
        let mut haptics = MockHaptics::new();
        haptics.pulse();
        haptics.pulse();
        haptics.stop();

        assert_eq!(haptics.pulse_count(), 2);
        assert_eq!(haptics.stop_count(), 1);
    }
}
