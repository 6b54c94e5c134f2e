//! Owns the compass lifecycle for the qibla view: start the sensor
//! when the view appears, feed the engine while it is on screen, stop
//! everything the moment it goes away. The sensor must never outlive
//! the view, so the stop path is idempotent and also runs on drop.

use std::time::Instant;

use crate::qibla::engine::{CompassState, QiblaEngine};
use crate::sensors::{Haptics, HeadingSource};

pub struct QiblaSession {
    engine: QiblaEngine,
    source: Box<dyn HeadingSource>,
    haptics: Box<dyn Haptics>,
    active: bool,
    last_state: CompassState,
}

impl QiblaSession {
    pub fn new(
        engine: QiblaEngine,
        source: Box<dyn HeadingSource>,
        haptics: Box<dyn Haptics>,
    ) -> Self {
        Self {
            engine,
            source,
            haptics,
            active: false,
            // Nothing sampled yet, so the prompt is the honest default.
            last_state: CompassState::Calibrating,
        }
    }

    /// View became visible. Safe to call when already running.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.source.start();
        self.active = true;
        log::debug!("compass started, bearing {:.1}°", self.engine.bearing());
    }

    /// View left the screen. Stops the sensor and cancels any buzz
    /// still playing. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.source.stop();
        self.haptics.stop();
        self.active = false;
        self.last_state = CompassState::Calibrating;
        log::debug!("compass stopped");
    }

    /// Pump one frame: pull a sample, run the engine, fire the haptic
    /// when asked. Ticks while stopped return the idle state without
    /// touching the sensor.
    pub fn tick(&mut self, now: Instant) -> CompassState {
        if !self.active {
            return self.last_state;
        }
        if let Some(sample) = self.source.sample() {
            let update = self.engine.update(sample, now);
            if update.pulse {
                self.haptics.pulse();
            }
            self.last_state = update.state;
        }
        self.last_state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bearing(&self) -> f64 {
        self.engine.bearing()
    }

    pub fn direction(&self) -> &'static str {
        self.engine.direction()
    }
}

impl Drop for QiblaSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::CompassSample;
    use crate::qibla::engine::DisplayMetrics;
    use crate::sensors::{MockCompass, MockHaptics};

    fn session(bearing: f64) -> (QiblaSession, MockCompass, MockHaptics) {
        let compass = MockCompass::new();
        let haptics = MockHaptics::new();
        let engine = QiblaEngine::from_bearing(bearing, DisplayMetrics::new(480.0, 480.0, 20.0, 180.0));
        let s = QiblaSession::new(engine, Box::new(compass.clone()), Box::new(haptics.clone()));
        (s, compass, haptics)
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let (mut s, compass, _) = session(0.0);

        s.start();
        s.start();
        assert_eq!(compass.start_count(), 1);

        s.stop();
        s.stop();
        assert_eq!(compass.stop_count(), 1);
    }

    #[test]
    fn test_tick_fires_haptic_on_alignment() {
        let (mut s, compass, haptics) = session(0.0);
        compass.push(CompassSample::valid(90.0));
        compass.push(CompassSample::valid(2.0));

        s.start();
        let t0 = Instant::now();
        s.tick(t0);
        assert_eq!(haptics.pulse_count(), 0);

        let state = s.tick(t0 + Duration::from_millis(100));
        assert_eq!(haptics.pulse_count(), 1);
        assert!(matches!(state, CompassState::Tracking(f) if f.facing));
    }

    #[test]
    fn test_tick_without_sample_keeps_last_state() {
        let (mut s, compass, _) = session(0.0);
        compass.push(CompassSample::valid(30.0));

        s.start();
        let t0 = Instant::now();
        let tracked = s.tick(t0);
        assert!(matches!(tracked, CompassState::Tracking(_)));

        // Queue is empty now; the view keeps drawing the last frame.
        let held = s.tick(t0 + Duration::from_millis(100));
        assert_eq!(held, tracked);
    }

    #[test]
    fn test_stop_cancels_haptics_and_resets_state() {
        let (mut s, compass, haptics) = session(0.0);
        compass.push(CompassSample::valid(0.0));

        s.start();
        s.tick(Instant::now());
        assert_eq!(haptics.pulse_count(), 1);

        s.stop();
        assert_eq!(haptics.stop_count(), 1);
        assert_eq!(s.tick(Instant::now()), CompassState::Calibrating);
    }

    #[test]
    fn test_inactive_session_never_samples() {
        let (mut s, compass, _) = session(0.0);
        compass.push(CompassSample::valid(0.0));

        assert_eq!(s.tick(Instant::now()), CompassState::Calibrating);
        // The queued sample is still there: tick never reached the source.
        assert_eq!(compass.start_count(), 0);
    }

    #[test]
    fn test_drop_stops_the_sensor() {
        let (mut s, compass, _) = session(0.0);
        s.start();
        drop(s);
        assert_eq!(compass.stop_count(), 1);
    }
}
