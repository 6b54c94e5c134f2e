//! Heading-to-frame state machine for the compass view.
//!
//! The engine is caller-driven: feed it sensor samples with an
//! explicit `now` and it hands back what to draw plus whether to fire
//! the haptic pulse. No clocks or devices inside, which keeps the
//! facing/debounce rules testable to the millisecond.

use std::time::{Duration, Instant};

use crate::models::CompassSample;
use crate::qibla::bearing::{direction_label, qibla_bearing};

/// Within this many degrees of the target counts as facing it.
pub const FACING_TOLERANCE_DEG: f64 = 5.0;

/// Minimum gap between confirmation pulses.
pub const PULSE_DEBOUNCE: Duration = Duration::from_millis(2000);

pub const CALIBRATION_PROMPT: &str = "Rotate your wrist in a figure-8 to calibrate the compass";

/// Geometry of the rendering surface the dot orbits on. The dot is
/// positioned by its top-left corner, hence the half-size offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub width: f64,
    pub height: f64,
    pub dot_size: f64,
    pub orbit_radius: f64,
}

impl DisplayMetrics {
    pub const fn new(width: f64, height: f64, dot_size: f64, orbit_radius: f64) -> Self {
        Self { width, height, dot_size, orbit_radius }
    }
}

/// One rendered instant of the compass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaFrame {
    /// Where the target sits relative to the wearer's facing, degrees
    /// clockwise from straight ahead.
    pub arrow_angle: f64,
    /// Rotation that keeps the cardinal ring aligned with the world.
    pub ring_angle: f64,
    pub dot_x: i32,
    pub dot_y: i32,
    pub facing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompassState {
    /// Sensor unusable; show the figure-8 prompt, hide the geometry.
    Calibrating,
    Tracking(QiblaFrame),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassUpdate {
    pub state: CompassState,
    /// Fire the haptic now. Set on entering the facing cone, rate
    /// limited; never set while calibrating.
    pub pulse: bool,
}

pub struct QiblaEngine {
    bearing: f64,
    metrics: DisplayMetrics,
    facing: bool,
    last_pulse: Option<Instant>,
}

impl QiblaEngine {
    pub fn new(latitude: f64, longitude: f64, metrics: DisplayMetrics) -> Self {
        Self::from_bearing(qibla_bearing(latitude, longitude), metrics)
    }

    /// Build around a precomputed bearing (simulators, tests).
    pub fn from_bearing(bearing: f64, metrics: DisplayMetrics) -> Self {
        Self {
            bearing: bearing.rem_euclid(360.0),
            metrics,
            facing: false,
            last_pulse: None,
        }
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn direction(&self) -> &'static str {
        direction_label(self.bearing)
    }

    /// Digest one sensor sample. An uncalibrated or invalid reading
    /// flips the view to `Calibrating` without touching the facing
    /// latch or the pulse clock, so a sensor glitch mid-alignment
    /// cannot re-trigger the buzz.
    pub fn update(&mut self, sample: CompassSample, now: Instant) -> CompassUpdate {
        let heading = match sample.heading {
            Some(h) if sample.calibrated && h.is_finite() => h,
            _ => {
                return CompassUpdate {
                    state: CompassState::Calibrating,
                    pulse: false,
                };
            }
        };

        let frame = self.frame_for(heading);

        let mut pulse = false;
        if frame.facing && !self.facing {
            let debounced = self
                .last_pulse
                .is_none_or(|last| now.duration_since(last) > PULSE_DEBOUNCE);
            if debounced {
                pulse = true;
                self.last_pulse = Some(now);
            }
        }
        self.facing = frame.facing;

        CompassUpdate {
            state: CompassState::Tracking(frame),
            pulse,
        }
    }

    fn frame_for(&self, heading: f64) -> QiblaFrame {
        let arrow_angle = (self.bearing - heading).rem_euclid(360.0);
        let ring_angle = (360.0 - heading).rem_euclid(360.0);

        // 0° points straight up, so the orbit angle is shifted a
        // quarter turn before the usual cos/sin placement.
        let theta = (arrow_angle - 90.0).to_radians();
        let center_x = self.metrics.width / 2.0 - self.metrics.dot_size / 2.0;
        let center_y = self.metrics.height / 2.0 - self.metrics.dot_size / 2.0;
        let dot_x = (center_x + self.metrics.orbit_radius * theta.cos()).round() as i32;
        let dot_y = (center_y + self.metrics.orbit_radius * theta.sin()).round() as i32;

        let deviation = if arrow_angle <= 180.0 {
            arrow_angle
        } else {
            360.0 - arrow_angle
        };

        QiblaFrame {
            arrow_angle,
            ring_angle,
            dot_x,
            dot_y,
            facing: deviation < FACING_TOLERANCE_DEG,
        }
    }
}
