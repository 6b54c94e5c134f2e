//! End-to-end compass flow: heading samples go in, display frames and
//! haptic pulses come out.

use std::time::{Duration, Instant};

use mihrab::models::CompassSample;
use mihrab::qibla::{CompassState, DisplayMetrics, QiblaEngine, QiblaSession};
use mihrab::sensors::{MockCompass, MockHaptics};

const METRICS: DisplayMetrics = DisplayMetrics::new(480.0, 480.0, 20.0, 180.0);

/// Session around a fixed 100° bearing with scripted sensor input.
fn scripted_session() -> (QiblaSession, MockCompass, MockHaptics) {
    let source = MockCompass::new();
    let haptics = MockHaptics::new();
    let engine = QiblaEngine::from_bearing(100.0, METRICS);
    let session = QiblaSession::new(engine, Box::new(source.clone()), Box::new(haptics.clone()));
    (session, source, haptics)
}

fn tracking_frame(state: CompassState) -> mihrab::qibla::QiblaFrame {
    match state {
        CompassState::Tracking(frame) => frame,
        CompassState::Calibrating => panic!("expected tracking state, got calibrating"),
    }
}

/// A wrist sweep: uncalibrated, then far off target, then aligned.
/// Crossing into the cone pulses exactly once.
#[test]
fn test_sweep_onto_qibla_pulses_once() {
    let (mut session, source, haptics) = scripted_session();
    session.start();
    let t0 = Instant::now();

    source.push(CompassSample::uncalibrated());
    assert!(matches!(session.tick(t0), CompassState::Calibrating));

    source.push(CompassSample::valid(60.0));
    let frame = tracking_frame(session.tick(t0 + Duration::from_millis(500)));
    assert!(!frame.facing, "40° off target is not facing");
    assert_eq!(frame.arrow_angle, 40.0);
    assert_eq!(haptics.pulse_count(), 0);

    source.push(CompassSample::valid(98.0));
    let frame = tracking_frame(session.tick(t0 + Duration::from_millis(1000)));
    assert!(frame.facing);
    assert_eq!(haptics.pulse_count(), 1, "entering the cone pulses");

    source.push(CompassSample::valid(99.5));
    let frame = tracking_frame(session.tick(t0 + Duration::from_millis(1400)));
    assert!(frame.facing);
    assert_eq!(haptics.pulse_count(), 1, "staying inside must not re-pulse");
}

/// Oscillating across the cone edge cannot buzz faster than the
/// debounce window.
#[test]
fn test_fast_reentry_is_debounced() {
    let (mut session, source, haptics) = scripted_session();
    session.start();
    let t0 = Instant::now();

    source.push(CompassSample::valid(100.0));
    session.tick(t0);
    assert_eq!(haptics.pulse_count(), 1);

    source.push(CompassSample::valid(140.0));
    session.tick(t0 + Duration::from_millis(600));

    source.push(CompassSample::valid(100.0));
    session.tick(t0 + Duration::from_millis(1200));
    assert_eq!(haptics.pulse_count(), 1, "re-entry inside 2s is swallowed");

    source.push(CompassSample::valid(140.0));
    session.tick(t0 + Duration::from_millis(1600));

    source.push(CompassSample::valid(100.0));
    session.tick(t0 + Duration::from_millis(2100));
    assert_eq!(haptics.pulse_count(), 2, "re-entry after 2s pulses again");
}

/// When the sensor produces nothing the session keeps showing the last
/// frame instead of flashing back to the calibration screen.
#[test]
fn test_sensor_dropout_holds_last_frame() {
    let (mut session, source, _haptics) = scripted_session();
    session.start();
    let t0 = Instant::now();

    source.push(CompassSample::valid(98.0));
    let frame = tracking_frame(session.tick(t0));
    assert!(frame.facing);

    // Queue is empty now; the next ticks read nothing.
    let frame = tracking_frame(session.tick(t0 + Duration::from_millis(500)));
    assert!(frame.facing);
    let frame = tracking_frame(session.tick(t0 + Duration::from_millis(1000)));
    assert_eq!(frame.arrow_angle, 2.0);
}

#[test]
fn test_start_is_idempotent() {
    let (mut session, source, _haptics) = scripted_session();
    session.start();
    session.start();
    assert_eq!(source.start_count(), 1);
    assert!(session.is_active());
}

/// Stop silences the motor, releases the sensor, and resets the view
/// for the next activation.
#[test]
fn test_stop_resets_and_silences() {
    let (mut session, source, haptics) = scripted_session();
    session.start();
    let t0 = Instant::now();

    source.push(CompassSample::valid(100.0));
    assert!(matches!(session.tick(t0), CompassState::Tracking(_)));

    session.stop();
    assert_eq!(source.stop_count(), 1);
    assert_eq!(haptics.stop_count(), 1);
    assert!(!session.is_active());

    // Inactive sessions report the reset state and read no samples.
    source.push(CompassSample::valid(100.0));
    assert!(matches!(
        session.tick(t0 + Duration::from_millis(500)),
        CompassState::Calibrating
    ));
}
