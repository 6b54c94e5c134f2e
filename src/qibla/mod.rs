pub mod bearing;
pub mod engine;
pub mod session;

pub use bearing::{KAABA_LAT, KAABA_LON, direction_label, qibla_bearing};
pub use engine::{
    CALIBRATION_PROMPT, CompassState, CompassUpdate, DisplayMetrics, FACING_TOLERANCE_DEG,
    PULSE_DEBOUNCE, QiblaEngine, QiblaFrame,
};
pub use session::QiblaSession;
