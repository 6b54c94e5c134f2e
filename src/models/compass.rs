/// One heading reading as pushed by the platform sensor. Transient,
/// never persisted. `heading` is `None` when the sensor reports an
/// invalid angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassSample {
    /// Degrees clockwise from north, `[0, 360)`.
    pub heading: Option<f64>,
    /// Platform-reported confidence: false means readings are not
    /// currently trustworthy.
    pub calibrated: bool,
}

impl CompassSample {
    pub fn valid(heading: f64) -> Self {
        Self {
            heading: Some(heading),
            calibrated: true,
        }
    }

    pub fn uncalibrated() -> Self {
        Self {
            heading: None,
            calibrated: false,
        }
    }
}
