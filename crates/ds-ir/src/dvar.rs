//! Console variable values.

/// Game time multiplier. Values below 1.0 are slow motion.
pub const TIMESCALE: &str = "timescale";

/// Host frame-rate cap.
pub const COM_MAXFPS: &str = "com_maxfps";

/// A console variable's current value.
///
/// The host stores a single value and exposes both interpretations; callers
/// pick whichever the variable means.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DvarValue {
    pub floating_point: f32,
    pub int32: i32,
}

impl DvarValue {
    /// Value set from a float; the integer view truncates.
    pub fn from_float(value: f32) -> Self {
        Self {
            floating_point: value,
            int32: value as i32,
        }
    }

    /// Value set from an integer.
    pub fn from_int(value: i32) -> Self {
        Self {
            floating_point: value as f32,
            int32: value,
        }
    }
}
