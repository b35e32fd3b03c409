use serde::{Deserialize, Serialize};

/// Sign convention of the control loop.
///
/// `Forward` means increasing output drives the measured input up (a heater
/// warming a thermocouple); `Backward` means increasing output drives it
/// down (a chiller). Under `Backward` all three gains carry an implicit
/// sign flip relative to their `Forward` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward = 0,
    Backward = 1,
}

/// Tuning and output-range configuration for a
/// [`PidController`](crate::pid::PidController).
///
/// Plain data, copied into the controller at construction and back out of
/// [`PidController::config`](crate::pid::PidController::config).
/// Construction performs no validation; only
/// [`set_output_limits`](crate::pid::PidController::set_output_limits)
/// checks bounds ordering. There is deliberately no `Default`: gains and
/// limits are process-specific and must come from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain, applied per compute call.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Lower output bound.
    pub out_min: f64,
    /// Upper output bound.
    pub out_max: f64,
    /// Loop sign convention.
    pub direction: Direction,
}
