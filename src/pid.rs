//! Discrete-time PID controller with clamp-style anti-windup.
//!
//! - Uses `f64` math
//! - No internal clock: the caller's loop cadence is the time step, and the
//!   gains absorb it
//! - Integral sum and output clamped to the configured limits
//! - Derivative acts on the input, either measured by the caller or
//!   approximated by a first backward difference
//!
//! Example
//! ```ignore
//! let mut pid = PidController::new(Config {
//!     kp: 2.0,
//!     ki: 0.5,
//!     kd: 1.0,
//!     out_min: 0.0,
//!     out_max: 20.0,
//!     direction: Direction::Forward,
//! });
//!
//! pid.set_setpoint(5.0);
//! let power = pid.compute(current_temp_c);
//! ```

use crate::config::{Config, Direction};
use crate::log::*;

/// Operating mode of a [`PidController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Manual,
    Automatic,
}

/// Discrete-time PID controller.
///
/// One instance per controlled loop, owned and driven by a single thread or
/// task; nothing inside is synchronized. The controller never fails:
/// inverted limits are ignored and every other input is accepted as-is,
/// non-finite values included.
#[derive(Debug, Clone)]
pub struct PidController {
    config: Config,
    mode: Mode,
    setpoint: f64,
    integration_sum: f64,
    last_input: f64,
    last_output: f64,
}

impl PidController {
    /// Create a controller from `config`.
    ///
    /// Bounds ordering is not validated here, unlike
    /// [`set_output_limits`](Self::set_output_limits); a nonsensical range
    /// is the caller's to keep. State starts zeroed, with the setpoint at
    /// `0.0` and the mode at [`Mode::Automatic`].
    pub fn new(config: Config) -> Self {
        Self {
            config,
            mode: Mode::Automatic,
            setpoint: 0.0,
            integration_sum: 0.0,
            last_input: 0.0,
            last_output: 0.0,
        }
    }

    /// Set the target value for the controlled variable.
    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    /// Run one compute step with a caller-measured input derivative.
    ///
    /// Useful when the derivative can be measured more accurately than by
    /// finite difference, e.g. a tachometer supplying velocity while the
    /// input is position.
    pub fn compute_with_derivative(&mut self, input: f64, dinput: f64) -> f64 {
        self.compute_output(input, dinput)
    }

    /// Run one compute step, approximating the input derivative by first
    /// backward difference against the previous call's input.
    ///
    /// The remembered input starts at zero, so the first call on a fresh
    /// controller sees a derivative of `input - 0.0`. Callers that need a
    /// clean start should make the first call through
    /// [`compute_with_derivative`](Self::compute_with_derivative).
    pub fn compute(&mut self, input: f64) -> f64 {
        let dinput = input - self.last_input;
        self.compute_output(input, dinput)
    }

    fn compute_output(&mut self, input: f64, dinput: f64) -> f64 {
        if self.mode == Mode::Manual {
            return self.last_output;
        }

        let error = self.setpoint - input;

        // Integral with anti-windup: accumulate unconditionally, then clamp
        // the running sum to the output range.
        self.integration_sum += self.config.ki * error;
        self.integration_sum =
            clamp(self.integration_sum, self.config.out_min, self.config.out_max);

        // Derivative on input rather than error, so setpoint steps do not
        // kick the output.
        let output = self.config.kp * error - self.config.kd * dinput + self.integration_sum;
        let output = clamp(output, self.config.out_min, self.config.out_max);

        self.last_input = input;
        self.last_output = output;
        output
    }

    /// Update the three gains, expressed in [`Direction::Forward`] terms.
    ///
    /// When the configured direction is [`Direction::Backward`] the gains
    /// are sign-flipped before storage, so the caller reasons in forward
    /// terms regardless of direction. No validation of sign or magnitude.
    pub fn set_tunings(&mut self, kp: f64, ki: f64, kd: f64) {
        debug!("pid: tunings kp={} ki={} kd={}", kp, ki, kd);
        let sign = match self.config.direction {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        };
        self.config.kp = sign * kp;
        self.config.ki = sign * ki;
        self.config.kd = sign * kd;
    }

    /// Replace the output bounds.
    ///
    /// A call with `min >= max` changes nothing. The current integral sum
    /// is not re-clamped here; a sum left outside a narrowed range stays
    /// there until the next compute call clamps it.
    pub fn set_output_limits(&mut self, min: f64, max: f64) {
        if min >= max {
            return;
        }

        debug!("pid: output limits [{}, {}]", min, max);
        self.config.out_min = min;
        self.config.out_max = max;
    }

    /// Set the loop direction, sign-flipping the stored gains when the
    /// direction actually changes. Repeated calls with the same direction
    /// are no-ops.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.config.direction {
            return;
        }

        debug!("pid: direction reversed");
        self.config.kp = -self.config.kp;
        self.config.ki = -self.config.ki;
        self.config.kd = -self.config.kd;
        self.config.direction = direction;
    }

    /// Switch between [`Mode::Manual`] and [`Mode::Automatic`].
    ///
    /// Manual freezes the controller: compute calls return the last output
    /// and leave all state untouched. Switching back to automatic resumes
    /// from the frozen integral sum and last input.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Clear the accumulated state: integral sum, last input, and last
    /// output (re-clamped into the output range). Gains, limits, direction,
    /// mode, and setpoint are untouched.
    pub fn reset(&mut self) {
        self.integration_sum = 0.0;
        self.last_input = 0.0;
        self.last_output = clamp(0.0, self.config.out_min, self.config.out_max);
    }

    /// Snapshot of the current configuration: gains as currently signed,
    /// current bounds, current direction.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Current setpoint.
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Last computed output.
    pub fn output(&self) -> f64 {
        self.last_output
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[inline]
fn clamp(x: f64, min: f64, max: f64) -> f64 {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}
