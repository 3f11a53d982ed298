//! Label parser for per-axis sensitivity overrides.
//!
//! A device opts into an axis by carrying a bracketed token in its label,
//! optionally with a signed decimal override, e.g. `"Boom Rotor [qe:0.5]"`.
//! A missing token means the device does not respond to that axis at all; a
//! token without a parsable number defaults to an override of 1.0 so that
//! hand-written labels stay forgiving.

use crate::mapping::{ControlAxis, ControlInput};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Master scale applied to every axis on top of the per-axis scalers.
pub const GLOBAL_MAGNITUDE_SCALER: f32 = 1.0;

/// Per-axis global scalers. Pitch and forward/back are inverted to match the
/// control convention of the operator seat; the mouse axes are tamed by 1/50
/// because they report raw deltas rather than a normalized stick position.
pub const GLOBAL_PITCH_SCALER: f32 = -1.0 / 50.0;
pub const GLOBAL_YAW_SCALER: f32 = 1.0 / 50.0;
pub const GLOBAL_ROLL_SCALER: f32 = 1.0;
pub const GLOBAL_UP_DOWN_SCALER: f32 = 1.0;
pub const GLOBAL_LEFT_RIGHT_SCALER: f32 = 1.0;
pub const GLOBAL_FORWARD_BACK_SCALER: f32 = -1.0;

const NUMBER_PATTERN: &str = r"([\+\-]?\d+\.?\d*)";

/// One precompiled pattern per axis, indexed by `ControlAxis` discriminant.
/// Compiled once per process; parsing only happens at construction time, but
/// refreshes are frequent enough that per-call compilation would be wasteful.
static AXIS_PATTERNS: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    let pattern = |token: &str| {
        Regex::new(&format!(r"(?i)\[{token}:?{NUMBER_PATTERN}?\]"))
            .expect("axis pattern is a valid regex")
    };
    [
        pattern("mouse_up_down"),    // Pitch
        pattern("mouse_left_right"), // Yaw
        pattern("qe"),               // Roll
        pattern(r"space[\s_]?c"),    // UpDown
        pattern("ad"),               // LeftRight
        pattern("ws"),               // ForwardBack
    ]
});

fn axis_pattern(axis: ControlAxis) -> &'static Regex {
    &AXIS_PATTERNS[axis as usize]
}

fn axis_scaler(axis: ControlAxis) -> f32 {
    match axis {
        ControlAxis::Pitch => GLOBAL_PITCH_SCALER,
        ControlAxis::Yaw => GLOBAL_YAW_SCALER,
        ControlAxis::Roll => GLOBAL_ROLL_SCALER,
        ControlAxis::UpDown => GLOBAL_UP_DOWN_SCALER,
        ControlAxis::LeftRight => GLOBAL_LEFT_RIGHT_SCALER,
        ControlAxis::ForwardBack => GLOBAL_FORWARD_BACK_SCALER,
    }
}

/// Parses the gain a device label contributes on one axis.
///
/// Pure function of the label text: re-parsing the same label always yields
/// the same gain. Only the first token match in the label counts.
pub fn axis_gain(label: &str, axis: ControlAxis) -> f32 {
    let Some(captures) = axis_pattern(axis).captures(label) else {
        return 0.0;
    };

    // Override defaults to 1.0 when the number is absent or fails to parse.
    let override_value = captures
        .get(1)
        .and_then(|m| m.as_str().parse::<f32>().ok())
        .unwrap_or(1.0);

    override_value * GLOBAL_MAGNITUDE_SCALER * axis_scaler(axis)
}

/// The full six-axis gain table of one joint, computed once from its label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGains {
    pitch: f32,
    yaw: f32,
    roll: f32,
    up_down: f32,
    left_right: f32,
    forward_back: f32,
}

impl AxisGains {
    pub fn from_label(label: &str) -> Self {
        Self {
            pitch: axis_gain(label, ControlAxis::Pitch),
            yaw: axis_gain(label, ControlAxis::Yaw),
            roll: axis_gain(label, ControlAxis::Roll),
            up_down: axis_gain(label, ControlAxis::UpDown),
            left_right: axis_gain(label, ControlAxis::LeftRight),
            forward_back: axis_gain(label, ControlAxis::ForwardBack),
        }
    }

    pub fn gain(&self, axis: ControlAxis) -> f32 {
        match axis {
            ControlAxis::Pitch => self.pitch,
            ControlAxis::Yaw => self.yaw,
            ControlAxis::Roll => self.roll,
            ControlAxis::UpDown => self.up_down,
            ControlAxis::LeftRight => self.left_right,
            ControlAxis::ForwardBack => self.forward_back,
        }
    }

    /// Raw dot product of the input sample with this gain table, before any
    /// per-kind clamping.
    pub fn response(&self, input: &ControlInput) -> f32 {
        let mut total = input.pitch * self.pitch;
        total += input.yaw * self.yaw;
        total += input.roll * self.roll;
        total += input.up_down * self.up_down;
        total += input.left_right * self.left_right;
        total += input.forward_back * self.forward_back;
        total
    }
}

impl fmt::Display for AxisGains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in ControlAxis::ALL {
            writeln!(f, "{}: {}", axis, self.gain(axis))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_deterministic() {
        let label = "Boom Rotor [qe:0.5] [ws:-2]";
        for axis in ControlAxis::ALL {
            assert_eq!(axis_gain(label, axis), axis_gain(label, axis));
        }
        assert_eq!(AxisGains::from_label(label), AxisGains::from_label(label));
    }

    #[test]
    fn absent_token_contributes_zero() {
        for axis in ControlAxis::ALL {
            assert_eq!(axis_gain("Plain Rotor", axis), 0.0);
        }
    }

    #[test]
    fn token_without_number_defaults_to_one() {
        assert_eq!(axis_gain("Arm [qe]", ControlAxis::Roll), 1.0);
        // Forward/back carries the inverted global scaler.
        assert_eq!(axis_gain("Arm [ws]", ControlAxis::ForwardBack), -1.0);
    }

    #[test]
    fn empty_suffix_defaults_to_one() {
        assert_eq!(axis_gain("Arm [qe:]", ControlAxis::Roll), 1.0);
    }

    #[test]
    fn override_is_scaled_by_axis_scaler() {
        assert_eq!(axis_gain("[mouse_up_down:2]", ControlAxis::Pitch), -0.04);
        assert_eq!(axis_gain("[mouse_left_right:2]", ControlAxis::Yaw), 0.04);
        assert_eq!(axis_gain("[ws:3]", ControlAxis::ForwardBack), -3.0);
        assert_eq!(axis_gain("[ad:3]", ControlAxis::LeftRight), 3.0);
    }

    #[test]
    fn signed_overrides_parse() {
        assert_eq!(axis_gain("[ad:-1.5]", ControlAxis::LeftRight), -1.5);
        assert_eq!(axis_gain("[ad:+2]", ControlAxis::LeftRight), 2.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(axis_gain("Lift [QE:0.5]", ControlAxis::Roll), 0.5);
        assert_eq!(axis_gain("Lift [Space C:2]", ControlAxis::UpDown), 2.0);
    }

    #[test]
    fn up_down_token_variants_all_match() {
        assert_eq!(axis_gain("[space c:2]", ControlAxis::UpDown), 2.0);
        assert_eq!(axis_gain("[space_c:2]", ControlAxis::UpDown), 2.0);
        assert_eq!(axis_gain("[spacec:2]", ControlAxis::UpDown), 2.0);
    }

    #[test]
    fn first_match_in_label_wins() {
        assert_eq!(axis_gain("[qe:2] spare [qe:3]", ControlAxis::Roll), 2.0);
    }

    #[test]
    fn response_is_dot_product_of_input_and_gains() {
        let gains = AxisGains::from_label("[qe:0.5] [ad:2]");
        let input = ControlInput {
            roll: 1.0,
            left_right: 0.5,
            ..Default::default()
        };
        assert_eq!(gains.response(&input), 0.5 + 1.0);
    }
}
