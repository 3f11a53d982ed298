//! Modul für die Umwandlung von 6-Achsen-Steuereingaben in Gelenk-Kommandos.
//!
//! Dieses Modul enthält den Parser für die Namenskonvention der Geräte
//! (`gain`) sowie die Gelenk-Abstraktion (`joint`), die pro Steuerzyklus aus
//! einem Eingabevektor eine geclampte Zielgeschwindigkeit berechnet.

pub mod gain;
pub mod joint;

// Re-exports für einfacheren Zugriff
pub use gain::{axis_gain, AxisGains};
pub use joint::{ArticulationJoint, MAX_LINEAR_SPEED, MAX_ROTATIONAL_SPEED};

use std::fmt;

/// The six independent input channels a controller reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAxis {
    Pitch,
    Yaw,
    Roll,
    UpDown,
    LeftRight,
    ForwardBack,
}

impl ControlAxis {
    /// All axes in a fixed order, used when building a full gain table.
    pub const ALL: [ControlAxis; 6] = [
        ControlAxis::Pitch,
        ControlAxis::Yaw,
        ControlAxis::Roll,
        ControlAxis::UpDown,
        ControlAxis::LeftRight,
        ControlAxis::ForwardBack,
    ];
}

impl fmt::Display for ControlAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlAxis::Pitch => write!(f, "Pitch"),
            ControlAxis::Yaw => write!(f, "Yaw"),
            ControlAxis::Roll => write!(f, "Roll"),
            ControlAxis::UpDown => write!(f, "Up Down"),
            ControlAxis::LeftRight => write!(f, "Left Right"),
            ControlAxis::ForwardBack => write!(f, "Forward Back"),
        }
    }
}

/// One sample of operator input, taken fresh at the start of each cycle.
///
/// The sample is never mutated after it is taken; every joint in a group sees
/// the identical snapshot for the whole cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub up_down: f32,
    pub left_right: f32,
    pub forward_back: f32,
}
