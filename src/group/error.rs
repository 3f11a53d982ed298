//! Validation faults a group can be rejected with at construction time.

use thiserror::Error;

/// Reason a group failed composition validation. The first rule that fails
/// wins; an invalid group stays invalid until the next registry refresh
/// rebuilds it from the current device layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupFault {
    #[error("group does not contain a controller on this assembly")]
    NoController,

    #[error("group has multiple controllers, control would be ambiguous")]
    AmbiguousController,

    #[error("a stasis pod cannot serve as a control seat")]
    PassiveController,

    #[error("controller \"{0}\" is already in use in another group")]
    ControllerInUse(String),

    #[error("group does not contain any rotary or linear actuators")]
    NoActuators,

    #[error("actuator \"{0}\" is already in use in another group")]
    ActuatorInUse(String),
}
