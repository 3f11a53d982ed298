//! Call-boundary contracts to the host environment.
//!
//! The engine never talks to hardware directly. Discovery of assemblies,
//! reading operator input and writing velocity targets all go through the
//! traits defined here; the host supplies the implementations and drives the
//! engine through [`crate::group::GroupRegistry::tick`].

pub mod sim;

use crate::mapping::ControlInput;
use regex::Regex;
use std::fmt;
use tracing::{error, info, warn};

/// Opaque host-assigned device identifier, unique per physical device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a physical actuator is, resolved once from the host's capability
/// query when the joint is built and never re-checked per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActuatorKind {
    Rotary,
    Linear,
}

/// Capability class of a controller-capable device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerClass {
    CommandSeat,
    RemoteHelm,
    /// Passive occupant pod; holds a person but is not a control station.
    StasisPod,
}

impl ControllerClass {
    /// Policy check: pods with a passive occupant may not drive an assembly.
    pub fn allows_active_control(self) -> bool {
        !matches!(self, ControllerClass::StasisPod)
    }
}

/// Read surface of a controller device.
pub trait ControllerDevice {
    fn id(&self) -> DeviceId;
    fn label(&self) -> String;
    fn class(&self) -> ControllerClass;
    /// Whether an operator is live at this controller right now.
    fn is_under_operator_control(&self) -> bool;
    /// Samples the current 6-axis operator input.
    fn sample_input(&self) -> ControlInput;
}

/// Write surface of an actuator device. Rotary devices interpret the
/// velocity as a target angular velocity in rpm, linear devices as a target
/// linear velocity in m/s.
pub trait ActuatorDevice {
    fn id(&self) -> DeviceId;
    fn label(&self) -> String;
    fn kind(&self) -> ActuatorKind;
    fn set_velocity(&mut self, velocity: f32);
}

/// One named device group as listed by the host. Member lists are already
/// filtered to capability and to devices on the same physical assembly as
/// the running engine.
pub trait AssemblyGroup {
    fn name(&self) -> String;
    fn controllers(&self) -> Vec<Box<dyn ControllerDevice>>;
    fn actuators(&self) -> Vec<Box<dyn ActuatorDevice>>;
}

/// Host device directory the registry re-enumerates on every refresh.
pub trait DeviceDirectory {
    /// Lists groups whose name matches the pattern, in a stable host-defined
    /// order. Earlier listings win device-claim conflicts.
    fn groups_matching(&self, name_pattern: &Regex) -> Vec<Box<dyn AssemblyGroup>>;
}

/// Fire-and-forget diagnostics surface. Implementations must never panic.
pub trait DiagnosticsSink {
    fn log_warning(&self, text: &str, source: &str);
    fn log_error(&self, text: &str, source: &str);
    fn log_message(&self, text: &str);
}

/// Default sink that forwards everything to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn log_warning(&self, text: &str, source: &str) {
        warn!("Warning from {}: {}", source, text);
    }

    fn log_error(&self, text: &str, source: &str) {
        error!("Error from {}: {}", source, text);
    }

    fn log_message(&self, text: &str) {
        info!("{}", text);
    }
}
