//! A single controllable joint and its clamped velocity response.

use crate::host::{ActuatorDevice, ActuatorKind, DeviceId};
use crate::mapping::{AxisGains, ControlInput};
use tracing::debug;

/// Physical speed ceiling for rotary joints, in rpm.
pub const MAX_ROTATIONAL_SPEED: f32 = 60.0;

/// Physical speed ceiling for linear joints, in meters per second.
pub const MAX_LINEAR_SPEED: f32 = 10.0;

/// One physical actuator under group control.
///
/// Owns the host device handle, the kind tag resolved at construction and
/// the six axis gains parsed once from the device label. The joint itself is
/// rebuilt from scratch on every registry refresh, so nothing here is ever
/// reconfigured in place.
pub struct ArticulationJoint {
    device: Box<dyn ActuatorDevice>,
    kind: ActuatorKind,
    gains: AxisGains,
}

impl ArticulationJoint {
    pub fn new(device: Box<dyn ActuatorDevice>) -> Self {
        let kind = device.kind();
        let gains = AxisGains::from_label(&device.label());
        debug!(
            "Configured joint \"{}\" as {:?} with gains:\n{}",
            device.label(),
            kind,
            gains
        );
        Self {
            device,
            kind,
            gains,
        }
    }

    pub fn device_id(&self) -> DeviceId {
        self.device.id()
    }

    pub fn kind(&self) -> ActuatorKind {
        self.kind
    }

    pub fn gains(&self) -> &AxisGains {
        &self.gains
    }

    /// Dot product of the input sample with the gain table, clamped to the
    /// physical ceiling of this joint's kind. A response of exactly the
    /// ceiling passes through unchanged.
    pub fn compute_response(&self, input: &ControlInput) -> f32 {
        let total = self.gains.response(input);
        let ceiling = match self.kind {
            ActuatorKind::Rotary => MAX_ROTATIONAL_SPEED,
            ActuatorKind::Linear => MAX_LINEAR_SPEED,
        };
        total.clamp(-ceiling, ceiling)
    }

    /// Forwards the response to the device as its new velocity target. The
    /// single side-effecting operation of the whole mapping path.
    pub fn apply(&mut self, response: f32) {
        self.device.set_velocity(response);
    }
}
