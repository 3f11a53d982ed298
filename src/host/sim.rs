//! In-memory host implementation for the demo binary and the test suite.
//!
//! Devices share their observable state (`Arc<Mutex<..>>`) with the handles
//! the caller keeps, so a test can script operator input and read back the
//! velocities the engine applied while the engine owns its own boxed copies.

use crate::host::{
    ActuatorDevice, ActuatorKind, AssemblyGroup, ControllerClass, ControllerDevice,
    DeviceDirectory, DeviceId,
};
use crate::mapping::ControlInput;
use regex::Regex;
use std::sync::{Arc, Mutex, PoisonError};

/// Simulated controller-capable device.
#[derive(Clone)]
pub struct SimController {
    id: DeviceId,
    label: String,
    class: ControllerClass,
    engaged: Arc<Mutex<bool>>,
    input: Arc<Mutex<ControlInput>>,
}

impl SimController {
    pub fn new(id: u64, label: &str, class: ControllerClass) -> Self {
        Self {
            id: DeviceId(id),
            label: label.to_string(),
            class,
            engaged: Arc::new(Mutex::new(false)),
            input: Arc::new(Mutex::new(ControlInput::default())),
        }
    }

    pub fn set_engaged(&self, engaged: bool) {
        *self.engaged.lock().unwrap_or_else(PoisonError::into_inner) = engaged;
    }

    pub fn set_input(&self, input: ControlInput) {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner) = input;
    }
}

impl ControllerDevice for SimController {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn class(&self) -> ControllerClass {
        self.class
    }

    fn is_under_operator_control(&self) -> bool {
        *self.engaged.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sample_input(&self) -> ControlInput {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Simulated actuator that records the last velocity written to it.
#[derive(Clone)]
pub struct SimActuator {
    id: DeviceId,
    label: String,
    kind: ActuatorKind,
    velocity: Arc<Mutex<f32>>,
}

impl SimActuator {
    pub fn new(id: u64, label: &str, kind: ActuatorKind) -> Self {
        Self {
            id: DeviceId(id),
            label: label.to_string(),
            kind,
            velocity: Arc::new(Mutex::new(0.0)),
        }
    }

    /// Last velocity target the engine applied to this device.
    pub fn last_velocity(&self) -> f32 {
        *self.velocity.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ActuatorDevice for SimActuator {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn kind(&self) -> ActuatorKind {
        self.kind
    }

    fn set_velocity(&mut self, velocity: f32) {
        *self.velocity.lock().unwrap_or_else(PoisonError::into_inner) = velocity;
    }
}

/// Simulated named device group.
#[derive(Clone, Default)]
pub struct SimAssembly {
    name: String,
    controllers: Vec<SimController>,
    actuators: Vec<SimActuator>,
}

impl SimAssembly {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_controller(mut self, controller: SimController) -> Self {
        self.controllers.push(controller);
        self
    }

    pub fn with_actuator(mut self, actuator: SimActuator) -> Self {
        self.actuators.push(actuator);
        self
    }
}

impl AssemblyGroup for SimAssembly {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn controllers(&self) -> Vec<Box<dyn ControllerDevice>> {
        self.controllers
            .iter()
            .map(|c| Box::new(c.clone()) as Box<dyn ControllerDevice>)
            .collect()
    }

    fn actuators(&self) -> Vec<Box<dyn ActuatorDevice>> {
        self.actuators
            .iter()
            .map(|a| Box::new(a.clone()) as Box<dyn ActuatorDevice>)
            .collect()
    }
}

/// Simulated device directory with a stable, insertion-ordered listing.
#[derive(Default)]
pub struct SimDirectory {
    assemblies: Vec<SimAssembly>,
}

impl SimDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, assembly: SimAssembly) {
        self.assemblies.push(assembly);
    }
}

impl DeviceDirectory for SimDirectory {
    fn groups_matching(&self, name_pattern: &Regex) -> Vec<Box<dyn AssemblyGroup>> {
        self.assemblies
            .iter()
            .filter(|a| name_pattern.is_match(&a.name))
            .map(|a| Box::new(a.clone()) as Box<dyn AssemblyGroup>)
            .collect()
    }
}
