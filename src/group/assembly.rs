//! One controller plus its joints, validated as a unit.

use crate::group::GroupFault;
use crate::host::{AssemblyGroup, ControllerDevice, DeviceId};
use crate::mapping::ArticulationJoint;
use std::collections::HashSet;
use tracing::{debug, info};

/// Validity is decided exactly once at construction and never changes for
/// the lifetime of the instance; a changed physical layout is only picked up
/// when the registry rebuilds the group on its next refresh.
enum GroupState {
    Valid {
        controller: Box<dyn ControllerDevice>,
        joints: Vec<ArticulationJoint>,
    },
    Invalid {
        faults: Vec<GroupFault>,
    },
}

pub struct ControlGroup {
    name: String,
    state: GroupState,
}

impl ControlGroup {
    /// Validates one host group listing and builds its joints.
    ///
    /// Validation short-circuits on the first failing rule. Device ids are
    /// committed to `claimed` only when the whole group validates, so a
    /// rejected group never blocks ids for later listings. Claim checks are
    /// skipped entirely when `exclusive_claims` is off.
    pub fn build(
        listing: &dyn AssemblyGroup,
        claimed: &mut HashSet<DeviceId>,
        exclusive_claims: bool,
    ) -> Self {
        let name = format!("Assembly \"{}\"", listing.name());

        let mut controllers = listing.controllers();
        if controllers.is_empty() {
            return Self::invalid(name, GroupFault::NoController);
        }
        if controllers.len() > 1 {
            return Self::invalid(name, GroupFault::AmbiguousController);
        }
        let controller = controllers.remove(0);

        if !controller.class().allows_active_control() {
            return Self::invalid(name, GroupFault::PassiveController);
        }
        if exclusive_claims && claimed.contains(&controller.id()) {
            return Self::invalid(name, GroupFault::ControllerInUse(controller.label()));
        }

        let actuators = listing.actuators();
        if actuators.is_empty() {
            return Self::invalid(name, GroupFault::NoActuators);
        }

        let mut pending = vec![controller.id()];
        let mut joints = Vec::with_capacity(actuators.len());
        for device in actuators {
            let id = device.id();
            if exclusive_claims && (claimed.contains(&id) || pending.contains(&id)) {
                return Self::invalid(name, GroupFault::ActuatorInUse(device.label()));
            }
            pending.push(id);
            joints.push(ArticulationJoint::new(device));
        }

        claimed.extend(pending);
        info!("{} validated with {} joint(s)", name, joints.len());
        Self {
            name,
            state: GroupState::Valid { controller, joints },
        }
    }

    fn invalid(name: String, fault: GroupFault) -> Self {
        debug!("{} rejected: {}", name, fault);
        Self {
            name,
            state: GroupState::Invalid {
                faults: vec![fault],
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, GroupState::Valid { .. })
    }

    /// Validation faults in the order they were recorded; empty for a valid
    /// group.
    pub fn faults(&self) -> &[GroupFault] {
        match &self.state {
            GroupState::Valid { .. } => &[],
            GroupState::Invalid { faults } => faults,
        }
    }

    /// Human-readable fault summary for the diagnostics sink.
    pub fn errors(&self) -> String {
        self.faults()
            .iter()
            .map(|fault| fault.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn joint_count(&self) -> usize {
        match &self.state {
            GroupState::Valid { joints, .. } => joints.len(),
            GroupState::Invalid { .. } => 0,
        }
    }

    /// True iff the group is valid and an operator is live at its controller.
    pub fn is_actively_controlled(&self) -> bool {
        match &self.state {
            GroupState::Valid { controller, .. } => controller.is_under_operator_control(),
            GroupState::Invalid { .. } => false,
        }
    }

    /// Executes one control cycle: no-op returning false when invalid,
    /// otherwise samples the controller once and drives every joint from
    /// that single snapshot.
    pub fn run(&mut self) -> bool {
        let GroupState::Valid { controller, joints } = &mut self.state else {
            return false;
        };

        let input = controller.sample_input();
        for joint in joints.iter_mut() {
            let response = joint.compute_response(&input);
            joint.apply(response);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::{SimActuator, SimAssembly, SimController};
    use crate::host::{ActuatorDevice, ActuatorKind, ControllerClass};
    use crate::mapping::ControlInput;

    fn seat(id: u64) -> SimController {
        SimController::new(id, "Seat", ControllerClass::CommandSeat)
    }

    fn rotor(id: u64, label: &str) -> SimActuator {
        SimActuator::new(id, label, ActuatorKind::Rotary)
    }

    #[test]
    fn group_without_controller_is_invalid() {
        let listing = SimAssembly::new("Articulated Assembly").with_actuator(rotor(2, "[qe]"));
        let group = ControlGroup::build(&listing, &mut HashSet::new(), true);
        assert!(!group.is_valid());
        assert_eq!(group.faults(), &[GroupFault::NoController]);
    }

    #[test]
    fn group_with_two_controllers_is_ambiguous() {
        let listing = SimAssembly::new("Articulated Assembly")
            .with_controller(seat(1))
            .with_controller(seat(2))
            .with_actuator(rotor(3, "[qe]"));
        let group = ControlGroup::build(&listing, &mut HashSet::new(), true);
        assert_eq!(group.faults(), &[GroupFault::AmbiguousController]);
    }

    #[test]
    fn stasis_pod_cannot_control_a_group() {
        let pod = SimController::new(1, "Pod", ControllerClass::StasisPod);
        let listing = SimAssembly::new("Articulated Assembly")
            .with_controller(pod)
            .with_actuator(rotor(2, "[qe]"));
        let group = ControlGroup::build(&listing, &mut HashSet::new(), true);
        assert_eq!(group.faults(), &[GroupFault::PassiveController]);
    }

    #[test]
    fn claimed_controller_invalidates_the_group() {
        let mut claimed = HashSet::new();
        claimed.insert(DeviceId(1));
        let listing = SimAssembly::new("Articulated Assembly")
            .with_controller(seat(1))
            .with_actuator(rotor(2, "[qe]"));
        let group = ControlGroup::build(&listing, &mut claimed, true);
        assert_eq!(
            group.faults(),
            &[GroupFault::ControllerInUse("Seat".to_string())]
        );
    }

    #[test]
    fn group_without_actuators_is_invalid() {
        let listing = SimAssembly::new("Articulated Assembly").with_controller(seat(1));
        let group = ControlGroup::build(&listing, &mut HashSet::new(), true);
        assert_eq!(group.faults(), &[GroupFault::NoActuators]);
    }

    #[test]
    fn claimed_actuator_invalidates_the_group() {
        let mut claimed = HashSet::new();
        claimed.insert(DeviceId(2));
        let listing = SimAssembly::new("Articulated Assembly")
            .with_controller(seat(1))
            .with_actuator(rotor(2, "Shared Rotor [qe]"));
        let group = ControlGroup::build(&listing, &mut claimed, true);
        assert_eq!(
            group.faults(),
            &[GroupFault::ActuatorInUse("Shared Rotor [qe]".to_string())]
        );
    }

    #[test]
    fn rejected_group_commits_no_claims() {
        let mut claimed = HashSet::new();
        let listing = SimAssembly::new("Articulated Assembly").with_controller(seat(1));
        let group = ControlGroup::build(&listing, &mut claimed, true);
        assert!(!group.is_valid());
        assert!(claimed.is_empty());
    }

    #[test]
    fn valid_group_claims_every_device() {
        let mut claimed = HashSet::new();
        let listing = SimAssembly::new("Articulated Assembly")
            .with_controller(seat(1))
            .with_actuator(rotor(2, "[qe]"))
            .with_actuator(rotor(3, "[ws]"));
        let group = ControlGroup::build(&listing, &mut claimed, true);
        assert!(group.is_valid());
        assert_eq!(group.joint_count(), 2);
        assert!(claimed.contains(&DeviceId(1)));
        assert!(claimed.contains(&DeviceId(2)));
        assert!(claimed.contains(&DeviceId(3)));
    }

    #[test]
    fn disabling_exclusive_claims_allows_sharing() {
        let mut claimed = HashSet::new();
        claimed.insert(DeviceId(1));
        claimed.insert(DeviceId(2));
        let listing = SimAssembly::new("Articulated Assembly")
            .with_controller(seat(1))
            .with_actuator(rotor(2, "[qe]"));
        let group = ControlGroup::build(&listing, &mut claimed, false);
        assert!(group.is_valid());
    }

    #[test]
    fn run_on_invalid_group_is_a_noop() {
        let rotor = rotor(2, "[qe]");
        let mut primed = rotor.clone();
        primed.set_velocity(9.75);

        let listing = SimAssembly::new("Articulated Assembly").with_actuator(rotor.clone());
        let mut group = ControlGroup::build(&listing, &mut HashSet::new(), true);
        assert!(!group.run());
        assert_eq!(rotor.last_velocity(), 9.75);
    }

    #[test]
    fn run_applies_one_response_per_joint() {
        let seat = seat(1);
        seat.set_engaged(true);
        seat.set_input(ControlInput {
            roll: 1.0,
            ..Default::default()
        });

        let boom = rotor(2, "Boom [qe:0.5]");
        let mast = SimActuator::new(3, "Mast [space_c:2]", ActuatorKind::Linear);
        let listing = SimAssembly::new("Articulated Assembly")
            .with_controller(seat.clone())
            .with_actuator(boom.clone())
            .with_actuator(mast.clone());

        let mut group = ControlGroup::build(&listing, &mut HashSet::new(), true);
        assert!(group.is_actively_controlled());
        assert!(group.run());
        assert_eq!(boom.last_velocity(), 0.5);
        // No up/down input, so the mast holds still.
        assert_eq!(mast.last_velocity(), 0.0);
    }
}
