//! Group lifecycle and the per-cycle execution contract.
//!
//! A group pairs exactly one controller with one or more joints and is
//! validated once at construction; the registry rebuilds all groups from the
//! host directory on a fixed period and runs every actively controlled group
//! each cycle.

pub mod assembly;
pub mod error;
pub mod registry;

pub use assembly::ControlGroup;
pub use error::GroupFault;
pub use registry::{GroupRegistry, Schedule};
