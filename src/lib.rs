//! Real-time control mapping for articulated assemblies.
//!
//! Free-text device labels carry per-axis sensitivity overrides; every
//! control cycle a 6-axis operator input is converted into one velocity
//! target per joint, clamped to the physical limits of the joint's kind.
//! Groups of one controller plus its joints are re-discovered from the host
//! on a fixed period and validated against registry-wide exclusivity rules.

pub mod config;
pub mod group;
pub mod host;
pub mod mapping;
