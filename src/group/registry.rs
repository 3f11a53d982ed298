//! Registry that discovers, rebuilds and runs all control groups.

use crate::config::EngineConfig;
use crate::group::ControlGroup;
use crate::host::{DeviceDirectory, DeviceId, DiagnosticsSink};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::info;

/// Naming convention for assemblies the registry picks up.
static GROUP_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Articulated\s*Assembly\s*\d*").expect("group name pattern is a valid regex")
});

/// What the registry asks of the host scheduler after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Nothing is live; the host's own polling cadence is enough.
    NextTick,
    /// A group ran under operator control; schedule one extra cycle right
    /// away so control stays responsive between polling ticks.
    Immediate,
}

/// Owns every [`ControlGroup`], the registry-wide claimed-device set and the
/// refresh accumulator. All state is rebuilt from the host directory on a
/// fixed period; nothing survives a refresh except the configuration.
pub struct GroupRegistry {
    groups: Vec<ControlGroup>,
    claimed_ids: HashSet<DeviceId>,
    seconds_since_refresh: f64,
    config: EngineConfig,
    diagnostics: Box<dyn DiagnosticsSink>,
}

impl GroupRegistry {
    pub fn new(config: EngineConfig, diagnostics: Box<dyn DiagnosticsSink>) -> Self {
        // Start with a full accumulator so the first tick discovers groups.
        let seconds_since_refresh = config.refresh_period_secs;
        Self {
            groups: Vec::new(),
            claimed_ids: HashSet::new(),
            seconds_since_refresh,
            config,
            diagnostics,
        }
    }

    /// Throws away all groups and claims and rebuilds them from the current
    /// host listings. Listing order decides claim conflicts: earlier groups
    /// win devices over later ones.
    pub fn refresh(&mut self, directory: &dyn DeviceDirectory) {
        self.groups.clear();
        self.claimed_ids.clear();
        self.seconds_since_refresh = 0.0;

        let listings = directory.groups_matching(&GROUP_NAME_PATTERN);
        info!("Rebuilding registry from {} assembly listing(s)", listings.len());

        for listing in listings {
            let group = ControlGroup::build(
                listing.as_ref(),
                &mut self.claimed_ids,
                self.config.exclusive_claims,
            );
            self.groups.push(group);
        }
    }

    /// One host-driven control cycle.
    ///
    /// Accumulates elapsed time and refreshes once the period is reached,
    /// then runs every actively controlled group. Invalid groups are
    /// reported through the diagnostics sink every cycle but never prevent
    /// the others from running.
    pub fn tick(&mut self, delta_seconds: f64, directory: &dyn DeviceDirectory) -> Schedule {
        self.seconds_since_refresh += delta_seconds;
        if self.seconds_since_refresh >= self.config.refresh_period_secs {
            self.refresh(directory);
        }

        let mut schedule = Schedule::NextTick;
        let mut in_use = 0usize;
        for group in &mut self.groups {
            if group.is_actively_controlled() {
                group.run();
                in_use += 1;
                schedule = Schedule::Immediate;
            }

            if !group.is_valid() {
                self.diagnostics.log_error(&group.errors(), group.name());
            }
        }

        self.report(in_use);
        schedule
    }

    fn report(&self, in_use: usize) {
        let invalid = self.groups.iter().filter(|g| !g.is_valid()).count();
        self.diagnostics.log_message(&format!(
            "Time since last refresh: {:.1}s | {} group(s) detected | {} in use | {} invalid",
            self.seconds_since_refresh,
            self.groups.len(),
            in_use,
            invalid
        ));
    }

    pub fn groups(&self) -> &[ControlGroup] {
        &self.groups
    }

    pub fn claimed_ids(&self) -> &HashSet<DeviceId> {
        &self.claimed_ids
    }

    pub fn seconds_since_refresh(&self) -> f64 {
        self.seconds_since_refresh
    }
}
