use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::components::{
    ControlDescriptor, ControlKind, ControlOverride, FullAircraftConfig, InitialConditions,
};

/// Trim type, each selecting its own set of free variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimMode {
    #[default]
    Longitudinal,
    Full,
    FullWingsLevel,
    /// Coordinated turn, pitch follows from the turn geometry.
    Turn,
    /// Non-coordinated turn with pitch free.
    TurnFull,
    Pullup,
    Ground,
    /// User edited control set.
    Custom,
    None,
}

impl TrimMode {
    /// Free variables of the mode, in simplex order.
    pub fn controls(&self) -> &'static [ControlKind] {
        use ControlKind::*;
        match self {
            TrimMode::Longitudinal => &[Throttle, Elevator, Pitch],
            TrimMode::Full => &[Throttle, Elevator, Aileron, Rudder, Roll, Pitch, Heading],
            TrimMode::FullWingsLevel => &[Throttle, Elevator, Aileron, Rudder, Pitch, Heading],
            TrimMode::Turn => &[Throttle, Elevator, Aileron, Rudder, Heading],
            TrimMode::TurnFull => &[Throttle, Elevator, Aileron, Rudder, Heading, Pitch],
            TrimMode::Pullup => &[Throttle, Elevator, Aileron, Rudder, Pitch],
            TrimMode::Ground => &[Altitude, Pitch],
            TrimMode::Custom | TrimMode::None => &[],
        }
    }

    pub fn is_turn(&self) -> bool {
        matches!(self, TrimMode::Turn | TrimMode::TurnFull)
    }

    /// Modes whose residual ignores the lateral-directional axes.
    pub fn is_longitudinal(&self) -> bool {
        matches!(self, TrimMode::Longitudinal | TrimMode::Pullup)
    }
}

impl fmt::Display for TrimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrimMode::Longitudinal => "Longitudinal",
            TrimMode::Full => "Full",
            TrimMode::FullWingsLevel => "Full, wings level",
            TrimMode::Turn => "Coordinated turn",
            TrimMode::TurnFull => "Turn",
            TrimMode::Pullup => "Pullup",
            TrimMode::Ground => "Ground",
            TrimMode::Custom => "Custom",
            TrimMode::None => "None",
        };
        f.write_str(name)
    }
}

/// The active trim mode and the ordered descriptors of its free variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeConfiguration {
    mode: TrimMode,
    descriptors: Vec<ControlDescriptor>,
}

impl ModeConfiguration {
    pub fn mode(&self) -> TrimMode {
        self.mode
    }

    pub fn descriptors(&self) -> &[ControlDescriptor] {
        &self.descriptors
    }

    pub fn descriptors_mut(&mut self) -> &mut [ControlDescriptor] {
        &mut self.descriptors
    }

    pub fn kinds(&self) -> Vec<ControlKind> {
        self.descriptors.iter().map(ControlDescriptor::kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn find(&self, kind: ControlKind) -> Option<&ControlDescriptor> {
        self.descriptors.iter().find(|d| d.kind() == kind)
    }

    /// Discards the current descriptors and rebuilds them for `mode`, then
    /// applies any configured overrides.
    pub fn select_mode(
        &mut self,
        mode: TrimMode,
        aircraft: &FullAircraftConfig,
        conditions: &InitialConditions,
        overrides: &BTreeMap<ControlKind, ControlOverride>,
    ) {
        self.mode = mode;
        self.descriptors = mode
            .controls()
            .iter()
            .map(|&kind| ControlDescriptor::create(kind, aircraft, conditions))
            .collect();
        self.apply_overrides(overrides);
        info!(
            "Trim mode set to {} with {} controls",
            mode,
            self.descriptors.len()
        );
    }

    /// Applies configured initial values and step sizes to present descriptors.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<ControlKind, ControlOverride>) {
        for descriptor in &mut self.descriptors {
            let Some(entry) = overrides.get(&descriptor.kind()) else {
                continue;
            };
            if let Some(initial) = entry.initial_value {
                descriptor.initial = initial;
                descriptor.value = initial;
            }
            if let Some(step) = entry.step_size {
                descriptor.step = step;
            }
        }
    }

    /// Appends a fresh descriptor. Returns false if `kind` is already present.
    pub fn add_control(
        &mut self,
        kind: ControlKind,
        aircraft: &FullAircraftConfig,
        conditions: &InitialConditions,
    ) -> bool {
        if self.find(kind).is_some() {
            return false;
        }
        self.descriptors
            .push(ControlDescriptor::create(kind, aircraft, conditions));
        self.mode = TrimMode::Custom;
        true
    }

    pub fn remove_control(&mut self, kind: ControlKind) -> bool {
        let before = self.descriptors.len();
        self.descriptors.retain(|d| d.kind() != kind);
        self.mode = TrimMode::Custom;
        self.descriptors.len() != before
    }

    /// Replaces the search setup of an existing descriptor in place.
    pub fn edit_control(
        &mut self,
        kind: ControlKind,
        initial: f64,
        step: f64,
        min: f64,
        max: f64,
    ) -> bool {
        let Some(descriptor) = self.descriptors.iter_mut().find(|d| d.kind() == kind) else {
            return false;
        };
        descriptor.initial = initial;
        descriptor.value = initial;
        descriptor.step = step;
        descriptor.min = min;
        descriptor.max = max;
        self.mode = TrimMode::Custom;
        true
    }

    pub fn clear_controls(&mut self) {
        self.descriptors.clear();
        self.mode = TrimMode::Custom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn select(mode: TrimMode) -> ModeConfiguration {
        let aircraft = FullAircraftConfig::cessna_172();
        let ic = InitialConditions::level_flight(45.72, 1524.0);
        let mut config = ModeConfiguration::default();
        config.select_mode(mode, &aircraft, &ic, &BTreeMap::new());
        config
    }

    #[test]
    fn test_mode_control_order() {
        let config = select(TrimMode::Longitudinal);
        assert_eq!(
            config.kinds(),
            vec![ControlKind::Throttle, ControlKind::Elevator, ControlKind::Pitch]
        );
        assert_eq!(select(TrimMode::Ground).kinds().len(), 2);
        assert!(select(TrimMode::None).is_empty());
    }

    #[test]
    fn test_select_mode_is_idempotent() {
        let aircraft = FullAircraftConfig::cessna_172();
        let ic = InitialConditions::level_flight(45.72, 1524.0);
        let mut config = ModeConfiguration::default();
        config.select_mode(TrimMode::Full, &aircraft, &ic, &BTreeMap::new());
        let first = config.clone();
        config.select_mode(TrimMode::Full, &aircraft, &ic, &BTreeMap::new());
        assert_eq!(config, first);
    }

    #[test]
    fn test_edits_switch_to_custom() {
        let aircraft = FullAircraftConfig::cessna_172();
        let ic = InitialConditions::level_flight(45.72, 1524.0);
        let mut config = select(TrimMode::Longitudinal);

        assert!(!config.add_control(ControlKind::Throttle, &aircraft, &ic));
        assert_eq!(config.mode(), TrimMode::Longitudinal);

        assert!(config.add_control(ControlKind::Rudder, &aircraft, &ic));
        assert_eq!(config.mode(), TrimMode::Custom);
        assert_eq!(config.kinds().last(), Some(&ControlKind::Rudder));

        assert!(config.edit_control(ControlKind::Elevator, -0.1, 0.05, -0.5, 0.5));
        let elevator = config.find(ControlKind::Elevator).expect("elevator present");
        assert_eq!(elevator.value, -0.1);
        assert_eq!(elevator.max, 0.5);
        assert!(!config.edit_control(ControlKind::Beta, 0.0, 0.1, -0.1, 0.1));

        assert!(config.remove_control(ControlKind::Rudder));
        assert!(!config.remove_control(ControlKind::Rudder));
    }

    #[test]
    fn test_overrides_applied_on_select() {
        let aircraft = FullAircraftConfig::cessna_172();
        let ic = InitialConditions::level_flight(45.72, 1524.0);
        let mut overrides = BTreeMap::new();
        overrides.insert(
            ControlKind::Throttle,
            ControlOverride {
                initial_value: Some(0.3),
                step_size: Some(0.05),
            },
        );
        let mut config = ModeConfiguration::default();
        config.select_mode(TrimMode::Longitudinal, &aircraft, &ic, &overrides);

        let throttle = config.find(ControlKind::Throttle).expect("throttle present");
        assert_eq!(throttle.initial, 0.3);
        assert_eq!(throttle.value, 0.3);
        assert_eq!(throttle.step, 0.05);
    }

    #[test]
    fn test_mode_names_deserialize() {
        let mode: TrimMode = serde_yaml::from_str("full-wings-level").expect("valid mode");
        assert_eq!(mode, TrimMode::FullWingsLevel);
        let mode: TrimMode = serde_yaml::from_str("turn-full").expect("valid mode");
        assert_eq!(mode, TrimMode::TurnFull);
    }
}
