//! Robot type presets.
//!
//! The `RobotTypeRegistry` stores named `RobotType` records so rosters can
//! be assembled by type name instead of repeating parameters.

use rustc_hash::FxHashMap;

use super::config::{RobotType, RosterEntry};
use super::entity::RobotId;
use super::error::ConfigError;
use super::team::Team;
use super::zone::Zone;

/// Registry of robot type presets, keyed by `type_name`.
///
/// ## Example
///
/// ```
/// use rust_hubsim::core::{RobotType, RobotTypeRegistry};
///
/// let mut registry = RobotTypeRegistry::new();
/// registry.register(RobotType::new("scout", 12, 1.0, 2, 1));
///
/// let scout = registry.get("scout").unwrap();
/// assert_eq!(scout.capacity, 12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RobotTypeRegistry {
    types: FxHashMap<String, RobotType>,
}

impl RobotTypeRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The three stock robots, converted at `ticks_per_second`.
    ///
    /// | name | capacity | transit | shots/s |
    /// |---|---|---|---|
    /// | `light` | 30 | 2 s | 8 |
    /// | `balanced` | 40 | 2 s | 6 |
    /// | `hauler` | 60 | 3 s | 5 |
    ///
    /// All three intake 6 balls per second.
    #[must_use]
    pub fn standard(ticks_per_second: u32) -> Self {
        const MAX_INTAKE_PER_SECOND: f64 = 6.0;

        let mut registry = Self::new();
        for (name, capacity, transit, shots) in [
            ("light", 30, 2.0, 8.0),
            ("balanced", 40, 2.0, 6.0),
            ("hauler", 60, 3.0, 5.0),
        ] {
            registry.register(RobotType::from_rates(
                name,
                capacity,
                transit,
                MAX_INTAKE_PER_SECOND,
                shots,
                ticks_per_second,
            ));
        }
        registry
    }

    /// Register a preset, returning the one it replaced.
    pub fn register(&mut self, robot_type: RobotType) -> Option<RobotType> {
        self.types.insert(robot_type.type_name.clone(), robot_type)
    }

    /// Get a preset by name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&RobotType> {
        self.types.get(type_name)
    }

    /// Check if a preset is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Get the number of registered presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Build a roster entry from a registered preset.
    pub fn roster_entry(
        &self,
        id: RobotId,
        team: Team,
        start_zone: Zone,
        type_name: &str,
    ) -> Result<RosterEntry, ConfigError> {
        self.get(type_name)
            .map(|t| RosterEntry::new(id, team, start_zone, t.clone()))
            .ok_or_else(|| ConfigError::UnknownRobotType(type_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = RobotTypeRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register(RobotType::new("a", 10, 1.0, 1, 1)).is_none());
        let replaced = registry.register(RobotType::new("a", 20, 1.0, 1, 1));

        assert_eq!(replaced.map(|t| t.capacity), Some(10));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").map(|t| t.capacity), Some(20));
    }

    #[test]
    fn test_standard_presets() {
        let registry = RobotTypeRegistry::standard(10);

        assert_eq!(registry.len(), 3);
        let hauler = registry.get("hauler").unwrap();
        assert_eq!(hauler.capacity, 60);
        assert_eq!(hauler.transit_ticks(), 30);
        assert_eq!(hauler.shoot_cooldown, 2);

        let light = registry.get("light").unwrap();
        assert_eq!(light.transit_ticks(), 20);
        assert_eq!((light.intake_rate, light.intake_period), (3, 5));
    }

    #[test]
    fn test_roster_entry_lookup() {
        let registry = RobotTypeRegistry::standard(1);

        let entry = registry
            .roster_entry(RobotId::new(3), Team::Blue, Zone::Defender, "light")
            .unwrap();
        assert_eq!(entry.robot_type.capacity, 30);
        assert_eq!(entry.team, Team::Blue);

        let missing = registry.roster_entry(RobotId::new(0), Team::Red, Zone::Neutral, "tank");
        assert_eq!(missing, Err(ConfigError::UnknownRobotType("tank".to_string())));
    }
}
