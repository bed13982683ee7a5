//! Field zones and hub identifiers.
//!
//! The field has exactly three zones. They are named from Red's side of
//! the field: Red attacks toward `Attacker`, defends `Defender`, and both
//! alliances share `Neutral`. Blue sees the same field mirrored.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::team::Team;

/// Number of zones on the field.
pub const ZONE_COUNT: usize = 3;

/// One of the three field zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    Attacker,
    Neutral,
    Defender,
}

impl Zone {
    /// All zones in index order.
    pub const ALL: [Zone; ZONE_COUNT] = [Zone::Attacker, Zone::Neutral, Zone::Defender];

    /// Get the zone index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Zone::Attacker => 0,
            Zone::Neutral => 1,
            Zone::Defender => 2,
        }
    }

    /// Look up a zone by index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Zone::Attacker),
            1 => Some(Zone::Neutral),
            2 => Some(Zone::Defender),
            _ => None,
        }
    }

    /// The same zone seen from the other end of the field.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Zone::Attacker => Zone::Defender,
            Zone::Neutral => Zone::Neutral,
            Zone::Defender => Zone::Attacker,
        }
    }

    /// Express this zone in `team`'s own frame (identity for Red).
    #[must_use]
    pub const fn relative_to(self, team: Team) -> Self {
        match team {
            Team::Red => self,
            Team::Blue => self.mirrored(),
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Attacker => "Attacker",
            Zone::Neutral => "Neutral",
            Zone::Defender => "Defender",
        };
        write!(f, "{}", name)
    }
}

/// Per-zone storage indexed by `Zone`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneMap<T> {
    data: [T; ZONE_COUNT],
}

impl<T> ZoneMap<T> {
    /// Create from one value per zone, in `Zone::ALL` order.
    #[must_use]
    pub const fn from_array(data: [T; ZONE_COUNT]) -> Self {
        Self { data }
    }

    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Zone) -> T) -> Self {
        Self {
            data: Zone::ALL.map(factory),
        }
    }

    /// Iterate over (Zone, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &T)> {
        Zone::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over values in zone order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Return a copy with Attacker and Defender swapped.
    #[must_use]
    pub fn mirrored(&self) -> Self
    where
        T: Clone,
    {
        Self::new(|zone| self[zone.mirrored()].clone())
    }
}

impl<T> Index<Zone> for ZoneMap<T> {
    type Output = T;

    fn index(&self, zone: Zone) -> &Self::Output {
        &self.data[zone.index()]
    }
}

impl<T> IndexMut<Zone> for ZoneMap<T> {
    fn index_mut(&mut self, zone: Zone) -> &mut Self::Output {
        &mut self.data[zone.index()]
    }
}

/// Hub identifier. Hubs are configured per match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HubId(pub u8);

impl HubId {
    /// Create a new hub ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for HubId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hub({})", self.0)
    }
}
