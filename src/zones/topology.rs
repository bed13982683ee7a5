//! Zone adjacency and hub placement.

use smallvec::SmallVec;

use crate::core::config::HubConfig;
use crate::core::error::ConfigError;
use crate::core::zone::{HubId, Zone, ZoneMap, ZONE_COUNT};

/// Neighbours of one zone. A zone has at most two others to link to.
pub type Neighbours = SmallVec<[Zone; ZONE_COUNT - 1]>;

/// Validated field layout.
///
/// ## Example
///
/// ```
/// use rust_hubsim::core::{MatchConfig, Zone};
///
/// let topology = MatchConfig::standard().topology().unwrap();
///
/// assert!(topology.is_adjacent(Zone::Attacker, Zone::Neutral));
/// assert!(!topology.is_adjacent(Zone::Attacker, Zone::Defender));
/// assert!(topology.hub_for(Zone::Neutral).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ZoneTopology {
    neighbours: ZoneMap<Neighbours>,
    hub_by_zone: ZoneMap<Option<HubId>>,
    hubs: Vec<HubConfig>,
}

impl ZoneTopology {
    /// Build from undirected links and hub placements.
    ///
    /// Fails if a zone links to itself, a zone ends up with no neighbour,
    /// two hubs share a zone, or two hubs share an ID. Repeated links are
    /// harmless.
    pub fn from_links(links: &[(Zone, Zone)], hubs: &[HubConfig]) -> Result<Self, ConfigError> {
        let mut neighbours: ZoneMap<Neighbours> = ZoneMap::default();

        for &(a, b) in links {
            if a == b {
                return Err(ConfigError::SelfLink { zone: a });
            }
            if !neighbours[a].contains(&b) {
                neighbours[a].push(b);
            }
            if !neighbours[b].contains(&a) {
                neighbours[b].push(a);
            }
        }

        for (zone, adjacent) in neighbours.iter() {
            if adjacent.is_empty() {
                return Err(ConfigError::IsolatedZone { zone });
            }
        }
        for zone in Zone::ALL {
            neighbours[zone].sort();
        }

        let mut hub_by_zone: ZoneMap<Option<HubId>> = ZoneMap::default();
        for (i, hub) in hubs.iter().enumerate() {
            if hubs[..i].iter().any(|h| h.id == hub.id) {
                return Err(ConfigError::DuplicateHubId { hub: hub.id });
            }
            if hub_by_zone[hub.zone].replace(hub.id).is_some() {
                return Err(ConfigError::DuplicateHubZone { zone: hub.zone });
            }
        }

        Ok(Self {
            neighbours,
            hub_by_zone,
            hubs: hubs.to_vec(),
        })
    }

    /// Zones reachable in one move from `zone`, in zone order.
    #[must_use]
    pub fn adjacent(&self, zone: Zone) -> &[Zone] {
        &self.neighbours[zone]
    }

    /// Check if a move from `from` to `to` is allowed.
    #[must_use]
    pub fn is_adjacent(&self, from: Zone, to: Zone) -> bool {
        self.neighbours[from].contains(&to)
    }

    /// The hub reachable from `zone`, if any.
    #[must_use]
    pub fn hub_for(&self, zone: Zone) -> Option<HubId> {
        self.hub_by_zone[zone]
    }

    /// Get a hub's configuration.
    #[must_use]
    pub fn hub(&self, id: HubId) -> Option<&HubConfig> {
        self.hubs.iter().find(|h| h.id == id)
    }

    /// All hub configurations, in configuration order.
    #[must_use]
    pub fn hubs(&self) -> &[HubConfig] {
        &self.hubs
    }
}
