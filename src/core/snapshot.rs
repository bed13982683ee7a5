//! Observation export.
//!
//! A `MatchSnapshot` is a read-only copy of everything an outside learner
//! may observe after a tick. It carries no references into the engine, so
//! it can be kept, serialized, or sent to another thread.
//!
//! ## Flat Layout
//!
//! `flatten()` produces a fixed-length `Vec<i64>`:
//!
//! ```text
//! [tick, remaining_ticks, terminal]
//! per robot (6):  [team, zone, balls_held, capacity,
//!                  transit_remaining, destination (-1 if none), cooldown,
//!                  intake_cooldown]
//! [score_red, score_blue]
//! [supply_attacker, supply_neutral, supply_defender]
//! per hub:        [zone, team (-1 if any), active, total]
//! ```
//!
//! ## Team Views
//!
//! `for_team` relabels the snapshot so the viewer is always Red: its own
//! robots come first, its own score comes first and, for Blue, the field
//! is mirrored. A policy trained on one side can play the other unchanged.

use serde::{Deserialize, Serialize};

use super::entity::{RobotId, ROBOT_COUNT};
use super::error::SimResult;
use super::state::MatchState;
use super::team::{Team, TeamMap};
use super::zone::{HubId, Zone, ZoneMap, ZONE_COUNT};
use crate::zones::ZoneTopology;

/// Result of a finished (or current) match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(Team),
    Draw,
}

impl MatchOutcome {
    /// Decide the outcome from final scores.
    #[must_use]
    pub fn from_scores(scores: &TeamMap<u32>) -> Self {
        let (red, blue) = (scores[Team::Red], scores[Team::Blue]);
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => MatchOutcome::Winner(Team::Red),
            std::cmp::Ordering::Less => MatchOutcome::Winner(Team::Blue),
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// Reward-style value from `team`'s point of view: 1, 0 or -1.
    #[must_use]
    pub fn value_for(self, team: Team) -> i32 {
        match self {
            MatchOutcome::Winner(winner) if winner == team => 1,
            MatchOutcome::Winner(_) => -1,
            MatchOutcome::Draw => 0,
        }
    }
}

/// Observable state of one robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotView {
    pub id: RobotId,
    pub team: Team,
    pub zone: Zone,
    pub balls_held: u32,
    pub capacity: u32,
    pub transit_remaining_ticks: u32,
    pub destination: Option<Zone>,
    pub cooldown_remaining_ticks: u32,
    pub intake_cooldown_remaining_ticks: u32,
}

impl RobotView {
    /// Check if the robot is locked mid-transit.
    #[must_use]
    pub fn in_transit(&self) -> bool {
        self.transit_remaining_ticks > 0
    }

    fn relative_to(self, viewer: Team) -> Self {
        Self {
            id: self.id.relative_to(viewer),
            team: self.team.relative_to(viewer),
            zone: self.zone.relative_to(viewer),
            destination: self.destination.map(|z| z.relative_to(viewer)),
            ..self
        }
    }
}

/// Observable state of one hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubView {
    pub id: HubId,
    pub zone: Zone,
    /// Alliance allowed to score here. `None` accepts both.
    pub team: Option<Team>,
    /// Whether the hub accepts shots on the next tick.
    pub active: bool,
    pub total: u32,
}

/// Snapshot of a match after a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Completed ticks.
    pub tick: u64,
    pub remaining_ticks: u64,
    /// Robots in slot order.
    pub robots: Vec<RobotView>,
    pub scores: TeamMap<u32>,
    pub zone_supply: ZoneMap<u32>,
    pub hubs: Vec<HubView>,
    /// Set only on the snapshot returned by the final step.
    pub terminal: bool,
}

/// Values per robot in the flat layout.
pub const ROBOT_FEATURES: usize = 8;

/// Values per hub in the flat layout.
pub const HUB_FEATURES: usize = 4;

const HEADER_FEATURES: usize = 3;

impl MatchSnapshot {
    /// Copy the observable parts of `state`.
    #[must_use]
    pub fn capture(topology: &ZoneTopology, state: &MatchState, terminal: bool) -> Self {
        let robots = state
            .robots
            .iter()
            .map(|r| RobotView {
                id: r.id,
                team: r.team,
                zone: r.zone,
                balls_held: r.balls_held,
                capacity: r.capacity,
                transit_remaining_ticks: r.transit_remaining_ticks,
                destination: r.destination,
                cooldown_remaining_ticks: r.cooldown_remaining_ticks,
                intake_cooldown_remaining_ticks: r.intake_cooldown_remaining_ticks,
            })
            .collect();

        let next_tick = state.tick + 1;
        let hubs = state
            .hubs
            .iter()
            .filter_map(|h| {
                let config = topology.hub(h.id)?;
                Some(HubView {
                    id: h.id,
                    zone: config.zone,
                    team: config.team,
                    active: !terminal && config.schedule.is_active(next_tick, state.duration_ticks),
                    total: h.total,
                })
            })
            .collect();

        Self {
            tick: state.tick,
            remaining_ticks: state.remaining_ticks(),
            robots,
            scores: state.scores,
            zone_supply: state.zone_supply,
            hubs,
            terminal,
        }
    }

    /// Get a robot by slot.
    #[must_use]
    pub fn robot(&self, id: RobotId) -> Option<&RobotView> {
        self.robots.get(id.index())
    }

    /// Find the hub reachable from a zone.
    #[must_use]
    pub fn hub_in(&self, zone: Zone) -> Option<&HubView> {
        self.hubs.iter().find(|h| h.zone == zone)
    }

    /// Current standing. Final once `terminal` is set.
    #[must_use]
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(&self.scores)
    }

    /// Relabel the snapshot so that `team` sees itself as Red.
    ///
    /// Hubs are listed in zone order after mirroring, so both sides see
    /// the same layout on a symmetric field.
    #[must_use]
    pub fn for_team(&self, team: Team) -> Self {
        let mut robots: Vec<RobotView> = self.robots.iter().map(|r| r.relative_to(team)).collect();
        robots.sort_by_key(|r| r.id);

        let mut hubs: Vec<HubView> = self
            .hubs
            .iter()
            .map(|h| HubView {
                zone: h.zone.relative_to(team),
                team: h.team.map(|t| t.relative_to(team)),
                ..*h
            })
            .collect();
        hubs.sort_by_key(|h| (h.zone, h.id.raw()));

        Self {
            tick: self.tick,
            remaining_ticks: self.remaining_ticks,
            robots,
            scores: self.scores.ordered_for(team),
            zone_supply: match team {
                Team::Red => self.zone_supply,
                Team::Blue => self.zone_supply.mirrored(),
            },
            hubs,
            terminal: self.terminal,
        }
    }

    /// Length of `flatten()` for a field with `hub_count` hubs.
    #[must_use]
    pub const fn flat_len(hub_count: usize) -> usize {
        HEADER_FEATURES + ROBOT_COUNT * ROBOT_FEATURES + 2 + ZONE_COUNT + hub_count * HUB_FEATURES
    }

    /// Flatten into the fixed numeric layout described in the module docs.
    #[must_use]
    pub fn flatten(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(Self::flat_len(self.hubs.len()));

        // === Header ===
        out.push(self.tick as i64);
        out.push(self.remaining_ticks as i64);
        out.push(i64::from(self.terminal));

        // === Robots ===
        for r in &self.robots {
            out.push(r.team.index() as i64);
            out.push(r.zone.index() as i64);
            out.push(i64::from(r.balls_held));
            out.push(i64::from(r.capacity));
            out.push(i64::from(r.transit_remaining_ticks));
            out.push(r.destination.map_or(-1, |z| z.index() as i64));
            out.push(i64::from(r.cooldown_remaining_ticks));
            out.push(i64::from(r.intake_cooldown_remaining_ticks));
        }

        // === Scores and supply ===
        out.extend(Team::ALL.iter().map(|&t| i64::from(self.scores[t])));
        out.extend(self.zone_supply.values().map(|&b| i64::from(b)));

        // === Hubs ===
        for h in &self.hubs {
            out.push(h.zone.index() as i64);
            out.push(h.team.map_or(-1, |t| t.index() as i64));
            out.push(i64::from(h.active));
            out.push(i64::from(h.total));
        }

        out
    }

    /// Deterministic binary encoding.
    ///
    /// Equal snapshots always encode to equal bytes.
    pub fn to_bytes(&self) -> SimResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> SimResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
