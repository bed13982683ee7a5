//! Match state: robots, ball ledger, scores.
//!
//! ## RobotState
//!
//! Per-robot parameters (copied from the roster at reset) and the mutable
//! fields the resolver works on: zone, balls held, transit and cooldown
//! timers.
//!
//! ## MatchState
//!
//! The single owned state object for one episode. It is built from a
//! validated `MatchConfig`, mutated only by the step loop, and dropped or
//! snapshotted at the end of the episode. Nothing in it is global, so any
//! number of matches can run side by side.
//!
//! ## Ball Ledger
//!
//! Balls are integers and are never created or destroyed mid-match:
//!
//! ```text
//! Σ zone_supply + Σ robot.balls_held + scored_total == initial_total_balls
//! ```

use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::entity::RobotId;
use super::team::{Team, TeamMap};
use super::zone::{HubId, Zone, ZoneMap};

/// Mutable state and fixed parameters of one robot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotState {
    // === Identity ===
    pub id: RobotId,
    pub team: Team,
    pub type_name: String,

    // === Parameters ===
    pub capacity: u32,
    /// Whole ticks per transit (already rounded up).
    pub transit_ticks: u32,
    pub intake_rate: u32,
    pub intake_period: u32,
    pub shoot_cooldown: u32,
    pub pass_amount: u32,

    // === Mutable ===
    /// Current zone. While in transit, the zone the robot left.
    pub zone: Zone,
    pub balls_held: u32,
    /// Ticks until arrival. Nonzero locks every non-movement action.
    pub transit_remaining_ticks: u32,
    /// Where the robot arrives. `Some` exactly while in transit.
    pub destination: Option<Zone>,
    pub cooldown_remaining_ticks: u32,
    /// Ticks until the next Intake is allowed.
    pub intake_cooldown_remaining_ticks: u32,
}

impl RobotState {
    /// Check if the robot is locked mid-transit.
    #[must_use]
    pub fn in_transit(&self) -> bool {
        self.transit_remaining_ticks > 0
    }

    /// Room left for more balls.
    #[must_use]
    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.balls_held)
    }

    /// Check if the robot is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.balls_held >= self.capacity
    }
}

/// Accumulated scoring at one hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubState {
    pub id: HubId,
    /// Shots accepted during the tick being resolved.
    pub accepted_this_tick: u32,
    /// Shots accepted this match. Never decreases.
    pub total: u32,
}

impl HubState {
    /// Create an empty hub ledger.
    #[must_use]
    pub fn new(id: HubId) -> Self {
        Self {
            id,
            accepted_this_tick: 0,
            total: 0,
        }
    }
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Completed ticks.
    pub tick: u64,

    /// Match length in ticks.
    pub duration_ticks: u64,

    /// Robots in slot order.
    pub robots: Vec<RobotState>,

    /// Loose balls per zone.
    pub zone_supply: ZoneMap<u32>,

    /// Points per alliance.
    pub scores: TeamMap<u32>,

    /// Balls removed from play by scoring.
    pub scored_total: u64,

    /// Per-hub ledgers, in configuration order.
    pub hubs: Vec<HubState>,

    /// Balls in play at reset.
    pub initial_total_balls: u64,
}

impl MatchState {
    /// Build the initial state from a configuration.
    ///
    /// Expects a config that passed `MatchConfig::validate`; robots are
    /// stored in slot order regardless of roster order.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        let mut robots: Vec<RobotState> = config
            .roster
            .iter()
            .map(|entry| RobotState {
                id: entry.id,
                team: entry.team,
                type_name: entry.robot_type.type_name.clone(),
                capacity: entry.robot_type.capacity,
                transit_ticks: entry.robot_type.transit_ticks(),
                intake_rate: entry.robot_type.intake_rate,
                intake_period: entry.robot_type.intake_period,
                shoot_cooldown: entry.robot_type.shoot_cooldown,
                pass_amount: entry.robot_type.pass_amount,
                zone: entry.start_zone,
                balls_held: entry.initial_balls,
                transit_remaining_ticks: 0,
                destination: None,
                cooldown_remaining_ticks: 0,
                intake_cooldown_remaining_ticks: 0,
            })
            .collect();
        robots.sort_by_key(|r| r.id);

        Self {
            tick: 0,
            duration_ticks: config.duration_ticks,
            robots,
            zone_supply: config.zone_supply,
            scores: TeamMap::with_value(0),
            scored_total: 0,
            hubs: config.hubs.iter().map(|h| HubState::new(h.id)).collect(),
            initial_total_balls: config.initial_total_balls(),
        }
    }

    // === Robots ===

    /// Get a robot by slot.
    #[must_use]
    pub fn robot(&self, id: RobotId) -> Option<&RobotState> {
        self.robots.get(id.index())
    }

    /// Get a mutable robot by slot.
    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut RobotState> {
        self.robots.get_mut(id.index())
    }

    /// Iterate over one alliance's robots.
    pub fn team_robots(&self, team: Team) -> impl Iterator<Item = &RobotState> {
        self.robots.iter().filter(move |r| r.team == team)
    }

    // === Hubs ===

    /// Get a hub ledger by ID.
    #[must_use]
    pub fn hub(&self, id: HubId) -> Option<&HubState> {
        self.hubs.iter().find(|h| h.id == id)
    }

    /// Get a mutable hub ledger by ID.
    pub fn hub_mut(&mut self, id: HubId) -> Option<&mut HubState> {
        self.hubs.iter_mut().find(|h| h.id == id)
    }

    // === Ball Ledger ===

    /// Loose balls across all zones.
    #[must_use]
    pub fn supply_total(&self) -> u64 {
        self.zone_supply.values().map(|&b| u64::from(b)).sum()
    }

    /// Balls carried across all robots.
    #[must_use]
    pub fn balls_held_total(&self) -> u64 {
        self.robots.iter().map(|r| u64::from(r.balls_held)).sum()
    }

    /// Check the ball conservation law.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.supply_total() + self.balls_held_total() + self.scored_total == self.initial_total_balls
    }

    /// Check the per-robot invariants: capacity bound and transit bookkeeping.
    #[must_use]
    pub fn robots_consistent(&self) -> bool {
        self.robots
            .iter()
            .all(|r| r.balls_held <= r.capacity && r.in_transit() == r.destination.is_some())
    }

    // === Clock ===

    /// Ticks left before the match ends.
    #[must_use]
    pub fn remaining_ticks(&self) -> u64 {
        self.duration_ticks.saturating_sub(self.tick)
    }

    /// Check if the match clock has run out.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.tick >= self.duration_ticks
    }
}
