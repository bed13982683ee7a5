//! Match configuration types.
//!
//! A match is configured once per episode by providing:
//! - `RobotType`: the parameter record for a kind of robot
//! - `RosterEntry`: a robot slot, its alliance, start zone and parameters
//! - `HubConfig`: a scoring target, its zone, eligibility and rate limits
//! - `MatchConfig`: combines all of the above with duration and ball placement
//!
//! Robot "types" are data, not a type hierarchy: a faster, lower-capacity
//! variant is just another `RobotType` value.

use serde::{Deserialize, Serialize};

use super::entity::{RobotId, ROBOTS_PER_TEAM, ROBOT_COUNT};
use super::error::ConfigError;
use super::team::Team;
use super::zone::{HubId, Zone, ZoneMap};
use crate::zones::ZoneTopology;

/// Parameters shared by every robot of one type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotType {
    /// Preset name (for debugging/display).
    pub type_name: String,

    /// Maximum balls carried.
    pub capacity: u32,

    /// Ticks to move between adjacent zones. Fractions round up.
    pub transit_time: f64,

    /// Balls collected per Intake action.
    pub intake_rate: u32,

    /// Ticks between Intake actions. 1 allows an intake every tick.
    #[serde(default = "default_intake_period")]
    pub intake_period: u32,

    /// Ticks a robot waits after a shot before it may shoot again.
    pub shoot_cooldown: u32,

    /// Balls handed over per Pass action.
    #[serde(default = "default_pass_amount")]
    pub pass_amount: u32,
}

fn default_pass_amount() -> u32 {
    1
}

fn default_intake_period() -> u32 {
    1
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

impl RobotType {
    /// Create a robot type that may intake every tick and passes one ball.
    pub fn new(
        type_name: impl Into<String>,
        capacity: u32,
        transit_time: f64,
        intake_rate: u32,
        shoot_cooldown: u32,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            capacity,
            transit_time,
            intake_rate,
            intake_period: default_intake_period(),
            shoot_cooldown,
            pass_amount: default_pass_amount(),
        }
    }

    /// Build a robot type from real-time rates.
    ///
    /// Seconds and per-second rates are converted to ticks so that a robot
    /// is never faster than its rated speed:
    /// - `transit_time = transit_seconds * ticks_per_second`
    /// - intake: `floor(intake_per_second)` balls per second (at least 1),
    ///   reduced to `intake_rate` balls every `intake_period` ticks, so 6
    ///   balls per second at 10 ticks per second is 3 balls every 5 ticks
    /// - `shoot_cooldown = ceil(ticks_per_second / shots_per_second)`
    pub fn from_rates(
        type_name: impl Into<String>,
        capacity: u32,
        transit_seconds: f64,
        intake_per_second: f64,
        shots_per_second: f64,
        ticks_per_second: u32,
    ) -> Self {
        let ticks = ticks_per_second.max(1);
        let tps = f64::from(ticks);
        let shots = if shots_per_second > 0.0 { shots_per_second } else { 1.0 };

        let balls_per_second = intake_per_second.floor().max(1.0) as u32;
        let common = gcd(balls_per_second, ticks);
        let shoot_cooldown = (tps / shots).ceil() as u32;

        Self::new(type_name, capacity, transit_seconds * tps, balls_per_second / common, shoot_cooldown)
            .with_intake_period(ticks / common)
    }

    /// Set the ticks between intakes.
    #[must_use]
    pub fn with_intake_period(mut self, ticks: u32) -> Self {
        self.intake_period = ticks;
        self
    }

    /// Set the per-pass transfer amount.
    #[must_use]
    pub fn with_pass_amount(mut self, amount: u32) -> Self {
        self.pass_amount = amount;
        self
    }

    /// Transit duration in whole ticks (ceiling of `transit_time`).
    #[must_use]
    pub fn transit_ticks(&self) -> u32 {
        self.transit_time.ceil() as u32
    }
}

/// One robot slot in the match roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Roster slot, also the resolution tie-break order.
    pub id: RobotId,

    /// Owning alliance.
    pub team: Team,

    /// Zone the robot occupies at reset.
    pub start_zone: Zone,

    /// Balls preloaded at reset. Taken from outside the zone supply.
    #[serde(default)]
    pub initial_balls: u32,

    /// Type parameters.
    #[serde(flatten)]
    pub robot_type: RobotType,
}

impl RosterEntry {
    /// Create a roster entry with no preloaded balls.
    pub fn new(id: RobotId, team: Team, start_zone: Zone, robot_type: RobotType) -> Self {
        Self {
            id,
            team,
            start_zone,
            initial_balls: 0,
            robot_type,
        }
    }

    /// Set the preloaded ball count.
    #[must_use]
    pub fn with_initial_balls(mut self, balls: u32) -> Self {
        self.initial_balls = balls;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let robot = self.id;
        let t = &self.robot_type;

        if t.capacity == 0 {
            return Err(ConfigError::ZeroCapacity { robot });
        }
        if !t.transit_time.is_finite() || t.transit_time <= 0.0 {
            return Err(ConfigError::InvalidTransitTime {
                robot,
                value: t.transit_time,
            });
        }
        if t.intake_rate == 0 {
            return Err(ConfigError::ZeroIntakeRate { robot });
        }
        if t.intake_period == 0 {
            return Err(ConfigError::ZeroIntakePeriod { robot });
        }
        if t.pass_amount == 0 {
            return Err(ConfigError::ZeroPassAmount { robot });
        }
        if self.initial_balls > t.capacity {
            return Err(ConfigError::PreloadExceedsCapacity {
                robot,
                balls: self.initial_balls,
                capacity: t.capacity,
            });
        }
        Ok(())
    }
}

/// When a hub accepts scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HubSchedule {
    /// Active for the whole match.
    Always,

    /// Alternating shifts between an always-active opening and endgame.
    ///
    /// - ticks `1..=auto_ticks`: active
    /// - last `endgame_ticks` ticks: active
    /// - before `shift_start`: active
    /// - otherwise shift `n = (tick - shift_start) / shift_ticks` is active
    ///   when `n` is even if `active_on_even`, odd otherwise
    Shifts {
        auto_ticks: u64,
        shift_start: u64,
        shift_ticks: u64,
        endgame_ticks: u64,
        active_on_even: bool,
    },
}

impl HubSchedule {
    /// Check if the hub is active while resolving `tick` (1-based).
    #[must_use]
    pub fn is_active(&self, tick: u64, duration_ticks: u64) -> bool {
        match *self {
            HubSchedule::Always => true,
            HubSchedule::Shifts {
                auto_ticks,
                shift_start,
                shift_ticks,
                endgame_ticks,
                active_on_even,
            } => {
                if tick > duration_ticks.saturating_sub(endgame_ticks) {
                    return true;
                }
                if tick <= auto_ticks || tick < shift_start || shift_ticks == 0 {
                    return true;
                }
                let shift = (tick - shift_start) / shift_ticks;
                (shift % 2 == 0) == active_on_even
            }
        }
    }
}

/// Configuration for one hub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    /// Unique identifier for this hub.
    pub id: HubId,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Zone the hub is reachable from.
    pub zone: Zone,

    /// Alliance allowed to score here. `None` accepts both.
    pub team: Option<Team>,

    /// Maximum accepted shots per tick. `None` for unlimited.
    pub max_per_tick: Option<u32>,

    /// Maximum accepted shots per match. `None` for unlimited.
    pub max_per_match: Option<u32>,

    /// Activation schedule.
    pub schedule: HubSchedule,
}

impl HubConfig {
    /// Create an always-active hub with no limits.
    pub fn new(id: HubId, name: impl Into<String>, zone: Zone) -> Self {
        Self {
            id,
            name: name.into(),
            zone,
            team: None,
            max_per_tick: None,
            max_per_match: None,
            schedule: HubSchedule::Always,
        }
    }

    /// Restrict scoring to one alliance.
    #[must_use]
    pub fn for_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    /// Limit accepted shots per tick.
    #[must_use]
    pub fn with_max_per_tick(mut self, max: u32) -> Self {
        self.max_per_tick = Some(max);
        self
    }

    /// Limit accepted shots per match.
    #[must_use]
    pub fn with_max_per_match(mut self, max: u32) -> Self {
        self.max_per_match = Some(max);
        self
    }

    /// Set the activation schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: HubSchedule) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Match length. The episode terminates after this many steps.
    pub duration_ticks: u64,

    /// Real-time resolution, used only to convert rated presets.
    pub ticks_per_second: u32,

    /// Loose balls per zone at reset.
    pub zone_supply: ZoneMap<u32>,

    /// Undirected zone adjacency.
    pub links: Vec<(Zone, Zone)>,

    /// Scoring targets.
    pub hubs: Vec<HubConfig>,

    /// Exactly six robots, three per alliance.
    pub roster: Vec<RosterEntry>,
}

/// Attacker↔Neutral↔Defender.
pub const STANDARD_LINKS: [(Zone, Zone); 2] = [(Zone::Attacker, Zone::Neutral), (Zone::Neutral, Zone::Defender)];

impl MatchConfig {
    /// The full-length match.
    ///
    /// 504 balls, 160 seconds at 10 ticks per second, each robot preloaded
    /// with 8 balls. Red scores in the Attacker zone, Blue in the Defender
    /// zone, and the two hubs alternate in 25 second shifts after a
    /// 20 second opening; both are live for the final 30 seconds.
    #[must_use]
    pub fn standard() -> Self {
        const TICKS_PER_SECOND: u32 = 10;
        const TOTAL_BALLS: u32 = 504;
        const PRELOAD: u32 = 8;
        let tps = u64::from(TICKS_PER_SECOND);

        let registry = super::presets::RobotTypeRegistry::standard(TICKS_PER_SECOND);
        let lineup = ["light", "balanced", "hauler"];

        let mut roster = Vec::with_capacity(ROBOT_COUNT);
        for (team, home) in [(Team::Red, Zone::Attacker), (Team::Blue, Zone::Defender)] {
            for (slot, name) in lineup.iter().enumerate() {
                let id = RobotId::new((team.index() * ROBOTS_PER_TEAM + slot) as u8);
                if let Some(robot_type) = registry.get(name) {
                    roster.push(
                        RosterEntry::new(id, team, home, robot_type.clone()).with_initial_balls(PRELOAD),
                    );
                }
            }
        }

        let shifts = |active_on_even| HubSchedule::Shifts {
            auto_ticks: 20 * tps,
            shift_start: 30 * tps,
            shift_ticks: 25 * tps,
            endgame_ticks: 30 * tps,
            active_on_even,
        };

        Self {
            duration_ticks: 160 * tps,
            ticks_per_second: TICKS_PER_SECOND,
            zone_supply: ZoneMap::from_array([0, TOTAL_BALLS - PRELOAD * ROBOT_COUNT as u32, 0]),
            links: STANDARD_LINKS.to_vec(),
            hubs: vec![
                HubConfig::new(HubId::new(0), "Red Hub", Zone::Attacker)
                    .for_team(Team::Red)
                    .with_schedule(shifts(true)),
                HubConfig::new(HubId::new(1), "Blue Hub", Zone::Defender)
                    .for_team(Team::Blue)
                    .with_schedule(shifts(false)),
            ],
            roster,
        }
    }

    /// A small always-active match for tests and quick experiments.
    ///
    /// 100 ticks, 30 balls in Neutral, every robot starts empty in Neutral
    /// with capacity 20, transit 2, intake 5 and shoot cooldown 1.
    #[must_use]
    pub fn simple() -> Self {
        let robot_type = RobotType::new("simple", 20, 2.0, 5, 1);
        let roster = RobotId::all()
            .map(|id| RosterEntry::new(id, id.default_team(), Zone::Neutral, robot_type.clone()))
            .collect();

        Self {
            duration_ticks: 100,
            ticks_per_second: 1,
            zone_supply: ZoneMap::from_array([0, 30, 0]),
            links: STANDARD_LINKS.to_vec(),
            hubs: vec![
                HubConfig::new(HubId::new(0), "Red Hub", Zone::Attacker).for_team(Team::Red),
                HubConfig::new(HubId::new(1), "Blue Hub", Zone::Defender).for_team(Team::Blue),
            ],
            roster,
        }
    }

    /// Set the match length.
    #[must_use]
    pub fn with_duration(mut self, ticks: u64) -> Self {
        self.duration_ticks = ticks;
        self
    }

    /// Set the loose ball count in one zone.
    #[must_use]
    pub fn with_supply(mut self, zone: Zone, balls: u32) -> Self {
        self.zone_supply[zone] = balls;
        self
    }

    /// Add a hub, replacing any hub with the same ID.
    #[must_use]
    pub fn with_hub(mut self, hub: HubConfig) -> Self {
        self.hubs.retain(|h| h.id != hub.id);
        self.hubs.push(hub);
        self
    }

    /// Remove every hub.
    #[must_use]
    pub fn without_hubs(mut self) -> Self {
        self.hubs.clear();
        self
    }

    /// Add a roster entry, replacing any entry in the same slot.
    #[must_use]
    pub fn with_robot(mut self, entry: RosterEntry) -> Self {
        match self.roster.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.roster.push(entry),
        }
        self
    }

    /// Get a roster entry by slot.
    #[must_use]
    pub fn robot(&self, id: RobotId) -> Option<&RosterEntry> {
        self.roster.iter().find(|e| e.id == id)
    }

    /// Get a hub config by ID.
    #[must_use]
    pub fn get_hub(&self, id: HubId) -> Option<&HubConfig> {
        self.hubs.iter().find(|h| h.id == id)
    }

    /// Balls in play at reset: zone supply plus preloads.
    #[must_use]
    pub fn initial_total_balls(&self) -> u64 {
        let supply: u64 = self.zone_supply.values().map(|&b| u64::from(b)).sum();
        let preload: u64 = self.roster.iter().map(|e| u64::from(e.initial_balls)).sum();
        supply + preload
    }

    /// Check every construction rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topology().map(|_| ())
    }

    /// Validate and build the zone topology.
    pub fn topology(&self) -> Result<ZoneTopology, ConfigError> {
        if self.duration_ticks == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        if self.roster.len() != ROBOT_COUNT {
            return Err(ConfigError::RosterSize {
                expected: ROBOT_COUNT,
                actual: self.roster.len(),
            });
        }

        let mut seen = [false; ROBOT_COUNT];
        for entry in &self.roster {
            if !entry.id.is_valid() {
                return Err(ConfigError::RobotOutOfRange { robot: entry.id });
            }
            if std::mem::replace(&mut seen[entry.id.index()], true) {
                return Err(ConfigError::DuplicateRobot { robot: entry.id });
            }
            entry.validate()?;
        }

        for team in Team::ALL {
            let actual = self.roster.iter().filter(|e| e.team == team).count();
            if actual != ROBOTS_PER_TEAM {
                return Err(ConfigError::TeamSize {
                    team,
                    expected: ROBOTS_PER_TEAM,
                    actual,
                });
            }
        }

        if let Some(entry) = self.roster.iter().find(|e| e.team != e.id.default_team()) {
            return Err(ConfigError::SlotTeamMismatch {
                robot: entry.id,
                expected: entry.id.default_team(),
            });
        }

        for hub in &self.hubs {
            if let HubSchedule::Shifts { shift_ticks: 0, .. } = hub.schedule {
                return Err(ConfigError::ZeroShiftLength { hub: hub.id });
            }
        }

        ZoneTopology::from_links(&self.links, &self.hubs)
    }
}
