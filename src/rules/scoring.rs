//! Scoring subsystem.
//!
//! A hub accepts a shot when the shooter's alliance is eligible, the hub's
//! schedule has it active for the tick being resolved, and neither its
//! per-tick nor its per-match limit is used up. An accepted shot moves one
//! ball from "held" to "scored" in the ledger.
//!
//! `state.tick` counts completed ticks, so the tick being resolved is
//! `state.tick + 1`.

use crate::core::error::IllegalAction;
use crate::core::state::MatchState;
use crate::core::team::Team;
use crate::core::zone::HubId;
use crate::zones::ZoneTopology;

/// Reset per-tick hub counters. Called once at the start of each tick.
pub fn begin_tick(state: &mut MatchState) {
    for hub in &mut state.hubs {
        hub.accepted_this_tick = 0;
    }
}

/// Check whether `hub` would accept a shot from `team` right now.
pub fn check(topology: &ZoneTopology, state: &MatchState, hub: HubId, team: Team) -> Result<(), IllegalAction> {
    let (Some(config), Some(ledger)) = (topology.hub(hub), state.hub(hub)) else {
        return Err(IllegalAction::NoHub);
    };

    if config.team.is_some_and(|t| t != team) {
        return Err(IllegalAction::WrongTeam);
    }
    if !config.schedule.is_active(state.tick + 1, state.duration_ticks) {
        return Err(IllegalAction::HubInactive);
    }
    if config.max_per_tick.is_some_and(|max| ledger.accepted_this_tick >= max) {
        return Err(IllegalAction::RateLimited);
    }
    if config.max_per_match.is_some_and(|max| ledger.total >= max) {
        return Err(IllegalAction::RateLimited);
    }
    Ok(())
}

/// Record one scored ball for `team` at `hub`.
///
/// Returns `false`, leaving the state untouched, if the hub refuses.
pub fn score(topology: &ZoneTopology, state: &mut MatchState, hub: HubId, team: Team) -> bool {
    if check(topology, state, hub, team).is_err() {
        return false;
    }
    let Some(ledger) = state.hub_mut(hub) else {
        return false;
    };
    ledger.accepted_this_tick += 1;
    ledger.total += 1;
    state.scores[team] += 1;
    state.scored_total += 1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{HubConfig, HubSchedule, MatchConfig};
    use crate::core::zone::Zone;

    const RED_HUB: HubId = HubId(0);
    const BLUE_HUB: HubId = HubId(1);

    fn setup(config: MatchConfig) -> (ZoneTopology, MatchState) {
        let topology = config.topology().unwrap();
        let state = MatchState::new(&config);
        (topology, state)
    }

    #[test]
    fn test_score_updates_ledger() {
        let (topology, mut state) = setup(MatchConfig::simple());

        assert!(score(&topology, &mut state, RED_HUB, Team::Red));

        assert_eq!(state.scores[Team::Red], 1);
        assert_eq!(state.scores[Team::Blue], 0);
        assert_eq!(state.scored_total, 1);
        assert_eq!(state.hub(RED_HUB).unwrap().total, 1);
        assert_eq!(state.hub(RED_HUB).unwrap().accepted_this_tick, 1);
    }

    #[test]
    fn test_wrong_team_refused() {
        let (topology, mut state) = setup(MatchConfig::simple());

        assert_eq!(
            check(&topology, &state, BLUE_HUB, Team::Red),
            Err(IllegalAction::WrongTeam)
        );
        assert!(!score(&topology, &mut state, BLUE_HUB, Team::Red));
        assert_eq!(state.scored_total, 0);
    }

    #[test]
    fn test_unknown_hub_refused() {
        let (topology, state) = setup(MatchConfig::simple());
        assert_eq!(
            check(&topology, &state, HubId::new(9), Team::Red),
            Err(IllegalAction::NoHub)
        );
    }

    #[test]
    fn test_open_hub_accepts_both_teams() {
        let config = MatchConfig::simple()
            .with_hub(HubConfig::new(RED_HUB, "Shared", Zone::Attacker));
        let (topology, mut state) = setup(config);

        assert!(score(&topology, &mut state, RED_HUB, Team::Red));
        assert!(score(&topology, &mut state, RED_HUB, Team::Blue));
        assert_eq!(state.scores[Team::Blue], 1);
    }

    #[test]
    fn test_per_tick_limit_resets_each_tick() {
        let config = MatchConfig::simple().with_hub(
            HubConfig::new(RED_HUB, "Red Hub", Zone::Attacker)
                .for_team(Team::Red)
                .with_max_per_tick(1),
        );
        let (topology, mut state) = setup(config);

        assert!(score(&topology, &mut state, RED_HUB, Team::Red));
        assert_eq!(
            check(&topology, &state, RED_HUB, Team::Red),
            Err(IllegalAction::RateLimited)
        );
        assert!(!score(&topology, &mut state, RED_HUB, Team::Red));

        begin_tick(&mut state);
        assert!(score(&topology, &mut state, RED_HUB, Team::Red));
        assert_eq!(state.scores[Team::Red], 2);
    }

    #[test]
    fn test_per_match_limit() {
        let config = MatchConfig::simple().with_hub(
            HubConfig::new(RED_HUB, "Red Hub", Zone::Attacker)
                .for_team(Team::Red)
                .with_max_per_match(2),
        );
        let (topology, mut state) = setup(config);

        for _ in 0..5 {
            score(&topology, &mut state, RED_HUB, Team::Red);
            begin_tick(&mut state);
        }
        assert_eq!(state.scores[Team::Red], 2);
        assert_eq!(state.hub(RED_HUB).unwrap().total, 2);
    }

    #[test]
    fn test_inactive_hub_refused() {
        let schedule = HubSchedule::Shifts {
            auto_ticks: 2,
            shift_start: 2,
            shift_ticks: 5,
            endgame_ticks: 0,
            active_on_even: false,
        };
        let config = MatchConfig::simple().with_hub(
            HubConfig::new(RED_HUB, "Red Hub", Zone::Attacker)
                .for_team(Team::Red)
                .with_schedule(schedule),
        );
        let (topology, mut state) = setup(config);

        // Resolving tick 1: opening, active.
        assert!(check(&topology, &state, RED_HUB, Team::Red).is_ok());

        // Resolving tick 3: shift 0, which belongs to the other alliance.
        state.tick = 2;
        assert_eq!(
            check(&topology, &state, RED_HUB, Team::Red),
            Err(IllegalAction::HubInactive)
        );
    }
}
