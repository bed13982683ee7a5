//! Determinism and isolation tests.
//!
//! Equal configurations and action streams must give bit-identical
//! snapshots and identical event lists, whichever thread runs them and
//! whatever other matches run alongside.

use std::thread;

use rust_hubsim::core::{MatchConfig, MatchEvent, MatchSnapshot, PolicyRng, ACTION_COUNT, ROBOT_COUNT};
use rust_hubsim::policy::{run_match, RandomPolicy, RolloutOptions, ShuttlePolicy};
use rust_hubsim::rules::MatchEngine;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_stream(seed: u64, ticks: usize) -> Vec<[u32; ROBOT_COUNT]> {
    let mut rng = PolicyRng::new(seed);
    (0..ticks)
        .map(|_| {
            let mut indices = [0u32; ROBOT_COUNT];
            for index in &mut indices {
                *index = rng.gen_index(ACTION_COUNT) as u32;
            }
            indices
        })
        .collect()
}

/// Play a stream to the end, returning every snapshot's bytes and every event.
fn replay(config: MatchConfig, stream: &[[u32; ROBOT_COUNT]]) -> (Vec<Vec<u8>>, Vec<MatchEvent>) {
    let mut engine = MatchEngine::new();
    let first = engine.reset(config).unwrap();

    let mut frames = vec![first.to_bytes().unwrap()];
    let mut events = Vec::new();
    for indices in stream {
        let out = engine.step_indices(indices).unwrap();
        frames.push(out.snapshot.to_bytes().unwrap());
        events.extend(out.events);
        if out.terminal {
            break;
        }
    }
    (frames, events)
}

// =============================================================================
// Replays
// =============================================================================

#[test]
fn test_same_inputs_same_bytes() {
    init_logging();
    let stream = random_stream(7, 400);

    let a = replay(MatchConfig::standard(), &stream);
    let b = replay(MatchConfig::standard(), &stream);

    assert_eq!(a.0.len(), 401);
    assert_eq!(a, b);
}

#[test]
fn test_different_inputs_diverge() {
    let a = replay(MatchConfig::simple(), &random_stream(1, 100));
    let b = replay(MatchConfig::simple(), &random_stream(2, 100));
    assert_ne!(a.1, b.1);
}

#[test]
fn test_reset_starts_over() {
    let stream = random_stream(3, 50);
    let mut engine = MatchEngine::new();

    let first = engine.reset(MatchConfig::simple()).unwrap();
    for indices in &stream {
        engine.step_indices(indices).unwrap();
    }
    let again = engine.reset(MatchConfig::simple()).unwrap();

    assert_eq!(first, again);
    assert_eq!(engine.state().unwrap().tick, 0);
}

#[test]
fn test_snapshot_bytes_decode() {
    let (frames, _) = replay(MatchConfig::standard(), &random_stream(9, 30));
    let last = MatchSnapshot::from_bytes(frames.last().unwrap()).unwrap();
    assert_eq!(last.tick, 30);
    assert_eq!(last.to_bytes().unwrap(), *frames.last().unwrap());
}

// =============================================================================
// Isolation
// =============================================================================

#[test]
fn test_parallel_matches_do_not_interfere() {
    init_logging();
    let streams: Vec<_> = (0..4).map(|seed| random_stream(seed, 300)).collect();
    let sequential: Vec<_> = streams
        .iter()
        .map(|s| replay(MatchConfig::standard(), s))
        .collect();

    let handles: Vec<_> = streams
        .into_iter()
        .map(|s| thread::spawn(move || replay(MatchConfig::standard(), &s)))
        .collect();
    let parallel: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_interleaved_engines_match_solo_runs() {
    let stream_a = random_stream(11, 100);
    let stream_b = random_stream(12, 100);
    let solo_a = replay(MatchConfig::simple(), &stream_a);

    let mut a = MatchEngine::new();
    let mut b = MatchEngine::new();
    a.reset(MatchConfig::simple()).unwrap();
    b.reset(MatchConfig::simple()).unwrap();

    let mut events_a = Vec::new();
    for (ia, ib) in stream_a.iter().zip(&stream_b) {
        events_a.extend(a.step_indices(ia).unwrap().events);
        b.step_indices(ib).unwrap();
    }

    assert_eq!(events_a, solo_a.1);
}

// =============================================================================
// Rollouts
// =============================================================================

#[test]
fn test_rollouts_reproduce() {
    let play = || {
        run_match(
            MatchConfig::standard(),
            &mut RandomPolicy::new(5),
            &mut ShuttlePolicy::new(),
            &RolloutOptions::default().with_frames(100),
        )
        .unwrap()
    };

    let a = play();
    let b = play();
    assert_eq!(a.frames, b.frames);
    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.final_snapshot.tick, MatchConfig::standard().duration_ticks);
}
