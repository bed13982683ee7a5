//! Match engine bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::{
    MatchConfig, MatchOutcome, MatchSnapshot, RobotAction, RobotId, Team, ACTION_COUNT, ROBOTS_PER_TEAM,
    ROBOT_COUNT,
};
use crate::rules::{EpisodePhase, MatchEngine, StepOutcome};

use super::py_core::{to_py_err, PyTeam};

/// Python wrapper for MatchEngine.
///
/// Observations are flat `int64` arrays (see `observation_size`).
/// Events are returned as JSON strings, one per event.
#[pyclass(name = "MatchEngine")]
pub struct PyMatchEngine {
    engine: MatchEngine,
}

impl PyMatchEngine {
    fn current(&self) -> PyResult<MatchSnapshot> {
        self.engine.snapshot().map_err(to_py_err)
    }

    fn finish<'py>(py: Python<'py>, outcome: StepOutcome) -> PyResult<(Bound<'py, PyArray1<i64>>, Vec<String>, bool)> {
        let events = outcome
            .events
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?;
        let obs = PyArray1::from_vec_bound(py, outcome.snapshot.flatten());
        Ok((obs, events, outcome.terminal))
    }
}

#[pymethods]
impl PyMatchEngine {
    #[new]
    fn new() -> Self {
        Self {
            engine: MatchEngine::new(),
        }
    }

    /// Start a new match.
    ///
    /// # Arguments
    /// - config_json: a serialized MatchConfig; the standard match if None
    ///
    /// Returns the initial observation.
    #[pyo3(signature = (config_json = None))]
    fn reset<'py>(&mut self, py: Python<'py>, config_json: Option<&str>) -> PyResult<Bound<'py, PyArray1<i64>>> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<MatchConfig>(json)
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?,
            None => MatchConfig::standard(),
        };
        let snapshot = self.engine.reset(config).map_err(to_py_err)?;
        Ok(PyArray1::from_vec_bound(py, snapshot.flatten()))
    }

    /// Advance one tick with one absolute action index per robot.
    ///
    /// Returns `(observation, events, terminal)`.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        actions: Vec<u32>,
    ) -> PyResult<(Bound<'py, PyArray1<i64>>, Vec<String>, bool)> {
        let indices: [u32; ROBOT_COUNT] = actions.try_into().map_err(|v: Vec<u32>| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "expected {} actions, got {}",
                ROBOT_COUNT,
                v.len()
            ))
        })?;
        let outcome = self.engine.step_indices(&indices).map_err(to_py_err)?;
        Self::finish(py, outcome)
    }

    /// Advance one tick with three actions per team, each in that team's
    /// own frame (own robots first, field mirrored for Blue).
    ///
    /// Returns `(observation, events, terminal)` with the absolute
    /// observation.
    fn step_teams<'py>(
        &mut self,
        py: Python<'py>,
        red: Vec<u32>,
        blue: Vec<u32>,
    ) -> PyResult<(Bound<'py, PyArray1<i64>>, Vec<String>, bool)> {
        let mut actions = [RobotAction::Hold; ROBOT_COUNT];
        for (team, indices) in [(Team::Red, &red), (Team::Blue, &blue)] {
            if indices.len() != ROBOTS_PER_TEAM {
                return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "expected {} actions for {}, got {}",
                    ROBOTS_PER_TEAM,
                    team,
                    indices.len()
                )));
            }
            for (slot, &index) in indices.iter().enumerate() {
                let absolute = RobotId::new(slot as u8).relative_to(team);
                actions[absolute.index()] = RobotAction::from_index(index).unwrap_or_default().for_team(team);
            }
        }
        let outcome = self.engine.step(&actions).map_err(to_py_err)?;
        Self::finish(py, outcome)
    }

    /// Current observation, optionally from one team's seat.
    #[pyo3(signature = (team = None))]
    fn observation<'py>(&self, py: Python<'py>, team: Option<PyTeam>) -> PyResult<Bound<'py, PyArray1<i64>>> {
        let snapshot = self.current()?;
        let view = match team {
            Some(t) => snapshot.for_team(t.0),
            None => snapshot,
        };
        Ok(PyArray1::from_vec_bound(py, view.flatten()))
    }

    /// Legality of each action index for an absolute robot slot.
    fn action_mask<'py>(&self, py: Python<'py>, robot: u8) -> PyResult<Bound<'py, PyArray1<bool>>> {
        let mask: [bool; ACTION_COUNT] = self.engine.action_mask(RobotId::new(robot)).map_err(to_py_err)?;
        Ok(PyArray1::from_slice_bound(py, &mask))
    }

    /// Current snapshot as JSON.
    fn snapshot_json(&self) -> PyResult<String> {
        let snapshot = self.current()?;
        serde_json::to_string(&snapshot)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))
    }

    /// (red, blue) scores.
    #[getter]
    fn scores(&self) -> (u32, u32) {
        self.engine
            .state()
            .map_or((0, 0), |s| (s.scores[Team::Red], s.scores[Team::Blue]))
    }

    /// Completed ticks.
    #[getter]
    fn tick(&self) -> u64 {
        self.engine.state().map_or(0, |s| s.tick)
    }

    /// "not_started", "running" or "terminated".
    #[getter]
    fn phase(&self) -> &'static str {
        match self.engine.phase() {
            EpisodePhase::NotStarted => "not_started",
            EpisodePhase::Running => "running",
            EpisodePhase::Terminated => "terminated",
        }
    }

    /// Winning team, once terminated. None for a draw or an unfinished match.
    #[getter]
    fn winner(&self) -> Option<PyTeam> {
        match self.engine.outcome()? {
            MatchOutcome::Winner(team) => Some(PyTeam(team)),
            MatchOutcome::Draw => None,
        }
    }

    /// Final result from `team`'s point of view: 1, 0 or -1. None until terminated.
    fn outcome_for(&self, team: PyTeam) -> Option<i32> {
        self.engine.outcome().map(|o| o.value_for(team.0))
    }

    fn __repr__(&self) -> String {
        let (red, blue) = self.scores();
        format!(
            "MatchEngine(tick={}, phase={}, red={}, blue={})",
            self.tick(),
            self.phase(),
            red,
            blue
        )
    }
}
