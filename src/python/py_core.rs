//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::core::{MatchSnapshot, RobotAction, SimError, Team};

/// Python wrapper for Team.
#[pyclass(name = "Team")]
#[derive(Clone, Copy, Debug)]
pub struct PyTeam(pub Team);

#[pymethods]
impl PyTeam {
    /// Create a team from its index (0 = Red, 1 = Blue).
    #[new]
    fn new(index: usize) -> PyResult<Self> {
        Team::ALL
            .get(index)
            .copied()
            .map(Self)
            .ok_or_else(|| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("no team with index {}", index))
            })
    }

    #[classattr]
    #[allow(non_snake_case)]
    fn RED() -> Self {
        Self(Team::Red)
    }

    #[classattr]
    #[allow(non_snake_case)]
    fn BLUE() -> Self {
        Self(Team::Blue)
    }

    /// Get the team index.
    fn index(&self) -> usize {
        self.0.index()
    }

    /// The opposing team.
    fn opponent(&self) -> Self {
        Self(self.0.opponent())
    }

    fn __repr__(&self) -> String {
        format!("Team.{}", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0.index() as u64
    }
}

/// Describe a discrete action index, e.g. `"Move(Neutral)"`.
#[pyfunction]
pub fn action_name(index: u32) -> Option<String> {
    RobotAction::from_index(index).map(|a| a.to_string())
}

/// Length of a flat observation on a field with `hub_count` hubs.
#[pyfunction]
#[pyo3(signature = (hub_count = 2))]
pub fn observation_size(hub_count: usize) -> usize {
    MatchSnapshot::flat_len(hub_count)
}

/// Map engine errors to Python exceptions.
pub(crate) fn to_py_err(err: SimError) -> PyErr {
    match err {
        SimError::Configuration(_) => {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
        }
        SimError::InvalidPhase { .. } | SimError::Encoding(_) => {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(err.to_string())
        }
    }
}
