//! Python bindings for the match engine.
//!
//! Exposes the reset/step interface to a Python learning wrapper. The
//! wrapper owns reward shaping and tensors; the engine only hands out
//! flat observations, events and action masks.
//!
//! # Quick Start
//!
//! ```python
//! import rust_hubsim as hs
//!
//! engine = hs.MatchEngine()
//! obs = engine.reset()                      # standard match
//!
//! while True:
//!     obs, events, terminal = engine.step([0] * hs.ROBOT_COUNT)
//!     if terminal:
//!         break
//!
//! print(engine.scores, engine.winner)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_engine;

pub use py_core::*;
pub use py_engine::*;

use crate::core::{ACTION_COUNT, ROBOTS_PER_TEAM, ROBOT_COUNT};

/// rust_hubsim: a 3-versus-3 robot match engine for self-play training.
#[pymodule]
fn rust_hubsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTeam>()?;
    m.add_class::<PyMatchEngine>()?;

    m.add_function(wrap_pyfunction!(action_name, m)?)?;
    m.add_function(wrap_pyfunction!(observation_size, m)?)?;

    m.add("ACTION_COUNT", ACTION_COUNT)?;
    m.add("ROBOT_COUNT", ROBOT_COUNT)?;
    m.add("ROBOTS_PER_TEAM", ROBOTS_PER_TEAM)?;

    Ok(())
}
