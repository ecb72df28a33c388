//! Turning and solving n×n×n puzzle cubes.
//!
//! ```
//! use puzzlecube::prelude::*;
//!
//! let mut cube = CubeState::solved(3).unwrap();
//! let scramble = parse_moves("X0 Y1 Z2'").unwrap();
//!
//! cube.apply_moves(scramble.clone()).unwrap();
//! assert!(!cube.is_solved());
//!
//! let solution = solve(&cube, &CubeState::solved(3).unwrap()).unwrap();
//! assert!(solution.len() <= scramble.len());
//!
//! cube.apply_moves(solution).unwrap();
//! assert!(cube.is_solved());
//! ```
//!
//! A cube counts as solved in any orientation, the solver doesn't care
//! which face ends up on top.

pub mod cube;
pub mod solve;

pub mod prelude {
	pub use crate::cube::{cubestate::*, format::*, orientation::*, turn::*, *};
	pub use crate::solve::bestfirst::{solve, SolveError, SolveStats, Solver, SolverConfig};
	pub use crate::solve::scorer::{score, Scorer};
}
