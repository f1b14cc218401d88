//! A breadth-first solver for the numbers round of "Des chiffres et des
//! lettres" (and its English-language descendant, Countdown): given a
//! target value and a handful of tiles, find the sequence of `+ - x /`
//! operations that gets closest to (or exactly matches) the target.
//!
//! The search enumerates every way to partition the tiles into two
//! non-empty groups, combines the results already known for each group,
//! and records only the best way of reaching any particular value — so
//! runtime and memory both stay bounded by the number of distinct reachable
//! results rather than by the much larger number of expression trees that
//! produce them.
//!
//! ```
//! use numbers_round::{Solver, SolveOptions, Tile};
//!
//! let mut solver = Solver::new(25_000, 15_000).unwrap();
//! let tiles = [Tile(100), Tile(75), Tile(50), Tile(25), Tile(6), Tile(3)];
//! let report = solver.solve(999, &tiles, &SolveOptions::default()).unwrap();
//! assert!(report.best_diff <= 1);
//!
//! let mut ops = Vec::new();
//! solver.reconstruct(&mut ops);
//! ```

mod arena;
mod combiner;
pub mod common;
pub mod complexity;
mod error;
pub mod rng;
mod solver;
pub mod validator;

pub use common::{decode_op, encode_op, Operator, Tile, MAX_TILES};
pub use error::NumbersError;
pub use solver::{Outcome, SolveOptions, SolveOptionsBuilder, SolveReport, Solver};
pub use validator::{validate, OperationEvent, ValidationReport};
