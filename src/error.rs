//! This module defines the error type shared by the solver and the
//! validator. Every error kind from the original library's contract is
//! represented as a variant; `Aborted` is deliberately **not** one of them
//! (see [`crate::solver::Outcome`]) since running out of arena space is a
//! degraded-but-successful result, not a failure.

use thiserror::Error;

/// Everything that can go wrong when constructing a solver, running a
/// search, or replaying a solution against a set of tiles.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum NumbersError {
    /// `Solver::new` was called with a zero-sized arena or result index.
    #[error("operation capacity and result-index capacity must both be non-zero")]
    ZeroSize,
    /// More than [`crate::common::MAX_TILES`] tiles were supplied to `solve`.
    #[error("too many tiles: at most {} are supported", crate::common::MAX_TILES)]
    TooManyTiles,
    /// A decoded operation byte referenced a tile index outside `0..tile_count`,
    /// or referenced the same tile on both sides of the operator.
    #[error("operation references an invalid or repeated tile index")]
    IncorrectTileId,
    /// A decoded operation reused a tile slot that a previous operation had
    /// already consumed.
    #[error("operation reuses a tile that was already consumed")]
    TileUsedTwice,
    /// A `Sub` operation would have produced a negative intermediate value.
    #[error("subtraction would yield a negative result")]
    NegativeResult,
    /// A `Div` operation had a zero right-hand operand.
    #[error("division by zero")]
    DivisionByZero,
    /// A `Div` operation did not divide evenly.
    #[error("division leaves a non-zero remainder")]
    RemainderNotNull,
}
