//! The breadth-first driver: enumerates every non-empty subset of the
//! supplied tiles in order of increasing size, partitions each subset into
//! every disjoint non-empty pair of smaller subsets exactly once, and feeds
//! the combiner's candidates through a recorder that deduplicates by result
//! value and keeps the closest-to-target (and, among ties, least complex)
//! way of reaching it.

use derive_builder::Builder;

use crate::arena::{Arena, OpId, OperationGroup};
use crate::combiner::{self, Candidate};
use crate::common::{Operator, Tile, MAX_TILES};
use crate::complexity::{self, ComplexityModel};
use crate::error::NumbersError;

/// Tunables for a single [`Solver::solve`] call. Built with the
/// [`SolveOptionsBuilder`] rather than constructed directly so new knobs can
/// be added later without breaking callers that only set the ones they care
/// about.
#[derive(Copy, Clone, Debug, Builder)]
#[builder(pattern = "owned", setter(into))]
pub struct SolveOptions {
    /// Whether candidate operations are weighed by human-difficulty.
    #[builder(default)]
    pub complexity_model: ComplexityModel,

    /// The highest complexity a recorded operation may have. Candidates
    /// above this are skipped entirely, as if the arithmetic rules simply
    /// didn't allow them. `u16::MAX` (the default) puts no practical
    /// ceiling on it, and is what gets the best solution regardless of how
    /// "hard to find" it would be for a human player.
    #[builder(default = "u16::MAX")]
    pub complexity_cap: u16,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptionsBuilder::default().build().expect("all fields have defaults")
    }
}

/// How a `solve` call ended. Running out of arena space is a degraded but
/// still meaningful result — the best solution found so far is always kept
/// — so it is a value here, never an `Err`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The full subset lattice was explored.
    Success,
    /// The operation arena filled up before every subset was explored.
    Aborted,
}

/// The outcome of a `solve` call: how it ended, how far the best operation
/// found lands from the target, and that operation's complexity score.
#[derive(Copy, Clone, Debug)]
pub struct SolveReport {
    pub outcome: Outcome,
    pub best_diff: u32,
    pub best_complexity: u16,
}

pub struct Solver {
    arena: Arena,
    best_id: Option<OpId>,
    best_diff: u32,
    /// How many tiles the currently-kept best solution consumes. Tracked
    /// alongside `best_diff`/`best_id` so a shorter solution is never
    /// displaced by a longer one that does no better against the target.
    best_tile_count: usize,
    target: u32,
    /// Number of tiles in the draw being solved right now; the group being
    /// combined is the "final" one exactly when `current_tile_count`
    /// reaches this.
    final_tile_count: usize,
    /// Number of tiles combined to reach the group currently being built.
    current_tile_count: usize,
    complexity_cap: u16,
}

impl Solver {
    /// Allocates a solver with room for `operation_capacity` recorded
    /// operations and a result index addressing values `0..result_index_capacity`.
    /// There is no paired "shutdown" call: the arena's storage is freed when
    /// the `Solver` is dropped, same as any other owned `Vec`.
    pub fn new(operation_capacity: u16, result_index_capacity: u16) -> Result<Solver, NumbersError> {
        if operation_capacity == 0 || result_index_capacity == 0 {
            return Err(NumbersError::ZeroSize);
        }
        Ok(Solver {
            arena: Arena::new(operation_capacity, result_index_capacity),
            best_id: None,
            best_diff: u32::MAX,
            best_tile_count: 0,
            target: 0,
            final_tile_count: 0,
            current_tile_count: 0,
            complexity_cap: u16::MAX,
        })
    }

    /// Searches for a way to combine `tiles` into `target`, recording the
    /// closest result found (exact match or otherwise). Call
    /// [`Solver::reconstruct`] afterwards to get the operation sequence.
    pub fn solve(&mut self, target: u32, tiles: &[Tile], options: &SolveOptions) -> Result<SolveReport, NumbersError> {
        if tiles.len() > MAX_TILES {
            return Err(NumbersError::TooManyTiles);
        }
        let n = tiles.len() as u8;
        self.arena.clear();
        self.target = target;
        self.best_id = None;
        self.best_diff = u32::MAX;
        self.best_tile_count = 0;
        self.final_tile_count = n as usize;
        self.current_tile_count = 1;
        self.complexity_cap = options.complexity_cap;

        // groups[mask] is the arena range holding every result reachable
        // from exactly the tile subset `mask`. Index 0 (the empty subset)
        // is never populated or read.
        let mut groups: Vec<Option<OperationGroup>> = vec![None; 1usize << n];
        let mut aborted = false;

        'outer: for (i, &tile) in tiles.iter().enumerate() {
            let first = self.arena.head();
            let weight = match options.complexity_model {
                ComplexityModel::Enabled => complexity::result_weight(tile.value()),
                ComplexityModel::Disabled => 0,
            };
            let group = OperationGroup { first, last: first };
            if !self.record(OpId(0), OpId(0), tile.value(), None, weight, 0, group) {
                aborted = true;
                break 'outer;
            }
            groups[1usize << i] = Some(OperationGroup { first, last: self.arena.head() });
        }

        if !aborted {
            for k in 2..=n {
                self.current_tile_count = k as usize;
                let limit = 1u32 << n;
                let mut mask: u16 = (1u16 << k) - 1;
                while (mask as u32) < limit {
                    if aborted {
                        break;
                    }
                    let group_first = self.arena.head();
                    let mut sub = (mask.wrapping_sub(1)) & mask;
                    while sub != 0 && !aborted {
                        let comp = mask ^ sub;
                        if sub < comp {
                            // Every proper non-empty submask of `mask` has a
                            // strictly smaller popcount and was therefore
                            // already recorded in an earlier iteration of
                            // the `k` loop above.
                            let group_sub = groups[sub as usize].expect("submask group already built");
                            let group_comp = groups[comp as usize].expect("submask group already built");
                            let mut candidates: Vec<Candidate> = Vec::new();
                            combiner::combine(
                                &self.arena,
                                group_sub,
                                group_comp,
                                options.complexity_model,
                                self.complexity_cap,
                                |c| candidates.push(c),
                            );
                            for candidate in candidates {
                                let group = OperationGroup { first: group_first, last: self.arena.head() };
                                let recorded = self.record(
                                    candidate.left,
                                    candidate.right,
                                    candidate.result,
                                    Some(candidate.op),
                                    candidate.weight,
                                    candidate.complexity,
                                    group,
                                );
                                if !recorded {
                                    aborted = true;
                                    break;
                                }
                            }
                        }
                        sub = sub.wrapping_sub(1) & mask;
                    }
                    groups[mask as usize] = Some(OperationGroup { first: group_first, last: self.arena.head() });
                    mask = gosper_next(mask);
                }
                if aborted {
                    break;
                }
            }
        }

        Ok(SolveReport {
            outcome: if aborted { Outcome::Aborted } else { Outcome::Success },
            best_diff: self.best_diff,
            best_complexity: self.best_id.map(|id| self.arena.get(id).complexity).unwrap_or(0),
        })
    }

    /// Records one operation (a bare tile when `op` is `None`, otherwise a
    /// combination of `left` and `right`) against the group currently being
    /// built, and updates the best-so-far bookkeeping. Returns `false` if
    /// the arena is full and a brand-new entry could not be appended (the
    /// caller treats this as an abort).
    ///
    /// Has three cases, mirroring the original recorder:
    ///
    /// 1. No best recorded yet, or this result lands strictly closer to the
    ///    target than the current best: no contest, always append a fresh
    ///    entry and make it the new best (a duplicate this close would
    ///    already have been caught by one of the other two cases, so there
    ///    is no need to search the group for one).
    /// 2. The group being built is the *final* one, i.e. every tile has
    ///    been used: a worse-or-equal candidate (farther from the target,
    ///    no cheaper, or using more tiles than the current best) is
    ///    rejected outright, since it could never end up the answer. A
    ///    surviving candidate is still deduplicated against this group.
    /// 3. Any other (intermediate) group: deduplicated against this group
    ///    as usual; a duplicate is only kept if it is strictly cheaper, and
    ///    a genuinely new result only displaces the current best when it
    ///    ties its distance, tile count, and beats its complexity.
    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        left: OpId,
        right: OpId,
        result: u32,
        op: Option<Operator>,
        weight: u8,
        complexity: u16,
        group: OperationGroup,
    ) -> bool {
        if complexity > self.complexity_cap {
            return true;
        }

        let target_diff = result.abs_diff(self.target);
        let operation_id;
        // Whether the slot ultimately written to should become the new
        // best; only consulted when that slot turns out to be a fresh one.
        let mut best_result = true;

        if self.best_id.is_none() || target_diff < self.best_diff {
            operation_id = group.last;
        } else if self.current_tile_count == self.final_tile_count {
            let best = self.arena.get(self.best_id.expect("checked above"));
            if target_diff > self.best_diff || complexity >= best.complexity || self.current_tile_count > self.best_tile_count {
                // This could never replace the current best; not worth recording.
                return true;
            }
            operation_id = self.arena.search_in_group(result, group.first, group.last).unwrap_or(group.last);
        } else {
            match self.arena.search_in_group(result, group.first, group.last) {
                None => {
                    let best = self.arena.get(self.best_id.expect("checked above"));
                    best_result = target_diff == self.best_diff
                        && complexity < best.complexity
                        && self.current_tile_count == self.best_tile_count;
                    operation_id = group.last;
                }
                Some(existing) => {
                    if complexity >= self.arena.get(existing).complexity {
                        // A cheaper way to the same result is already on file.
                        return true;
                    }
                    operation_id = existing;
                }
            }
        }

        if operation_id == group.last {
            let Some(id) = self.arena.push(left, right, result, op, weight, complexity) else {
                return false;
            };
            if best_result {
                self.best_id = Some(id);
                self.best_diff = target_diff;
                self.best_tile_count = self.current_tile_count;
            }
        } else {
            self.arena.update(operation_id, left, right, op, complexity);
        }
        true
    }

    /// Writes the best solution found by the last `solve` call as a
    /// zero-terminated stream of encoded operation bytes (see
    /// [`crate::common::encode_op`]) into `out`, clearing it first. Writes
    /// nothing but the terminator if the best result was a bare tile (no
    /// operations at all).
    ///
    /// `out` must have room for at least `tile_count - 1` operation bytes
    /// plus the terminator; recursion depth is bounded the same way (at
    /// most `MAX_TILES - 1`), so there is no need to guard against a stack
    /// overflow here.
    pub fn reconstruct(&self, out: &mut Vec<u8>) {
        out.clear();
        if let Some(id) = self.best_id {
            self.generate_solution(id, out);
        }
        out.push(0);
    }

    fn generate_solution(&self, id: OpId, out: &mut Vec<u8>) -> u8 {
        let operation = self.arena.get(id);
        let Some(op) = operation.op else {
            // Leaf: the tile index doubles as "where the result now lives"
            // for the caller's replay of the stream.
            return leaf_tile_index(&self.arena, id);
        };
        let left_tile = self.generate_solution(operation.left, out);
        let right_tile = self.generate_solution(operation.right, out);
        out.push(crate::common::encode_op(left_tile, right_tile, op));
        left_tile
    }
}

/// A leaf's position among the solver's own leaf records is its tile index;
/// since leaves are recorded in tile order at the very start of the arena,
/// the arena id doubles as that index directly.
fn leaf_tile_index(_arena: &Arena, id: OpId) -> u8 {
    id.0 as u8
}

/// Advances `mask` to the next larger value with the same population count,
/// via Gosper's hack. `mask` must be non-zero.
fn gosper_next(mask: u16) -> u16 {
    let u = mask & mask.wrapping_neg();
    let v = u.wrapping_add(mask);
    v.wrapping_add(((v ^ mask) / u) >> 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(values: &[u32]) -> Vec<Tile> {
        values.iter().map(|&v| Tile(v)).collect()
    }

    #[test]
    fn gosper_next_enumerates_three_bit_masks_in_order() {
        let mut mask: u16 = 0b0111;
        let mut seen = vec![mask];
        for _ in 0..4 {
            mask = gosper_next(mask);
            seen.push(mask);
        }
        assert_eq!(vec![0b0111, 0b1011, 0b1101, 0b1110, 0b10111], seen);
    }

    #[test]
    fn exact_match_is_found_via_multiplication() {
        let mut solver = Solver::new(64, 16).unwrap();
        let report = solver.solve(4, &tiles(&[2, 2]), &SolveOptions::default()).unwrap();
        assert_eq!(Outcome::Success, report.outcome);
        assert_eq!(0, report.best_diff);
    }

    #[test]
    fn closest_result_is_kept_when_no_exact_match_exists() {
        // 25000/15000 is the combination the original implementation's
        // documentation calls out as appropriate for a 6-tile search.
        let mut solver = Solver::new(25_000, 15_000).unwrap();
        let report = solver.solve(999, &tiles(&[100, 75, 50, 25, 6, 3]), &SolveOptions::default()).unwrap();
        assert_eq!(Outcome::Success, report.outcome);
        assert!(report.best_diff <= 1);
    }

    #[test]
    fn single_tile_with_no_target_match_reports_the_full_distance() {
        let mut solver = Solver::new(16, 16).unwrap();
        let report = solver.solve(999_999_999, &tiles(&[1]), &SolveOptions::default()).unwrap();
        assert_eq!(999_999_998, report.best_diff);
        let mut out = Vec::new();
        solver.reconstruct(&mut out);
        assert_eq!(vec![0u8], out);
    }

    #[test]
    fn single_tile_equal_to_target_reconstructs_an_empty_operation_stream() {
        let mut solver = Solver::new(16, 16).unwrap();
        let report = solver.solve(42, &tiles(&[42]), &SolveOptions::default()).unwrap();
        assert_eq!(0, report.best_diff);
        let mut out = Vec::new();
        solver.reconstruct(&mut out);
        assert_eq!(vec![0u8], out);
    }

    #[test]
    fn running_out_of_arena_space_aborts_but_still_reports_a_best_effort_result() {
        let mut solver = Solver::new(4, 1).unwrap();
        let report = solver.solve(999, &tiles(&[1, 2, 3, 4, 5, 6]), &SolveOptions::default()).unwrap();
        assert_eq!(Outcome::Aborted, report.outcome);
        assert!(report.best_diff > 0);
    }

    #[test]
    fn too_many_tiles_is_rejected() {
        let mut solver = Solver::new(64, 64).unwrap();
        let err = solver.solve(1, &tiles(&[1, 2, 3, 4, 5, 6, 7, 8, 9]), &SolveOptions::default()).unwrap_err();
        assert_eq!(NumbersError::TooManyTiles, err);
    }

    #[test]
    fn zero_capacity_is_rejected_at_construction() {
        assert_eq!(NumbersError::ZeroSize, Solver::new(0, 16).unwrap_err());
        assert_eq!(NumbersError::ZeroSize, Solver::new(16, 0).unwrap_err());
    }

    #[test]
    fn a_complexity_cap_can_rule_out_an_otherwise_reachable_exact_match() {
        let mut solver = Solver::new(64, 64).unwrap();
        let uncapped = solver.solve(25, &tiles(&[5, 5]), &SolveOptions::default()).unwrap();
        assert_eq!(0, uncapped.best_diff);

        // 5 * 5 = 25 costs 1 unit of complexity (both operands have a
        // nonzero "weight"); a cap of 0 rules out every two-tile
        // combination, leaving a bare tile (distance 20) as the best.
        let capped = SolveOptionsBuilder::default().complexity_cap(0u16).build().unwrap();
        let report = solver.solve(25, &tiles(&[5, 5]), &capped).unwrap();
        assert_eq!(20, report.best_diff);
    }

    #[test]
    fn a_shorter_best_is_not_displaced_by_an_equally_close_longer_candidate() {
        let mut solver = Solver::new(16, 16).unwrap();
        solver.target = 100;
        solver.final_tile_count = 2;
        solver.complexity_cap = u16::MAX;

        // A 1-tile candidate 5 away from the target, as if found while
        // building an intermediate (1-tile) group.
        solver.current_tile_count = 1;
        let group = OperationGroup { first: OpId(0), last: OpId(0) };
        assert!(solver.record(OpId(0), OpId(0), 95, None, 0, 0, group));
        assert_eq!(5, solver.best_diff);
        assert_eq!(1, solver.best_tile_count);

        // A 2-tile (final-group) candidate at exactly the same distance is
        // rejected: it would spend an extra tile for no improvement.
        solver.current_tile_count = 2;
        let group = OperationGroup { first: OpId(1), last: OpId(1) };
        assert!(solver.record(OpId(0), OpId(0), 105, None, 0, 0, group));
        assert_eq!(5, solver.best_diff);
        assert_eq!(1, solver.best_tile_count, "the shorter solution should survive an equally-close longer one");
    }

    #[test]
    fn equal_distance_same_length_candidates_prefer_lower_complexity() {
        let mut solver = Solver::new(16, 16).unwrap();
        solver.target = 100;
        solver.final_tile_count = 3; // tile count 2 is an intermediate group here
        solver.complexity_cap = u16::MAX;
        solver.current_tile_count = 2;

        let group = OperationGroup { first: OpId(0), last: OpId(0) };
        assert!(solver.record(OpId(0), OpId(0), 90, None, 0, 5, group));
        assert_eq!(10, solver.best_diff);

        // A different result, equally far from the target, reached more
        // cheaply: it should replace the current best even though it is
        // not a duplicate of the same result value.
        let group = OperationGroup { first: OpId(1), last: OpId(1) };
        assert!(solver.record(OpId(0), OpId(0), 110, None, 0, 2, group));
        assert_eq!(10, solver.best_diff);
        assert_eq!(2, solver.arena.get(solver.best_id.unwrap()).complexity);
    }
}
