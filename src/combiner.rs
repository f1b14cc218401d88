//! Combines two disjoint groups of already-recorded operations into the
//! candidate results reachable by applying one binary operator across them.
//!
//! Every pair `(a, b)` with `a` from the left group and `b` from the right
//! group is canonicalized to `hi = max(a, b), lo = min(a, b)` before any
//! operator is applied, so `Sub` and `Div` never have to special-case a
//! negative or fractional outcome — they simply aren't generated when they
//! would be one.

use crate::arena::{Arena, OpId, OperationGroup};
use crate::common::Operator;
use crate::complexity::{self, ComplexityModel};

/// One candidate combination, ready to be handed to the recorder. `left`
/// and `right` are the canonicalized (hi, lo) operands, already in the
/// order the resulting [`crate::arena::Operation`] should store them in.
#[derive(Copy, Clone, Debug)]
pub struct Candidate {
    pub result: u32,
    pub op: Operator,
    pub left: OpId,
    pub right: OpId,
    pub weight: u8,
    pub complexity: u16,
}

/// Visits every candidate obtainable by combining one operation from
/// `group_a` with one from `group_b` (the two groups must come from
/// disjoint tile subsets; which one is "left" and which is "right" does
/// not matter, canonicalization takes care of it), calling `on_candidate`
/// for each one the arithmetic rules allow and whose complexity does not
/// exceed `complexity_cap`. A pair whose own combined complexity already
/// exceeds the cap is skipped outright, since every operator can only add
/// to it further.
pub fn combine(
    arena: &Arena,
    group_a: OperationGroup,
    group_b: OperationGroup,
    complexity_model: ComplexityModel,
    complexity_cap: u16,
    mut on_candidate: impl FnMut(Candidate),
) {
    for a_idx in group_a.first.0..group_a.last.0 {
        let a = arena.get(OpId(a_idx));
        for b_idx in group_b.first.0..group_b.last.0 {
            let b = arena.get(OpId(b_idx));

            let (hi, hi_id, hi_weight, lo, lo_id, lo_weight) = if a.result >= b.result {
                (a.result, OpId(a_idx), a.weight, b.result, OpId(b_idx), b.weight)
            } else {
                (b.result, OpId(b_idx), b.weight, a.result, OpId(a_idx), a.weight)
            };
            let complexity_ab = a.complexity + b.complexity;
            if complexity_ab > complexity_cap {
                // Every operator's cost only adds to complexity_ab, so none
                // of them could possibly fit under the cap either.
                continue;
            }

            // An operator whose own cost pushes past the cap is skipped
            // individually; the pair itself may still yield other operators
            // that stay under it.
            let mut emit = |candidate: Candidate| {
                if candidate.complexity <= complexity_cap {
                    on_candidate(candidate);
                }
            };

            // Addition is always valid and never overflows the game's value
            // range in practice (tiles and intermediate results fit in a
            // u32 many times over before 999,999,999 is reached).
            let add_result = hi + lo;
            emit(Candidate {
                result: add_result,
                op: Operator::Add,
                left: hi_id,
                right: lo_id,
                weight: weight_of(complexity_model, result_weight(add_result)),
                complexity: cost(complexity_model, complexity::add_cost(complexity_ab, hi_weight, lo_weight)),
            });

            // Subtraction is skipped when it is trivially zero (hi == lo)
            // or would just re-derive one of the operands it started from
            // (hi - lo == lo, i.e. hi == 2 * lo: see combiner design notes).
            if hi != lo && hi - lo != lo {
                let sub_result = hi - lo;
                emit(Candidate {
                    result: sub_result,
                    op: Operator::Sub,
                    left: hi_id,
                    right: lo_id,
                    weight: weight_of(complexity_model, result_weight(sub_result)),
                    complexity: cost(complexity_model, complexity::sub_cost(complexity_ab, hi_weight, lo_weight)),
                });
            }

            // Multiplication and division by 0 or 1 never simplify the
            // game (x*1, x*0, x/1), so both are skipped whenever lo <= 1 —
            // except trivial division (hi == lo, skipped above by the
            // `lo > 1` guard not applying... division handles hi==lo itself).
            if lo > 1 {
                let mul_result = hi * lo;
                emit(Candidate {
                    result: mul_result,
                    op: Operator::Mul,
                    left: hi_id,
                    right: lo_id,
                    weight: weight_of(complexity_model, result_weight(mul_result)),
                    complexity: cost(complexity_model, complexity::mul_cost(complexity_ab, hi_weight, lo_weight)),
                });

                if hi == lo {
                    emit(Candidate {
                        result: 1,
                        op: Operator::Div,
                        left: hi_id,
                        right: lo_id,
                        weight: weight_of(complexity_model, result_weight(1)),
                        complexity: cost(complexity_model, complexity::div_trivial_cost(complexity_ab)),
                    });
                } else if hi % lo == 0 {
                    let div_result = hi / lo;
                    if div_result != lo {
                        emit(Candidate {
                            result: div_result,
                            op: Operator::Div,
                            left: hi_id,
                            right: lo_id,
                            weight: weight_of(complexity_model, result_weight(div_result)),
                            complexity: cost(complexity_model, complexity::div_cost(complexity_ab, hi_weight, lo_weight)),
                        });
                    }
                }
            }
        }
    }
}

fn result_weight(result: u32) -> u8 {
    complexity::result_weight(result)
}

fn weight_of(model: ComplexityModel, w: u8) -> u8 {
    match model {
        ComplexityModel::Enabled => w,
        ComplexityModel::Disabled => 0,
    }
}

fn cost(model: ComplexityModel, c: u16) -> u16 {
    match model {
        ComplexityModel::Enabled => c,
        ComplexityModel::Disabled => 0,
    }
}
