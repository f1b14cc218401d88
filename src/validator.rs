//! Independently replays an encoded operation stream (as produced by
//! [`crate::solver::Solver::reconstruct`]) against a fresh set of tiles,
//! without trusting that the stream actually came from this crate's own
//! solver. This is the boundary a client should run untrusted or
//! persisted solutions through before acting on them.

use crate::common::{decode_op, Tile};
use crate::error::NumbersError;

/// One successfully-applied step of a replay, passed to the caller's
/// optional hook so a UI can narrate the solution as it is verified.
#[derive(Copy, Clone, Debug)]
pub struct OperationEvent {
    pub left_value: u32,
    pub right_value: u32,
    pub operator: crate::common::Operator,
    pub result: u32,
}

/// The closest any tile or intermediate result in a replay came to the
/// target, and which value that was.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ValidationReport {
    pub closest_result: u32,
    pub closest_diff: u32,
}

/// Replays `ops` (a zero-terminated stream of encoded operation bytes)
/// against `tiles`, tracking the closest any tile or intermediate result
/// came to `target`. Every consumed tile slot is marked used so no
/// operation can reference a tile that an earlier operation already spent;
/// each intermediate result is written back into the left operand's slot,
/// mirroring the convention the reconstructor uses when it generates the
/// stream.
///
/// `hook`, if given, is called once per operation after it is applied.
pub fn validate(
    target: u32,
    tiles: &[Tile],
    ops: &[u8],
    mut hook: Option<&mut dyn FnMut(&OperationEvent)>,
) -> Result<ValidationReport, NumbersError> {
    let mut slots: Vec<u32> = tiles.iter().map(|t| t.value()).collect();
    let n = slots.len();

    let mut best_diff = u32::MAX;
    let mut best_result = target;
    for &value in &slots {
        let diff = target.abs_diff(value);
        if diff < best_diff {
            best_diff = diff;
            best_result = value;
        }
    }

    for &byte in ops {
        if byte == 0 {
            break;
        }
        let (left, right, op) = decode_op(byte);
        let (left, right) = (left as usize, right as usize);

        if left >= n || right >= n || left == right {
            return Err(NumbersError::IncorrectTileId);
        }
        let left_value = slots[left];
        let right_value = slots[right];
        if left_value == u32::MAX || right_value == u32::MAX {
            return Err(NumbersError::TileUsedTwice);
        }

        let result = match op {
            crate::common::Operator::Add => left_value + right_value,
            crate::common::Operator::Sub => {
                if right_value > left_value {
                    return Err(NumbersError::NegativeResult);
                }
                left_value - right_value
            }
            crate::common::Operator::Mul => left_value * right_value,
            crate::common::Operator::Div => {
                if right_value == 0 {
                    return Err(NumbersError::DivisionByZero);
                }
                if left_value % right_value != 0 {
                    return Err(NumbersError::RemainderNotNull);
                }
                left_value / right_value
            }
        };

        slots[left] = result;
        slots[right] = u32::MAX;

        if let Some(hook) = hook.as_deref_mut() {
            hook(&OperationEvent { left_value, right_value, operator: op, result });
        }

        let diff = target.abs_diff(result);
        if diff < best_diff {
            best_diff = diff;
            best_result = result;
        }
    }

    Ok(ValidationReport { closest_result: best_result, closest_diff: best_diff })
}
