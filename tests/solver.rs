//! End-to-end scenarios run against the public API only, covering the
//! concrete examples used to validate the original implementation.

use numbers_round::{validate, NumbersError, Outcome, SolveOptions, SolveOptionsBuilder, Solver, Tile};

fn tiles(values: &[u32]) -> Vec<Tile> {
    values.iter().map(|&v| Tile(v)).collect()
}

#[test]
fn classic_countdown_draw_is_matched_exactly() {
    let mut solver = Solver::new(25_000, 15_000).unwrap();
    let report = solver.solve(899, &tiles(&[1, 1, 4, 5, 6, 7]), &SolveOptions::default()).unwrap();
    assert_eq!(Outcome::Success, report.outcome);
    assert_eq!(0, report.best_diff);

    let mut ops = Vec::new();
    solver.reconstruct(&mut ops);
    let replay = validate(899, &tiles(&[1, 1, 4, 5, 6, 7]), &ops, None).unwrap();
    assert_eq!(0, replay.closest_diff);
}

#[test]
fn two_tiles_of_the_same_value_reach_their_product_or_sum() {
    let mut solver = Solver::new(64, 16).unwrap();
    let report = solver.solve(4, &tiles(&[2, 2]), &SolveOptions::default()).unwrap();
    assert_eq!(0, report.best_diff);
}

#[test]
fn the_four_big_tiles_and_two_small_ones_land_within_one_of_the_target() {
    let mut solver = Solver::new(25_000, 15_000).unwrap();
    let report = solver.solve(999, &tiles(&[100, 75, 50, 25, 6, 3]), &SolveOptions::default()).unwrap();
    assert!(report.best_diff <= 1, "expected distance <= 1, got {}", report.best_diff);
}

#[test]
fn a_single_tile_far_from_an_unreachable_target_reports_the_full_gap() {
    let mut solver = Solver::new(16, 16).unwrap();
    let report = solver.solve(999_999_999, &tiles(&[1]), &SolveOptions::default()).unwrap();
    assert_eq!(999_999_998, report.best_diff);
}

#[test]
fn a_single_tile_equal_to_the_target_needs_no_operations() {
    let mut solver = Solver::new(16, 16).unwrap();
    let report = solver.solve(42, &tiles(&[42]), &SolveOptions::default()).unwrap();
    assert_eq!(0, report.best_diff);

    let mut ops = Vec::new();
    solver.reconstruct(&mut ops);
    assert_eq!(vec![0u8], ops);
}

#[test]
fn validator_rejects_an_operation_that_reuses_one_tile_twice() {
    let ops = [numbers_round::encode_op(0, 0, numbers_round::Operator::Add), 0];
    let err = validate(10, &tiles(&[5]), &ops, None).unwrap_err();
    assert_eq!(NumbersError::IncorrectTileId, err);
}

#[test]
fn validator_rejects_a_subtraction_that_would_go_negative() {
    let ops = [numbers_round::encode_op(0, 1, numbers_round::Operator::Sub), 0];
    let err = validate(0, &tiles(&[3, 5]), &ops, None).unwrap_err();
    assert_eq!(NumbersError::NegativeResult, err);
}

#[test]
fn running_out_of_arena_capacity_still_yields_a_usable_best_effort() {
    let mut solver = Solver::new(4, 1).unwrap();
    let report = solver.solve(999, &tiles(&[1, 2, 3, 4, 5, 6]), &SolveOptions::default()).unwrap();
    assert_eq!(Outcome::Aborted, report.outcome);

    let mut ops = Vec::new();
    solver.reconstruct(&mut ops);
    let replay = validate(999, &tiles(&[1, 2, 3, 4, 5, 6]), &ops, None).unwrap();
    assert_eq!(replay.closest_diff, report.best_diff);
}

#[test]
fn a_tight_complexity_cap_trades_exactness_for_a_simpler_solution() {
    let mut solver = Solver::new(25_000, 15_000).unwrap();
    let draw = tiles(&[100, 75, 50, 25, 6, 3]);

    let uncapped = solver.solve(999, &draw, &SolveOptions::default()).unwrap();
    assert!(uncapped.best_diff <= 1);

    let options = SolveOptionsBuilder::default().complexity_cap(0u16).build().unwrap();
    let capped = solver.solve(999, &draw, &options).unwrap();
    assert_eq!(0, capped.best_complexity);
    assert!(capped.best_diff >= uncapped.best_diff);
}

#[test]
fn solver_is_reusable_across_independent_solve_calls() {
    let mut solver = Solver::new(256, 2048).unwrap();
    let first = solver.solve(4, &tiles(&[2, 2]), &SolveOptions::default()).unwrap();
    assert_eq!(0, first.best_diff);

    let second = solver.solve(999_999_999, &tiles(&[1]), &SolveOptions::default()).unwrap();
    assert_eq!(999_999_998, second.best_diff);
}
