//! A single-shot command-line front end for the solver: give it a target
//! and a list of tiles, get back the closest expression found.

use clap::Parser;

use numbers_round::{common::decode_op, validate, SolveOptions, Solver, Tile};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve one numbers-round puzzle", long_about = None)]
struct Args {
    /// The value to reach.
    target: u32,

    /// The tiles to combine, e.g. `100 75 50 25 6 3`.
    #[arg(required = true, num_args = 1..=8)]
    tiles: Vec<u32>,

    /// Largest number of candidate operations the solver may record before
    /// giving up and returning its best effort so far.
    #[arg(long, default_value_t = 1 << 16)]
    operation_capacity: u32,

    /// Size of the sparse result lookup table; should comfortably exceed
    /// the target.
    #[arg(long, default_value_t = 2_000_000)]
    result_index_capacity: u32,
}

fn main() {
    let args = Args::parse();
    let tiles: Vec<Tile> = args.tiles.iter().map(|&v| Tile(v)).collect();

    let mut solver = Solver::new(
        args.operation_capacity.min(u16::MAX as u32) as u16,
        args.result_index_capacity.min(u16::MAX as u32) as u16,
    )
    .expect("non-zero capacities");

    let report = solver
        .solve(args.target, &tiles, &SolveOptions::default())
        .expect("tile count within MAX_TILES");

    let mut ops = Vec::new();
    solver.reconstruct(&mut ops);

    println!(
        "target {}: best distance {} (complexity {})",
        args.target, report.best_diff, report.best_complexity
    );
    print_steps(&tiles, &ops);

    let replay = validate(args.target, &tiles, &ops, None).expect("solver always emits a valid stream");
    assert_eq!(replay.closest_diff, report.best_diff, "replay disagrees with the solver's own accounting");
}

fn print_steps(tiles: &[Tile], ops: &[u8]) {
    let mut values: Vec<u32> = tiles.iter().map(|t| t.value()).collect();
    let mut any = false;
    for &byte in ops {
        if byte == 0 {
            break;
        }
        any = true;
        let (left, right, op) = decode_op(byte);
        let (left, right) = (left as usize, right as usize);
        let result = match op {
            numbers_round::Operator::Add => values[left] + values[right],
            numbers_round::Operator::Sub => values[left] - values[right],
            numbers_round::Operator::Mul => values[left] * values[right],
            numbers_round::Operator::Div => values[left] / values[right],
        };
        println!("  {} {} {} = {}", values[left], op.symbol(), values[right], result);
        values[left] = result;
    }
    if !any {
        println!("  (no operations needed)");
    }
}
