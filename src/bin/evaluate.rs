use npuzzle_solver::solver::Solver;
use npuzzle_solver::utils::random_solvable_board;

const BOARD_COUNT: usize = 20;
const DIMENSION: usize = 3;
const START_SEED: u64 = 0;

fn main() {
    println!(
        "Solving {} random {}x{} boards starting at seed {}...",
        BOARD_COUNT, DIMENSION, DIMENSION, START_SEED
    );

    let mut total_moves = 0u64;
    let mut total_default = 0u64;
    let mut total_closed = 0u64;

    for index in 0..BOARD_COUNT {
        let seed = START_SEED + index as u64;
        let board = match random_solvable_board(DIMENSION, seed) {
            Ok(board) => board,
            Err(message) => {
                eprintln!("Board {} (seed {}): {}", index, seed, message);
                continue;
            }
        };

        let default_run = Solver::new(board.clone());
        let closed_run = Solver::new_with_closed_set(board);
        assert_eq!(
            default_run.moves(),
            closed_run.moves(),
            "search variants disagree on seed {}",
            seed
        );

        println!(
            "Board {:2} (seed {:2}): {:2} moves, {:8} expansions, {:6} with closed set",
            index,
            seed,
            default_run.moves(),
            default_run.expansions(),
            closed_run.expansions()
        );

        total_moves += default_run.moves() as u64;
        total_default += default_run.expansions();
        total_closed += closed_run.expansions();
    }

    println!();
    println!(
        "Average moves: {:.1}",
        total_moves as f64 / BOARD_COUNT as f64
    );
    println!(
        "Average expansions: {:.1} default, {:.1} with closed set",
        total_default as f64 / BOARD_COUNT as f64,
        total_closed as f64 / BOARD_COUNT as f64
    );
}
