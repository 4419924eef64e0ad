use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::solver::Solver;
use npuzzle_solver::utils::board_from_str;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Suppress re-expansion of every previously seen board, not just
    /// each node's parent
    #[clap(long)]
    closed_set: bool,

    /// Path to the puzzle file: the dimension n, then n rows of tiles
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    board_from_str(&content)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let board = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(message) => {
            eprintln!("{}: {}", args.board_file.display(), message);
            return ExitCode::FAILURE;
        }
    };

    let solver = if args.closed_set {
        Solver::new_with_closed_set(board)
    } else {
        Solver::new(board)
    };

    match solver.solution() {
        Some(solution) => {
            println!("Minimum number of moves = {}", solver.moves());
            for board in solution {
                println!("{}", board);
                println!();
            }
        }
        None => println!("No solution possible"),
    }
    ExitCode::SUCCESS
}
