use npuzzle_solver::engine::Direction;
use npuzzle_solver::utils::random_solvable_board;
use rand::{thread_rng, Rng};
use std::io::{self, Write};

const DIMENSION: usize = 3;

fn main() {
    let seed = thread_rng().gen::<u64>();
    let mut board = match random_solvable_board(DIMENSION, seed) {
        Ok(board) => board,
        Err(message) => {
            eprintln!("{}", message);
            return;
        }
    };
    let mut moves = 0u32;

    println!("Slide tiles into the gap until the board counts up in order.");
    println!("Moves steer the gap: u, r, d, l. Enter q to give up.");

    loop {
        println!("---------------------");
        println!("Moves: {}, distance to goal: {}", moves, board.manhattan());
        println!("{}", board);

        if board.is_goal() {
            println!();
            println!("Solved in {} moves!", moves);
            break;
        }

        print!("Your move (u/r/d/l, q to quit): ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }
        let trimmed = input.trim();

        if trimmed == "q" {
            println!("Thanks for playing!");
            break;
        }

        let direction = match trimmed {
            "u" => Direction::Up,
            "r" => Direction::Right,
            "d" => Direction::Down,
            "l" => Direction::Left,
            _ => {
                println!("Unrecognized input '{}'.", trimmed);
                continue;
            }
        };

        match board.neighbor(direction) {
            Some(next) => {
                board = next;
                moves += 1;
            }
            None => println!("The gap cannot move that way."),
        }
    }
}
