//! Optimal solver for the sliding-tile puzzle.
//!
//! The solver runs a best-first search ordered by moves-so-far plus
//! Manhattan distance, with Manhattan distance alone breaking ties. Two
//! searches advance in strict alternation on one thread: one from the
//! input board and one from its twin. Swapping a pair of tiles flips
//! solvability, so exactly one of the two searches can ever reach the
//! goal; whichever does first settles the outcome.
use crate::engine::Board;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// A reached configuration: the board, the number of moves spent getting
/// there, its cached Manhattan distance, and the arena index of the node
/// it was generated from.
struct SearchNode {
    board: Board,
    parent: Option<usize>,
    moves: u32,
    manhattan: u32,
}

/// Heap entry pointing into the node arena.
///
/// `BinaryHeap` pops its maximum, so the ordering is inverted to pop the
/// entry with the smallest priority, and among equal priorities the
/// smallest Manhattan distance.
struct QueueEntry {
    priority: u32,
    manhattan: u32,
    node: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.manhattan.cmp(&self.manhattan))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// One of the two searches: an arena of every node created so far and a
/// priority queue over the not-yet-expanded ones.
///
/// Nodes refer to their parents by arena index, so the chain from any
/// node back to the root stays reachable for path reconstruction without
/// shared ownership between nodes.
struct Frontier {
    arena: Vec<SearchNode>,
    queue: BinaryHeap<QueueEntry>,
    closed: Option<HashSet<Board>>,
    current: usize,
    expanded: u64,
}

impl Frontier {
    fn new(root: Board, closed_set: bool) -> Frontier {
        let manhattan = root.manhattan();
        Frontier {
            arena: vec![SearchNode {
                board: root,
                parent: None,
                moves: 0,
                manhattan,
            }],
            queue: BinaryHeap::new(),
            closed: closed_set.then(HashSet::new),
            current: 0,
            expanded: 0,
        }
    }

    fn current_board(&self) -> &Board {
        &self.arena[self.current].board
    }

    /// Expands the current node and pops the best remaining one.
    ///
    /// Returns false when the queue has drained, which can only happen
    /// with the closed set enabled: every board reachable from the root
    /// has then been expanded, so the goal is unreachable on this side.
    fn advance(&mut self) -> bool {
        self.expand_current();
        while let Some(entry) = self.queue.pop() {
            if let Some(closed) = &self.closed {
                // Stale entry: this board was already expanded through a
                // path at least as short.
                if closed.contains(&self.arena[entry.node].board) {
                    continue;
                }
            }
            self.current = entry.node;
            return true;
        }
        false
    }

    fn expand_current(&mut self) {
        self.expanded += 1;
        let current = self.current;
        let moves = self.arena[current].moves + 1;
        let parent_board = self.arena[current]
            .parent
            .map(|parent| self.arena[parent].board.clone());
        let neighbors: Vec<Board> = self.arena[current].board.neighbors().collect();

        if let Some(closed) = &mut self.closed {
            closed.insert(self.arena[current].board.clone());
        }

        for neighbor in neighbors {
            // Never step straight back to the board this one came from.
            // Without the closed set that is the only duplicate pruning:
            // states can be rediscovered along longer paths, which costs
            // time and memory but not optimality.
            if parent_board.as_ref() == Some(&neighbor) {
                continue;
            }
            // An expanded board already has a shortest path; a board that
            // is merely enqueued may not, so it stays eligible and the
            // queue holds one entry per discovered path until the best
            // one pops.
            if let Some(closed) = &self.closed {
                if closed.contains(&neighbor) {
                    continue;
                }
            }
            let manhattan = neighbor.manhattan();
            self.arena.push(SearchNode {
                board: neighbor,
                parent: Some(current),
                moves,
                manhattan,
            });
            let node = self.arena.len() - 1;
            let added = &self.arena[node];
            self.queue.push(QueueEntry {
                priority: added.moves + added.manhattan,
                manhattan: added.manhattan,
                node,
            });
        }
    }

    /// Boards from the root to the current node, in play order.
    fn path_to_current(&self) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.arena[self.current].moves as usize + 1);
        let mut node = Some(self.current);
        while let Some(index) = node {
            path.push(self.arena[index].board.clone());
            node = self.arena[index].parent;
        }
        path.reverse();
        path
    }
}

/// Result of solving one board: solvability, the minimum move count, and
/// the move sequence when one exists.
///
/// The search runs to completion inside the constructor; the accessors
/// only read the stored outcome.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::solver::Solver;
///
/// let board = Board::from_grid(&[
///     vec![1, 2, 3],
///     vec![4, 5, 6],
///     vec![7, 0, 8],
/// ]).unwrap();
/// let solver = Solver::new(board);
/// assert!(solver.is_solvable());
/// assert_eq!(solver.moves(), 1);
/// assert_eq!(solver.solution().unwrap().len(), 2);
/// ```
pub struct Solver {
    solvable: bool,
    min_moves: i32,
    solution: Option<Vec<Board>>,
    expansions: u64,
}

impl Solver {
    /// Solves the board, pruning only the immediate step back to each
    /// node's parent.
    pub fn new(initial: Board) -> Solver {
        Solver::run(initial, false)
    }

    /// Solves the board while keeping a closed set per search side, so
    /// no board is ever expanded twice. Same answers as [`Solver::new`],
    /// usually far fewer expansions; costs a hash set of expanded boards
    /// per side.
    pub fn new_with_closed_set(initial: Board) -> Solver {
        Solver::run(initial, true)
    }

    fn run(initial: Board, closed_set: bool) -> Solver {
        let twin_root = initial.twin();
        let mut primary = Frontier::new(initial, closed_set);
        let mut twin = Frontier::new(twin_root, closed_set);
        let mut twin_live = true;

        let solved = loop {
            if primary.current_board().is_goal() {
                break true;
            }
            if twin_live && twin.current_board().is_goal() {
                break false;
            }
            if !primary.advance() {
                // The primary side exhausted its reachable boards.
                break false;
            }
            if primary.current_board().is_goal() {
                break true;
            }
            if twin_live {
                // A drained twin frontier proves the twin unsolvable, so
                // the primary search is the one that will finish.
                twin_live = twin.advance();
            }
        };

        let expansions = primary.expanded + twin.expanded;
        if solved {
            let path = primary.path_to_current();
            Solver {
                solvable: true,
                min_moves: (path.len() - 1) as i32,
                solution: Some(path),
                expansions,
            }
        } else {
            Solver {
                solvable: false,
                min_moves: -1,
                solution: None,
                expansions,
            }
        }
    }

    /// Returns true when the initial board can reach the goal.
    pub fn is_solvable(&self) -> bool {
        self.solvable
    }

    /// Returns the minimum number of moves, or -1 for an unsolvable board.
    pub fn moves(&self) -> i32 {
        self.min_moves
    }

    /// Returns the boards from the initial one to the goal, or `None`
    /// for an unsolvable board. The sequence always has `moves() + 1`
    /// entries, starting with the initial board.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// Returns how many nodes the two searches expanded in total.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }
}
