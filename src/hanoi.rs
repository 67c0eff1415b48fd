//! Tower of Hanoi solver.
//!
//! Moves a stack of disks from one peg to another, one disk at a time and
//! never placing a disk on a smaller one.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum HanoiError {
    /// The puzzle needs at least one disk.
    #[error("invalid argument: disk count must be at least 1, got {0}")]
    InvalidArgument(u32),
}

/// Returns the moves solving the puzzle for `disks` disks.
///
/// Disks are numbered from 1 (smallest) to `disks` (largest) and each move is
/// described as `Move disk <n> from <source> to <destination>`. The solution
/// always has `2^disks - 1` moves.
///
/// # Errors
///
/// [`HanoiError::InvalidArgument`] when `disks` is 0.
///
/// # Examples
///
/// ```
/// # use inmet_alerts::hanoi::solve;
/// let moves = solve(2, "A", "C", "B").unwrap();
/// assert_eq!(
///     moves,
///     vec!["Move disk 1 from A to B", "Move disk 2 from A to C", "Move disk 1 from B to C"]
/// );
/// ```
pub fn solve(
    disks: u32,
    source: &str,
    destination: &str,
    auxiliary: &str,
) -> Result<Vec<String>, HanoiError> {
    if disks == 0 {
        return Err(HanoiError::InvalidArgument(disks));
    }

    let mut moves = Vec::new();
    move_tower(disks, source, destination, auxiliary, &mut moves);
    Ok(moves)
}

fn move_tower(disk: u32, source: &str, destination: &str, auxiliary: &str, moves: &mut Vec<String>) {
    if disk == 1 {
        moves.push(format!("Move disk 1 from {} to {}", source, destination));
        return;
    }

    move_tower(disk - 1, source, auxiliary, destination, moves);
    moves.push(format!("Move disk {} from {} to {}", disk, source, destination));
    move_tower(disk - 1, auxiliary, destination, source, moves);
}
