//! Directional ray walks over the mailbox board.
//!
//! A ray starts next to its origin and runs until the board edge or the first
//! occupied square. The occupied square ends the ray and is part of it unless
//! the caller asked to skip pieces of that color.

use arrayvec::ArrayVec;

use crate::game_state::chess_types::{file_of, rank_of, square_bit, Color, Square};
use crate::game_state::game_state::GameState;

/// Squares along one direction. Seven is the longest possible ray.
pub type Ray = ArrayVec<Square, 8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const STRAIGHT: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Square-index change of one step.
    #[inline]
    pub const fn delta(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthEast => 9,
            Direction::NorthWest => 7,
            Direction::SouthEast => -7,
            Direction::SouthWest => -9,
        }
    }

    #[inline]
    pub const fn is_straight(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Edge predicate: whether one step from `square` stays on the board
    /// without wrapping onto the neighbouring rank.
    #[inline]
    pub const fn can_step_from(self, square: Square) -> bool {
        let file = file_of(square);
        let rank = rank_of(square);
        match self {
            Direction::North => rank < 7,
            Direction::South => rank > 0,
            Direction::East => file < 7,
            Direction::West => file > 0,
            Direction::NorthEast => rank < 7 && file < 7,
            Direction::NorthWest => rank < 7 && file > 0,
            Direction::SouthEast => rank > 0 && file < 7,
            Direction::SouthWest => rank > 0 && file > 0,
        }
    }

    #[inline]
    pub const fn step(self, square: Square) -> Option<Square> {
        if self.can_step_from(square) {
            Some((square as i8 + self.delta()) as Square)
        } else {
            None
        }
    }
}

/// Walk from `origin` (exclusive) in `direction`.
///
/// With `skip_color` set, a terminal square holding a piece of that color is
/// left out of the ray.
pub fn scan(
    game_state: &GameState,
    origin: Square,
    direction: Direction,
    skip_color: Option<Color>,
) -> Ray {
    let mut ray = Ray::new();
    let mut current = origin;

    while let Some(next) = direction.step(current) {
        match game_state.piece_at(next) {
            None => ray.push(next),
            Some(piece) => {
                if skip_color != Some(piece.color) {
                    ray.push(next);
                }
                break;
            }
        }
        current = next;
    }

    ray
}

/// Bitboard of the squares in `ray`.
#[inline]
pub fn ray_mask(ray: &[Square]) -> u64 {
    ray.iter().fold(0u64, |acc, &sq| acc | square_bit(sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_predicates_prevent_wrapping() {
        assert_eq!(Direction::East.step(7), None);
        assert_eq!(Direction::West.step(8), None);
        assert_eq!(Direction::NorthEast.step(15), None);
        assert_eq!(Direction::SouthWest.step(8), None);
        assert_eq!(Direction::North.step(60), None);
        assert_eq!(Direction::NorthWest.step(9), Some(16));
    }

    #[test]
    fn opposite_directions_cancel() {
        for direction in Direction::ALL {
            assert_eq!(direction.delta(), -direction.opposite().delta());
            assert_eq!(direction.is_straight(), direction.opposite().is_straight());
        }
    }

    #[test]
    fn scan_stops_on_first_piece() {
        let game_state =
            GameState::from_fen("4k3/8/8/8/4p3/8/8/4R2K w - - 0 1").expect("FEN should parse");

        let ray = scan(&game_state, 4, Direction::North, None);
        assert_eq!(ray.as_slice(), &[12, 20, 28]);

        let skipped = scan(&game_state, 4, Direction::North, Some(Color::Dark));
        assert_eq!(skipped.as_slice(), &[12, 20]);

        let east = scan(&game_state, 4, Direction::East, Some(Color::Light));
        assert_eq!(east.as_slice(), &[5, 6]);
    }

    #[test]
    fn empty_board_ray_reaches_edge() {
        let game_state = GameState::new_empty();
        let ray = scan(&game_state, 0, Direction::NorthEast, None);
        assert_eq!(ray.len(), 7);
        assert_eq!(ray.last(), Some(&63));
        assert_eq!(ray_mask(&ray).count_ones(), 7);
    }
}
