use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

pub const SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Star,
    Circle,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self { Player::Star => Player::Circle, Player::Circle => Player::Star }
    }

    // Row delta of a forward step: Star climbs towards row 0, Circle descends.
    pub fn forward(self) -> i8 {
        match self { Player::Star => -1, Player::Circle => 1 }
    }

    pub fn promotion_row(self) -> usize {
        match self { Player::Star => 0, Player::Circle => SIZE - 1 }
    }

    /// Distance of `row` from this player's home edge (0 = home row, 7 = promotion row).
    pub fn advancement(self, row: usize) -> usize {
        match self { Player::Star => SIZE - 1 - row, Player::Circle => row }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Player::Star => write!(f, "Star"), Player::Circle => write!(f, "Circle") }
    }
}

impl FromStr for Player {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "star" | "s" => Ok(Player::Star),
            "circle" | "c" => Ok(Player::Circle),
            other => Err(format!("unknown player: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Man(Player),
    King(Player),
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self { Cell::Empty => None, Cell::Man(p) | Cell::King(p) => Some(p) }
    }

    pub fn is_king(self) -> bool { matches!(self, Cell::King(_)) }

    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "0",
            Cell::Man(Player::Star) => "S",
            Cell::Man(Player::Circle) => "C",
            Cell::King(Player::Star) => "SK",
            Cell::King(Player::Circle) => "CK",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim() {
            "0" | "." | "" => Some(Cell::Empty),
            "S" => Some(Cell::Man(Player::Star)),
            "C" => Some(Cell::Man(Player::Circle)),
            "SK" => Some(Cell::King(Player::Star)),
            "CK" => Some(Cell::King(Player::Circle)),
            _ => None,
        }
    }
}

/// Grid coordinate, row 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self { Self { row, col } }

    pub fn offset(self, drow: i8, dcol: i8) -> Option<Square> {
        let r = self.row as i8 + drow;
        let c = self.col as i8 + dcol;
        if (0..SIZE as i8).contains(&r) && (0..SIZE as i8).contains(&c) {
            Some(Square::new(r as u8, c as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'A' + self.col) as char;
        let rank = SIZE as u8 - self.row;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.trim().as_bytes();
        if b.len() != 2 { return Err(format!("bad square: {s}")); }
        let col = b[0].to_ascii_uppercase().wrapping_sub(b'A');
        let rank = b[1].wrapping_sub(b'0');
        if col as usize >= SIZE || rank == 0 || rank as usize > SIZE {
            return Err(format!("bad square: {s}"));
        }
        Ok(Square::new(SIZE as u8 - rank, col))
    }
}

/// A complete move: a step, a single jump, or a multi-jump chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub path: Vec<Square>,
    pub captured: Vec<Square>,
}

impl Move {
    pub fn step(from: Square, to: Square) -> Self {
        Self { from, path: vec![to], captured: Vec::new() }
    }

    pub fn to(&self) -> Square { self.path.last().copied().unwrap_or(self.from) }

    pub fn is_capture(&self) -> bool { !self.captured.is_empty() }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        for sq in &self.path { write!(f, "-{}", sq)?; }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_notation_roundtrips_corners() {
        assert_eq!(Square::new(7, 0).to_string(), "A1");
        assert_eq!(Square::new(0, 7).to_string(), "H8");
        assert_eq!("c3".parse::<Square>(), Ok(Square::new(5, 2)));
        assert!("I1".parse::<Square>().is_err());
        assert!("A9".parse::<Square>().is_err());
    }

    #[test]
    fn move_display_joins_chain() {
        let m = Move {
            from: Square::new(5, 2),
            path: vec![Square::new(3, 4), Square::new(1, 6)],
            captured: vec![Square::new(4, 3), Square::new(2, 5)],
        };
        assert_eq!(m.to_string(), "C3-E5-G7");
        assert_eq!(m.to(), Square::new(1, 6));
    }

    #[test]
    fn advancement_counts_from_home_row() {
        assert_eq!(Player::Star.advancement(7), 0);
        assert_eq!(Player::Star.advancement(0), 7);
        assert_eq!(Player::Circle.advancement(0), 0);
        assert_eq!(Player::Circle.advancement(7), 7);
    }
}
