use std::fmt;
use super::movegen;
use super::types::{Cell, Move, Player, Square, SIZE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn empty() -> Self { Self::default() }

    pub fn from_cells(cells: [[Cell; SIZE]; SIZE]) -> Self { Self { cells } }

    /// Standard opening: three rows of men per side on the dark squares.
    pub fn starting() -> Self {
        let mut b = Self::empty();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if (row + col) % 2 == 0 { continue; }
                let sq = Square::new(row as u8, col as u8);
                if row < 3 { b.set(sq, Cell::Man(Player::Circle)); }
                if row >= SIZE - 3 { b.set(sq, Cell::Man(Player::Star)); }
            }
        }
        b
    }

    pub fn get(&self, sq: Square) -> Cell { self.cells[sq.row as usize][sq.col as usize] }

    pub fn set(&mut self, sq: Square, cell: Cell) { self.cells[sq.row as usize][sq.col as usize] = cell; }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        (0..SIZE).flat_map(move |r| (0..SIZE).map(move |c| Square::new(r as u8, c as u8)))
            .map(move |sq| (sq, self.get(sq)))
            .filter(|(_, cell)| *cell != Cell::Empty)
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces().filter(|(_, c)| c.owner() == Some(player)).count()
    }

    /// Plays `mv` for whoever stands on `mv.from`. No legality check.
    pub fn play(&mut self, mv: &Move) {
        let piece = self.get(mv.from);
        self.set(mv.from, Cell::Empty);
        for &sq in &mv.captured { self.set(sq, Cell::Empty); }
        let to = mv.to();
        let landed = match piece {
            Cell::Man(p) if to.row as usize == p.promotion_row() => Cell::King(p),
            other => other,
        };
        self.set(to, landed);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<&str> = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{}", line.join(","))?;
        }
        Ok(())
    }
}

/// One node of the game tree. Never mutated once built; children come from [`BoardState::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    to_move: Player,
    last_move: Option<Move>,
    ply: u32,
}

impl BoardState {
    pub fn new(board: Board, to_move: Player) -> Self {
        Self { board, to_move, last_move: None, ply: 0 }
    }

    pub fn startpos(to_move: Player) -> Self { Self::new(Board::starting(), to_move) }

    pub fn board(&self) -> &Board { &self.board }
    pub fn side_to_move(&self) -> Player { self.to_move }
    pub fn last_move(&self) -> Option<&Move> { self.last_move.as_ref() }
    pub fn ply(&self) -> u32 { self.ply }

    pub fn legal_moves(&self) -> Vec<Move> { movegen::legal_moves(&self.board, self.to_move) }

    pub fn is_terminal(&self) -> bool { self.legal_moves().is_empty() }

    pub fn apply(&self, mv: &Move) -> BoardState {
        let mut board = self.board;
        board.play(mv);
        BoardState {
            board,
            to_move: self.to_move.opponent(),
            last_move: Some(mv.clone()),
            ply: self.ply + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twelve_each() {
        let b = Board::starting();
        assert_eq!(b.count(Player::Star), 12);
        assert_eq!(b.count(Player::Circle), 12);
        assert_eq!(b.get(Square::new(7, 0)), Cell::Man(Player::Star));
        assert_eq!(b.get(Square::new(0, 1)), Cell::Man(Player::Circle));
    }

    #[test]
    fn play_promotes_on_last_row() {
        let mut b = Board::empty();
        b.set(Square::new(1, 2), Cell::Man(Player::Star));
        b.play(&Move::step(Square::new(1, 2), Square::new(0, 3)));
        assert_eq!(b.get(Square::new(0, 3)), Cell::King(Player::Star));
        assert_eq!(b.get(Square::new(1, 2)), Cell::Empty);
    }

    #[test]
    fn apply_flips_side_and_records_move() {
        let s = BoardState::startpos(Player::Star);
        let mv = s.legal_moves().into_iter().next().expect("opening move");
        let child = s.apply(&mv);
        assert_eq!(child.side_to_move(), Player::Circle);
        assert_eq!(child.last_move(), Some(&mv));
        assert_eq!(child.ply(), 1);
        assert_eq!(s.ply(), 0);
    }
}
