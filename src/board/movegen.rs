use super::state::Board;
use super::types::{Cell, Move, Player, Square};

// up-left, up-right, down-left, down-right
const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn piece_directions(piece: Cell, player: Player) -> impl Iterator<Item = (i8, i8)> {
    let king = piece.is_king();
    DIRECTIONS.into_iter().filter(move |&(dr, _)| king || dr == player.forward())
}

/// All legal moves for `player`. Captures are compulsory: if any exists only captures are returned.
/// An empty result means `player` has lost.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let captures = capture_moves(board, player);
    if !captures.is_empty() { return captures; }
    simple_moves(board, player)
}

pub fn simple_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut out = Vec::new();
    for (sq, piece) in board.pieces() {
        if piece.owner() != Some(player) { continue; }
        for (dr, dc) in piece_directions(piece, player) {
            if let Some(to) = sq.offset(dr, dc) {
                if board.get(to) == Cell::Empty { out.push(Move::step(sq, to)); }
            }
        }
    }
    out
}

/// Maximal capture chains for every piece of `player`, one `Move` per chain.
pub fn capture_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut out = Vec::new();
    for (sq, piece) in board.pieces() {
        if piece.owner() != Some(player) { continue; }
        // The jumping piece has left its origin for the whole chain.
        let mut work = *board;
        work.set(sq, Cell::Empty);
        let mut path = Vec::new();
        let mut captured = Vec::new();
        extend_jumps(&work, player, piece, sq, sq, &mut path, &mut captured, &mut out);
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn extend_jumps(
    board: &Board,
    player: Player,
    piece: Cell,
    origin: Square,
    at: Square,
    path: &mut Vec<Square>,
    captured: &mut Vec<Square>,
    out: &mut Vec<Move>,
) {
    let mut extended = false;
    for (dr, dc) in piece_directions(piece, player) {
        let Some(over) = at.offset(dr, dc) else { continue };
        let Some(land) = at.offset(2 * dr, 2 * dc) else { continue };
        // Jumped pieces stay on the board until the move completes and cannot be jumped twice.
        if board.get(over).owner() != Some(player.opponent()) || captured.contains(&over) { continue; }
        if board.get(land) != Cell::Empty { continue; }
        extended = true;
        path.push(land);
        captured.push(over);
        let crowned = !piece.is_king() && land.row as usize == player.promotion_row();
        if crowned {
            out.push(Move { from: origin, path: path.clone(), captured: captured.clone() });
        } else {
            extend_jumps(board, player, piece, origin, land, path, captured, out);
        }
        path.pop();
        captured.pop();
    }
    if !extended && !path.is_empty() {
        out.push(Move { from: origin, path: path.clone(), captured: captured.clone() });
    }
}
