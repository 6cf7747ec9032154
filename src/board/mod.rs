pub mod types;
pub mod state;
pub mod movegen;

pub use movegen::legal_moves;
pub use state::{Board, BoardState};
pub use types::{Cell, Move, Player, Square, SIZE};
