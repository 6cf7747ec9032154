// Draughts minimax / alpha-beta solver, plus the CSP and MDP solvers
pub mod board;
pub mod search;
pub mod perft;
pub mod io;
pub mod csp;
pub mod mdp;
