//! Terminal client for a quantum chess engine.
//!
//! The engine runs as a separate HTTP service and owns all game rules;
//! this crate renders the board, turns pointer input into move selections
//! through a small state machine, supports free piece placement before a
//! game, and drives a cooperative turn loop between the two player slots.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod client;
pub mod game;
pub mod tui;
