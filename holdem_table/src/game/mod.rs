//! Poker table engine - table state machine and hand logic.
//!
//! This module provides the foundational table implementation including:
//! - Cards, deck, money and the identities the host hands in
//! - Per-seat betting state
//! - Hand evaluation
//! - The single-table state machine that runs a hand from blinds to payout

// Submodules
pub mod constants;
pub mod entities;
pub mod functional;
pub mod seat;
pub mod state_machine;

pub use seat::Seat;
pub use state_machine::{Street, Table, TableError};
