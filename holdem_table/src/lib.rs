//! # Hold'em Table
//!
//! A single-table, no-limit Texas Hold'em engine.
//!
//! A [`Table`] holds up to [`MAX_PLAYERS`] seats, deals from a shuffled
//! deck, collects blinds, runs four betting streets and pays the pot to
//! the best hand (splitting ties). Anything that talks to players, such as
//! a web server, lives outside this crate and drives a table through the
//! [`table`] actor.
//!
//! ## Hand lifecycle
//!
//! - **No hand in progress**: players sit down and stand up freely
//! - **Dealing**: button moves, two hole cards each, blinds posted
//! - **Betting**: preflop, flop, turn and river, one round each
//! - **Showdown** or **early win**: pot paid, back to no hand in progress
//!
//! ## Core Modules
//!
//! - [`game`]: Table state machine, entities, and poker logic
//! - [`table`]: Actor that serializes commands against one table
//!
//! ## Example
//!
//! ```
//! use holdem_table::{Table, entities::{ConnectionId, Money, Player}};
//!
//! let mut table = Table::new(1, "Main", 6, Money::from_dollars(2));
//! let alice = ConnectionId::new();
//! let bob = ConnectionId::new();
//! table.sit_player(Player::new("alice", alice), 1).unwrap();
//! table.sit_player(Player::new("bob", bob), 2).unwrap();
//! table.start_hand().unwrap();
//!
//! assert_eq!(table.pot(), Money::from_cents(3));
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Seat, Street, Table, TableError,
    constants::{self, DEFAULT_MAX_PLAYERS, MAX_PLAYERS},
    entities, functional,
};

/// Actor-based access to a table from async code.
pub mod table;
