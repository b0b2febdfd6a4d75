//! Table-wide constants.

/// Largest table the engine accepts. Two hole cards per seat plus a
/// five-card board must fit in one 52-card deck.
pub const MAX_PLAYERS: usize = 23;

/// Seats on a table when no configuration says otherwise.
pub const DEFAULT_MAX_PLAYERS: usize = 6;

/// Usernames are cut to half of this length.
pub const MAX_USER_INPUT_LENGTH: usize = 64;

/// The small blind (and the post-flop minimum bet) is `limit / LIMIT_TO_MIN_BET`.
pub const LIMIT_TO_MIN_BET: u64 = 200;

/// Win messages kept on a table before the oldest are dropped.
pub const MAX_WIN_MESSAGES: usize = 32;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;
