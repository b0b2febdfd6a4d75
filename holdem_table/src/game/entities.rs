use rand::{Rng, rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt::{self},
    ops::{Add, AddAssign, Mul, Sub, SubAssign},
    str::FromStr,
    sync::Arc,
};
use thiserror::Error;
use uuid::Uuid;

use super::constants;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a uInt8 value (deuce=2u8 ... ace=14u8)
/// and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            14 => "A",
            13 => "K",
            12 => "Q",
            11 => "J",
            10 => "T",
            v => &v.to_string(),
        };
        write!(f, "{value}{}", self.1)
    }
}

#[derive(Debug, Eq, Error, PartialEq)]
pub enum DeckError {
    #[error("deck exhausted after {0} cards")]
    Exhausted(usize),
}

/// One hand's worth of cards. The cursor only moves forward, so a card is
/// never dealt twice until a new deck is built for the next hand.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; constants::DECK_SIZE],
    pub deck_idx: usize,
}

impl Deck {
    /// A freshly shuffled deck.
    #[must_use]
    pub fn new() -> Self {
        let mut deck = Self::default();
        deck.shuffle();
        deck
    }

    /// Like [`Deck::new`] but driven by the caller's RNG.
    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// A deck that deals `top` first (in order) and then every other card
    /// in canonical order. Duplicates in `top` are ignored.
    #[must_use]
    pub fn stacked(top: &[Card]) -> Self {
        let mut order: Vec<Card> = Vec::with_capacity(constants::DECK_SIZE);
        for card in top {
            if !order.contains(card) {
                order.push(*card);
            }
        }
        for card in Self::default().cards {
            if !order.contains(&card) {
                order.push(card);
            }
        }
        let mut cards = Self::default().cards;
        cards.copy_from_slice(&order[..constants::DECK_SIZE]);
        Self { cards, deck_idx: 0 }
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let card = self
            .cards
            .get(self.deck_idx)
            .copied()
            .ok_or(DeckError::Exhausted(self.deck_idx))?;
        self.deck_idx += 1;
        Ok(card)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        constants::DECK_SIZE - self.deck_idx
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rng());
        self.deck_idx = 0;
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards: [Card; constants::DECK_SIZE] = [Card(2, Suit::Club); constants::DECK_SIZE];
        for (i, value) in (2u8..=14u8).enumerate() {
            for (j, suit) in Suit::ALL.into_iter().enumerate() {
                cards[4 * i + j] = Card(value, suit);
            }
        }
        Self { cards, deck_idx: 0 }
    }
}

/// An amount of money in whole cents. Every stack, bet and pot is kept
/// in cents, so two amounts are equal exactly when they print the same
/// with two decimals.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Divide into `parts` equal shares, returning the share and the
    /// leftover cents.
    #[must_use]
    pub fn split(self, parts: u64) -> (Money, Money) {
        match parts {
            0 => (Money::ZERO, self),
            n => (Money(self.0 / n), Money(self.0 % n)),
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Self::Output {
        Money(self.0.saturating_mul(rhs))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Eq, Error, PartialEq)]
#[error("invalid amount {0:?}: expected dollars with at most two decimals")]
pub struct ParseMoneyError(String);

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError(s.to_string());
        let s = s.trim().trim_start_matches('$');
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !is_digits(whole) || !is_digits(frac) || frac.len() > 2 {
            return Err(err());
        }
        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };
        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Money)
            .ok_or_else(err)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        let username: String = s
            .chars()
            .take(constants::MAX_USER_INPUT_LENGTH / 2)
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        Self(username)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// Opaque identifier of the connection a seated player acts through.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ConnectionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The identity a host hands to the table. Tables share it, they never
/// own it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub name: Username,
    pub connection_id: ConnectionId,
}

impl Player {
    #[must_use]
    pub fn new(name: &str, connection_id: ConnectionId) -> Arc<Self> {
        Arc::new(Self {
            name: Username::new(name),
            connection_id,
        })
    }
}

pub type TableId = i64;

/// Type alias for seat positions, numbered from 1.
pub type SeatId = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    AllIn,
    Call,
    Check,
    Fold,
    Raise,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AllIn => "all-in",
            Self::Call => "calls",
            Self::Check => "checks",
            Self::Fold => "folds",
            Self::Raise => "raises",
        };
        write!(f, "{repr}")
    }
}

/// What a command did, for the host to broadcast.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub seat_id: SeatId,
    pub message: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SeatView {
    pub id: SeatId,
    pub player: Username,
    pub stack: Money,
    /// Hole cards the viewer is allowed to see.
    pub hand: Vec<Card>,
    /// Whether the seat holds cards at all, visible or not.
    pub has_cards: bool,
    pub bet: Money,
    pub folded: bool,
    pub checked: bool,
    pub turn: bool,
    pub last_action: Option<Action>,
}

/// Full snapshot of a table after a mutation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TableView {
    pub id: TableId,
    pub name: String,
    pub max_players: usize,
    pub limit: Money,
    pub seats: Vec<Option<SeatView>>,
    pub board: Vec<Card>,
    pub hand_in_progress: bool,
    pub button: Option<SeatId>,
    pub turn: Option<SeatId>,
    pub small_blind: Option<SeatId>,
    pub big_blind: Option<SeatId>,
    pub pot: Money,
    pub main_pot: Money,
    pub call_amount: Option<Money>,
    pub min_raise: Money,
    pub hand_over: bool,
    pub went_to_showdown: bool,
    pub win_messages: Vec<String>,
}
