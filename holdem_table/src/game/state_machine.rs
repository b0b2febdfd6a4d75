//! The table state machine.
//!
//! A [`Table`] owns its seats and drives a hand through its streets:
//! no hand in progress, dealing (inside [`Table::start_hand`]), one betting
//! round per street, then either a showdown or an early win, and back to no
//! hand in progress. Every action handler ends by calling
//! [`Table::change_turn`], which decides whether the round is complete.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, sync::Arc};
use thiserror::Error;

use super::constants::{LIMIT_TO_MIN_BET, MAX_PLAYERS, MAX_WIN_MESSAGES};
use super::entities::{
    Action, ActionOutcome, Card, ConnectionId, Deck, DeckError, Money, Player, SeatId, TableId,
    TableView,
};
use super::functional::{HandScore, argmax, score};
use super::seat::Seat;

/// Errors that can occur during table operations
#[derive(Debug, Eq, Error, PartialEq)]
pub enum TableError {
    #[error("seat not found")]
    SeatNotFound,
    #[error("seat {0} does not exist at this table")]
    InvalidSeat(SeatId),
    #[error("dealing failed: {0}")]
    ExhaustedDeck(#[from] DeckError),
    #[error("invalid table state: {0}")]
    Internal(&'static str),
}

impl TableError {
    /// Whether the table can no longer be trusted after this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ExhaustedDeck(_) | Self::Internal(_))
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

#[derive(Debug)]
pub struct Table {
    id: TableId,
    name: String,
    max_players: usize,
    /// Stake level. Blinds and minimum bets derive from it.
    limit: Money,
    /// Chips a player sits down with.
    buy_in: Money,
    /// Slot `i` holds seat number `i + 1`.
    seats: Vec<Option<Seat>>,
    board: Vec<Card>,
    /// Present exactly while a hand is in progress.
    deck: Option<Deck>,
    button: Option<SeatId>,
    turn: Option<SeatId>,
    small_blind: Option<SeatId>,
    big_blind: Option<SeatId>,
    pot: Money,
    /// Pot as of the start of the current street, for display.
    main_pot: Money,
    call_amount: Option<Money>,
    min_raise: Money,
    hand_over: bool,
    went_to_showdown: bool,
    win_messages: VecDeque<String>,
}

impl Table {
    #[must_use]
    pub fn new(id: TableId, name: &str, max_players: usize, limit: Money) -> Self {
        let max_players = max_players.clamp(1, MAX_PLAYERS);
        let min_bet = Money::from_cents(limit.cents() / LIMIT_TO_MIN_BET);
        Self {
            id,
            name: name.to_string(),
            max_players,
            limit,
            buy_in: limit,
            seats: vec![None; max_players],
            board: Vec::with_capacity(5),
            deck: None,
            button: None,
            turn: None,
            small_blind: None,
            big_blind: None,
            pot: Money::ZERO,
            main_pot: Money::ZERO,
            call_amount: None,
            min_raise: min_bet * 2,
            hand_over: true,
            went_to_showdown: false,
            win_messages: VecDeque::with_capacity(MAX_WIN_MESSAGES),
        }
    }

    /// Seat new players with `buy_in` chips instead of one `limit`.
    #[must_use]
    pub fn with_buy_in(mut self, buy_in: Money) -> Self {
        self.buy_in = buy_in;
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn limit(&self) -> Money {
        self.limit
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn button(&self) -> Option<SeatId> {
        self.button
    }

    pub fn turn(&self) -> Option<SeatId> {
        self.turn
    }

    pub fn small_blind(&self) -> Option<SeatId> {
        self.small_blind
    }

    pub fn big_blind(&self) -> Option<SeatId> {
        self.big_blind
    }

    pub fn pot(&self) -> Money {
        self.pot
    }

    pub fn main_pot(&self) -> Money {
        self.main_pot
    }

    pub fn call_amount(&self) -> Option<Money> {
        self.call_amount
    }

    pub fn min_raise(&self) -> Money {
        self.min_raise
    }

    pub fn hand_over(&self) -> bool {
        self.hand_over
    }

    pub fn has_deck(&self) -> bool {
        self.deck.is_some()
    }

    pub fn went_to_showdown(&self) -> bool {
        self.went_to_showdown
    }

    pub fn win_messages(&self) -> impl Iterator<Item = &str> {
        self.win_messages.iter().map(String::as_str)
    }

    /// The small blind, and the smallest bet on later streets.
    pub fn min_bet(&self) -> Money {
        Money::from_cents(self.limit.cents() / LIMIT_TO_MIN_BET)
    }

    pub fn street(&self) -> Option<Street> {
        if self.hand_over {
            return None;
        }
        match self.board.len() {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            _ => Some(Street::River),
        }
    }

    pub fn seat(&self, seat_id: SeatId) -> Option<&Seat> {
        seat_id
            .checked_sub(1)
            .and_then(|idx| self.seats.get(idx))
            .and_then(Option::as_ref)
    }

    fn seat_mut(&mut self, seat_id: SeatId) -> Option<&mut Seat> {
        seat_id
            .checked_sub(1)
            .and_then(|idx| self.seats.get_mut(idx))
            .and_then(Option::as_mut)
    }

    /// Occupied seats in seat order.
    pub fn sat_players(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().flatten()
    }

    /// Occupied seats still holding a hand, all-in or not.
    pub fn unfolded_players(&self) -> impl Iterator<Item = &Seat> {
        self.sat_players().filter(|seat| !seat.folded)
    }

    pub fn is_seat_open(&self, seat_id: SeatId) -> bool {
        (1..=self.max_players).contains(&seat_id) && self.seat(seat_id).is_none()
    }

    pub fn seat_of(&self, connection_id: &ConnectionId) -> Option<SeatId> {
        self.sat_players()
            .find(|seat| seat.player.connection_id == *connection_id)
            .map(|seat| seat.id)
    }

    fn find_seat_id(&self, connection_id: &ConnectionId) -> Result<SeatId, TableError> {
        self.seat_of(connection_id).ok_or(TableError::SeatNotFound)
    }

    /// Chips on the table: every stack plus the pot.
    pub fn chips_in_play(&self) -> Money {
        self.sat_players().map(|seat| seat.stack).sum::<Money>() + self.pot
    }

    /// Walk the seats circularly from `from` (exclusive) and return the
    /// position reached after passing `places` seats that satisfy
    /// `predicate`. `None` starts the walk before seat 1. Returns `None`
    /// when no seat qualifies.
    pub fn next_seat<P>(&self, from: Option<SeatId>, places: usize, predicate: P) -> Option<SeatId>
    where
        P: Fn(&Seat) -> bool,
    {
        if places == 0 {
            return from;
        }
        let start = from.unwrap_or(0) % (self.max_players + 1);
        let order: Vec<SeatId> = (1..=self.max_players)
            .map(|step| (start + step - 1) % self.max_players + 1)
            .filter(|seat_id| self.seat(*seat_id).is_some_and(&predicate))
            .collect();
        if order.is_empty() {
            return None;
        }
        Some(order[(places - 1) % order.len()])
    }

    pub fn next_sat_player(&self, from: Option<SeatId>, places: usize) -> Option<SeatId> {
        self.next_seat(from, places, |_| true)
    }

    /// Next seat that is occupied, not folded and not all-in.
    pub fn next_unfolded_player(&self, from: Option<SeatId>, places: usize) -> Option<SeatId> {
        self.next_seat(from, places, Seat::is_active)
    }

    /// Put `player` in `seat_id` with a buy-in's worth of chips.
    ///
    /// Sitting in an occupied seat, or sitting a connection that is already
    /// seated, does nothing. A player who sits down during a hand waits
    /// for the next one.
    pub fn sit_player(&mut self, player: Arc<Player>, seat_id: SeatId) -> Result<(), TableError> {
        if !(1..=self.max_players).contains(&seat_id) {
            return Err(TableError::InvalidSeat(seat_id));
        }
        if self.seat(seat_id).is_some() || self.seat_of(&player.connection_id).is_some() {
            debug!(
                "Table {}: ignoring sit of {} at seat {}",
                self.id, player.name, seat_id
            );
            return Ok(());
        }

        let mut seat = Seat::new(seat_id, player, self.buy_in);
        seat.folded = !self.hand_over;
        info!(
            "Table {}: {} sits at seat {} with ${}",
            self.id, seat.player.name, seat_id, seat.stack
        );
        self.seats[seat_id - 1] = Some(seat);

        if self.sat_players().count() == 1 {
            self.button = Some(seat_id);
        }
        Ok(())
    }

    /// Remove the seat held by `connection_id` and return it so the host
    /// can settle its stack. Chips already bet stay in the pot.
    pub fn stand_player(
        &mut self,
        connection_id: &ConnectionId,
    ) -> Result<Option<Seat>, TableError> {
        let Some(seat_id) = self.seat_of(connection_id) else {
            return Ok(None);
        };
        let had_turn = self.turn == Some(seat_id);
        let seat = self.seats[seat_id - 1].take();
        info!("Table {}: seat {} is now open", self.id, seat_id);

        if self.button == Some(seat_id) {
            // Anchor the button on the seat before the one that left so
            // the next hand still moves it forward one place.
            let remaining = self.sat_players().count();
            self.button = self.next_sat_player(Some(seat_id), remaining);
        }
        if self.small_blind == Some(seat_id) {
            self.small_blind = None;
        }
        if self.big_blind == Some(seat_id) {
            self.big_blind = None;
        }
        if had_turn {
            self.turn = None;
        }

        if self.sat_players().next().is_none() {
            self.reset_empty_table();
        } else if !self.hand_over {
            if self.unfolded_players().count() <= 1 {
                self.end_without_showdown();
            } else if had_turn {
                self.change_turn(seat_id)?;
            }
        }
        Ok(seat)
    }

    /// Drop a disconnected player from the table.
    pub fn remove_player(
        &mut self,
        connection_id: &ConnectionId,
    ) -> Result<Option<Seat>, TableError> {
        debug!("Table {}: removing connection {}", self.id, connection_id);
        self.stand_player(connection_id)
    }

    /// Start a hand with a freshly shuffled deck.
    pub fn start_hand(&mut self) -> Result<(), TableError> {
        self.start_hand_with(Deck::new())
    }

    /// Start a hand dealing from `deck`. Does nothing while a hand is in
    /// progress or when fewer than two seats have chips.
    pub fn start_hand_with(&mut self, deck: Deck) -> Result<(), TableError> {
        if !self.hand_over {
            debug!("Table {}: hand already in progress", self.id);
            return Ok(());
        }
        let funded = self
            .sat_players()
            .filter(|seat| !seat.stack.is_zero())
            .count();
        if funded < 2 {
            debug!("Table {}: need 2+ players with chips, have {}", self.id, funded);
            return Ok(());
        }

        self.button = self.next_seat(self.button, 1, |seat| !seat.stack.is_zero());
        self.deck = Some(deck);
        self.hand_over = false;
        self.went_to_showdown = false;
        self.reset_board_and_pot();
        for seat in self.seats.iter_mut().flatten() {
            seat.reset_for_hand();
            // Busted seats sit the hand out.
            seat.folded = seat.stack.is_zero();
        }
        self.reset_bets_and_actions();
        self.set_turn();
        self.deal_preflop()?;
        self.set_blinds();

        // Short stacks can go all-in on the blinds alone.
        if self.betting_closed() {
            self.run_out()?;
        } else if self.turn.and_then(|id| self.seat(id)).is_some_and(|seat| !seat.is_active()) {
            self.turn = self.next_unfolded_player(self.turn, 1);
        }
        self.sync_turn_flags();

        info!(
            "Table {}: hand started, button at seat {:?}, pot ${}",
            self.id, self.button, self.pot
        );
        Ok(())
    }

    fn set_turn(&mut self) {
        self.turn = if self.unfolded_players().count() <= 3 {
            self.button
        } else {
            self.next_unfolded_player(self.button, 3)
        };
    }

    fn set_blinds(&mut self) {
        let heads_up = self.unfolded_players().count() == 2;
        self.small_blind = if heads_up {
            self.button
        } else {
            self.next_unfolded_player(self.button, 1)
        };
        self.big_blind = if heads_up {
            self.next_unfolded_player(self.button, 1)
        } else {
            self.next_unfolded_player(self.button, 2)
        };

        let min_bet = self.min_bet();
        for (position, amount) in [(self.small_blind, min_bet), (self.big_blind, min_bet * 2)] {
            if let Some(seat) = position.and_then(|id| self.seat_mut(id)) {
                let posted = seat.place_blind(amount);
                self.pot += posted;
            }
        }
        self.call_amount = Some(min_bet * 2);
        self.min_raise = min_bet * 4;
    }

    fn draw(&mut self) -> Result<Card, TableError> {
        let deck = self
            .deck
            .as_mut()
            .ok_or(TableError::Internal("dealing without a deck"))?;
        Ok(deck.draw()?)
    }

    /// Two rounds of one card each, starting left of the button.
    fn deal_preflop(&mut self) -> Result<(), TableError> {
        let button = self.button.unwrap_or(0).min(self.max_players);
        let order: Vec<SeatId> = (button + 1..=self.max_players).chain(1..=button).collect();
        for _ in 0..2 {
            for seat_id in &order {
                if self.seat(*seat_id).is_some_and(|seat| !seat.folded) {
                    let card = self.draw()?;
                    if let Some(seat) = self.seat_mut(*seat_id) {
                        seat.hand.push(card);
                    }
                }
            }
        }
        Ok(())
    }

    fn deal_flop(&mut self) -> Result<(), TableError> {
        for _ in 0..3 {
            let card = self.draw()?;
            self.board.push(card);
        }
        Ok(())
    }

    fn deal_turn_or_river(&mut self) -> Result<(), TableError> {
        let card = self.draw()?;
        self.board.push(card);
        Ok(())
    }

    pub fn handle_fold(&mut self, connection_id: &ConnectionId) -> Result<ActionOutcome, TableError> {
        let seat_id = self.find_seat_id(connection_id)?;
        let seat = self.seat_mut(seat_id).ok_or(TableError::SeatNotFound)?;
        seat.fold();
        let message = format!("{} folds", seat.player.name);

        self.change_turn(seat_id)?;
        Ok(ActionOutcome { seat_id, message })
    }

    pub fn handle_check(
        &mut self,
        connection_id: &ConnectionId,
    ) -> Result<ActionOutcome, TableError> {
        let seat_id = self.find_seat_id(connection_id)?;
        let seat = self.seat_mut(seat_id).ok_or(TableError::SeatNotFound)?;
        seat.check();
        let message = format!("{} checks", seat.player.name);

        self.change_turn(seat_id)?;
        Ok(ActionOutcome { seat_id, message })
    }

    pub fn handle_call(&mut self, connection_id: &ConnectionId) -> Result<ActionOutcome, TableError> {
        let seat_id = self.find_seat_id(connection_id)?;
        let target = self.call_amount.unwrap_or(Money::ZERO);
        let seat = self.seat_mut(seat_id).ok_or(TableError::SeatNotFound)?;
        let added_to_pot = seat.call_raise(target);
        let message = format!("{} calls ${}", seat.player.name, added_to_pot);
        self.pot += added_to_pot;

        self.change_turn(seat_id)?;
        Ok(ActionOutcome { seat_id, message })
    }

    /// Raise to a new total bet of `amount` (not an increment).
    pub fn handle_raise(
        &mut self,
        connection_id: &ConnectionId,
        amount: Money,
    ) -> Result<ActionOutcome, TableError> {
        let seat_id = self.find_seat_id(connection_id)?;
        let seat = self.seat_mut(seat_id).ok_or(TableError::SeatNotFound)?;
        let added_to_pot = seat.raise(amount);
        let new_bet = seat.bet;
        let message = format!("{} raises to ${}", seat.player.name, new_bet);
        self.pot += added_to_pot;

        match self.call_amount {
            Some(call) if new_bet > call => {
                self.min_raise = call + (new_bet - call) * 2;
                self.call_amount = Some(new_bet);
            }
            // An all-in short of the current bet doesn't change it.
            Some(_) => {}
            None => {
                self.min_raise = new_bet * 2;
                self.call_amount = Some(new_bet);
            }
        }

        self.change_turn(seat_id)?;
        Ok(ActionOutcome { seat_id, message })
    }

    /// Advance the hand after `last_turn` acted.
    pub(crate) fn change_turn(&mut self, last_turn: SeatId) -> Result<(), TableError> {
        if self.hand_over {
            return Ok(());
        }
        if self.unfolded_players().count() == 1 {
            self.end_without_showdown();
            return Ok(());
        }

        if self.betting_closed() {
            self.run_out()?;
        } else if self.all_checked_or_called() {
            self.deal_next_street()?;
            if !self.hand_over && self.betting_closed() {
                self.run_out()?;
            } else {
                self.turn = if self.hand_over {
                    None
                } else {
                    self.next_unfolded_player(self.button, 1)
                };
            }
        } else {
            self.turn = self.next_unfolded_player(Some(last_turn), 1);
        }

        self.sync_turn_flags();
        Ok(())
    }

    /// No one is left to bet against: every unfolded seat is all-in, or a
    /// single seat with chips has already matched the bet.
    fn betting_closed(&self) -> bool {
        let mut active = self.sat_players().filter(|seat| seat.is_active());
        match (active.next(), active.next()) {
            (None, _) => true,
            (Some(seat), None) => self.call_amount.is_none_or(|call| seat.bet >= call),
            _ => false,
        }
    }

    /// Deal the remaining streets back to back and go to showdown.
    fn run_out(&mut self) -> Result<(), TableError> {
        debug!("Table {}: running out the board", self.id);
        self.turn = None;
        while !self.hand_over {
            self.deal_next_street()?;
        }
        Ok(())
    }

    /// Whether the current betting round is complete.
    pub fn all_checked_or_called(&self) -> bool {
        // Preflop the big blind keeps the option to act: posting the blind
        // is not a voluntary action.
        if self.board.is_empty()
            && let Some(big_blind) = self.big_blind.and_then(|id| self.seat(id))
            && big_blind.is_active()
            && big_blind.last_action.is_none()
            && self.call_amount == Some(big_blind.bet)
        {
            return false;
        }

        self.sat_players()
            .filter(|seat| seat.is_active())
            .all(|seat| match self.call_amount {
                Some(call) => seat.bet == call,
                None => seat.checked || seat.last_action == Some(Action::Call),
            })
    }

    fn reset_bets_and_actions(&mut self) {
        for seat in self.seats.iter_mut().flatten() {
            seat.reset_for_street();
        }
        self.call_amount = None;
        self.min_raise = self.min_bet();
    }

    /// Close the current street and deal the next one, or go to showdown
    /// after the river.
    pub(crate) fn deal_next_street(&mut self) -> Result<(), TableError> {
        let length = self.board.len();
        self.reset_bets_and_actions();
        self.main_pot = self.pot;
        match length {
            0 => self.deal_flop()?,
            3 | 4 => self.deal_turn_or_river()?,
            _ => self.determine_winner(),
        }
        if let Some(street) = self.street() {
            debug!("Table {}: dealt {} {:?}", self.id, street, self.board);
        }
        Ok(())
    }

    /// Score every unfolded hand against the board and split the pot
    /// between the best. Odd cents go to the first winner in seat order.
    fn determine_winner(&mut self) {
        let contenders: Vec<(SeatId, HandScore)> = self
            .unfolded_players()
            .filter(|seat| !seat.hand.is_empty())
            .map(|seat| (seat.id, score(&seat.hand, &self.board)))
            .collect();
        let scores: Vec<HandScore> = contenders.iter().map(|(_, hand)| *hand).collect();
        let winners = argmax(&scores);

        let (share, remainder) = self.pot.split(winners.len() as u64);
        for (n, idx) in winners.into_iter().enumerate() {
            let (seat_id, hand) = contenders[idx];
            let amount = if n == 0 { share + remainder } else { share };
            if let Some(seat) = self.seat_mut(seat_id) {
                seat.win_hand(amount);
                let message = format!("{} wins ${} with {}", seat.player.name, amount, hand.name());
                self.push_win_message(message);
            }
        }

        self.pot = Money::ZERO;
        self.went_to_showdown = true;
        self.end_hand();
    }

    fn end_without_showdown(&mut self) {
        let pot = self.pot;
        let winner = self.seats.iter_mut().flatten().find(|seat| !seat.folded);
        match winner {
            Some(seat) => {
                seat.win_hand(pot);
                let message = format!("{} wins ${}", seat.player.name, pot);
                self.pot = Money::ZERO;
                self.push_win_message(message);
            }
            None => warn!("Table {}: hand ended with no one left to pay", self.id),
        }
        self.end_hand();
    }

    fn end_hand(&mut self) {
        self.turn = None;
        self.sync_turn_flags();
        self.deck = None;
        self.hand_over = true;
        if let Some(message) = self.win_messages.back() {
            info!("Table {}: {}", self.id, message);
        }
    }

    fn push_win_message(&mut self, message: String) {
        if self.win_messages.len() == MAX_WIN_MESSAGES {
            self.win_messages.pop_front();
        }
        self.win_messages.push_back(message);
    }

    fn sync_turn_flags(&mut self) {
        let turn = self.turn;
        for seat in self.seats.iter_mut().flatten() {
            seat.turn = Some(seat.id) == turn;
        }
    }

    fn reset_board_and_pot(&mut self) {
        self.board.clear();
        self.pot = Money::ZERO;
        self.main_pot = Money::ZERO;
    }

    /// Back to a freshly created, empty table.
    pub fn reset_empty_table(&mut self) {
        self.button = None;
        self.turn = None;
        self.small_blind = None;
        self.big_blind = None;
        self.hand_over = true;
        self.deck = None;
        self.went_to_showdown = false;
        self.call_amount = None;
        self.min_raise = self.min_bet() * 2;
        self.reset_board_and_pot();
        self.win_messages.clear();
        self.seats.iter_mut().for_each(|seat| *seat = None);
    }

    /// Snapshot of the table as `viewer` may see it. Hole cards are shown
    /// to their owner, and to everyone for hands still live at a showdown.
    pub fn view(&self, viewer: Option<&ConnectionId>) -> TableView {
        let seats = self
            .seats
            .iter()
            .map(|slot| {
                slot.as_ref().map(|seat| {
                    let own = viewer.is_some_and(|id| *id == seat.player.connection_id);
                    seat.view(own || (self.went_to_showdown && !seat.folded))
                })
            })
            .collect();

        TableView {
            id: self.id,
            name: self.name.clone(),
            max_players: self.max_players,
            limit: self.limit,
            seats,
            board: self.board.clone(),
            hand_in_progress: self.deck.is_some(),
            button: self.button,
            turn: self.turn,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            pot: self.pot,
            main_pot: self.main_pot,
            call_amount: self.call_amount,
            min_raise: self.min_raise,
            hand_over: self.hand_over,
            went_to_showdown: self.went_to_showdown,
            win_messages: self.win_messages.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(n: usize) -> (Table, Vec<ConnectionId>) {
        let mut table = Table::new(1, "test", 6, Money::from_cents(200));
        let ids: Vec<ConnectionId> = (0..n).map(|_| ConnectionId::new()).collect();
        for (i, id) in ids.iter().enumerate() {
            table
                .sit_player(Player::new(&format!("p{}", i + 1), *id), i + 1)
                .unwrap();
        }
        (table, ids)
    }

    #[test]
    fn test_next_seat_wraps_and_skips_empty() {
        let mut table = Table::new(1, "t", 6, Money::from_cents(200));
        for seat_id in [2, 5] {
            table
                .sit_player(Player::new("p", ConnectionId::new()), seat_id)
                .unwrap();
        }
        assert_eq!(table.next_sat_player(Some(5), 1), Some(2));
        assert_eq!(table.next_sat_player(Some(2), 1), Some(5));
        assert_eq!(table.next_sat_player(Some(2), 2), Some(2));
        assert_eq!(table.next_sat_player(None, 1), Some(2));
        assert_eq!(table.next_sat_player(Some(3), 1), Some(5));
    }

    #[test]
    fn test_next_seat_none_when_nobody_qualifies() {
        let table = Table::new(1, "t", 6, Money::from_cents(200));
        assert_eq!(table.next_sat_player(Some(3), 1), None);
        assert_eq!(table.next_unfolded_player(None, 2), None);
    }

    #[test]
    fn test_sit_in_occupied_seat_is_ignored() {
        let (mut table, ids) = table_with(1);
        let intruder = ConnectionId::new();
        table.sit_player(Player::new("x", intruder), 1).unwrap();
        assert_eq!(table.seat_of(&ids[0]), Some(1));
        assert_eq!(table.seat_of(&intruder), None);
    }

    #[test]
    fn test_sit_out_of_range() {
        let mut table = Table::new(1, "t", 6, Money::from_cents(200));
        let player = Player::new("p", ConnectionId::new());
        assert_eq!(table.sit_player(player.clone(), 0), Err(TableError::InvalidSeat(0)));
        assert_eq!(table.sit_player(player, 7), Err(TableError::InvalidSeat(7)));
        assert_eq!(table.sat_players().count(), 0);
    }

    #[test]
    fn test_first_player_gets_button() {
        let (table, _) = table_with(2);
        assert_eq!(table.button(), Some(1));
    }

    #[test]
    fn test_start_hand_needs_two_players() {
        let (mut table, _) = table_with(1);
        table.start_hand().unwrap();
        assert!(table.hand_over());
        assert!(!table.has_deck());
    }

    #[test]
    fn test_big_blind_option() {
        let (mut table, _) = table_with(3);
        table.start_hand().unwrap();
        // Three-handed: button acts first, then the small blind.
        let button = table.button().unwrap();
        let first = table.seat(button).unwrap().player.connection_id;
        table.handle_call(&first).unwrap();
        let sb = table.seat(table.small_blind().unwrap()).unwrap().player.connection_id;
        table.handle_call(&sb).unwrap();

        let bb = table.big_blind().unwrap();
        assert_eq!(table.seat(bb).unwrap().bet, table.call_amount().unwrap());
        assert!(!table.all_checked_or_called());
        assert_eq!(table.turn(), Some(bb));
        assert!(table.board().is_empty());
    }

    #[test]
    fn test_hidden_hole_cards() {
        let (mut table, ids) = table_with(2);
        table.start_hand().unwrap();
        let view = table.view(Some(&ids[0]));
        let mine = view.seats[0].as_ref().unwrap();
        let theirs = view.seats[1].as_ref().unwrap();
        assert_eq!(mine.hand.len(), 2);
        assert!(theirs.hand.is_empty());
        assert!(theirs.has_cards);
    }

    #[test]
    fn test_fatal_errors() {
        assert!(TableError::ExhaustedDeck(DeckError::Exhausted(52)).is_fatal());
        assert!(!TableError::SeatNotFound.is_fatal());
    }
}
