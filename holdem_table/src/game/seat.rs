//! Per-player state at a table.
//!
//! Seats only move chips between their own stack and bet; the table keeps
//! the pot in step with the amounts these methods return.

use std::sync::Arc;

use super::entities::{Action, Card, Money, Player, SeatId, SeatView};

#[derive(Clone, Debug)]
pub struct Seat {
    pub id: SeatId,
    pub player: Arc<Player>,
    pub stack: Money,
    pub hand: Vec<Card>,
    pub bet: Money,
    pub folded: bool,
    pub checked: bool,
    pub turn: bool,
    pub last_action: Option<Action>,
}

impl Seat {
    #[must_use]
    pub fn new(id: SeatId, player: Arc<Player>, stack: Money) -> Self {
        Self {
            id,
            player,
            stack,
            hand: Vec::with_capacity(2),
            bet: Money::ZERO,
            folded: false,
            checked: false,
            turn: false,
            last_action: None,
        }
    }

    /// Whether the seat can still put chips in this hand.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.folded && !self.stack.is_zero()
    }

    #[must_use]
    pub fn is_all_in(&self) -> bool {
        !self.folded && self.stack.is_zero()
    }

    /// Move up to `amount` from the stack into the bet. Returns what was
    /// actually moved.
    fn commit(&mut self, amount: Money) -> Money {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.bet += moved;
        moved
    }

    /// Post a forced bet. Posting does not count as acting unless it
    /// takes the whole stack.
    pub fn place_blind(&mut self, amount: Money) -> Money {
        let posted = self.commit(amount);
        if self.stack.is_zero() {
            self.last_action = Some(Action::AllIn);
        }
        posted
    }

    pub fn fold(&mut self) {
        self.folded = true;
        self.turn = false;
        self.last_action = Some(Action::Fold);
    }

    pub fn check(&mut self) {
        self.checked = true;
        self.last_action = Some(Action::Check);
    }

    /// Bring the bet up to `target_bet`, or all-in if the stack is short.
    pub fn call_raise(&mut self, target_bet: Money) -> Money {
        let moved = self.commit(target_bet - self.bet);
        self.last_action = Some(if self.stack.is_zero() {
            Action::AllIn
        } else {
            Action::Call
        });
        moved
    }

    /// Raise the bet to a new total of `amount`, or all-in if the stack is
    /// short.
    pub fn raise(&mut self, amount: Money) -> Money {
        let moved = self.commit(amount - self.bet);
        self.checked = false;
        self.last_action = Some(if self.stack.is_zero() {
            Action::AllIn
        } else {
            Action::Raise
        });
        moved
    }

    pub fn win_hand(&mut self, amount: Money) {
        self.stack += amount;
    }

    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.folded = false;
        self.turn = false;
        self.reset_for_street();
    }

    pub fn reset_for_street(&mut self) {
        self.bet = Money::ZERO;
        self.checked = false;
        self.last_action = None;
    }

    pub(crate) fn view(&self, show_cards: bool) -> SeatView {
        SeatView {
            id: self.id,
            player: self.player.name.clone(),
            stack: self.stack,
            hand: if show_cards { self.hand.clone() } else { Vec::new() },
            has_cards: !self.hand.is_empty(),
            bet: self.bet,
            folded: self.folded,
            checked: self.checked,
            turn: self.turn,
            last_action: self.last_action,
        }
    }
}
