//! Hand evaluation.
//!
//! Every hand is reduced to a single `u32` whose natural ordering is the
//! poker ordering: the category sits in the high bits and up to five
//! tie-breaking card values follow, four bits each, most significant first.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Card, Value};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl Rank {
    const ALL: [Rank; 9] = [
        Rank::HighCard,
        Rank::OnePair,
        Rank::TwoPair,
        Rank::ThreeOfAKind,
        Rank::Straight,
        Rank::Flush,
        Rank::FullHouse,
        Rank::FourOfAKind,
        Rank::StraightFlush,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::HighCard => "High Card",
            Self::OnePair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "hi",
            Self::OnePair => "1p",
            Self::TwoPair => "2p",
            Self::ThreeOfAKind => "3k",
            Self::Straight => "s8",
            Self::Flush => "fs",
            Self::FullHouse => "fh",
            Self::FourOfAKind => "4k",
            Self::StraightFlush => "sf",
        };
        write!(f, "{repr}")
    }
}

const RANK_SHIFT: u32 = 20;
const KICKER_BITS: u32 = 4;

/// Strength of the best five cards a seat can make.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandScore {
    pub value: u32,
}

impl HandScore {
    fn new(rank: Rank, kickers: &[Value]) -> Self {
        let mut value = (rank as u32) << RANK_SHIFT;
        for (i, kicker) in kickers.iter().take(5).enumerate() {
            let shift = RANK_SHIFT - KICKER_BITS * (i as u32 + 1);
            value |= u32::from(*kicker) << shift;
        }
        Self { value }
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        let idx = (self.value >> RANK_SHIFT) as usize;
        Rank::ALL[idx.min(Rank::ALL.len() - 1)]
    }

    /// Highest tie-breaking value; the top card of a straight.
    #[must_use]
    pub fn high_value(&self) -> Value {
        ((self.value >> (RANK_SHIFT - KICKER_BITS)) & 0xF) as Value
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.rank() {
            Rank::StraightFlush if self.high_value() == 14 => "Royal Flush",
            rank => rank.name(),
        }
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Top card of a straight made by these distinct values, if any.
/// `values` must be sorted high to low.
fn straight_high(values: &[Value]) -> Option<Value> {
    if values.len() != 5 {
        return None;
    }
    if values.windows(2).all(|w| w[0] == w[1] + 1) {
        return Some(values[0]);
    }
    // Wheel: the ace plays low.
    if values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

/// Score at most five cards.
fn eval_five(cards: &[Card]) -> HandScore {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[usize::from(card.0)] += 1;
    }

    // (count, value), largest groups first, then higher values.
    let mut groups: Vec<(u8, Value)> = (2..=14u8)
        .rev()
        .filter(|v| counts[usize::from(*v)] > 0)
        .map(|v| (counts[usize::from(v)], v))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));
    let kickers: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();

    let is_flush = cards.len() == 5 && cards.iter().all(|c| c.1 == cards[0].1);
    let straight = straight_high(&kickers);

    match (straight, is_flush, groups.as_slice()) {
        (Some(high), true, _) => HandScore::new(Rank::StraightFlush, &[high]),
        (_, _, [(4, _), ..]) => HandScore::new(Rank::FourOfAKind, &kickers),
        (_, _, [(3, _), (2, _)]) => HandScore::new(Rank::FullHouse, &kickers),
        (_, true, _) => HandScore::new(Rank::Flush, &kickers),
        (Some(high), false, _) => HandScore::new(Rank::Straight, &[high]),
        (_, _, [(3, _), ..]) => HandScore::new(Rank::ThreeOfAKind, &kickers),
        (_, _, [(2, _), (2, _), ..]) => HandScore::new(Rank::TwoPair, &kickers),
        (_, _, [(2, _), ..]) => HandScore::new(Rank::OnePair, &kickers),
        _ => HandScore::new(Rank::HighCard, &kickers),
    }
}

/// Most cards a seat can combine: two hole cards and a five-card board.
pub const MAX_EVAL_CARDS: usize = 7;

/// Score the best five-card hand out of `cards`. Fewer than five cards are
/// scored as they are; only the first [`MAX_EVAL_CARDS`] are considered.
#[must_use]
pub fn eval(cards: &[Card]) -> HandScore {
    let cards = &cards[..cards.len().min(MAX_EVAL_CARDS)];
    if cards.len() <= 5 {
        return eval_five(cards);
    }
    let n = cards.len();
    let mut best = HandScore { value: 0 };
    let mut five = Vec::with_capacity(5);
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        five.clear();
        five.extend((0..n).filter(|i| mask & (1 << i) != 0).map(|i| cards[i]));
        best = best.max(eval_five(&five));
    }
    best
}

/// Score a seat's hole cards against the shared board.
#[must_use]
pub fn score(hole: &[Card], board: &[Card]) -> HandScore {
    let mut cards = Vec::with_capacity(hole.len() + board.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    eval(&cards)
}

/// Indices of every hand tied for the best score.
#[must_use]
pub fn argmax(scores: &[HandScore]) -> Vec<usize> {
    let Some(best) = scores.iter().max() else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| *s == best)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit::{self, Club, Diamond, Heart, Spade};

    fn c(value: Value, suit: crate::game::entities::Suit) -> Card {
        Card(value, suit)
    }

    #[test]
    fn test_category_names() {
        let cases = [
            (vec![c(14, Spade), c(9, Heart), c(7, Club), c(4, Diamond), c(2, Spade)], "High Card"),
            (vec![c(9, Spade), c(9, Heart), c(7, Club), c(4, Diamond), c(2, Spade)], "Pair"),
            (vec![c(9, Spade), c(9, Heart), c(7, Club), c(7, Diamond), c(2, Spade)], "Two Pair"),
            (vec![c(9, Spade), c(9, Heart), c(9, Club), c(7, Diamond), c(2, Spade)], "Three of a Kind"),
            (vec![c(6, Spade), c(5, Heart), c(4, Club), c(3, Diamond), c(2, Spade)], "Straight"),
            (vec![c(13, Heart), c(9, Heart), c(7, Heart), c(4, Heart), c(2, Heart)], "Flush"),
            (vec![c(9, Spade), c(9, Heart), c(9, Club), c(7, Diamond), c(7, Spade)], "Full House"),
            (vec![c(9, Spade), c(9, Heart), c(9, Club), c(9, Diamond), c(7, Spade)], "Four of a Kind"),
            (vec![c(9, Club), c(8, Club), c(7, Club), c(6, Club), c(5, Club)], "Straight Flush"),
            (vec![c(14, Club), c(13, Club), c(12, Club), c(11, Club), c(10, Club)], "Royal Flush"),
        ];
        for (cards, name) in cases {
            assert_eq!(eval(&cards).name(), name, "{cards:?}");
        }
    }

    #[test]
    fn test_wheel_is_lowest_straight() {
        let wheel = eval(&[c(14, Spade), c(2, Heart), c(3, Club), c(4, Diamond), c(5, Spade)]);
        let six_high = eval(&[c(6, Spade), c(2, Heart), c(3, Club), c(4, Diamond), c(5, Spade)]);
        let trips = eval(&[c(14, Spade), c(14, Heart), c(14, Club), c(4, Diamond), c(5, Spade)]);
        assert_eq!(wheel.rank(), Rank::Straight);
        assert_eq!(wheel.high_value(), 5);
        assert!(wheel < six_high);
        assert!(wheel > trips);
    }

    #[test]
    fn test_steel_wheel_is_straight_flush() {
        let hand = eval(&[c(14, Heart), c(2, Heart), c(3, Heart), c(4, Heart), c(5, Heart)]);
        assert_eq!(hand.rank(), Rank::StraightFlush);
        assert_eq!(hand.name(), "Straight Flush");
    }

    #[test]
    fn test_best_five_of_seven() {
        let hole = [c(14, Heart), c(13, Heart)];
        let board = [c(12, Heart), c(11, Heart), c(10, Heart), c(2, Club), c(2, Spade)];
        assert_eq!(score(&hole, &board).name(), "Royal Flush");
    }

    #[test]
    fn test_kickers_break_ties() {
        let board = [c(9, Spade), c(9, Heart), c(5, Club), c(4, Diamond), c(2, Spade)];
        let ace_kicker = score(&[c(14, Club), c(7, Diamond)], &board);
        let king_kicker = score(&[c(13, Club), c(7, Heart)], &board);
        assert!(ace_kicker > king_kicker);
        assert_eq!(ace_kicker.rank(), king_kicker.rank());
    }

    #[test]
    fn test_identical_strength_compares_equal() {
        let board = [c(14, Spade), c(13, Heart), c(12, Club), c(11, Diamond), c(10, Spade)];
        let a = score(&[c(2, Club), c(3, Diamond)], &board);
        let b = score(&[c(4, Heart), c(5, Heart)], &board);
        assert_eq!(a, b);
        assert_eq!(argmax(&[a, b]), vec![0, 1]);
    }

    #[test]
    fn test_two_pair_kicker_order() {
        let high = eval(&[c(10, Spade), c(10, Heart), c(3, Club), c(3, Diamond), c(14, Spade)]);
        let low = eval(&[c(9, Spade), c(9, Heart), c(8, Club), c(8, Diamond), c(14, Heart)]);
        assert!(high > low);
    }

    #[test]
    fn test_partial_hands_score_without_board() {
        assert_eq!(score(&[c(7, Spade), c(7, Heart)], &[]).rank(), Rank::OnePair);
        assert_eq!(score(&[c(7, Spade), c(2, Heart)], &[]).rank(), Rank::HighCard);
    }

    #[test]
    fn test_eval_ignores_cards_past_seven() {
        let seven = [c(2, Club), c(4, Diamond), c(6, Heart), c(8, Spade), c(10, Club), c(12, Diamond), c(13, Heart)];
        let mut many: Vec<Card> = seven.to_vec();
        for suit in Suit::ALL {
            many.extend((2..=14).map(|value| c(value, suit)));
        }
        assert_eq!(many.len(), 59);
        assert_eq!(eval(&many), eval(&seven));
        assert_eq!(eval(&many).rank(), Rank::HighCard);
    }

    #[test]
    fn test_argmax_empty() {
        assert!(argmax(&[]).is_empty());
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::HighCard < Rank::OnePair);
        assert!(Rank::FullHouse < Rank::FourOfAKind);
        assert!(Rank::FourOfAKind < Rank::StraightFlush);
    }
}
