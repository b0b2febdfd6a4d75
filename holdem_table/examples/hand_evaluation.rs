//! Hand Evaluation Example
//!
//! Demonstrates how to score hands and pick a winner between seats.

use holdem_table::entities::{Card, Suit};
use holdem_table::functional::{argmax, eval, score};

fn main() {
    println!("=== Hold'em Hand Evaluation Example ===\n");

    // Example 1: Evaluate a single hand
    println!("Example 1: Evaluating a 7-card hand");
    let hand = [
        Card(14, Suit::Heart),
        Card(13, Suit::Heart),
        Card(12, Suit::Heart),
        Card(11, Suit::Heart),
        Card(10, Suit::Heart),
        Card(9, Suit::Spade),
        Card(2, Suit::Club),
    ];
    let result = eval(&hand);
    println!("Hand: {}", join(&hand));
    println!("Best five: {} ({:#x})\n", result, result.value);

    // Example 2: Two seats against the same board
    println!("Example 2: Showdown on a shared board");
    let board = [
        Card(10, Suit::Club),
        Card(9, Suit::Diamond),
        Card(2, Suit::Spade),
        Card(7, Suit::Heart),
        Card(4, Suit::Club),
    ];
    let seats = [
        ("alice", [Card(14, Suit::Spade), Card(14, Suit::Heart)]),
        ("bob", [Card(8, Suit::Spade), Card(6, Suit::Heart)]),
        ("carol", [Card(13, Suit::Spade), Card(13, Suit::Diamond)]),
    ];
    println!("Board: {}", join(&board));

    let scores: Vec<_> = seats
        .iter()
        .map(|(name, hole)| {
            let s = score(hole, &board);
            println!("  {name:<6} {} -> {s}", join(hole));
            s
        })
        .collect();

    for idx in argmax(&scores) {
        println!("Winner: {} with {}", seats[idx].0, scores[idx]);
    }
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
