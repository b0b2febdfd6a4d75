//! Integration tests for the table actor
//!
//! Commands go through a `TableHandle` the way a host would send them, so
//! these cover the validation the actor does before touching the table.

use holdem_table::{
    entities::{Action, ConnectionId, Money, TableView},
    table::{StateChangeNotification, TableActor, TableConfig, TableHandle, TableResponse},
};

fn spawn_table() -> TableHandle {
    let (actor, handle) = TableActor::new(1, TableConfig::default());
    tokio::spawn(actor.run());
    handle
}

async fn seat(handle: &TableHandle, name: &str, seat_id: usize) -> ConnectionId {
    match handle.sit(name, seat_id).await.unwrap() {
        TableResponse::Seated(id) => id,
        other => panic!("unexpected response: {other:?}"),
    }
}

fn on_turn(view: &TableView) -> usize {
    view.turn.expect("someone should be on turn")
}

#[tokio::test]
async fn test_sit_and_view() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;

    let view = handle.view(Some(alice)).await.unwrap();
    let seat = view.seats[0].as_ref().unwrap();
    assert_eq!(seat.player.as_str(), "alice");
    assert_eq!(seat.stack, Money::from_dollars(2));
    assert_eq!(view.button, Some(1));
    assert!(view.hand_over);
}

#[tokio::test]
async fn test_occupied_seat_is_rejected() {
    let handle = spawn_table();
    seat(&handle, "alice", 3).await;
    assert_eq!(handle.sit("bob", 3).await.unwrap(), TableResponse::SeatTaken);
}

#[tokio::test]
async fn test_invalid_seat_is_an_error() {
    let handle = spawn_table();
    let response = handle.sit("bob", 42).await.unwrap();
    assert!(!response.is_success());
    assert!(response.error_message().is_some());
}

#[tokio::test]
async fn test_start_hand_needs_two_players() {
    let handle = spawn_table();
    seat(&handle, "alice", 1).await;
    assert!(matches!(
        handle.start_hand().await.unwrap(),
        TableResponse::InvalidAction(_)
    ));
}

#[tokio::test]
async fn test_only_player_on_turn_may_act() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;
    let bob = seat(&handle, "bob", 2).await;
    assert_eq!(handle.start_hand().await.unwrap(), TableResponse::Success);

    let view = handle.view(None).await.unwrap();
    let (acting, waiting) = if on_turn(&view) == 1 { (alice, bob) } else { (bob, alice) };

    assert_eq!(
        handle.act(waiting, Action::Fold, None).await.unwrap(),
        TableResponse::NotYourTurn
    );
    let response = handle.act(acting, Action::Call, None).await.unwrap();
    assert!(matches!(response, TableResponse::Acted(_)));
}

#[tokio::test]
async fn test_cannot_check_facing_a_bet() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;
    let bob = seat(&handle, "bob", 2).await;
    handle.start_hand().await.unwrap();

    let view = handle.view(None).await.unwrap();
    let acting = if on_turn(&view) == 1 { alice } else { bob };
    assert!(matches!(
        handle.act(acting, Action::Check, None).await.unwrap(),
        TableResponse::InvalidAction(_)
    ));
}

#[tokio::test]
async fn test_raise_below_minimum_is_rejected() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;
    let bob = seat(&handle, "bob", 2).await;
    handle.start_hand().await.unwrap();

    let view = handle.view(None).await.unwrap();
    let acting = if on_turn(&view) == 1 { alice } else { bob };
    let too_small = handle
        .act(acting, Action::Raise, Some(Money::from_cents(3)))
        .await
        .unwrap();
    assert!(matches!(too_small, TableResponse::InvalidAction(_)));

    let ok = handle
        .act(acting, Action::Raise, Some(Money::from_cents(4)))
        .await
        .unwrap();
    assert!(ok.is_success());
}

#[tokio::test]
async fn test_all_in_and_call_reaches_showdown() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;
    let bob = seat(&handle, "bob", 2).await;
    handle.start_hand().await.unwrap();

    let view = handle.view(None).await.unwrap();
    let (first, second) = if on_turn(&view) == 1 { (alice, bob) } else { (bob, alice) };
    handle.act(first, Action::AllIn, None).await.unwrap();
    handle.act(second, Action::Call, None).await.unwrap();

    let view = handle.view(None).await.unwrap();
    assert!(view.hand_over);
    assert!(view.went_to_showdown);
    assert_eq!(view.board.len(), 5);
    let total: Money = view.seats.iter().flatten().map(|s| s.stack).sum();
    assert_eq!(total, Money::from_dollars(4));
}

#[tokio::test]
async fn test_action_without_hand_is_rejected() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;
    assert!(matches!(
        handle.act(alice, Action::Check, None).await.unwrap(),
        TableResponse::InvalidAction(_)
    ));
    assert_eq!(
        handle.act(ConnectionId::new(), Action::Check, None).await.unwrap(),
        TableResponse::NotAtTable
    );
}

#[tokio::test]
async fn test_stand_returns_stack() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;
    assert_eq!(
        handle.stand(alice).await.unwrap(),
        TableResponse::Stood(Money::from_dollars(2))
    );
    assert_eq!(handle.stand(alice).await.unwrap(), TableResponse::NotAtTable);

    let view = handle.view(None).await.unwrap();
    assert!(view.seats.iter().all(Option::is_none));
    assert_eq!(view.button, None);
}

#[tokio::test]
async fn test_disconnect_ends_heads_up_hand() {
    let handle = spawn_table();
    let alice = seat(&handle, "alice", 1).await;
    seat(&handle, "bob", 2).await;
    handle.start_hand().await.unwrap();

    handle.disconnect(alice).await.unwrap();
    let view = handle.view(None).await.unwrap();
    assert!(view.hand_over);
    assert!(view.seats[0].is_none());
    assert_eq!(view.win_messages.len(), 1);
}

#[tokio::test]
async fn test_subscribers_are_notified() {
    let handle = spawn_table();
    let watcher = ConnectionId::new();
    let mut notifications = handle.subscribe(watcher, 16).await.unwrap();

    let alice = seat(&handle, "alice", 1).await;
    let bob = seat(&handle, "bob", 2).await;
    assert_eq!(
        notifications.recv().await,
        Some(StateChangeNotification::PlayerListChanged)
    );
    assert_eq!(
        notifications.recv().await,
        Some(StateChangeNotification::PlayerListChanged)
    );

    handle.start_hand().await.unwrap();
    assert_eq!(
        notifications.recv().await,
        Some(StateChangeNotification::StateChanged)
    );

    let view = handle.view(None).await.unwrap();
    let acting = if on_turn(&view) == 1 { alice } else { bob };
    handle.act(acting, Action::Fold, None).await.unwrap();
    assert_eq!(
        notifications.recv().await,
        Some(StateChangeNotification::StateChanged)
    );
    assert_eq!(
        notifications.recv().await,
        Some(StateChangeNotification::HandOver)
    );

    handle.unsubscribe(watcher).await.unwrap();
    handle.stand(alice).await.unwrap();
    handle.close().await.unwrap();
    assert_eq!(notifications.recv().await, None);
}

#[tokio::test]
async fn test_commands_from_many_tasks_are_serialized() {
    let handle = spawn_table();
    let mut tasks = Vec::new();
    for seat_id in 1..=6 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            handle.sit(&format!("p{seat_id}"), 1).await.unwrap()
        }));
    }

    let mut seated = 0;
    for task in tasks {
        if matches!(task.await.unwrap(), TableResponse::Seated(_)) {
            seated += 1;
        }
    }
    assert_eq!(seated, 1);
}
