//! Table actor implementation with async message handling.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::{
    config::TableConfig,
    messages::{StateChangeNotification, TableMessage, TableResponse},
};
use crate::game::{
    Table, TableError,
    entities::{Action, ActionOutcome, ConnectionId, Money, Player, SeatId, TableId, TableView},
};

/// The actor behind a handle has stopped.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("table {0} is closed")]
pub struct TableClosed(pub TableId);

/// Table actor handle for sending messages
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    table_id: TableId,
}

impl TableHandle {
    /// Create a new table handle
    pub fn new(sender: mpsc::Sender<TableMessage>, table_id: TableId) -> Self {
        Self { sender, table_id }
    }

    /// Get table ID
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Send a message to the table
    pub async fn send(&self, message: TableMessage) -> Result<(), TableClosed> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableClosed(self.table_id))
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TableMessage,
    ) -> Result<T, TableClosed> {
        let (tx, rx) = oneshot::channel();
        self.send(message(tx)).await?;
        rx.await.map_err(|_| TableClosed(self.table_id))
    }

    pub async fn sit(&self, name: &str, seat_id: SeatId) -> Result<TableResponse, TableClosed> {
        let name = name.to_string();
        self.request(|response| TableMessage::Sit {
            name,
            seat_id,
            response,
        })
        .await
    }

    pub async fn stand(&self, connection_id: ConnectionId) -> Result<TableResponse, TableClosed> {
        self.request(|response| TableMessage::Stand {
            connection_id,
            response,
        })
        .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), TableClosed> {
        self.send(TableMessage::Disconnect { connection_id }).await
    }

    pub async fn start_hand(&self) -> Result<TableResponse, TableClosed> {
        self.request(|response| TableMessage::StartHand { response })
            .await
    }

    pub async fn act(
        &self,
        connection_id: ConnectionId,
        action: Action,
        amount: Option<Money>,
    ) -> Result<TableResponse, TableClosed> {
        self.request(|response| TableMessage::TakeAction {
            connection_id,
            action,
            amount,
            response,
        })
        .await
    }

    pub async fn view(
        &self,
        connection_id: Option<ConnectionId>,
    ) -> Result<TableView, TableClosed> {
        self.request(|response| TableMessage::GetView {
            connection_id,
            response,
        })
        .await
    }

    pub async fn subscribe(
        &self,
        subscriber: ConnectionId,
        buffer: usize,
    ) -> Result<mpsc::Receiver<StateChangeNotification>, TableClosed> {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        self.send(TableMessage::Subscribe { subscriber, sender })
            .await?;
        Ok(receiver)
    }

    pub async fn unsubscribe(&self, subscriber: ConnectionId) -> Result<(), TableClosed> {
        self.send(TableMessage::Unsubscribe { subscriber }).await
    }

    pub async fn close(&self) -> Result<TableResponse, TableClosed> {
        self.request(|response| TableMessage::Close { response })
            .await
    }
}

/// Table actor managing a single poker table
pub struct TableActor {
    /// Table ID
    id: TableId,

    /// Table configuration
    config: TableConfig,

    /// Table state; only this actor touches it
    table: Table,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage>,

    /// Is table closed
    is_closed: bool,

    /// Subscribers for state change notifications
    subscribers: HashMap<ConnectionId, mpsc::Sender<StateChangeNotification>>,
}

impl TableActor {
    /// Create a new table actor
    ///
    /// # Returns
    ///
    /// * `(TableActor, TableHandle)` - Actor and handle for sending messages
    pub fn new(id: TableId, config: TableConfig) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let table = config.build(id);

        let actor = Self {
            id,
            config,
            table,
            inbox,
            is_closed: false,
            subscribers: HashMap::new(),
        };

        let handle = TableHandle::new(sender, id);

        (actor, handle)
    }

    /// Run the table actor event loop
    pub async fn run(mut self) {
        log::info!("Table {} '{}' starting", self.id, self.config.name);

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!("Table {} '{}' closed", self.id, self.config.name);
    }

    /// Handle a table message
    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Sit {
                name,
                seat_id,
                response,
            } => {
                let result = self.handle_sit(&name, seat_id);
                let _ = response.send(result);
            }

            TableMessage::Stand {
                connection_id,
                response,
            } => {
                let result = self.handle_stand(&connection_id);
                let _ = response.send(result);
            }

            TableMessage::Disconnect { connection_id } => {
                let result = self.table.remove_player(&connection_id);
                if let Ok(Some(_)) = result {
                    self.notify_state_change(StateChangeNotification::PlayerListChanged);
                }
                self.check_fatal(result.map(|_| ()));
            }

            TableMessage::StartHand { response } => {
                let result = self.handle_start_hand();
                let _ = response.send(result);
            }

            TableMessage::TakeAction {
                connection_id,
                action,
                amount,
                response,
            } => {
                let result = self.handle_action(&connection_id, action, amount);
                let _ = response.send(result);
            }

            TableMessage::GetView {
                connection_id,
                response,
            } => {
                let _ = response.send(self.table.view(connection_id.as_ref()));
            }

            TableMessage::Subscribe { subscriber, sender } => {
                self.subscribers.insert(subscriber, sender);
                log::debug!(
                    "{} subscribed to table {} state changes",
                    subscriber,
                    self.id
                );
            }

            TableMessage::Unsubscribe { subscriber } => {
                self.subscribers.remove(&subscriber);
                log::debug!(
                    "{} unsubscribed from table {} state changes",
                    subscriber,
                    self.id
                );
            }

            TableMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(TableResponse::Success);
            }
        }
    }

    /// Broadcast state change notification to all subscribers
    fn notify_state_change(&mut self, notification: StateChangeNotification) {
        self.subscribers.retain(|subscriber, sender| {
            match sender.try_send(notification.clone()) {
                Ok(_) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!(
                        "Subscriber {} channel full, dropping notification",
                        subscriber
                    );
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {} disconnected, removing", subscriber);
                    false
                }
            }
        });
    }

    /// A fatal table error means the state can't be trusted any more, so
    /// the actor stops and every handle starts failing.
    fn check_fatal(&mut self, result: Result<(), TableError>) -> Option<TableResponse> {
        match result {
            Ok(()) => None,
            Err(e) if e.is_fatal() => {
                log::error!("Table {}: {}; shutting down", self.id, e);
                self.is_closed = true;
                Some(TableResponse::Error(e.to_string()))
            }
            Err(e) => Some(TableResponse::Error(e.to_string())),
        }
    }

    /// Handle sit request
    fn handle_sit(&mut self, name: &str, seat_id: SeatId) -> TableResponse {
        if name.trim().is_empty() {
            return TableResponse::InvalidAction("name must not be empty".to_string());
        }
        if !(1..=self.table.max_players()).contains(&seat_id) {
            return TableResponse::InvalidAction(format!("seat {seat_id} does not exist"));
        }
        if self.table.seat(seat_id).is_some() {
            return TableResponse::SeatTaken;
        }

        let connection_id = ConnectionId::new();
        let player = Player::new(name, connection_id);
        match self.table.sit_player(player, seat_id) {
            Ok(()) => {
                log::info!(
                    "{} ({}) sat at table {} seat {}",
                    name,
                    connection_id,
                    self.id,
                    seat_id
                );
                self.notify_state_change(StateChangeNotification::PlayerListChanged);
                TableResponse::Seated(connection_id)
            }
            Err(e) => TableResponse::Error(e.to_string()),
        }
    }

    /// Handle stand request
    fn handle_stand(&mut self, connection_id: &ConnectionId) -> TableResponse {
        let was_in_hand = !self.table.hand_over();
        match self.table.stand_player(connection_id) {
            Ok(Some(seat)) => {
                log::info!(
                    "{} left table {} with ${}",
                    seat.player.name,
                    self.id,
                    seat.stack
                );
                self.notify_state_change(StateChangeNotification::PlayerListChanged);
                if was_in_hand && self.table.hand_over() {
                    self.notify_state_change(StateChangeNotification::HandOver);
                }
                TableResponse::Stood(seat.stack)
            }
            Ok(None) => TableResponse::NotAtTable,
            Err(e) => self
                .check_fatal(Err(e))
                .unwrap_or_else(|| TableResponse::Error("stand failed".to_string())),
        }
    }

    /// Handle start hand request
    fn handle_start_hand(&mut self) -> TableResponse {
        if !self.table.hand_over() {
            return TableResponse::InvalidAction("a hand is already in progress".to_string());
        }
        let funded = self
            .table
            .sat_players()
            .filter(|seat| !seat.stack.is_zero())
            .count();
        if funded < 2 {
            return TableResponse::InvalidAction(
                "at least two players with chips are needed".to_string(),
            );
        }

        let result = self.table.start_hand();
        if let Some(error) = self.check_fatal(result) {
            return error;
        }
        self.notify_state_change(StateChangeNotification::StateChanged);
        TableResponse::Success
    }

    /// Handle player action
    fn handle_action(
        &mut self,
        connection_id: &ConnectionId,
        action: Action,
        amount: Option<Money>,
    ) -> TableResponse {
        let Some(seat_id) = self.table.seat_of(connection_id) else {
            return TableResponse::NotAtTable;
        };
        if self.table.hand_over() {
            return TableResponse::InvalidAction("no hand in progress".to_string());
        }
        if self.table.turn() != Some(seat_id) {
            return TableResponse::NotYourTurn;
        }
        let Some(seat) = self.table.seat(seat_id) else {
            return TableResponse::NotAtTable;
        };
        let (bet, all_in_total) = (seat.bet, seat.bet + seat.stack);
        let call_amount = self.table.call_amount();
        let facing = call_amount.unwrap_or(Money::ZERO);

        let result: Result<ActionOutcome, TableError> = match action {
            Action::Fold => self.table.handle_fold(connection_id),
            Action::Check => {
                if bet < facing {
                    return TableResponse::InvalidAction(format!(
                        "cannot check facing a bet of ${facing}"
                    ));
                }
                self.table.handle_check(connection_id)
            }
            Action::Call => {
                if call_amount.is_none() || bet >= facing {
                    return TableResponse::InvalidAction("nothing to call".to_string());
                }
                self.table.handle_call(connection_id)
            }
            Action::Raise => {
                let Some(amount) = amount else {
                    return TableResponse::InvalidAction("raise needs an amount".to_string());
                };
                let min_raise = self.table.min_raise();
                if amount <= facing || (amount < min_raise && amount < all_in_total) {
                    return TableResponse::InvalidAction(format!(
                        "raise must be to at least ${min_raise}"
                    ));
                }
                self.table.handle_raise(connection_id, amount.min(all_in_total))
            }
            Action::AllIn => {
                if all_in_total > facing {
                    self.table.handle_raise(connection_id, all_in_total)
                } else {
                    self.table.handle_call(connection_id)
                }
            }
        };

        match result {
            Ok(outcome) => {
                log::debug!("Table {}: {}", self.id, outcome.message);
                self.notify_state_change(StateChangeNotification::StateChanged);
                if self.table.hand_over() {
                    self.notify_state_change(StateChangeNotification::HandOver);
                }
                TableResponse::Acted(outcome)
            }
            Err(e) => self
                .check_fatal(Err(e))
                .unwrap_or_else(|| TableResponse::Error("action failed".to_string())),
        }
    }
}
