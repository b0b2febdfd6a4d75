//! Table actor message types.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::game::entities::{Action, ActionOutcome, ConnectionId, Money, SeatId, TableView};

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Sit a new player in a specific seat
    Sit {
        name: String,
        seat_id: SeatId,
        response: oneshot::Sender<TableResponse>,
    },

    /// Leave the table, keeping whatever is left of the stack
    Stand {
        connection_id: ConnectionId,
        response: oneshot::Sender<TableResponse>,
    },

    /// The player's connection went away
    Disconnect { connection_id: ConnectionId },

    /// Deal a new hand
    StartHand {
        response: oneshot::Sender<TableResponse>,
    },

    /// Player action (fold, check, call, raise, all-in). `amount` is the
    /// new total bet for a raise.
    TakeAction {
        connection_id: ConnectionId,
        action: Action,
        amount: Option<Money>,
        response: oneshot::Sender<TableResponse>,
    },

    /// Snapshot of the table as seen by `connection_id`
    GetView {
        connection_id: Option<ConnectionId>,
        response: oneshot::Sender<TableView>,
    },

    /// Subscribe to state change notifications
    Subscribe {
        subscriber: ConnectionId,
        sender: mpsc::Sender<StateChangeNotification>,
    },

    /// Unsubscribe from state change notifications
    Unsubscribe { subscriber: ConnectionId },

    /// Stop the actor
    Close {
        response: oneshot::Sender<TableResponse>,
    },
}

/// Notification sent when table state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StateChangeNotification {
    /// A player acted or a new hand was dealt
    StateChanged,
    /// Player sat down or left
    PlayerListChanged,
    /// The hand ended and the pot was paid out
    HandOver,
}

/// Response from table operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableResponse {
    /// Operation succeeded
    Success,

    /// Player seated; act through this connection from now on
    Seated(ConnectionId),

    /// Player left with this stack
    Stood(Money),

    /// Action applied
    Acted(ActionOutcome),

    /// Operation failed
    Error(String),

    /// Someone already sits there
    SeatTaken,

    /// Not your turn
    NotYourTurn,

    /// Invalid action for current table state
    InvalidAction(String),

    /// Player not at table
    NotAtTable,
}

impl TableResponse {
    /// Check if response is success
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TableResponse::Success
                | TableResponse::Seated(_)
                | TableResponse::Stood(_)
                | TableResponse::Acted(_)
        )
    }

    /// Get error message if response is error
    pub fn error_message(&self) -> Option<String> {
        match self {
            TableResponse::Error(msg) => Some(msg.clone()),
            TableResponse::SeatTaken => Some("Seat is taken".to_string()),
            TableResponse::NotYourTurn => Some("Not your turn".to_string()),
            TableResponse::InvalidAction(msg) => Some(format!("Invalid action: {msg}")),
            TableResponse::NotAtTable => Some("Not at table".to_string()),
            _ => None,
        }
    }
}
