//! Async actor wrapper around a single [`Table`](crate::game::Table).
//!
//! Each table runs in its own Tokio task with an mpsc message inbox, so
//! every command against a table is applied one at a time in arrival order.
//! Tables never share state; a host runs as many actors as it likes.
//!
//! ## Example
//!
//! ```no_run
//! use holdem_table::table::{TableActor, TableConfig, TableResponse};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = TableActor::new(1, TableConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     if let Ok(TableResponse::Seated(connection_id)) = handle.sit("alice", 1).await {
//!         println!("alice plays as {connection_id}");
//!     }
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{TableActor, TableClosed, TableHandle};
pub use config::TableConfig;
pub use messages::{StateChangeNotification, TableMessage, TableResponse};
