//! HTTP host for Hold'em tables.
//!
//! Runs one [`TableActor`](holdem_table::table::TableActor) per configured
//! table and exposes them over a small JSON API. Tables are independent:
//! each has its own actor and nothing is shared between them.

pub mod api;
pub mod config;
pub mod logging;
