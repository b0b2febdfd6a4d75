//! Table configuration models.

use serde::{Deserialize, Serialize};

use crate::game::{
    Table,
    constants::{DEFAULT_MAX_PLAYERS, LIMIT_TO_MIN_BET, MAX_PLAYERS},
    entities::{Money, TableId},
};

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Number of seats (default: 6)
    pub max_players: usize,

    /// Stake level; the small blind is `limit / 200`
    pub limit: Money,

    /// Chips a player sits down with (default: one `limit`)
    pub buy_in: Option<Money>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Table 1".to_string(),
            max_players: DEFAULT_MAX_PLAYERS,
            limit: Money::from_dollars(2),
            buy_in: None,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Table name must not be empty".to_string());
        }

        if self.max_players < 2 || self.max_players > MAX_PLAYERS {
            return Err(format!("Max players must be between 2 and {MAX_PLAYERS}"));
        }

        if self.limit.cents() < LIMIT_TO_MIN_BET {
            return Err(format!(
                "Limit must be at least ${} so the small blind is one cent",
                Money::from_cents(LIMIT_TO_MIN_BET)
            ));
        }

        if self.buy_in.is_some_and(Money::is_zero) {
            return Err("Buy-in must be positive".to_string());
        }

        Ok(())
    }

    /// Chips each player starts with.
    pub fn buy_in(&self) -> Money {
        self.buy_in.unwrap_or(self.limit)
    }

    /// Build an empty table from this configuration.
    pub fn build(&self, id: TableId) -> Table {
        Table::new(id, &self.name, self.max_players, self.limit).with_buy_in(self.buy_in())
    }
}
