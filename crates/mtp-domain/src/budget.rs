use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Daily limit applied when no budget has been persisted yet.
pub const DEFAULT_DAILY_LIMIT: Decimal = dec!(100);

/// Singleton spending ceiling evaluated against today's expense total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSettings {
    pub daily_limit: Decimal,
}

impl BudgetSettings {
    pub fn new(daily_limit: Decimal) -> Self {
        Self { daily_limit }
    }
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_LIMIT)
    }
}
