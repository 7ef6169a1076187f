use chrono::NaiveDate;
use mtp_config::Config;
use mtp_core::{format_long_date, CurrencyFormatter, DateFormatter, MoneyStyle};
use mtp_domain::Decimal;

/// Presentation formatters derived from the active configuration.
#[derive(Debug, Clone, Default)]
pub struct CliFormatters {
    money: MoneyStyle,
}

impl CliFormatters {
    pub fn from_config(config: &Config) -> Self {
        Self {
            money: MoneyStyle {
                symbol: config.currency_symbol.clone(),
                precision: config.currency_precision(),
                ..MoneyStyle::default()
            },
        }
    }

    pub fn money_style(&self) -> &MoneyStyle {
        &self.money
    }
}

impl CurrencyFormatter for CliFormatters {
    fn format_amount(&self, amount: Decimal) -> String {
        self.money.format_amount(amount)
    }
}

impl DateFormatter for CliFormatters {
    fn format_date(&self, date: NaiveDate) -> String {
        format_long_date(date)
    }
}
