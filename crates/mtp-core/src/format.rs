use chrono::{Datelike, NaiveDate};
use mtp_domain::Decimal;
use rust_decimal::RoundingStrategy;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: Decimal) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Symbol placement and separators for rendering money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyStyle {
    pub symbol: String,
    pub precision: u32,
    pub grouping_separator: char,
    pub decimal_separator: char,
}

impl Default for MoneyStyle {
    fn default() -> Self {
        Self {
            symbol: "$".into(),
            precision: 2,
            grouping_separator: ',',
            decimal_separator: '.',
        }
    }
}

impl CurrencyFormatter for MoneyStyle {
    fn format_amount(&self, amount: Decimal) -> String {
        format_money(amount, self)
    }
}

/// Renders `amount` as `-$1,234.50` style text. Halves round away from zero.
pub fn format_money(amount: Decimal, style: &MoneyStyle) -> String {
    let mut rounded = amount
        .abs()
        .round_dp_with_strategy(style.precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(style.precision);

    let digits = rounded.to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if amount.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&style.symbol);
    out.push_str(&group_thousands(whole, style.grouping_separator));
    if let Some(fraction) = fraction {
        out.push(style.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// `Jan 5th, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%b"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// `Jan 5th`.
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{} {}{}", date.format("%b"), date.day(), ordinal_suffix(date.day()))
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn group_thousands(whole: &str, separator: char) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
