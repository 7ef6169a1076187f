//! Boundary validation that turns raw form input into a typed [`TransactionDraft`].

use std::str::FromStr;

use chrono::NaiveDate;
use mtp_domain::{canonical_category, Decimal, TransactionDraft, TransactionKind};
use rust_decimal_macros::dec;

use crate::{Clock, CoreError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest accepted amount or limit magnitude. Values up to this size with at most
/// [`AMOUNT_SCALE`] decimals survive the JSON number round trip exactly.
pub const MAX_AMOUNT: Decimal = dec!(999999999999.99);

/// Decimal places accepted for amounts and limits.
pub const AMOUNT_SCALE: u32 = 2;

/// Unvalidated creation request, exactly as a form collects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    pub kind: String,
    pub amount: String,
    pub category: String,
    /// `YYYY-MM-DD`; empty means today.
    pub date: String,
    pub note: Option<String>,
}

pub struct DraftService;

impl DraftService {
    pub fn validate(input: &DraftInput, clock: &dyn Clock) -> Result<TransactionDraft, CoreError> {
        let kind = TransactionKind::from_str(&input.kind)
            .map_err(|err| CoreError::Validation(format!("type: {err}")))?;
        let amount = Self::parse_amount(&input.amount)?;
        let category = Self::parse_category(kind, &input.category)?;
        let date = Self::parse_date(&input.date, clock)?;
        let note = input
            .note
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        Ok(TransactionDraft::new(kind, amount, category, date).with_note(note))
    }

    /// Parses a strictly positive amount. A leading `$` and `,` grouping are tolerated.
    pub fn parse_amount(raw: &str) -> Result<Decimal, CoreError> {
        let amount = parse_decimal(raw).ok_or_else(|| {
            CoreError::Validation(format!("amount: `{}` is not a number", raw.trim()))
        })?;
        if amount <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "amount: must be greater than zero".into(),
            ));
        }
        check_bounds("amount", amount)
    }

    /// Parses a daily limit. Zero and negatives are accepted; magnitude and precision
    /// follow the same bounds as amounts.
    pub fn parse_limit(raw: &str) -> Result<Decimal, CoreError> {
        let limit = parse_decimal(raw).ok_or_else(|| {
            CoreError::Validation(format!("daily limit: `{}` is not a number", raw.trim()))
        })?;
        check_bounds("daily limit", limit)
    }

    pub fn parse_category(kind: TransactionKind, raw: &str) -> Result<String, CoreError> {
        if raw.trim().is_empty() {
            return Err(CoreError::Validation("category: must not be empty".into()));
        }
        canonical_category(kind, raw)
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "category: `{}` is not a known {kind} category",
                    raw.trim()
                ))
            })
    }

    pub fn parse_date(raw: &str, clock: &dyn Clock) -> Result<NaiveDate, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("today") {
            return Ok(clock.today());
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
            CoreError::Validation(format!("date: `{trimmed}` is not a YYYY-MM-DD date"))
        })
    }
}

fn check_bounds(field: &str, value: Decimal) -> Result<Decimal, CoreError> {
    if value.abs() > MAX_AMOUNT {
        return Err(CoreError::Validation(format!(
            "{field}: must not exceed {MAX_AMOUNT}"
        )));
    }
    let normalized = value.normalize();
    if normalized.scale() > AMOUNT_SCALE {
        return Err(CoreError::Validation(format!(
            "{field}: at most {AMOUNT_SCALE} decimal places"
        )));
    }
    Ok(normalized)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use rust_decimal_macros::dec;

    fn clock() -> FixedClock {
        FixedClock::at_noon(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
    }

    fn input(kind: &str, amount: &str, category: &str, date: &str) -> DraftInput {
        DraftInput {
            kind: kind.into(),
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
            note: None,
        }
    }

    #[test]
    fn valid_input_produces_canonical_draft() {
        let mut raw = input("Expense", "$1,250.75", "food", "2024-03-01");
        raw.note = Some("  groceries ".into());
        let draft = DraftService::validate(&raw, &clock()).unwrap();

        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.amount, dec!(1250.75));
        assert_eq!(draft.category, "Food");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(draft.note, "groceries");
    }

    #[test]
    fn empty_date_defaults_to_today() {
        let draft = DraftService::validate(&input("income", "10", "Gift", ""), &clock()).unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(draft.note, "");
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for amount in ["0", "-5", "", "abc"] {
            let err = DraftService::validate(&input("expense", amount, "Food", ""), &clock())
                .expect_err("amount must be rejected");
            assert!(
                matches!(err, CoreError::Validation(ref message) if message.starts_with("amount")),
                "unexpected error for `{amount}`: {err:?}"
            );
        }
    }

    #[test]
    fn rejects_category_from_the_other_kind() {
        let err = DraftService::validate(&input("expense", "5", "Salary", ""), &clock())
            .expect_err("salary is income-only");
        assert!(err.to_string().contains("not a known expense category"));

        let err = DraftService::validate(&input("income", "5", "  ", ""), &clock())
            .expect_err("empty category");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_malformed_dates_and_kinds() {
        let slashed = input("expense", "5", "Food", "03/01/2024");
        assert!(DraftService::validate(&slashed, &clock()).is_err());
        assert!(DraftService::validate(&input("refund", "5", "Food", ""), &clock()).is_err());
    }

    #[test]
    fn limits_are_permissive() {
        assert_eq!(DraftService::parse_limit("0").unwrap(), dec!(0));
        assert_eq!(DraftService::parse_limit("-20").unwrap(), dec!(-20));
        assert!(DraftService::parse_limit("lots").is_err());
    }

    #[test]
    fn amounts_beyond_cents_or_range_are_rejected() {
        assert_eq!(DraftService::parse_amount("12.50").unwrap(), dec!(12.5));
        assert_eq!(DraftService::parse_amount("3.1000").unwrap(), dec!(3.1));
        assert_eq!(
            DraftService::parse_amount("999,999,999,999.99").unwrap(),
            MAX_AMOUNT
        );

        let too_precise = DraftService::parse_amount("1234567890.123456789").unwrap_err();
        assert!(too_precise.to_string().contains("at most 2 decimal places"));
        for huge in ["1000000000000", "79228162514264337593543950335", "50000000000000000000000000000"] {
            let err = DraftService::parse_amount(huge).expect_err("out of range");
            assert!(err.to_string().contains("must not exceed"), "{huge}: {err}");
        }
        assert!(DraftService::parse_limit("-1000000000000").is_err());
        assert!(DraftService::parse_limit("0.001").is_err());
    }
}
