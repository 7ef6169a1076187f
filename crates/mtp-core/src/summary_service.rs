//! Read-only aggregation over a ledger snapshot.
//!
//! Every function takes the reference time explicitly; nothing here reads a clock.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use mtp_domain::{BudgetSettings, Decimal, Transaction, TransactionKind};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Flat rate applied to all-time income for the projected interest estimate.
pub const PROJECTED_INTEREST_RATE: Decimal = dec!(0.045);

/// Number of calendar days covered by the cash-flow series.
pub const WEEK_DAYS: usize = 7;

const FULL_PROGRESS: Decimal = dec!(100);

/// Income and expense totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCashFlow {
    pub date: NaiveDate,
    /// Abbreviated weekday name, e.g. `Mon`.
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Everything the dashboard renders, computed in one pass over the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub today: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub projected_interest: Decimal,
    pub today_expenses: Decimal,
    pub daily_limit: Decimal,
    pub remaining_today: Decimal,
    pub budget_progress: Decimal,
    pub is_over_budget: bool,
    pub weekly: Vec<DailyCashFlow>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_income(transactions: &[Transaction]) -> Decimal {
        Self::total_for(transactions, TransactionKind::Income)
    }

    pub fn total_expense(transactions: &[Transaction]) -> Decimal {
        Self::total_for(transactions, TransactionKind::Expense)
    }

    /// Income minus expense. May be negative.
    pub fn balance(transactions: &[Transaction]) -> Decimal {
        Self::total_income(transactions).saturating_sub(Self::total_expense(transactions))
    }

    /// 4.5% of all-time income. An estimate, not an accrual.
    pub fn projected_interest(transactions: &[Transaction]) -> Decimal {
        Self::total_income(transactions).saturating_mul(PROJECTED_INTEREST_RATE)
    }

    /// Sum of expenses dated on the calendar day of `now`.
    pub fn today_expenses(transactions: &[Transaction], now: NaiveDateTime) -> Decimal {
        let today = now.date();
        transactions
            .iter()
            .filter(|txn| txn.is_expense() && txn.date == today)
            .fold(Decimal::ZERO, |total, txn| total.saturating_add(txn.amount))
    }

    /// Share of the daily limit spent today, as a percentage capped at 100.
    ///
    /// A zero or negative limit reads as fully spent once anything was spent today.
    pub fn budget_progress(today_expenses: Decimal, daily_limit: Decimal) -> Decimal {
        if daily_limit <= Decimal::ZERO {
            return if today_expenses > Decimal::ZERO {
                FULL_PROGRESS
            } else {
                Decimal::ZERO
            };
        }
        today_expenses
            .checked_div(daily_limit)
            .and_then(|ratio| ratio.checked_mul(FULL_PROGRESS))
            .map(|progress| progress.min(FULL_PROGRESS))
            .unwrap_or(FULL_PROGRESS)
    }

    /// Strictly greater than the limit; spending exactly the limit is not over budget.
    pub fn is_over_budget(today_expenses: Decimal, daily_limit: Decimal) -> bool {
        today_expenses > daily_limit
    }

    /// Seven entries, oldest first, ending on the calendar day of `now`.
    pub fn weekly_series(transactions: &[Transaction], now: NaiveDateTime) -> Vec<DailyCashFlow> {
        let today = now.date();
        let start = today - Duration::days(WEEK_DAYS as i64 - 1);
        let mut series: Vec<DailyCashFlow> = (0..WEEK_DAYS)
            .map(|offset| {
                let date = start + Duration::days(offset as i64);
                DailyCashFlow {
                    date,
                    label: date.format("%a").to_string(),
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                }
            })
            .collect();

        for txn in transactions {
            if txn.date < start || txn.date > today {
                continue;
            }
            let slot = &mut series[(txn.date - start).num_days() as usize];
            match txn.kind {
                TransactionKind::Income => {
                    slot.income = slot.income.saturating_add(txn.amount)
                }
                TransactionKind::Expense => {
                    slot.expense = slot.expense.saturating_add(txn.amount)
                }
            }
        }
        series
    }

    pub fn summarize(
        transactions: &[Transaction],
        budget: &BudgetSettings,
        now: NaiveDateTime,
    ) -> LedgerSummary {
        let total_income = Self::total_income(transactions);
        let total_expense = Self::total_expense(transactions);
        let today_expenses = Self::today_expenses(transactions, now);
        let daily_limit = budget.daily_limit;
        LedgerSummary {
            today: now.date(),
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
            projected_interest: total_income.saturating_mul(PROJECTED_INTEREST_RATE),
            today_expenses,
            daily_limit,
            remaining_today: daily_limit.saturating_sub(today_expenses),
            budget_progress: Self::budget_progress(today_expenses, daily_limit),
            is_over_budget: Self::is_over_budget(today_expenses, daily_limit),
            weekly: Self::weekly_series(transactions, now),
        }
    }

    /// Saturates at `Decimal::MAX`.
    fn total_for(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
        transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .fold(Decimal::ZERO, |total, txn| total.saturating_add(txn.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use mtp_domain::TransactionDraft;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn txn(kind: TransactionKind, amount: Decimal, date: NaiveDate) -> Transaction {
        TransactionDraft::new(kind, amount, "Other", date)
            .into_transaction(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn today_expenses_uses_calendar_day_not_a_24h_window() {
        let txns = vec![
            txn(TransactionKind::Expense, dec!(5), day(5)),
            txn(TransactionKind::Expense, dec!(7), day(4)),
            txn(TransactionKind::Income, dec!(50), day(5)),
        ];
        let just_after_midnight = day(5).and_hms_opt(0, 0, 1).unwrap();
        let late_evening = day(5).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(
            SummaryService::today_expenses(&txns, just_after_midnight),
            dec!(5)
        );
        assert_eq!(SummaryService::today_expenses(&txns, late_evening), dec!(5));
    }

    #[test]
    fn progress_with_zero_limit_depends_on_spending() {
        assert_eq!(SummaryService::budget_progress(dec!(0), dec!(0)), dec!(0));
        assert_eq!(SummaryService::budget_progress(dec!(0.01), dec!(0)), dec!(100));
        assert_eq!(SummaryService::budget_progress(dec!(3), dec!(-10)), dec!(100));
    }

    #[test]
    fn spending_exactly_the_limit_is_not_over_budget() {
        assert!(!SummaryService::is_over_budget(dec!(100), dec!(100)));
        assert_eq!(
            SummaryService::budget_progress(dec!(100), dec!(100)),
            dec!(100)
        );
        assert!(SummaryService::is_over_budget(dec!(100.01), dec!(100)));
    }

    #[test]
    fn weekly_series_is_oldest_first_with_weekday_labels() {
        // 2024-01-07 is a Sunday.
        let now = day(7).and_hms_opt(9, 30, 0).unwrap();
        let series = SummaryService::weekly_series(&[], now);
        assert_eq!(series.len(), WEEK_DAYS);
        assert_eq!(series[0].date, day(1));
        assert_eq!(series[0].label, "Mon");
        assert_eq!(series[6].date, day(7));
        assert_eq!(series[6].label, "Sun");
        assert!(series
            .iter()
            .all(|entry| entry.income.is_zero() && entry.expense.is_zero()));
    }

    #[test]
    fn weekly_series_excludes_out_of_window_but_totals_keep_them() {
        let now = day(10).and_hms_opt(8, 0, 0).unwrap();
        let txns = vec![
            txn(TransactionKind::Income, dec!(100), day(3)),
            txn(TransactionKind::Income, dec!(40), day(4)),
            txn(TransactionKind::Expense, dec!(15), day(11)),
        ];
        let series = SummaryService::weekly_series(&txns, now);
        assert_eq!(series[0].date, day(4));
        assert_eq!(series[0].income, dec!(40));
        let in_window: Decimal = series.iter().map(|entry| entry.income + entry.expense).sum();
        assert_eq!(in_window, dec!(40));

        assert_eq!(SummaryService::total_income(&txns), dec!(140));
        assert_eq!(SummaryService::total_expense(&txns), dec!(15));
    }

    #[test]
    fn summary_reports_remaining_allowance() {
        let now = day(5).and_hms_opt(18, 0, 0).unwrap();
        let txns = vec![
            txn(TransactionKind::Expense, dec!(30), day(5)),
            txn(TransactionKind::Income, dec!(200), day(1)),
        ];
        let summary = SummaryService::summarize(&txns, &BudgetSettings::new(dec!(80)), now);
        assert_eq!(summary.remaining_today, dec!(50));
        assert_eq!(summary.balance, dec!(170));
        assert_eq!(summary.projected_interest, dec!(9));
        assert!(!summary.is_over_budget);
        assert_eq!(summary.today, day(5));
    }

    #[test]
    fn oversized_amounts_saturate_instead_of_overflowing() {
        let now = day(5).and_hms_opt(12, 0, 0).unwrap();
        let huge = dec!(50000000000000000000000000000);
        let txns = vec![
            txn(TransactionKind::Expense, huge, day(5)),
            txn(TransactionKind::Expense, huge, day(5)),
            txn(TransactionKind::Income, Decimal::MAX, day(4)),
            txn(TransactionKind::Income, Decimal::MAX, day(5)),
        ];
        let summary = SummaryService::summarize(&txns, &BudgetSettings::new(Decimal::MIN), now);
        assert_eq!(summary.total_expense, Decimal::MAX);
        assert_eq!(summary.today_expenses, Decimal::MAX);
        assert_eq!(summary.total_income, Decimal::MAX);
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.remaining_today, Decimal::MIN);
        assert!(summary.is_over_budget);
        assert_eq!(summary.weekly[6].expense, Decimal::MAX);
        assert_eq!(summary.weekly[6].income, Decimal::MAX);
    }
}
