//! Canonical owner of the transaction list and budget settings.
//!
//! Every mutation is applied in memory first and then flushed synchronously as a full
//! snapshot of the affected key. A failed flush keeps the in-memory change and reports
//! [`CoreError::Storage`]; the next successful flush writes the complete state again.

use std::{collections::HashSet, sync::Arc};

use chrono::{NaiveDateTime, SubsecRound};
use mtp_domain::{BudgetSettings, Decimal, Transaction, TransactionDraft};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    storage::{KeyValueStore, BUDGET_KEY, TRANSACTIONS_KEY},
    summary_service::{LedgerSummary, SummaryService},
    Clock, CoreError,
};

pub struct LedgerStore {
    transactions: Vec<Transaction>,
    budget: BudgetSettings,
    storage: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl LedgerStore {
    /// Reads the initial snapshot from `storage`. Missing or malformed values fall back to
    /// an empty ledger and the default daily limit. Individual records that fail to decode
    /// are skipped; the rest of the list is kept.
    pub fn load(storage: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let records =
            read_or_default::<Vec<serde_json::Value>>(storage.as_ref(), TRANSACTIONS_KEY);
        let transactions = dedupe_ids(decode_records(records));
        let budget = read_or_default::<BudgetSettings>(storage.as_ref(), BUDGET_KEY);
        info!(
            transactions = transactions.len(),
            daily_limit = %budget.daily_limit,
            "ledger loaded"
        );
        Self {
            transactions,
            budget,
            storage,
            clock,
        }
    }

    /// Records a new transaction at the front of the list.
    ///
    /// The draft is trusted as-is; validation belongs to [`crate::DraftService`].
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        // Persisted timestamps carry millisecond precision only.
        let created_at = self.clock.timestamp().trunc_subsecs(3);
        let transaction = draft.into_transaction(Uuid::new_v4(), created_at);
        debug!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "adding transaction"
        );
        self.transactions.insert(0, transaction.clone());
        self.flush_transactions()?;
        Ok(transaction)
    }

    /// Removes the transaction with `id`. Returns `false` when nothing matched.
    pub fn delete_transaction(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        let removed = self.transactions.len() != before;
        debug!(%id, removed, "deleting transaction");
        self.flush_transactions()?;
        Ok(removed)
    }

    /// Replaces the daily limit. Zero and negative limits are accepted.
    pub fn update_budget(&mut self, daily_limit: Decimal) -> Result<(), CoreError> {
        debug!(%daily_limit, "updating daily limit");
        self.budget = BudgetSettings::new(daily_limit);
        self.flush_budget()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budget(&self) -> BudgetSettings {
        self.budget
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Case-insensitive substring match against note or category, in store order.
    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        let needle = query.to_lowercase();
        self.transactions
            .iter()
            .filter(|txn| {
                txn.note.to_lowercase().contains(&needle)
                    || txn.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Resolves a transaction from a unique prefix of its id (hyphens optional).
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Transaction, CoreError> {
        let needle: String = prefix
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CoreError::Validation("transaction id must not be empty".into()));
        }
        let mut matches = self
            .transactions
            .iter()
            .filter(|txn| txn.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.count()) {
            (Some(txn), 0) => Ok(txn),
            (Some(_), rest) => Err(CoreError::AmbiguousTransactionId {
                prefix: prefix.trim().to_string(),
                matches: rest + 1,
            }),
            (None, _) => Err(CoreError::TransactionNotFound(prefix.trim().to_string())),
        }
    }

    /// Runs the aggregation engine over the current snapshot.
    pub fn summary(&self, now: NaiveDateTime) -> LedgerSummary {
        SummaryService::summarize(&self.transactions, &self.budget, now)
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn flush_transactions(&self) -> Result<(), CoreError> {
        let json = serde_json::to_string(&self.transactions)?;
        self.write(TRANSACTIONS_KEY, &json)
    }

    fn flush_budget(&self) -> Result<(), CoreError> {
        let json = serde_json::to_string(&self.budget)?;
        self.write(BUDGET_KEY, &json)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.storage.set(key, value).map_err(|err| {
            warn!(key, error = %err, "failed to flush ledger state");
            err
        })
    }
}

fn read_or_default<T>(storage: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key, error = %err, "persisted value is malformed; using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, error = %err, "persisted value is unreadable; using default");
            T::default()
        }
    }
}

fn decode_records(records: Vec<serde_json::Value>) -> Vec<Transaction> {
    let total = records.len();
    let transactions: Vec<Transaction> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|err| warn!(index, error = %err, "skipping malformed transaction"))
                .ok()
        })
        .collect();
    if transactions.len() != total {
        warn!(
            dropped = total - transactions.len(),
            "persisted ledger contained malformed records"
        );
    }
    transactions
}

fn dedupe_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::with_capacity(transactions.len());
    let total = transactions.len();
    let unique: Vec<Transaction> = transactions
        .into_iter()
        .filter(|txn| seen.insert(txn.id))
        .collect();
    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "persisted ledger contained duplicate ids"
        );
    }
    unique
}
