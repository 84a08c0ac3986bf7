use super::accounts::account_label;
use super::entry::AccountingEntry;
use crate::core::amount::overflow;
use crate::core::{checked_sum, FiscalError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Debit and credit totals of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAccountBalance {
    pub account: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Debit minus credit
    pub balance: Decimal,
}

impl LedgerAccountBalance {
    fn new(account: &str) -> Self {
        LedgerAccountBalance {
            account: account.to_string(),
            label: account_label(account).to_string(),
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    fn post(&mut self, debit: Decimal, credit: Decimal) -> Result<(), FiscalError> {
        let field = || format!("accounts[{}]", self.account);
        let debit = self.debit.checked_add(debit).ok_or_else(|| overflow(&field()))?;
        let credit = self.credit.checked_add(credit).ok_or_else(|| overflow(&field()))?;
        let balance = debit.checked_sub(credit).ok_or_else(|| overflow(&field()))?;
        self.debit = debit;
        self.credit = credit;
        self.balance = balance;
        Ok(())
    }
}

/// Fold entries into per-account totals, sorted by account code.
///
/// Entries are assumed validated (see `validate_entries`); amounts are
/// accumulated as given. The result does not depend on entry order.
///
/// Validated amounts are bounded by `MAX_AMOUNT`; an overflow fails with
/// `FiscalError::Validation` naming the account.
pub fn compute_balances(
    entries: &[AccountingEntry],
) -> Result<Vec<LedgerAccountBalance>, FiscalError> {
    let mut balances: BTreeMap<&str, LedgerAccountBalance> = BTreeMap::new();

    for entry in entries {
        balances
            .entry(entry.debit_account.as_str())
            .or_insert_with(|| LedgerAccountBalance::new(&entry.debit_account))
            .post(entry.amount, Decimal::ZERO)?;
        balances
            .entry(entry.credit_account.as_str())
            .or_insert_with(|| LedgerAccountBalance::new(&entry.credit_account))
            .post(Decimal::ZERO, entry.amount)?;
    }

    log::debug!(
        "Computed {} account balances from {} entries",
        balances.len(),
        entries.len()
    );

    Ok(balances.into_values().collect())
}

/// Total debits and total credits across all accounts
pub fn trial_balance(
    balances: &[LedgerAccountBalance],
) -> Result<(Decimal, Decimal), FiscalError> {
    let debit = checked_sum("trial_balance.debit", balances.iter().map(|b| b.debit))?;
    let credit = checked_sum("trial_balance.credit", balances.iter().map(|b| b.credit))?;
    Ok((debit, credit))
}
