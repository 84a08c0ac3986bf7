use super::accounts::AccountCategory;
use super::balance::{compute_balances, trial_balance, LedgerAccountBalance};
use super::entry::AccountingEntry;
use crate::core::{checked_sum, FiscalError};
use rust_decimal::Decimal;
use serde::Serialize;

/// Sections of the balance sheet, in display order
pub const SECTION_ORDER: [AccountCategory; 4] = [
    AccountCategory::Assets,
    AccountCategory::Equity,
    AccountCategory::Revenues,
    AccountCategory::Expenses,
];

/// Accounts of one category with the signed sum of their balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetSection {
    pub title: String,
    pub category: AccountCategory,
    pub accounts: Vec<LedgerAccountBalance>,
    /// Sum of debit-minus-credit balances; revenue sections are usually negative
    pub total: Decimal,
}

/// Group balances into the four balance sheet sections.
///
/// Accounts outside classes 1 to 7 are left out of every section.
pub fn balance_sheet(
    balances: &[LedgerAccountBalance],
) -> Result<Vec<BalanceSheetSection>, FiscalError> {
    SECTION_ORDER
        .iter()
        .map(|category| {
            let accounts: Vec<LedgerAccountBalance> = balances
                .iter()
                .filter(|b| AccountCategory::of(&b.account) == *category)
                .cloned()
                .collect();
            let field = format!("sections[{}]", category.title());
            let total = checked_sum(&field, accounts.iter().map(|b| b.balance))?;
            Ok(BalanceSheetSection {
                title: category.title().to_string(),
                category: *category,
                accounts,
                total,
            })
        })
        .collect()
}

/// Flat balances together with the sectioned view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub balances: Vec<LedgerAccountBalance>,
    pub sections: Vec<BalanceSheetSection>,
}

impl LedgerSummary {
    pub fn from_entries(entries: &[AccountingEntry]) -> Result<Self, FiscalError> {
        let balances = compute_balances(entries)?;
        let sections = balance_sheet(&balances)?;
        Ok(LedgerSummary { balances, sections })
    }

    pub fn section(&self, category: AccountCategory) -> Option<&BalanceSheetSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Balances present in the flat list but in no section
    pub fn uncategorized(&self) -> impl Iterator<Item = &LedgerAccountBalance> {
        self.balances
            .iter()
            .filter(|b| AccountCategory::of(&b.account) == AccountCategory::Others)
    }

    pub fn trial_balance(&self) -> Result<(Decimal, Decimal), FiscalError> {
        trial_balance(&self.balances)
    }
}
