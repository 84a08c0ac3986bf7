pub mod accounts;
pub mod balance;
pub mod entry;
pub mod sheet;

pub use accounts::{account_label, AccountCategory};
pub use balance::{compute_balances, trial_balance, LedgerAccountBalance};
pub use entry::{
    read_entries_csv, read_entries_json, validate_entries, AccountingEntry, CsvField,
    EntriesInput, EntryRecord,
};
pub use sheet::{balance_sheet, BalanceSheetSection, LedgerSummary, SECTION_ORDER};
