use crate::core::{FiscalError, MAX_AMOUNT};
use anyhow::Context;
use chrono::NaiveDate;
use fisc_derive::CsvSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A double-entry bookkeeping record.
///
/// Entries are append-only: never mutated, only removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountingEntry {
    pub id: String,
    pub workspace_id: String,
    #[schemars(with = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl AccountingEntry {
    /// Trim surrounding whitespace from the account codes
    pub fn normalized(mut self) -> Self {
        self.debit_account = self.debit_account.trim().to_string();
        self.credit_account = self.credit_account.trim().to_string();
        self
    }

    /// Check the entry is fit for aggregation: an amount in `0 < amount <= MAX_AMOUNT`,
    /// a non-empty id and trimmed, non-empty account codes.
    pub fn validate(&self) -> Result<(), FiscalError> {
        let field = |name: &str| format!("entries[{}].{}", self.id, name);

        if self.id.trim().is_empty() {
            return Err(FiscalError::validation("entries[].id", "must not be empty"));
        }
        if self.debit_account.trim().is_empty() {
            return Err(FiscalError::validation(
                field("debitAccount"),
                "must not be empty",
            ));
        }
        if self.credit_account.trim().is_empty() {
            return Err(FiscalError::validation(
                field("creditAccount"),
                "must not be empty",
            ));
        }
        for (name, code) in [
            ("debitAccount", &self.debit_account),
            ("creditAccount", &self.credit_account),
        ] {
            if code.trim() != code.as_str() {
                return Err(FiscalError::validation(
                    field(name),
                    format!("{code:?} has surrounding whitespace"),
                ));
            }
        }
        if self.amount <= Decimal::ZERO {
            return Err(FiscalError::validation(
                field("amount"),
                format!("must be positive, got {}", self.amount),
            ));
        }
        if self.amount > MAX_AMOUNT {
            return Err(FiscalError::validation(
                field("amount"),
                format!("{} exceeds the maximum amount {MAX_AMOUNT}", self.amount),
            ));
        }
        Ok(())
    }
}

/// Validate a batch of entries, stopping at the first invalid one.
pub fn validate_entries(entries: &[AccountingEntry]) -> Result<(), FiscalError> {
    entries.iter().try_for_each(AccountingEntry::validate)
}

/// Column description generated by `CsvSchema`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// CSV row for an accounting entry
#[derive(Debug, Clone, Serialize, Deserialize, CsvSchema)]
pub struct EntryRecord {
    /// Unique entry identifier
    pub id: String,
    /// Workspace the entry belongs to
    #[serde(rename = "workspace")]
    pub workspace_id: String,
    /// Entry date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-text description
    pub description: String,
    /// Account code debited (e.g. 512)
    #[serde(rename = "debit")]
    pub debit_account: String,
    /// Account code credited (e.g. 701)
    #[serde(rename = "credit")]
    pub credit_account: String,
    /// Positive amount posted on both sides
    pub amount: Decimal,
    /// External reference such as an invoice number
    pub reference: Option<String>,
    /// Tags separated by ';'
    pub tags: Option<String>,
}

impl From<EntryRecord> for AccountingEntry {
    fn from(record: EntryRecord) -> Self {
        let tags = record
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(';')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        AccountingEntry {
            id: record.id,
            workspace_id: record.workspace_id,
            date: record.date,
            description: record.description,
            debit_account: record.debit_account,
            credit_account: record.credit_account,
            amount: record.amount,
            reference: record.reference.filter(|r| !r.trim().is_empty()),
            tags,
        }
    }
}

impl From<&AccountingEntry> for EntryRecord {
    fn from(entry: &AccountingEntry) -> Self {
        EntryRecord {
            id: entry.id.clone(),
            workspace_id: entry.workspace_id.clone(),
            date: entry.date,
            description: entry.description.clone(),
            debit_account: entry.debit_account.clone(),
            credit_account: entry.credit_account.clone(),
            amount: entry.amount,
            reference: entry.reference.clone(),
            tags: (!entry.tags.is_empty()).then(|| entry.tags.join(";")),
        }
    }
}

/// Input root for entry JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EntriesInput {
    pub entries: Vec<AccountingEntry>,
}

/// Read and validate entries from CSV
pub fn read_entries_csv<R: Read>(reader: R) -> anyhow::Result<Vec<AccountingEntry>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for (i, record) in rdr.deserialize::<EntryRecord>().enumerate() {
        let record = record.with_context(|| format!("invalid entry record {}", i + 1))?;
        entries.push(AccountingEntry::from(record).normalized());
    }
    validate_entries(&entries)?;
    log::info!("Read {} entries from csv", entries.len());
    Ok(entries)
}

/// Read and validate entries from JSON
pub fn read_entries_json<R: Read>(reader: R) -> anyhow::Result<Vec<AccountingEntry>> {
    let input: EntriesInput = serde_json::from_reader(reader).context("invalid entries json")?;
    let entries: Vec<AccountingEntry> = input
        .entries
        .into_iter()
        .map(AccountingEntry::normalized)
        .collect();
    validate_entries(&entries)?;
    log::info!("Read {} entries from json", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(id: &str, debit: &str, credit: &str, amount: Decimal) -> AccountingEntry {
        AccountingEntry {
            id: id.to_string(),
            workspace_id: "ws".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: "test".to_string(),
            debit_account: debit.to_string(),
            credit_account: credit.to_string(),
            amount,
            reference: None,
            tags: vec![],
        }
    }

    #[test]
    fn valid_entry_passes() {
        assert!(entry("e1", "512", "701", dec!(100)).validate().is_ok());
    }

    #[test]
    fn non_positive_amount_rejected() {
        for amount in [dec!(0), dec!(-5)] {
            let err = entry("e1", "512", "701", amount).validate().unwrap_err();
            assert_eq!(
                err,
                FiscalError::Validation {
                    field: "entries[e1].amount".to_string(),
                    reason: format!("must be positive, got {amount}"),
                }
            );
        }
    }

    #[test]
    fn empty_account_codes_rejected() {
        assert!(entry("e1", "", "701", dec!(1)).validate().is_err());
        assert!(entry("e1", "512", "  ", dec!(1)).validate().is_err());
        assert!(entry("", "512", "701", dec!(1)).validate().is_err());
    }

    #[test]
    fn amount_above_maximum_rejected() {
        assert!(entry("e1", "512", "701", MAX_AMOUNT).validate().is_ok());
        let err = entry("e1", "512", "701", Decimal::MAX)
            .validate()
            .unwrap_err();
        assert!(matches!(err, FiscalError::Validation { ref field, .. } if field == "entries[e1].amount"));
    }

    #[test]
    fn padded_account_codes_rejected_until_normalized() {
        let padded = entry("e1", " 512", "701\t", dec!(10));
        let err = padded.validate().unwrap_err();
        assert!(matches!(err, FiscalError::Validation { ref field, .. } if field == "entries[e1].debitAccount"));

        let normalized = padded.normalized();
        assert_eq!(normalized.debit_account, "512");
        assert_eq!(normalized.credit_account, "701");
        assert!(normalized.validate().is_ok());
    }

    #[test]
    fn batch_validation_stops_at_first_invalid() {
        let entries = vec![
            entry("e1", "512", "701", dec!(1)),
            entry("e2", "512", "701", dec!(0)),
            entry("e3", "", "701", dec!(1)),
        ];
        let err = validate_entries(&entries).unwrap_err();
        assert!(matches!(err, FiscalError::Validation { ref field, .. } if field == "entries[e2].amount"));
    }

    #[test]
    fn parse_csv_entries() {
        let csv_data = "id,workspace,date,description,debit,credit,amount,reference,tags
e1,ws1,2024-01-15,Sale,512,701,100000,INV-1,sales; q1
e2,ws1,2024-01-20,Supplier payment,401,512,40000,,
";
        let entries = read_entries_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].debit_account, "512");
        assert_eq!(entries[0].amount, dec!(100000));
        assert_eq!(entries[0].reference.as_deref(), Some("INV-1"));
        assert_eq!(entries[0].tags, vec!["sales", "q1"]);
        assert_eq!(entries[1].reference, None);
        assert!(entries[1].tags.is_empty());
        assert_eq!(entries[1].date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }

    #[test]
    fn csv_with_invalid_amount_rejected() {
        let csv_data = "id,workspace,date,description,debit,credit,amount,reference,tags
e1,ws1,2024-01-15,Refund,512,701,-10,,
";
        assert!(read_entries_csv(csv_data.as_bytes()).is_err());
    }

    #[test]
    fn parse_json_entries() {
        let json = r#"{"entries": [
            {"id": "e1", "workspaceId": "ws1", "date": "2024-01-15", "description": "Sale",
             "debitAccount": "512", "creditAccount": "701", "amount": 100000, "tags": ["sales"]}
        ]}"#;
        let entries = read_entries_json(json.as_bytes()).unwrap();
        assert_eq!(entries[0].credit_account, "701");
        assert_eq!(entries[0].tags, vec!["sales"]);
    }

    #[test]
    fn csv_and_json_readers_agree_on_padded_codes() {
        let csv_data = "id,workspace,date,description,debit,credit,amount,reference,tags
e1,ws1,2024-01-15,Sale, 512 ,701,100000,,
";
        let json = r#"{"entries": [
            {"id": "e1", "workspaceId": "ws1", "date": "2024-01-15", "description": "Sale",
             "debitAccount": " 512 ", "creditAccount": "701", "amount": 100000}
        ]}"#;
        let from_csv = read_entries_csv(csv_data.as_bytes()).unwrap();
        let from_json = read_entries_json(json.as_bytes()).unwrap();
        assert_eq!(from_csv, from_json);
        assert_eq!(from_json[0].debit_account, "512");

        let balances = crate::ledger::compute_balances(&from_json).unwrap();
        assert_eq!(balances[0].account, "512");
        assert_eq!(balances[0].label, "Banks");
    }

    #[test]
    fn csv_schema_lists_columns() {
        assert_eq!(
            EntryRecord::csv_header(),
            vec![
                "id",
                "workspace",
                "date",
                "description",
                "debit",
                "credit",
                "amount",
                "reference",
                "tags"
            ]
        );
        let schema = EntryRecord::csv_schema();
        assert!(schema[0].required);
        assert!(!schema[7].required);
        assert_eq!(schema[4].description, "Account code debited (e.g. 512)");
    }
}
