//! Export packet: tax evaluation and ledger summary sealed with a SHA-256 checksum.

use crate::ledger::LedgerSummary;
use crate::tax::TaxEvaluation;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize)]
pub struct ExportPacket {
    pub workspace_id: String,
    pub generated_on: NaiveDate,
    pub total_tax_due: Decimal,
    pub tax: TaxEvaluation,
    pub ledger: LedgerSummary,
    /// Hex SHA-256 of the packet without this field
    pub checksum: String,
}

/// Fields covered by the checksum
#[derive(Serialize)]
struct Payload<'a> {
    workspace_id: &'a str,
    generated_on: NaiveDate,
    total_tax_due: Decimal,
    tax: &'a TaxEvaluation,
    ledger: &'a LedgerSummary,
}

impl ExportPacket {
    pub fn new(
        workspace_id: &str,
        generated_on: NaiveDate,
        tax: TaxEvaluation,
        ledger: LedgerSummary,
    ) -> anyhow::Result<Self> {
        let mut packet = ExportPacket {
            workspace_id: workspace_id.to_string(),
            generated_on,
            total_tax_due: tax.total_due()?,
            tax,
            ledger,
            checksum: String::new(),
        };
        packet.checksum = packet.compute_checksum()?;
        log::info!(
            "Export packet for {} sealed with checksum {}",
            packet.workspace_id,
            packet.checksum
        );
        Ok(packet)
    }

    fn compute_checksum(&self) -> anyhow::Result<String> {
        let payload = Payload {
            workspace_id: &self.workspace_id,
            generated_on: self.generated_on,
            total_tax_due: self.total_tax_due,
            tax: &self.tax,
            ledger: &self.ledger,
        };
        let bytes = serde_json::to_vec(&payload)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    /// Recompute the checksum and compare with the stored one
    pub fn verify(&self) -> anyhow::Result<bool> {
        Ok(self.compute_checksum()? == self.checksum)
    }
}
