//! Fiscal computation engine.
//!
//! Pure tax calculations (VAT, CSS, IS/IMF, IRPP) and double-entry ledger
//! aggregation, plus the storage and export plumbing used by the `fisc` CLI.

pub mod core;
pub mod export;
pub mod ledger;
pub mod store;
pub mod tax;
