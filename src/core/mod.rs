pub mod amount;
pub mod bracket;
pub mod error;

// Flat public surface for shared types and helpers.
pub use amount::{checked_sum, ensure_amount, ensure_rate, format_amount, format_rate, MAX_AMOUNT};
pub use bracket::{BracketSchedule, TaxBracket};
pub use error::FiscalError;
