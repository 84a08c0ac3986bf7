use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Net VAT (TVA) position for a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatResult {
    /// Amount due, equal to `due`
    pub amount: Decimal,
    /// Collected minus deductible
    pub net: Decimal,
    pub due: Decimal,
    /// Credit carried forward when deductible VAT exceeds collected VAT
    pub credit: Decimal,
    pub details: BTreeMap<String, Decimal>,
}

/// Compute the VAT position from collected and deductible VAT.
///
/// A positive net is due, a negative net becomes a credit. Inputs are taken
/// as-is; callers validate non-negativity upstream.
pub fn compute_tva(collected: Decimal, deductible: Decimal) -> VatResult {
    let net = collected - deductible;
    let due = net.max(Decimal::ZERO);
    let credit = (-net).max(Decimal::ZERO);

    log::debug!(
        "TVA collected={}, deductible={}, net={}, due={}, credit={}",
        collected,
        deductible,
        net,
        due,
        credit
    );

    let details = BTreeMap::from([
        ("collected".to_string(), collected),
        ("deductible".to_string(), deductible),
    ]);

    VatResult {
        amount: due,
        net,
        due,
        credit,
        details,
    }
}
