use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default flat CSS levy rate (3.2%)
pub const DEFAULT_CSS_RATE: Decimal = dec!(0.032);

/// Flat CSS levy on a base net of exclusions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssResult {
    pub amount: Decimal,
    /// Base minus exclusions, never negative
    pub taxable: Decimal,
    pub rate: Decimal,
    pub details: BTreeMap<String, Decimal>,
}

pub fn compute_css(base: Decimal, exclusions: Decimal, rate: Decimal) -> CssResult {
    let taxable = (base - exclusions).max(Decimal::ZERO);
    let amount = taxable * rate;

    log::debug!(
        "CSS base={}, exclusions={}, taxable={}, rate={}, amount={}",
        base,
        exclusions,
        taxable,
        rate,
        amount
    );

    let details = BTreeMap::from([
        ("base".to_string(), base),
        ("exclusions".to_string(), exclusions),
    ]);

    CssResult {
        amount,
        taxable,
        rate,
        details,
    }
}
