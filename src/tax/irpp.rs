use crate::core::amount::overflow;
use crate::core::{BracketSchedule, FiscalError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Progressive personal income tax computed per family part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrppResult {
    /// Total household tax (tax per part times parts)
    pub amount: Decimal,
    /// Number of parts actually used, never below one
    pub parts: Decimal,
    pub taxable_per_part: Decimal,
    pub details: BTreeMap<String, Decimal>,
}

/// Compute IRPP with the family quotient.
///
/// The base is split into `quotient` parts (at least one), the schedule is
/// integrated over a single part, and the tax is multiplied back by the
/// number of parts. A bracket's flat deduction is subtracted once whenever
/// its slice is positive.
///
/// Fails with `FiscalError::Validation` on `irpp` when the tax overflows.
pub fn compute_irpp(
    base: Decimal,
    quotient: Decimal,
    schedule: &BracketSchedule,
) -> Result<IrppResult, FiscalError> {
    let parts = quotient.max(Decimal::ONE);
    let taxable_per_part = base.max(Decimal::ZERO) / parts;

    let mut tax_per_part = Decimal::ZERO;
    let mut previous_ceiling = Decimal::ZERO;
    for bracket in schedule.brackets() {
        if taxable_per_part <= previous_ceiling {
            break;
        }
        let upper = match bracket.ceiling {
            Some(ceiling) => taxable_per_part.min(ceiling),
            None => taxable_per_part,
        };
        let slice = upper - previous_ceiling;
        if slice > Decimal::ZERO {
            tax_per_part = slice
                .checked_mul(bracket.rate)
                .and_then(|tax| tax_per_part.checked_add(tax))
                .and_then(|tax| tax.checked_sub(bracket.deduction.unwrap_or(Decimal::ZERO)))
                .ok_or_else(|| overflow("irpp"))?;
            log::debug!(
                "IRPP slice {}..{:?} at {}: {} (running {})",
                previous_ceiling,
                bracket.ceiling,
                bracket.rate,
                slice,
                tax_per_part
            );
        }
        match bracket.ceiling {
            Some(ceiling) => previous_ceiling = ceiling,
            None => break,
        }
    }

    let amount = tax_per_part
        .checked_mul(parts)
        .ok_or_else(|| overflow("irpp"))?;
    log::debug!(
        "IRPP base={}, parts={}, per_part={}, tax_per_part={}, amount={}",
        base,
        parts,
        taxable_per_part,
        tax_per_part,
        amount
    );

    let details = BTreeMap::from([
        ("base".to_string(), base),
        ("quotient".to_string(), quotient),
        ("tax_per_part".to_string(), tax_per_part),
    ]);

    Ok(IrppResult {
        amount,
        parts,
        taxable_per_part,
        details,
    })
}
