use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default corporate income tax (IS) rate
pub const DEFAULT_IS_RATE: Decimal = dec!(0.25);

/// Minimum flat tax (IMF) rate on turnover. Not configurable per call.
pub const IMF_RATE: Decimal = dec!(0.015);

/// Which of the two taxes is owed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedTax {
    Is,
    Imf,
}

impl AppliedTax {
    pub fn display(&self) -> &'static str {
        match self {
            AppliedTax::Is => "IS",
            AppliedTax::Imf => "IMF",
        }
    }
}

impl std::fmt::Display for AppliedTax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Greater of corporate tax on profit and minimum tax on turnover
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorporateTaxResult {
    pub amount: Decimal,
    pub is_amount: Decimal,
    pub imf_amount: Decimal,
    pub applied: AppliedTax,
    pub details: BTreeMap<String, Decimal>,
}

/// Compare IS on `resultat` (taxable profit) with IMF on `chiffre_affaires`
/// (turnover) and keep the larger. A tie applies IS.
pub fn compute_is_vs_imf(
    resultat: Decimal,
    chiffre_affaires: Decimal,
    taux_is: Decimal,
) -> CorporateTaxResult {
    let is_amount = resultat.max(Decimal::ZERO) * taux_is;
    let imf_amount = chiffre_affaires.max(Decimal::ZERO) * IMF_RATE;

    let (applied, amount) = if is_amount >= imf_amount {
        (AppliedTax::Is, is_amount)
    } else {
        (AppliedTax::Imf, imf_amount)
    };

    log::debug!(
        "IS/IMF resultat={}, turnover={}, is={}, imf={}, applied={}",
        resultat,
        chiffre_affaires,
        is_amount,
        imf_amount,
        applied
    );

    let details = BTreeMap::from([
        ("resultat".to_string(), resultat),
        ("chiffre_affaires".to_string(), chiffre_affaires),
        ("taux_is".to_string(), taux_is),
        ("taux_imf".to_string(), IMF_RATE),
    ]);

    CorporateTaxResult {
        amount,
        is_amount,
        imf_amount,
        applied,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profitable_company_pays_is() {
        let result = compute_is_vs_imf(dec!(10000000), dec!(50000000), DEFAULT_IS_RATE);
        assert_eq!(result.is_amount, dec!(2500000));
        assert_eq!(result.imf_amount, dec!(750000));
        assert_eq!(result.applied, AppliedTax::Is);
        assert_eq!(result.amount, dec!(2500000));
    }

    #[test]
    fn loss_making_company_pays_imf() {
        let result = compute_is_vs_imf(dec!(-2000000), dec!(40000000), DEFAULT_IS_RATE);
        assert_eq!(result.is_amount, dec!(0));
        assert_eq!(result.imf_amount, dec!(600000));
        assert_eq!(result.applied, AppliedTax::Imf);
        assert_eq!(result.amount, dec!(600000));
    }

    #[test]
    fn tie_applies_is() {
        // 600_000 * 0.25 == 10_000_000 * 0.015
        let result = compute_is_vs_imf(dec!(600000), dec!(10000000), DEFAULT_IS_RATE);
        assert_eq!(result.is_amount, result.imf_amount);
        assert_eq!(result.applied, AppliedTax::Is);
    }

    #[test]
    fn zero_inputs_apply_is_with_zero_amount() {
        let result = compute_is_vs_imf(dec!(0), dec!(0), DEFAULT_IS_RATE);
        assert_eq!(result.applied, AppliedTax::Is);
        assert_eq!(result.amount, dec!(0));
    }

    #[test]
    fn applied_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AppliedTax::Imf).unwrap(), "\"imf\"");
        assert_eq!(serde_json::to_string(&AppliedTax::Is).unwrap(), "\"is\"");
    }
}
