use super::corporate::{compute_is_vs_imf, CorporateTaxResult, DEFAULT_IS_RATE};
use super::css::{compute_css, CssResult, DEFAULT_CSS_RATE};
use super::irpp::{compute_irpp, IrppResult};
use super::vat::{compute_tva, VatResult};
use crate::core::{checked_sum, ensure_amount, ensure_rate, BracketSchedule, FiscalError, TaxBracket};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// VAT figures for the period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VatBase {
    /// VAT collected on sales
    #[schemars(with = "f64")]
    pub collected: Decimal,
    /// VAT paid on purchases and deductible
    #[schemars(with = "f64")]
    pub deductible: Decimal,
    /// Headline VAT rate, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CssBase {
    #[schemars(with = "f64")]
    pub base: Decimal,
    /// Amounts excluded from the levy base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub exclusions: Option<Decimal>,
    /// Levy rate, defaults to 3.2%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub rate: Option<Decimal>,
}

/// Corporate tax base (taxable profit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IsBase {
    #[schemars(with = "f64")]
    pub base: Decimal,
    /// Corporate tax rate, defaults to 25%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub rate: Option<Decimal>,
}

/// Minimum tax base (turnover)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImfBase {
    #[schemars(with = "f64")]
    pub base: Decimal,
    /// Accepted for compatibility; the minimum tax rate is fixed at 1.5%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IrppBase {
    /// Household taxable income
    #[schemars(with = "f64")]
    pub base: Decimal,
    /// Number of family parts
    #[schemars(with = "f64")]
    pub quotient: Decimal,
    /// Custom bracket schedule, defaults to the six-slice table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brackets: Option<Vec<TaxBracket>>,
}

/// Fiscal inputs for one evaluation.
///
/// A `None` field means the tax does not apply; a zero figure is a tax that
/// applies with nothing to pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBases {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<VatBase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<CssBase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is: Option<IsBase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imf: Option<ImfBase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irpp: Option<IrppBase>,
}

/// Results of every applicable tax
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxEvaluation {
    pub tva: Option<VatResult>,
    pub css: Option<CssResult>,
    pub is_vs_imf: Option<CorporateTaxResult>,
    pub irpp: Option<IrppResult>,
}

impl TaxEvaluation {
    /// Sum of the amounts due. A VAT credit is not netted against other taxes.
    pub fn total_due(&self) -> Result<Decimal, FiscalError> {
        let amounts = [
            self.tva.as_ref().map(|r| r.amount),
            self.css.as_ref().map(|r| r.amount),
            self.is_vs_imf.as_ref().map(|r| r.amount),
            self.irpp.as_ref().map(|r| r.amount),
        ];
        checked_sum("total_due", amounts.into_iter().flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.tva.is_none() && self.css.is_none() && self.is_vs_imf.is_none() && self.irpp.is_none()
    }
}

/// Evaluate every tax whose base is present.
///
/// When only an IS base is given, its value doubles as the turnover for the
/// minimum tax comparison. Every figure must lie within `MAX_AMOUNT`.
pub fn evaluate_tax_bases(bases: &TaxBases) -> Result<TaxEvaluation, FiscalError> {
    check_amounts(bases)?;

    let tva = bases
        .vat
        .as_ref()
        .map(|vat| {
            let mut result = compute_tva(vat.collected, vat.deductible);
            if let Some(rate) = vat.rate {
                result.details.insert("rate".to_string(), rate);
            }
            result
        });

    let css = match &bases.css {
        Some(css) => {
            let rate = ensure_rate("css.rate", css.rate.unwrap_or(DEFAULT_CSS_RATE))?;
            Some(compute_css(
                css.base,
                css.exclusions.unwrap_or(Decimal::ZERO),
                rate,
            ))
        }
        None => None,
    };

    let is_vs_imf = if bases.is.is_some() || bases.imf.is_some() {
        let resultat = bases.is.as_ref().map_or(Decimal::ZERO, |is| is.base);
        let turnover = bases
            .imf
            .as_ref()
            .map(|imf| imf.base)
            .or_else(|| bases.is.as_ref().map(|is| is.base))
            .unwrap_or(Decimal::ZERO);
        let taux_is = ensure_rate(
            "is.rate",
            bases
                .is
                .as_ref()
                .and_then(|is| is.rate)
                .unwrap_or(DEFAULT_IS_RATE),
        )?;
        if let Some(rate) = bases.imf.as_ref().and_then(|imf| imf.rate) {
            log::warn!("Ignoring imf.rate {}: the minimum tax rate is fixed", rate);
        }
        Some(compute_is_vs_imf(resultat, turnover, taux_is))
    } else {
        None
    };

    let irpp = match &bases.irpp {
        Some(irpp) => {
            let schedule = match &irpp.brackets {
                Some(brackets) => BracketSchedule::new(brackets.clone())?,
                None => BracketSchedule::default(),
            };
            Some(compute_irpp(irpp.base, irpp.quotient, &schedule)?)
        }
        None => None,
    };

    Ok(TaxEvaluation {
        tva,
        css,
        is_vs_imf,
        irpp,
    })
}

fn check_amounts(bases: &TaxBases) -> Result<(), FiscalError> {
    if let Some(vat) = &bases.vat {
        ensure_amount("vat.collected", vat.collected)?;
        ensure_amount("vat.deductible", vat.deductible)?;
    }
    if let Some(css) = &bases.css {
        ensure_amount("css.base", css.base)?;
        if let Some(exclusions) = css.exclusions {
            ensure_amount("css.exclusions", exclusions)?;
        }
    }
    if let Some(is) = &bases.is {
        ensure_amount("is.base", is.base)?;
    }
    if let Some(imf) = &bases.imf {
        ensure_amount("imf.base", imf.base)?;
    }
    if let Some(irpp) = &bases.irpp {
        ensure_amount("irpp.base", irpp.base)?;
        ensure_amount("irpp.quotient", irpp.quotient)?;
    }
    Ok(())
}
