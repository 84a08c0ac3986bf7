use super::error::FiscalError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One slice of a progressive schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBracket {
    /// Upper bound of the slice, `None` for the unbounded top slice
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub ceiling: Option<Decimal>,
    /// Marginal rate applied to the slice (0..1)
    #[schemars(with = "f64")]
    pub rate: Decimal,
    /// Flat amount subtracted once when the slice is reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<f64>")]
    pub deduction: Option<Decimal>,
}

impl TaxBracket {
    pub fn bounded(ceiling: Decimal, rate: Decimal) -> Self {
        TaxBracket {
            ceiling: Some(ceiling),
            rate,
            deduction: None,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        TaxBracket {
            ceiling: None,
            rate,
            deduction: None,
        }
    }

    pub fn with_deduction(mut self, deduction: Decimal) -> Self {
        self.deduction = Some(deduction);
        self
    }
}

/// A validated progressive schedule.
///
/// Bounded ceilings are strictly ascending and the last bracket, and only the
/// last, is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, FiscalError> {
        if brackets.is_empty() {
            return Err(FiscalError::Configuration(
                "bracket schedule is empty".to_string(),
            ));
        }

        let last = brackets.len() - 1;
        let mut previous: Option<Decimal> = None;
        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(FiscalError::Configuration(format!(
                    "bracket {i} rate must be between 0 and 1, got {}",
                    bracket.rate
                )));
            }
            match bracket.ceiling {
                None if i != last => {
                    return Err(FiscalError::Configuration(format!(
                        "bracket {i} is unbounded but is not the last bracket"
                    )));
                }
                None => {}
                Some(_) if i == last => {
                    return Err(FiscalError::Configuration(
                        "last bracket must be unbounded".to_string(),
                    ));
                }
                Some(ceiling) => {
                    if ceiling < Decimal::ZERO {
                        return Err(FiscalError::Configuration(format!(
                            "bracket {i} ceiling {ceiling} is negative"
                        )));
                    }
                    if let Some(prev) = previous {
                        if ceiling <= prev {
                            return Err(FiscalError::Configuration(format!(
                                "bracket {i} ceiling {ceiling} does not exceed previous ceiling {prev}"
                            )));
                        }
                    }
                    previous = Some(ceiling);
                }
            }
        }

        Ok(BracketSchedule { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl Default for BracketSchedule {
    /// Six slices: 0% up to 2M, then 10%, 20%, 30%, 35% and 40% above 60M.
    fn default() -> Self {
        BracketSchedule {
            brackets: vec![
                TaxBracket::bounded(dec!(2000000), dec!(0)),
                TaxBracket::bounded(dec!(5000000), dec!(0.10)),
                TaxBracket::bounded(dec!(12000000), dec!(0.20)),
                TaxBracket::bounded(dec!(30000000), dec!(0.30)),
                TaxBracket::bounded(dec!(60000000), dec!(0.35)),
                TaxBracket::unbounded(dec!(0.40)),
            ],
        }
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = FiscalError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        BracketSchedule::new(brackets)
    }
}
