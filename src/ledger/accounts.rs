use serde::Serialize;

/// Labels keyed by the two-digit prefix of an account code
const ACCOUNT_LABELS: &[(&str, &str)] = &[
    ("10", "Capital"),
    ("11", "Reserves"),
    ("12", "Retained earnings"),
    ("13", "Net income"),
    ("16", "Borrowings"),
    ("21", "Intangible assets"),
    ("22", "Land"),
    ("23", "Buildings"),
    ("24", "Equipment"),
    ("28", "Depreciation"),
    ("31", "Goods inventory"),
    ("40", "Clients / Receivables"),
    ("41", "Suppliers / Payables"),
    ("42", "Staff"),
    ("43", "Social security"),
    ("44", "State / Taxes"),
    ("51", "Banks"),
    ("52", "Banks"),
    ("53", "Financial institutions"),
    ("57", "Cash"),
    ("60", "Purchases / Expenses"),
    ("61", "Transport"),
    ("62", "External services"),
    ("63", "Other external services"),
    ("64", "Taxes and duties"),
    ("66", "Personnel costs"),
    ("67", "Financial expenses"),
    ("68", "Depreciation charges"),
    ("70", "Sales / Revenues"),
    ("71", "Operating subsidies"),
    ("75", "Other revenues"),
    ("77", "Financial income"),
];

/// Label for an account code, empty when its prefix is not mapped.
pub fn account_label(code: &str) -> &'static str {
    let prefix = match code.get(..2) {
        Some(prefix) => prefix,
        None => return "",
    };
    ACCOUNT_LABELS
        .iter()
        .find(|(p, _)| *p == prefix)
        .map_or("", |(_, label)| *label)
}

/// Balance sheet category derived from the leading digit of an account code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    Equity,
    Assets,
    Expenses,
    Revenues,
    /// Codes outside classes 1 to 7, left out of the balance sheet
    Others,
}

impl AccountCategory {
    pub fn of(code: &str) -> Self {
        match code.chars().next() {
            Some('1' | '2') => AccountCategory::Equity,
            Some('3' | '4' | '5') => AccountCategory::Assets,
            Some('6') => AccountCategory::Expenses,
            Some('7') => AccountCategory::Revenues,
            _ => AccountCategory::Others,
        }
    }

    /// Section title used in the balance sheet
    pub fn title(&self) -> &'static str {
        match self {
            AccountCategory::Assets => "Assets",
            AccountCategory::Equity => "Equity & Liabilities",
            AccountCategory::Revenues => "Revenues",
            AccountCategory::Expenses => "Expenses",
            AccountCategory::Others => "Others",
        }
    }
}

impl std::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_by_prefix() {
        assert_eq!(account_label("101"), "Capital");
        assert_eq!(account_label("4011"), "Clients / Receivables");
        assert_eq!(account_label("601"), "Purchases / Expenses");
        assert_eq!(account_label("701"), "Sales / Revenues");
        assert_eq!(account_label("512"), "Banks");
    }

    #[test]
    fn unknown_or_short_codes_have_empty_label() {
        assert_eq!(account_label("99"), "");
        assert_eq!(account_label("8"), "");
        assert_eq!(account_label(""), "");
    }

    #[test]
    fn categories_by_leading_digit() {
        assert_eq!(AccountCategory::of("101"), AccountCategory::Equity);
        assert_eq!(AccountCategory::of("245"), AccountCategory::Equity);
        assert_eq!(AccountCategory::of("31"), AccountCategory::Assets);
        assert_eq!(AccountCategory::of("401"), AccountCategory::Assets);
        assert_eq!(AccountCategory::of("512"), AccountCategory::Assets);
        assert_eq!(AccountCategory::of("601"), AccountCategory::Expenses);
        assert_eq!(AccountCategory::of("701"), AccountCategory::Revenues);
        assert_eq!(AccountCategory::of("801"), AccountCategory::Others);
        assert_eq!(AccountCategory::of("0"), AccountCategory::Others);
        assert_eq!(AccountCategory::of("A12"), AccountCategory::Others);
        assert_eq!(AccountCategory::of(""), AccountCategory::Others);
    }
}
