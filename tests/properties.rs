//! Properties of the tax engine and ledger aggregator over generated values

use chrono::NaiveDate;
use fisc::core::{BracketSchedule, MAX_AMOUNT};
use fisc::ledger::{
    compute_balances, validate_entries, AccountCategory, AccountingEntry, LedgerSummary,
};
use fisc::tax::{
    compute_css, compute_irpp, compute_is_vs_imf, compute_tva, AppliedTax, DEFAULT_CSS_RATE,
    DEFAULT_IS_RATE,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Non-negative amounts in cents, up to the largest accepted amount
fn amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (0i128..100_000_000_000i128).prop_map(|cents| Decimal::from_i128_with_scale(cents, 2)),
        (0i128..=100_000_000_000_000_000_000i128)
            .prop_map(|cents| Decimal::from_i128_with_scale(cents, 2)),
    ]
}

/// Family parts from 0.5 to 10 in steps of one half
fn quotient() -> impl Strategy<Value = Decimal> {
    (1i64..=20).prop_map(|halves| Decimal::new(halves * 5, 1))
}

/// Rates from 0 to 1 in steps of 0.1%
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|permille| Decimal::new(permille, 3))
}

fn entry(id: usize, debit: &str, credit: &str, amount: Decimal) -> AccountingEntry {
    AccountingEntry {
        id: format!("e{id}"),
        workspace_id: "acme".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        description: String::new(),
        debit_account: debit.to_string(),
        credit_account: credit.to_string(),
        amount,
        reference: None,
        tags: vec![],
    }
}

fn account() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "101", "164", "245", "31", "401", "411", "421", "512", "57", "601", "661", "701",
        "706", "801", "901",
    ])
}

/// A valid journal of up to 40 entries
fn journal() -> impl Strategy<Value = Vec<AccountingEntry>> {
    prop::collection::vec(
        (account(), account(), 1i128..=100_000_000_000_000_000_000i128),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (debit, credit, cents))| {
                entry(i, debit, credit, Decimal::from_i128_with_scale(cents, 2))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn tva_due_minus_credit_is_net(collected in amount(), deductible in amount()) {
        let r = compute_tva(collected, deductible);
        prop_assert_eq!(r.due - r.credit, collected - deductible);
        prop_assert!(r.due.is_zero() || r.credit.is_zero());
        prop_assert_eq!(r.amount, r.due);
    }

    #[test]
    fn css_taxable_never_negative(base in amount(), exclusions in amount(), rate in rate()) {
        let r = compute_css(base, exclusions, rate);
        prop_assert_eq!(r.taxable, (base - exclusions).max(Decimal::ZERO));
        prop_assert!(r.taxable >= Decimal::ZERO);
        prop_assert_eq!(r.amount, r.taxable * rate);
    }

    #[test]
    fn is_vs_imf_takes_the_greater(resultat in amount(), turnover in amount(), rate in rate()) {
        let r = compute_is_vs_imf(resultat, turnover, rate);
        prop_assert_eq!(r.amount, r.is_amount.max(r.imf_amount));
        if r.is_amount == r.imf_amount {
            prop_assert_eq!(r.applied, AppliedTax::Is);
        }
    }

    #[test]
    fn is_vs_imf_tie_applies_is(turnover in amount()) {
        // 25% of 6% of turnover equals 1.5% of turnover
        let resultat = turnover * dec!(0.06);
        let r = compute_is_vs_imf(resultat, turnover, DEFAULT_IS_RATE);
        prop_assert_eq!(r.is_amount, r.imf_amount);
        prop_assert_eq!(r.applied, AppliedTax::Is);
    }

    #[test]
    fn irpp_is_monotone_in_base(a in amount(), b in amount(), quotient in quotient()) {
        let schedule = BracketSchedule::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_tax = compute_irpp(low, quotient, &schedule).unwrap().amount;
        let high_tax = compute_irpp(high, quotient, &schedule).unwrap().amount;
        prop_assert!(low_tax <= high_tax, "{} -> {}, {} -> {}", low, low_tax, high, high_tax);
    }

    #[test]
    fn irpp_more_parts_never_costs_more(base in amount()) {
        prop_assume!(base > Decimal::ZERO);
        let schedule = BracketSchedule::default();
        let one = compute_irpp(base, dec!(1), &schedule).unwrap().amount;
        let two = compute_irpp(base, dec!(2), &schedule).unwrap().amount;
        prop_assert!(one >= two, "base {}: {} < {}", base, one, two);
    }

    #[test]
    fn balances_independent_of_entry_order(
        (entries, shuffled) in journal().prop_flat_map(|entries| {
            (Just(entries.clone()), Just(entries).prop_shuffle())
        })
    ) {
        prop_assert!(validate_entries(&entries).is_ok());
        prop_assert_eq!(
            compute_balances(&shuffled).unwrap(),
            compute_balances(&entries).unwrap()
        );
    }

    #[test]
    fn balance_is_debit_minus_credit(entries in journal()) {
        for b in compute_balances(&entries).unwrap() {
            prop_assert_eq!(b.balance, b.debit - b.credit);
        }
    }

    #[test]
    fn sections_sum_to_categorized_balances(entries in journal()) {
        let summary = LedgerSummary::from_entries(&entries).unwrap();
        let sections_total: Decimal = summary.sections.iter().map(|s| s.total).sum();
        let categorized_total: Decimal = summary
            .balances
            .iter()
            .filter(|b| AccountCategory::of(&b.account) != AccountCategory::Others)
            .map(|b| b.balance)
            .sum();
        prop_assert_eq!(sections_total, categorized_total);

        // accounts 801 and 901 stay in the flat list only, and the whole
        // journal still nets to zero
        let excluded: Decimal = summary.uncategorized().map(|b| b.balance).sum();
        prop_assert_eq!(sections_total + excluded, Decimal::ZERO);
    }
}

#[test]
fn largest_amounts_aggregate_without_overflow() {
    let entries: Vec<_> = (0..1000)
        .map(|i| entry(i, "512", "701", MAX_AMOUNT))
        .collect();
    validate_entries(&entries).unwrap();
    let summary = LedgerSummary::from_entries(&entries).unwrap();
    let bank = summary.balances.iter().find(|b| b.account == "512").unwrap();
    assert_eq!(bank.debit, MAX_AMOUNT * dec!(1000));
    assert_eq!(summary.trial_balance().unwrap(), (bank.debit, bank.debit));
}

#[test]
fn worked_examples() {
    let tva = compute_tva(dec!(1000000), dec!(300000));
    assert_eq!((tva.due, tva.credit, tva.amount), (dec!(700000), dec!(0), dec!(700000)));

    let css = compute_css(dec!(5000000), dec!(500000), DEFAULT_CSS_RATE);
    assert_eq!((css.taxable, css.amount), (dec!(4500000), dec!(144000)));

    let irpp = compute_irpp(dec!(6000000), dec!(1), &BracketSchedule::default()).unwrap();
    assert_eq!(irpp.amount, dec!(500000));

    let balances = compute_balances(&[
        entry(1, "512", "701", dec!(100000)),
        entry(2, "401", "512", dec!(40000)),
    ])
    .unwrap();
    let bank = balances.iter().find(|b| b.account == "512").unwrap();
    assert_eq!(
        (bank.debit, bank.credit, bank.balance),
        (dec!(100000), dec!(40000), dec!(60000))
    );
}
