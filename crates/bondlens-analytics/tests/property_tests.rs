//! Property-based tests for the valuation engine.
//!
//! - Zero-coupon round trip: pricing at `y` then solving recovers `y`
//! - Solving then re-pricing reproduces the market price
//! - Modified duration never exceeds Macaulay duration at non-negative yields

use approx::assert_relative_eq;
use bondlens_analytics::prelude::*;
use proptest::prelude::*;

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop::sample::select(Frequency::ALL.to_vec())
}

fn terms(coupon: f64, years: f64, frequency: Frequency, price: f64) -> BondTerms {
    BondTerms::builder()
        .name("Property")
        .face_value(1000.0)
        .coupon_rate(coupon)
        .years_to_maturity(years)
        .frequency(frequency)
        .market_price(price)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn zero_coupon_round_trip(
        y in -0.05..0.20_f64,
        years in 1u32..=30,
        frequency in frequency_strategy(),
    ) {
        let periods = years * frequency.periods_per_year();
        let y_p = y / frequency.as_f64();
        let price = 1000.0 / (1.0 + y_p).powi(periods as i32);

        let bond = BondValuation::new(terms(0.0, f64::from(years), frequency, price)).unwrap();

        prop_assert_eq!(bond.confidence(), YieldConfidence::Solved);
        prop_assert!((bond.ytm() - y).abs() < 1e-6, "ytm {} vs {}", bond.ytm(), y);
    }

    #[test]
    fn solve_then_price_reproduces_market(
        coupon in 0.0..0.12_f64,
        years in 1u32..=30,
        y in -0.05..0.30_f64,
        frequency in frequency_strategy(),
    ) {
        let pricer = terms(coupon, f64::from(years), frequency, 100.0);
        let market = pricer.price_at_yield(y);
        let bond = BondValuation::new(terms(coupon, f64::from(years), frequency, market)).unwrap();

        prop_assert!(!bond.is_low_confidence());
        prop_assert!((bond.price_at_yield(bond.ytm()) - market).abs() < 1e-4);
    }

    #[test]
    fn modified_duration_bounded_by_macaulay(
        coupon in 0.0..0.15_f64,
        years in 1u32..=40,
        y in 0.0..0.40_f64,
        frequency in frequency_strategy(),
    ) {
        let pricer = terms(coupon, f64::from(years), frequency, 100.0);
        let market = pricer.price_at_yield(y);
        let bond = BondValuation::new(terms(coupon, f64::from(years), frequency, market)).unwrap();

        prop_assert!(bond.macaulay_duration() > 0.0);
        prop_assert!(bond.modified_duration() > 0.0);
        prop_assert!(bond.modified_duration() <= bond.macaulay_duration() + 1e-12);
        prop_assert!(bond.convexity() > 0.0);
        prop_assert!(bond.dv01() > 0.0);
    }
}

#[test]
fn concrete_five_year_annual_bond() {
    let bond = BondValuation::new(terms(0.05, 5.0, Frequency::Annual, 1000.0)).unwrap();

    assert_relative_eq!(bond.ytm() * 100.0, 5.00, epsilon = 1e-6);
    assert_relative_eq!(bond.modified_duration(), 4.33, epsilon = 5e-3);
    assert_relative_eq!(bond.dv01(), 0.43, epsilon = 5e-3);
}

#[test]
fn longer_maturity_has_longer_duration() {
    let short = BondValuation::new(terms(0.05, 3.0, Frequency::SemiAnnual, 1000.0)).unwrap();
    let long = BondValuation::new(terms(0.05, 10.0, Frequency::SemiAnnual, 1000.0)).unwrap();

    assert!(long.modified_duration() > short.modified_duration());
    assert!(long.convexity() > short.convexity());
}

#[test]
fn valuation_is_rebuilt_on_new_price() {
    let original = BondValuation::new(terms(0.05, 5.0, Frequency::Annual, 1000.0)).unwrap();
    let repriced = BondValuation::new(original.terms().with_market_price(950.0).unwrap()).unwrap();

    assert!(repriced.ytm() > original.ytm());
    assert_relative_eq!(original.market_price(), 1000.0);
}
