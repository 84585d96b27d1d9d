use rust_decimal_macros::dec;

use crate::{compute_breakdown, EngineError, FeeConfig, PriceBreakdown};

// --- Breakdown ---

#[test]
fn breakdown_additive_example() {
    let b = compute_breakdown(dec!(25.00), 20).unwrap();
    assert_eq!(b.seller_price, dec!(25.00));
    assert_eq!(b.marketplace_fee, dec!(5.00));
    assert_eq!(b.customer_total, dec!(30));
    assert_eq!(b.seller_earnings, dec!(25.00));
}

#[test]
fn customer_total_rounds_to_whole_unit() {
    // 24.99 + 5.00 (20% of 24.99 = 4.998 -> 5.00) = 29.99 -> 30
    let b = compute_breakdown(dec!(24.99), 20).unwrap();
    assert_eq!(b.marketplace_fee, dec!(5.00));
    assert_eq!(b.customer_total, dec!(30));
}

#[test]
fn fee_keeps_cent_precision() {
    let b = compute_breakdown(dec!(10.10), 20).unwrap();
    assert_eq!(b.marketplace_fee, dec!(2.02));
    assert_eq!(b.customer_total, dec!(12));
}

#[test]
fn zero_price_all_outputs_zero() {
    let b = compute_breakdown(dec!(0), 20).unwrap();
    assert_eq!(b, PriceBreakdown::zero());
}

#[test]
fn seller_always_keeps_full_ask() {
    for price in [dec!(0.01), dec!(1), dec!(19.99), dec!(250), dec!(9999.99)] {
        let b = compute_breakdown(price, 20).unwrap();
        assert_eq!(b.seller_earnings, price);
        assert!(b.customer_total >= price);
    }
}

#[test]
fn negative_price_rejected_not_clamped() {
    let err = compute_breakdown(dec!(-1.00), 20).unwrap_err();
    assert!(matches!(err, EngineError::InvalidPrice(_)));
}

#[test]
fn sub_cent_price_rejected() {
    let err = compute_breakdown(dec!(1.005), 20).unwrap_err();
    assert!(matches!(err, EngineError::InvalidPrice(_)));
}

#[test]
fn breakdown_is_reproducible() {
    let a = compute_breakdown(dec!(42.50), 20).unwrap();
    let b = compute_breakdown(dec!(42.50), 20).unwrap();
    assert_eq!(a, b);
}

// --- Fee config ---

#[test]
fn default_fee_is_twenty_percent() {
    assert_eq!(FeeConfig::default().fee_pct, 20);
}

#[test]
fn fee_config_rejects_over_hundred() {
    assert!(FeeConfig::new(101).is_err());
    assert_eq!(FeeConfig::new(100).unwrap().fee_pct, 100);
}
