//! The fee calculator: pure, deterministic, no side effects.

use codebay_types::round_to_unit;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::PriceBreakdown;
use crate::errors::EngineError;

/// Compute the customer-facing price breakdown for a seller ask.
///
/// Additive model: the platform fee is a surcharge the buyer pays on top;
/// the seller keeps the full ask. The billed `customer_total` rounds to a
/// whole currency unit; the fee itself keeps cent precision.
///
/// Negative prices are rejected, never clamped.
pub fn compute_breakdown(seller_price: Decimal, fee_pct: u8) -> Result<PriceBreakdown, EngineError> {
    if seller_price.is_sign_negative() {
        return Err(EngineError::InvalidPrice(format!(
            "Seller price cannot be negative: {}",
            seller_price
        )));
    }
    if seller_price.round_dp(2) != seller_price {
        return Err(EngineError::InvalidPrice(format!(
            "Seller price has sub-cent precision: {}",
            seller_price
        )));
    }

    let marketplace_fee = (seller_price * Decimal::from(fee_pct) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let customer_total = round_to_unit(seller_price + marketplace_fee);

    Ok(PriceBreakdown {
        seller_price,
        marketplace_fee,
        customer_total,
        seller_earnings: seller_price,
    })
}
