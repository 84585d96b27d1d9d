//! Fee domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FEE_PCT, MAX_FEE_PCT};
use crate::errors::EngineError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Whole percent surcharge on the seller price (20 = 20%).
    pub fee_pct: u8,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            fee_pct: DEFAULT_FEE_PCT,
        }
    }
}

impl FeeConfig {
    pub fn new(fee_pct: u8) -> Result<Self, EngineError> {
        if fee_pct > MAX_FEE_PCT {
            return Err(EngineError::InvalidState(format!(
                "Fee percent cannot exceed {}",
                MAX_FEE_PCT
            )));
        }
        Ok(Self { fee_pct })
    }
}

/// Result of the fee calculator. Reproducible from (seller_price, fee_pct)
/// alone, so a recorded purchase price can always be audited against a
/// recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// The seller's ask, cent precision.
    pub seller_price: Decimal,
    /// Platform surcharge, cent precision.
    pub marketplace_fee: Decimal,
    /// Billed amount: seller price plus fee, rounded to a whole currency unit.
    pub customer_total: Decimal,
    /// What the seller keeps: the full ask under the additive model.
    pub seller_earnings: Decimal,
}

impl PriceBreakdown {
    /// Breakdown for free listings; the calculator itself is never consulted.
    pub fn zero() -> Self {
        Self {
            seller_price: Decimal::ZERO,
            marketplace_fee: Decimal::ZERO,
            customer_total: Decimal::ZERO,
            seller_earnings: Decimal::ZERO,
        }
    }
}
