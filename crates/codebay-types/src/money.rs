//! Money arithmetic helpers.
//!
//! Amounts are `rust_decimal::Decimal` with cent precision everywhere in
//! storage; whole-unit rounding happens only at the billing boundary, and
//! minor-unit (cent) conversion only at the processor boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// ISO currency of a listing or settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Lowercase ISO 4217 code, as the processor wire format expects.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "eur" => Ok(Self::Eur),
            "gbp" => Ok(Self::Gbp),
            other => Err(TypesError::InvalidCurrency(other.to_string())),
        }
    }
}

/// Round to the nearest whole currency unit, half away from zero.
pub fn round_to_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a cent-precision amount to processor minor units (cents).
///
/// Rejects negative amounts and amounts with sub-cent precision rather than
/// silently rounding: a caller that got here with either has a bug upstream.
pub fn to_minor_units(amount: Decimal) -> Result<i64, TypesError> {
    if amount.is_sign_negative() {
        return Err(TypesError::InvalidAmount(format!(
            "negative amount: {amount}"
        )));
    }
    let minor = amount * Decimal::ONE_HUNDRED;
    if minor.fract() != Decimal::ZERO {
        return Err(TypesError::InvalidAmount(format!(
            "sub-cent precision: {amount}"
        )));
    }
    minor
        .to_i64()
        .ok_or_else(|| TypesError::InvalidAmount(format!("amount out of range: {amount}")))
}

/// Convert processor minor units (cents) back to a decimal amount.
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}
