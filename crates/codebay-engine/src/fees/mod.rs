//! Fee and pricing helpers: price breakdowns under the additive platform fee.

mod breakdown;
pub mod types;

pub use breakdown::compute_breakdown;
pub use types::{FeeConfig, PriceBreakdown};
