//! Shared types and pure-logic utilities for the Codebay marketplace.
//!
//! Keeps identifier newtypes and money arithmetic in one dependency-light
//! crate so the engine and the gateway agree on wire and storage shapes.

pub mod error;
pub mod ids;
pub mod money;

pub use error::TypesError;
pub use ids::{ConnectAccountId, IntentId, ProjectId, PurchaseId, UserId};
pub use money::{from_minor_units, round_to_unit, to_minor_units, Currency};
