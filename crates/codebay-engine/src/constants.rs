//! Marketplace-wide constants.

/// Default platform fee surcharge, in whole percent (20 = 20%).
/// Applied additively on top of the seller's asking price; the seller keeps
/// the full ask.
pub const DEFAULT_FEE_PCT: u8 = 20;

/// Upper bound on the configurable fee percent.
pub const MAX_FEE_PCT: u8 = 100;

/// Maximum project title length.
pub const MAX_TITLE_LEN: usize = 140;

/// Maximum project description length.
pub const MAX_DESCRIPTION_LEN: usize = 5_000;

/// Maximum number of tags per project.
pub const MAX_TAGS: usize = 10;

/// Maximum length of a single tag.
pub const MAX_TAG_LEN: usize = 32;

/// Maximum number of entries in one feature disclosure list.
pub const MAX_FEATURES: usize = 50;

/// Maximum length of a single feature entry.
pub const MAX_FEATURE_LEN: usize = 200;

/// Maximum repository / demo URL length.
pub const MAX_URL_LEN: usize = 2_048;
