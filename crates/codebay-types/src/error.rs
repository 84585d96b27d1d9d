/// Validation error for shared value types.
#[derive(Debug, Clone)]
pub enum TypesError {
    InvalidAmount(String),
    InvalidCurrency(String),
    InvalidId(String),
}

impl std::fmt::Display for TypesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(msg) => write!(f, "invalid amount: {msg}"),
            Self::InvalidCurrency(msg) => write!(f, "invalid currency: {msg}"),
            Self::InvalidId(msg) => write!(f, "invalid id: {msg}"),
        }
    }
}

impl std::error::Error for TypesError {}
