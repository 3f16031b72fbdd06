//! Typed error handling for the marketplace contract.
//!
//! Uses `#[derive(near_sdk::FunctionError)]` from the NEAR SDK to enable
//! `#[handle_result]` on public methods. When a method returns
//! `Err(MarketError::Xxx)`, the SDK calls `env::panic_str()` with the
//! Display message; same on-wire behaviour as raw panics, but with
//! structured, testable code.

use near_sdk_macros::NearSchema;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum MarketError {
    /// Caller lacks permission (wrong owner, unapproved item contract, etc.)
    Unauthorized(String),
    /// Requested listing or entity does not exist.
    NotFound(String),
    /// Zero quantity, or a quantity exceeding what the listing holds.
    InvalidQuantity(String),
    /// Item kind does not match the one the listing was created with.
    KindMismatch(String),
    /// Invalid parameters, IDs, or data from the caller.
    InvalidInput(String),
    /// Attached deposit is too low.
    InsufficientDeposit(String),
    /// The payment or item ledger rejected a transfer.
    ExternalTransferFailed(String),
    /// Fee or recipient configuration rejected at setup.
    ConfigurationError(String),
}

impl std::fmt::Display for MarketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidQuantity(msg) => write!(f, "Invalid quantity: {}", msg),
            Self::KindMismatch(msg) => write!(f, "Kind mismatch: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::InsufficientDeposit(msg) => write!(f, "Insufficient deposit: {}", msg),
            Self::ExternalTransferFailed(msg) => write!(f, "External transfer failed: {}", msg),
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

// ── Factory helpers for common errors ────────────────────────────────────────

impl MarketError {
    pub fn listing_not_found() -> Self {
        Self::NotFound("Listing not found".into())
    }
    pub fn zero_price() -> Self {
        Self::InvalidInput("Price must be greater than 0".into())
    }
    pub fn only_owner(what: &str) -> Self {
        Self::Unauthorized(format!("Only {} can perform this action", what))
    }
}
