//! Marketplace-wide constants.

use near_sdk::NearToken;

/// Default marketplace fee in basis points (400 = 4.0%).
/// Split evenly between the staking pool and the foundation treasury;
/// the foundation takes the odd unit.
pub const DEFAULT_MARKET_FEE_BPS: u16 = 400;

/// Hard cap on the marketplace fee (1000 = 10%).
pub const MAX_MARKET_FEE_BPS: u16 = 1_000;

/// Basis points denominator (10,000 = 100%)
pub const BASIS_POINTS: u16 = 10_000;

/// Maximum token ID length accepted from item contracts
pub const MAX_TOKEN_ID_LEN: usize = 256;

/// 1 yocto, attached to owner-gated calls and outgoing item transfers
pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

// Gas constants (TGas)
pub const DEFAULT_ITEM_TRANSFER_GAS: u64 = 50;
pub const DEFAULT_ROYALTY_INFO_GAS: u64 = 10;
pub const DEFAULT_RESOLVE_GAS: u64 = 60;
