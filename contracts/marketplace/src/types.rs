use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

use crate::constants::*;

// --- Enums ---

/// Item-transfer protocol spoken by the contract backing a listing.
/// Immutable after listing creation.
#[near(serializers = [borsh, json])]
#[serde(rename_all = "snake_case")]
#[derive(Clone, Debug, PartialEq)]
pub enum ItemProtocol {
    /// Multi-quantity token contract; quantities move in one batch call.
    MultiToken,
    /// One-of-one token contract; the listing holds exactly one unit.
    SingleToken,
}

/// Instruction carried in the `msg` of `mt_transfer_call` / `nft_transfer_call`.
#[near(serializers = [json])]
#[serde(rename_all = "snake_case")]
#[derive(Clone)]
pub enum TransferCallMessage {
    /// Create a new listing holding the transferred quantity.
    List { unit_price: U128 },
    /// Top up an existing listing owned by the sender.
    AddQuantity { listing_id: u64 },
}

// --- Structs ---

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct Listing {
    /// Monotonically assigned; never reused after deletion.
    pub listing_id: u64,
    pub owner_id: AccountId,
    /// Item contract holding the custody-side balance for this listing.
    pub item_contract_id: AccountId,
    /// Item kind within `item_contract_id`. Immutable after creation.
    pub token_id: String,
    pub protocol: ItemProtocol,
    /// Units currently held in custody. Strictly positive while the listing exists.
    pub quantity: U128,
    /// Payment per unit (yoctoNEAR).
    pub unit_price: U128,
    /// Nanoseconds.
    pub created_at: u64,
}

/// Royalty answer from an item contract: an absolute amount owed to
/// `recipient` for the queried sale price.
#[near(serializers = [json])]
#[derive(Clone)]
pub struct RoyaltyInfo {
    pub recipient: AccountId,
    pub amount: U128,
}

// --- Fee types ---

#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct FeeConfig {
    /// 400 = 4.0%. Split evenly between staking pool and foundation;
    /// the foundation takes the odd unit.
    pub market_fee_bps: u16,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            market_fee_bps: DEFAULT_MARKET_FEE_BPS,
        }
    }
}
