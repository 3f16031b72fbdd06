// External contract interfaces for cross-contract calls
//
// `#[ext_contract]` generates helper structs that the compiler flags as dead_code
// even though they are used at runtime for cross-contract calls.
#![allow(dead_code)]

use near_sdk::json_types::U128;
use near_sdk::{ext_contract, AccountId};

use crate::types::{Listing, RoyaltyInfo};

/// Multi-quantity item contract interface (NEP-245 core + royalty lookup)
#[ext_contract(ext_mt_contract)]
pub trait ExtMtContract {
    /// Move `amount` units of `token_id` out of the caller's balance.
    fn mt_transfer(
        &mut self,
        receiver_id: AccountId,
        token_id: String,
        amount: U128,
        approval: Option<(AccountId, u64)>,
        memo: Option<String>,
    );

    /// Royalty owed for selling `token_id` at `sale_price`.
    /// Absent or failed answers mean no royalty leg.
    fn royalty_info(&self, token_id: String, sale_price: U128) -> Option<RoyaltyInfo>;
}

/// One-of-one item contract interface (NEP-171 core + royalty lookup)
#[ext_contract(ext_nft_contract)]
pub trait ExtNftContract {
    fn nft_transfer(
        &mut self,
        receiver_id: AccountId,
        token_id: String,
        approval_id: Option<u64>,
        memo: Option<String>,
    );

    fn royalty_info(&self, token_id: String, sale_price: U128) -> Option<RoyaltyInfo>;
}

/// Self callback interface
#[ext_contract(ext_self)]
pub trait ExtSelf {
    /// Resolve a purchase after the item transfer + royalty lookup.
    fn resolve_purchase(
        &mut self,
        listing: Listing,
        buyer_id: AccountId,
        quantity: U128,
        gross_amount: U128,
        deposit: U128,
    ) -> U128;

    /// Resolve a quantity withdrawal after the item transfer.
    fn resolve_withdraw(&mut self, listing: Listing, quantity: U128);
}
