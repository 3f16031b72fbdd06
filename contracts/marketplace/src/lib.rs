//! Multi-item marketplace: custody-based listings of fungible-collection
//! items, partial buys, and fee-split settlement between seller, optional
//! royalty recipient, staking pool, and foundation treasury.

use near_sdk::json_types::U128;
use near_sdk::store::{IterableSet, LookupMap, TreeMap};
use near_sdk::{
    env, near, AccountId, BorshStorageKey, Gas, NearToken, PanicOnDefault, Promise, PromiseOrValue,
};

// --- Modules ---

mod admin;
pub mod constants;
mod errors;
mod events;
mod external;
mod fees;
mod internal;
mod listing;
mod purchase;
pub mod types;
mod views;


pub use constants::*;
pub use errors::MarketError;
pub use types::*;

// --- Storage Keys ---

#[near]
#[derive(BorshStorageKey)]
pub enum StorageKey {
    Listings,
    ByOwnerId,
    ByOwnerIdInner { account_id_hash: Vec<u8> },
    ApprovedItemContracts,
}

// --- Contract State ---

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// From Cargo.toml; updated on each migration.
    pub version: String,

    pub owner_id: AccountId,
    /// Receives half of every marketplace fee.
    pub staking_pool: AccountId,
    /// Receives the other half, plus the odd unit when the fee is odd.
    pub foundation: AccountId,
    pub fee_config: FeeConfig,

    /// Live listings. Ids are monotonic, so ascending key order is insertion
    /// order and interior deletions never reorder the survivors.
    pub listings: TreeMap<u64, Listing>,
    pub by_owner_id: LookupMap<AccountId, IterableSet<u64>>,
    /// Next listing id; never reused, even after deletion.
    pub next_listing_id: u64,

    /// Item contracts allowed to create listings via `*_on_transfer`.
    pub approved_item_contracts: IterableSet<AccountId>,
}
