// Borsh-encoded Events for Substreams Indexing
// Provides efficient event emission with binary serialization

use near_sdk::borsh::BorshSerialize;
use near_sdk::json_types::U128;
use near_sdk::{base64::Engine, env, near, AccountId};
use std::cell::Cell;

// --- Constants ---

const EVENT_STANDARD: &str = "marketplace";
const EVENT_VERSION: &str = "1.0.0";
const EVENT_PREFIX: &str = "EVENT:";

// --- Thread-local log index for unique event IDs within a transaction ---
thread_local! {
    static LOG_INDEX: Cell<u32> = Cell::new(0);
}

/// Get the next log index for the current transaction
fn get_next_log_index() -> u32 {
    LOG_INDEX.with(|idx| {
        let current = idx.get();
        idx.set(current + 1);
        current
    })
}

// --- Event Data Structures ---

/// Marketplace event data variants for different operations
#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub enum MarketEventData {
    ItemListed {
        owner_id: String,
        item_contract_id: String,
        token_id: String,
        listing_id: u64,
        quantity: String, // Amounts stored as strings for consistency
        unit_price: String,
    },
    QuantityAdded {
        owner_id: String,
        listing_id: u64,
        quantity: String,
    },
    QuantityRemoved {
        owner_id: String,
        listing_id: u64,
        quantity: String,
        delisted: bool,
    },
    PriceUpdated {
        owner_id: String,
        listing_id: u64,
        old_price: String,
        new_price: String,
    },
    ItemPurchased {
        buyer_id: String,
        seller_id: String,
        item_contract_id: String,
        token_id: String,
        listing_id: u64,
        quantity: String,
        gross_amount: String,
        platform_fee: String,
    },
    PurchaseFailed {
        buyer_id: String,
        seller_id: String,
        listing_id: u64,
        attempted_amount: String,
        reason: String,
    },
    WithdrawFailed {
        owner_id: String,
        listing_id: u64,
        quantity: String,
        reason: String,
    },
    FeeConfigUpdated {
        owner_id: String,
        market_fee_bps: u16,
    },
    FeeRecipientsChanged {
        owner_id: String,
        staking_pool: String,
        foundation: String,
    },
    ItemContractApproved {
        owner_id: String,
        item_contract_id: String,
    },
    ItemContractRemoved {
        owner_id: String,
        item_contract_id: String,
    },
    OwnerTransferred {
        old_owner_id: String,
        new_owner_id: String,
    },
    ContractUpgraded {
        account_id: String,
        old_version: String,
        new_version: String,
    },
}

/// Main marketplace event structure
#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct MarketEvent {
    pub evt_standard: String,
    pub version: String,
    pub evt_type: String,
    pub evt_id: String,
    pub log_index: u32,
    pub block_height: u64,
    pub timestamp: u64,
    pub data: MarketEventData,
}

// --- Helper Functions ---

/// Generate a unique event ID for Substreams tracking
/// Format: {event_type}-{account}-{block_height}-{timestamp}-{log_index}
fn generate_event_id(event_type: &str, account_id: &AccountId, log_index: u32) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        event_type,
        account_id,
        env::block_height(),
        env::block_timestamp(),
        log_index
    )
}

fn new_event(evt_type: &str, account_id: &AccountId, data: MarketEventData) -> MarketEvent {
    let log_index = get_next_log_index();
    MarketEvent {
        evt_standard: EVENT_STANDARD.to_string(),
        version: EVENT_VERSION.to_string(),
        evt_type: evt_type.to_string(),
        evt_id: generate_event_id(evt_type, account_id, log_index),
        log_index,
        block_height: env::block_height(),
        timestamp: env::block_timestamp(),
        data,
    }
}

// --- Emit helpers ---

pub fn emit_item_listed(
    owner_id: &AccountId,
    item_contract_id: &AccountId,
    token_id: &str,
    listing_id: u64,
    quantity: U128,
    unit_price: U128,
) {
    emit_borsh_event(new_event(
        "item_listed",
        owner_id,
        MarketEventData::ItemListed {
            owner_id: owner_id.to_string(),
            item_contract_id: item_contract_id.to_string(),
            token_id: token_id.to_string(),
            listing_id,
            quantity: quantity.0.to_string(),
            unit_price: unit_price.0.to_string(),
        },
    ));
}

pub fn emit_quantity_added(owner_id: &AccountId, listing_id: u64, quantity: U128) {
    emit_borsh_event(new_event(
        "quantity_added",
        owner_id,
        MarketEventData::QuantityAdded {
            owner_id: owner_id.to_string(),
            listing_id,
            quantity: quantity.0.to_string(),
        },
    ));
}

pub fn emit_quantity_removed(owner_id: &AccountId, listing_id: u64, quantity: U128, delisted: bool) {
    emit_borsh_event(new_event(
        "quantity_removed",
        owner_id,
        MarketEventData::QuantityRemoved {
            owner_id: owner_id.to_string(),
            listing_id,
            quantity: quantity.0.to_string(),
            delisted,
        },
    ));
}

pub fn emit_price_updated(owner_id: &AccountId, listing_id: u64, old_price: U128, new_price: U128) {
    emit_borsh_event(new_event(
        "price_updated",
        owner_id,
        MarketEventData::PriceUpdated {
            owner_id: owner_id.to_string(),
            listing_id,
            old_price: old_price.0.to_string(),
            new_price: new_price.0.to_string(),
        },
    ));
}

#[allow(clippy::too_many_arguments)]
pub fn emit_item_purchased(
    buyer_id: &AccountId,
    seller_id: &AccountId,
    item_contract_id: &AccountId,
    token_id: &str,
    listing_id: u64,
    quantity: U128,
    gross_amount: U128,
    platform_fee: U128,
) {
    emit_borsh_event(new_event(
        "item_purchased",
        buyer_id,
        MarketEventData::ItemPurchased {
            buyer_id: buyer_id.to_string(),
            seller_id: seller_id.to_string(),
            item_contract_id: item_contract_id.to_string(),
            token_id: token_id.to_string(),
            listing_id,
            quantity: quantity.0.to_string(),
            gross_amount: gross_amount.0.to_string(),
            platform_fee: platform_fee.0.to_string(),
        },
    ));
}

pub fn emit_purchase_failed(
    buyer_id: &AccountId,
    seller_id: &AccountId,
    listing_id: u64,
    attempted_amount: U128,
    reason: &str,
) {
    emit_borsh_event(new_event(
        "purchase_failed",
        buyer_id,
        MarketEventData::PurchaseFailed {
            buyer_id: buyer_id.to_string(),
            seller_id: seller_id.to_string(),
            listing_id,
            attempted_amount: attempted_amount.0.to_string(),
            reason: reason.to_string(),
        },
    ));
}

pub fn emit_withdraw_failed(owner_id: &AccountId, listing_id: u64, quantity: U128, reason: &str) {
    emit_borsh_event(new_event(
        "withdraw_failed",
        owner_id,
        MarketEventData::WithdrawFailed {
            owner_id: owner_id.to_string(),
            listing_id,
            quantity: quantity.0.to_string(),
            reason: reason.to_string(),
        },
    ));
}

pub fn emit_fee_config_updated(owner_id: &AccountId, market_fee_bps: u16) {
    emit_borsh_event(new_event(
        "fee_config_updated",
        owner_id,
        MarketEventData::FeeConfigUpdated {
            owner_id: owner_id.to_string(),
            market_fee_bps,
        },
    ));
}

pub fn emit_fee_recipients_changed(
    owner_id: &AccountId,
    staking_pool: &AccountId,
    foundation: &AccountId,
) {
    emit_borsh_event(new_event(
        "fee_recipients_changed",
        owner_id,
        MarketEventData::FeeRecipientsChanged {
            owner_id: owner_id.to_string(),
            staking_pool: staking_pool.to_string(),
            foundation: foundation.to_string(),
        },
    ));
}

pub fn emit_item_contract_approved(owner_id: &AccountId, item_contract_id: &AccountId) {
    emit_borsh_event(new_event(
        "item_contract_approved",
        owner_id,
        MarketEventData::ItemContractApproved {
            owner_id: owner_id.to_string(),
            item_contract_id: item_contract_id.to_string(),
        },
    ));
}

pub fn emit_item_contract_removed(owner_id: &AccountId, item_contract_id: &AccountId) {
    emit_borsh_event(new_event(
        "item_contract_removed",
        owner_id,
        MarketEventData::ItemContractRemoved {
            owner_id: owner_id.to_string(),
            item_contract_id: item_contract_id.to_string(),
        },
    ));
}

pub fn emit_owner_transferred(old_owner_id: &AccountId, new_owner_id: &AccountId) {
    emit_borsh_event(new_event(
        "owner_transferred",
        old_owner_id,
        MarketEventData::OwnerTransferred {
            old_owner_id: old_owner_id.to_string(),
            new_owner_id: new_owner_id.to_string(),
        },
    ));
}

pub fn emit_contract_upgraded(account_id: &AccountId, old_version: &str, new_version: &str) {
    emit_borsh_event(new_event(
        "contract_upgraded",
        account_id,
        MarketEventData::ContractUpgraded {
            account_id: account_id.to_string(),
            old_version: old_version.to_string(),
            new_version: new_version.to_string(),
        },
    ));
}

/// Internal helper to emit Borsh-encoded events with base64 encoding
fn emit_borsh_event(event: MarketEvent) {
    // Serialize to Borsh format
    let mut buffer = Vec::new();
    event
        .serialize(&mut buffer)
        .expect("Failed to serialize event");

    // Calculate capacity for base64 encoding
    let encoded_len = buffer.len().div_ceil(3) * 4;
    let mut log_str = String::with_capacity(EVENT_PREFIX.len() + encoded_len);

    // Add prefix and base64-encode the Borsh data
    log_str.push_str(EVENT_PREFIX);
    near_sdk::base64::engine::general_purpose::STANDARD.encode_string(&buffer, &mut log_str);

    // Emit the log
    env::log_str(&log_str);
}
