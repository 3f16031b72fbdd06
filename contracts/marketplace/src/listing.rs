//! Listing lifecycle: custody intake via transfer-call hooks, price updates,
//! and quantity withdrawal.
//!
//! Listings are created and topped up from inside the item contract's
//! `*_transfer_call` receipt: custody transfer and registry write either both
//! happen, or this hook errors and the item contract rolls the transfer back
//! with nothing recorded.

use near_sdk::PromiseResult;

use crate::external::*;
use crate::internal::*;
use crate::*;

#[near]
impl Contract {
    /// NEP-245 receiver hook. An approved multi-token contract moves quantity
    /// into marketplace custody and invokes this with a `TransferCallMessage`.
    #[handle_result]
    pub fn mt_on_transfer(
        &mut self,
        sender_id: AccountId,
        previous_owner_ids: Vec<AccountId>,
        token_ids: Vec<String>,
        amounts: Vec<U128>,
        msg: String,
    ) -> Result<PromiseOrValue<Vec<U128>>, MarketError> {
        let item_contract_id = env::predecessor_account_id();
        self.check_approved_item_contract(&item_contract_id)?;

        let (owner_id, token_id, amount) =
            match (&previous_owner_ids[..], &token_ids[..], &amounts[..]) {
                ([owner], [token], [amount]) => (owner.clone(), token.clone(), amount.0),
                _ => {
                    return Err(MarketError::InvalidInput(
                        "Exactly one token kind per transfer".into(),
                    ))
                }
            };
        if sender_id != owner_id {
            return Err(MarketError::Unauthorized(
                "Operator-initiated listings are not supported".into(),
            ));
        }

        match near_sdk::serde_json::from_str::<TransferCallMessage>(&msg) {
            Ok(TransferCallMessage::List { unit_price }) => {
                let listing_id = self.internal_add_listing(
                    owner_id.clone(),
                    item_contract_id.clone(),
                    token_id.clone(),
                    ItemProtocol::MultiToken,
                    amount,
                    unit_price.0,
                )?;
                events::emit_item_listed(
                    &owner_id,
                    &item_contract_id,
                    &token_id,
                    listing_id,
                    U128(amount),
                    unit_price,
                );
            }
            Ok(TransferCallMessage::AddQuantity { listing_id }) => {
                self.internal_increase_quantity(
                    listing_id,
                    amount,
                    &owner_id,
                    &item_contract_id,
                    &token_id,
                )?;
                events::emit_quantity_added(&owner_id, listing_id, U128(amount));
            }
            Err(_) => {
                return Err(MarketError::InvalidInput(
                    "Unparseable transfer-call message".into(),
                ))
            }
        }

        // All transferred units are consumed by the listing.
        Ok(PromiseOrValue::Value(vec![U128(0)]))
    }

    /// NEP-171 receiver hook; creates single-unit listings. Returning `false`
    /// keeps the token in custody.
    #[handle_result]
    pub fn nft_on_transfer(
        &mut self,
        sender_id: AccountId,
        previous_owner_id: AccountId,
        token_id: String,
        msg: String,
    ) -> Result<PromiseOrValue<bool>, MarketError> {
        let item_contract_id = env::predecessor_account_id();
        self.check_approved_item_contract(&item_contract_id)?;
        if sender_id != previous_owner_id {
            return Err(MarketError::Unauthorized(
                "Operator-initiated listings are not supported".into(),
            ));
        }

        match near_sdk::serde_json::from_str::<TransferCallMessage>(&msg) {
            Ok(TransferCallMessage::List { unit_price }) => {
                let listing_id = self.internal_add_listing(
                    previous_owner_id.clone(),
                    item_contract_id.clone(),
                    token_id.clone(),
                    ItemProtocol::SingleToken,
                    1,
                    unit_price.0,
                )?;
                events::emit_item_listed(
                    &previous_owner_id,
                    &item_contract_id,
                    &token_id,
                    listing_id,
                    U128(1),
                    unit_price,
                );
            }
            Ok(TransferCallMessage::AddQuantity { .. }) => {
                return Err(MarketError::InvalidQuantity(
                    "Single-token listings hold exactly one unit".into(),
                ))
            }
            Err(_) => {
                return Err(MarketError::InvalidInput(
                    "Unparseable transfer-call message".into(),
                ))
            }
        }

        Ok(PromiseOrValue::Value(false))
    }

    /// Panics if attached deposit != 1 yoctoNEAR.
    #[payable]
    #[handle_result]
    pub fn update_my_listing_price(
        &mut self,
        listing_id: u64,
        new_price: U128,
    ) -> Result<(), MarketError> {
        check_one_yocto()?;
        let caller = env::predecessor_account_id();
        self.internal_update_price(&caller, listing_id, new_price)
    }

    /// Withdraw `quantity` units of a listing back to the caller; deletes the
    /// listing on exact exhaustion. Panics if attached deposit != 1 yoctoNEAR.
    #[payable]
    #[handle_result]
    pub fn remove_my_listing_amount(
        &mut self,
        listing_id: u64,
        quantity: U128,
    ) -> Result<Promise, MarketError> {
        check_one_yocto()?;
        let caller = env::predecessor_account_id();

        let listing = self.internal_get_listing(listing_id)?;
        check_listing_owner(listing, &caller)?;

        // Registry shrinks before the transfer goes out; resolve_withdraw
        // restores it if the item contract rejects.
        let snapshot = self.internal_decrease_quantity(listing_id, quantity.0)?;

        Ok(self
            .item_transfer_promise(&snapshot, &caller, quantity)
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(DEFAULT_RESOLVE_GAS))
                    .resolve_withdraw(snapshot, quantity),
            ))
    }

    /// Only callable by this contract. Safety: must not panic; a failed item
    /// transfer is logged and rolled back.
    #[private]
    pub fn resolve_withdraw(&mut self, listing: Listing, quantity: U128) {
        #[allow(deprecated)]
        let transfer_ok = matches!(env::promise_result(0), PromiseResult::Successful(_));
        self.internal_finalize_withdraw(&listing, quantity.0, transfer_ok);
    }
}

// ── Internal listing helpers ─────────────────────────────────────────────────

impl Contract {
    // Shared by withdraw and purchase: protocol-dispatched item transfer.
    pub(crate) fn item_transfer_promise(
        &self,
        listing: &Listing,
        receiver_id: &AccountId,
        quantity: U128,
    ) -> Promise {
        match listing.protocol {
            ItemProtocol::MultiToken => ext_mt_contract::ext(listing.item_contract_id.clone())
                .with_static_gas(Gas::from_tgas(DEFAULT_ITEM_TRANSFER_GAS))
                .with_attached_deposit(ONE_YOCTO)
                .mt_transfer(
                    receiver_id.clone(),
                    listing.token_id.clone(),
                    quantity,
                    None,
                    None,
                ),
            ItemProtocol::SingleToken => ext_nft_contract::ext(listing.item_contract_id.clone())
                .with_static_gas(Gas::from_tgas(DEFAULT_ITEM_TRANSFER_GAS))
                .with_attached_deposit(ONE_YOCTO)
                .nft_transfer(receiver_id.clone(), listing.token_id.clone(), None, None),
        }
    }

    // Pure registry mutation; no external effects.
    pub(crate) fn internal_update_price(
        &mut self,
        caller: &AccountId,
        listing_id: u64,
        new_price: U128,
    ) -> Result<(), MarketError> {
        let listing = self.internal_get_listing(listing_id)?;
        check_listing_owner(listing, caller)?;
        if new_price.0 == 0 {
            return Err(MarketError::zero_price());
        }
        let old_price = listing.unit_price;

        let listing = self
            .listings
            .get_mut(&listing_id)
            .ok_or_else(MarketError::listing_not_found)?;
        listing.unit_price = new_price;

        events::emit_price_updated(caller, listing_id, old_price, new_price);
        Ok(())
    }

    // Rollback half of the withdraw flow; `transfer_ok` is the item-transfer outcome.
    pub(crate) fn internal_finalize_withdraw(
        &mut self,
        listing: &Listing,
        quantity: u128,
        transfer_ok: bool,
    ) {
        if transfer_ok {
            let delisted = !self.listings.contains_key(&listing.listing_id);
            events::emit_quantity_removed(
                &listing.owner_id,
                listing.listing_id,
                U128(quantity),
                delisted,
            );
            return;
        }

        self.internal_restore_listing(listing, quantity);
        env::log_str(&format!(
            "WARN: withdraw of {} units from listing {} failed; quantity restored",
            quantity, listing.listing_id
        ));
        events::emit_withdraw_failed(
            &listing.owner_id,
            listing.listing_id,
            U128(quantity),
            "item_transfer_failed",
        );
    }
}
