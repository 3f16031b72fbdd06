//! Purchase flow: validation, fee split, and all-or-nothing settlement.

use near_sdk::PromiseResult;

use crate::external::*;
use crate::internal::*;
use crate::*;

#[near]
impl Contract {
    /// Buy `quantity` units of a listing. Attach at least
    /// `unit_price * quantity`; excess is refunded. The item transfer settles
    /// first; payment legs go out only after it succeeds.
    #[payable]
    #[handle_result]
    pub fn buy_item(&mut self, listing_id: u64, quantity: U128) -> Result<Promise, MarketError> {
        let buyer_id = env::predecessor_account_id();
        let deposit = env::attached_deposit().as_yoctonear();

        let listing = self.internal_get_listing(listing_id)?;
        if buyer_id == listing.owner_id {
            return Err(MarketError::InvalidInput(
                "Cannot purchase your own listing".into(),
            ));
        }
        if quantity.0 == 0 || quantity.0 > listing.quantity.0 {
            return Err(MarketError::InvalidQuantity(format!(
                "Cannot buy {} of {} listed units",
                quantity.0, listing.quantity.0
            )));
        }
        let gross_amount = listing
            .unit_price
            .0
            .checked_mul(quantity.0)
            .ok_or_else(|| MarketError::InvalidInput("Total price overflow".into()))?;
        if deposit < gross_amount {
            return Err(MarketError::InsufficientDeposit(format!(
                "Attached deposit {} is less than total price {}",
                deposit, gross_amount
            )));
        }

        // Registry shrinks before the item moves; resolve_purchase restores
        // it and refunds the buyer if the item contract rejects.
        let snapshot = self.internal_decrease_quantity(listing_id, quantity.0)?;

        Ok(self
            .item_transfer_promise(&snapshot, &buyer_id, quantity)
            .and(self.royalty_info_promise(&snapshot, U128(gross_amount)))
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(DEFAULT_RESOLVE_GAS))
                    .resolve_purchase(
                        snapshot,
                        buyer_id,
                        quantity,
                        U128(gross_amount),
                        U128(deposit),
                    ),
            ))
    }

    /// Only callable by this contract. Safety: must not panic; the item
    /// transfer may already be final and a panic here would forfeit settlement.
    /// The listing snapshot is passed explicitly because the registry entry
    /// shrank (or vanished) before this fires.
    #[private]
    pub fn resolve_purchase(
        &mut self,
        listing: Listing,
        buyer_id: AccountId,
        quantity: U128,
        gross_amount: U128,
        deposit: U128,
    ) -> U128 {
        #[allow(deprecated)]
        let transfer_ok = env::promise_results_count() == 2
            && matches!(env::promise_result(0), PromiseResult::Successful(_));

        #[allow(deprecated)]
        let royalty = if env::promise_results_count() == 2 {
            match env::promise_result(1) {
                PromiseResult::Successful(bytes) => {
                    near_sdk::serde_json::from_slice::<Option<RoyaltyInfo>>(&bytes)
                        .unwrap_or_default()
                }
                _ => None,
            }
        } else {
            None
        };

        U128(self.internal_finalize_purchase(
            &listing,
            &buyer_id,
            quantity.0,
            gross_amount.0,
            deposit.0,
            transfer_ok,
            royalty,
        ))
    }
}

// ── Settlement ───────────────────────────────────────────────────────────────

impl Contract {
    fn royalty_info_promise(&self, listing: &Listing, sale_price: U128) -> Promise {
        match listing.protocol {
            ItemProtocol::MultiToken => ext_mt_contract::ext(listing.item_contract_id.clone())
                .with_static_gas(Gas::from_tgas(DEFAULT_ROYALTY_INFO_GAS))
                .royalty_info(listing.token_id.clone(), sale_price),
            ItemProtocol::SingleToken => ext_nft_contract::ext(listing.item_contract_id.clone())
                .with_static_gas(Gas::from_tgas(DEFAULT_ROYALTY_INFO_GAS))
                .royalty_info(listing.token_id.clone(), sale_price),
        }
    }

    // Settlement half of the buy flow; `transfer_ok` is the item-transfer outcome.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn internal_finalize_purchase(
        &mut self,
        listing: &Listing,
        buyer_id: &AccountId,
        quantity: u128,
        gross_amount: u128,
        deposit: u128,
        transfer_ok: bool,
        royalty: Option<RoyaltyInfo>,
    ) -> u128 {
        if !transfer_ok {
            self.internal_restore_listing(listing, quantity);
            if deposit > 0 {
                let _ =
                    Promise::new(buyer_id.clone()).transfer(NearToken::from_yoctonear(deposit));
            }
            events::emit_purchase_failed(
                buyer_id,
                &listing.owner_id,
                listing.listing_id,
                U128(gross_amount),
                &MarketError::ExternalTransferFailed(
                    "Item contract rejected the transfer".into(),
                )
                .to_string(),
            );
            return 0;
        }

        let had_royalty = royalty.as_ref().is_some_and(|r| r.amount.0 > 0);
        let split = fees::compute_split(
            gross_amount,
            self.fee_config.market_fee_bps,
            royalty.map(|r| (r.recipient, r.amount.0)),
        );
        if had_royalty && split.royalty_recipient.is_none() {
            env::log_str(&format!(
                "WARN: royalty for listing {} exceeds the distributable amount; royalty leg dropped",
                listing.listing_id
            ));
        }

        // Fixed settlement order: seller, royalty, staking pool, foundation.
        if split.seller_net_amount > 0 {
            let _ = Promise::new(listing.owner_id.clone())
                .transfer(NearToken::from_yoctonear(split.seller_net_amount));
        }
        if let Some(ref recipient) = split.royalty_recipient {
            let _ = Promise::new(recipient.clone())
                .transfer(NearToken::from_yoctonear(split.royalty_amount));
        }
        if split.staking_share > 0 {
            let _ = Promise::new(self.staking_pool.clone())
                .transfer(NearToken::from_yoctonear(split.staking_share));
        }
        if split.foundation_share > 0 {
            let _ = Promise::new(self.foundation.clone())
                .transfer(NearToken::from_yoctonear(split.foundation_share));
        }

        refund_excess(buyer_id, deposit, gross_amount);

        events::emit_item_purchased(
            buyer_id,
            &listing.owner_id,
            &listing.item_contract_id,
            &listing.token_id,
            listing.listing_id,
            U128(quantity),
            U128(gross_amount),
            U128(split.platform_fee_amount),
        );

        split.gross_amount
    }
}
