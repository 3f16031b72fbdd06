// Internal registry helpers for the marketplace

use crate::*;

impl Contract {
    /// Insert a listing under the next unused id. Ids are monotonic and never
    /// reused, so ascending id order stays insertion order.
    pub(crate) fn internal_add_listing(
        &mut self,
        owner_id: AccountId,
        item_contract_id: AccountId,
        token_id: String,
        protocol: ItemProtocol,
        quantity: u128,
        unit_price: u128,
    ) -> Result<u64, MarketError> {
        if quantity == 0 {
            return Err(MarketError::InvalidQuantity(
                "Quantity must be greater than 0".into(),
            ));
        }
        if protocol == ItemProtocol::SingleToken && quantity != 1 {
            return Err(MarketError::InvalidQuantity(
                "Single-token listings hold exactly one unit".into(),
            ));
        }
        if unit_price == 0 {
            return Err(MarketError::zero_price());
        }
        if token_id.is_empty() || token_id.len() > MAX_TOKEN_ID_LEN {
            return Err(MarketError::InvalidInput(format!(
                "Token ID must be 1..={} characters",
                MAX_TOKEN_ID_LEN
            )));
        }

        let listing_id = self.next_listing_id;
        self.next_listing_id += 1;

        let listing = Listing {
            listing_id,
            owner_id: owner_id.clone(),
            item_contract_id,
            token_id,
            protocol,
            quantity: U128(quantity),
            unit_price: U128(unit_price),
            created_at: env::block_timestamp(),
        };
        self.listings.insert(listing_id, listing);

        // Add to owner's listing set by removing, modifying, and reinserting
        let mut owner_set = self.by_owner_id.remove(&owner_id).unwrap_or_else(|| {
            IterableSet::new(StorageKey::ByOwnerIdInner {
                account_id_hash: hash_account_id(&owner_id),
            })
        });
        owner_set.insert(listing_id);
        self.by_owner_id.insert(owner_id, owner_set);

        Ok(listing_id)
    }

    pub(crate) fn internal_get_listing(&self, listing_id: u64) -> Result<&Listing, MarketError> {
        self.listings
            .get(&listing_id)
            .ok_or_else(MarketError::listing_not_found)
    }

    /// Remove a listing and its owner-index entry.
    /// Returns the Listing record that was removed.
    pub(crate) fn internal_remove_listing(
        &mut self,
        listing_id: u64,
    ) -> Result<Listing, MarketError> {
        let listing = self
            .listings
            .remove(&listing_id)
            .ok_or_else(MarketError::listing_not_found)?;

        // Remove from owner's listing set by removing and reinserting
        if let Some(mut owner_set) = self.by_owner_id.remove(&listing.owner_id) {
            owner_set.remove(&listing_id);
            if !owner_set.is_empty() {
                self.by_owner_id.insert(listing.owner_id.clone(), owner_set);
            }
        }

        Ok(listing)
    }

    /// Top up a listing. The caller must be the listing owner and the
    /// transferred kind must match the listed one.
    pub(crate) fn internal_increase_quantity(
        &mut self,
        listing_id: u64,
        by_amount: u128,
        caller: &AccountId,
        item_contract_id: &AccountId,
        token_id: &str,
    ) -> Result<(), MarketError> {
        let listing = self.internal_get_listing(listing_id)?;
        check_listing_owner(listing, caller)?;
        if listing.protocol == ItemProtocol::SingleToken {
            return Err(MarketError::InvalidQuantity(
                "Single-token listings hold exactly one unit".into(),
            ));
        }
        if &listing.item_contract_id != item_contract_id || listing.token_id != token_id {
            return Err(MarketError::KindMismatch(format!(
                "Listing {} holds {}:{}, not {}:{}",
                listing_id, listing.item_contract_id, listing.token_id, item_contract_id, token_id
            )));
        }
        if by_amount == 0 {
            return Err(MarketError::InvalidQuantity(
                "Quantity must be greater than 0".into(),
            ));
        }

        let listing = self
            .listings
            .get_mut(&listing_id)
            .ok_or_else(MarketError::listing_not_found)?;
        let new_quantity = listing
            .quantity
            .0
            .checked_add(by_amount)
            .ok_or_else(|| MarketError::InvalidQuantity("Quantity overflow".into()))?;
        listing.quantity = U128(new_quantity);
        Ok(())
    }

    /// Decrease quantity, deleting the listing on exact exhaustion.
    /// Returns the Listing as it was before the decrease.
    pub(crate) fn internal_decrease_quantity(
        &mut self,
        listing_id: u64,
        by_amount: u128,
    ) -> Result<Listing, MarketError> {
        let listing = self.internal_get_listing(listing_id)?;
        if by_amount == 0 || by_amount > listing.quantity.0 {
            return Err(MarketError::InvalidQuantity(format!(
                "Cannot take {} of {} listed units",
                by_amount, listing.quantity.0
            )));
        }
        let snapshot = listing.clone();

        if by_amount == snapshot.quantity.0 {
            self.internal_remove_listing(listing_id)?;
        } else {
            let listing = self
                .listings
                .get_mut(&listing_id)
                .ok_or_else(MarketError::listing_not_found)?;
            listing.quantity = U128(listing.quantity.0 - by_amount);
        }
        Ok(snapshot)
    }

    /// Reverse a decrease after a failed item transfer: top the listing back
    /// up, or reinsert it under its original id if it was deleted. Id-keyed
    /// storage puts a reinserted listing back at its old enumeration slot.
    pub(crate) fn internal_restore_listing(&mut self, snapshot: &Listing, quantity: u128) {
        if let Some(listing) = self.listings.get_mut(&snapshot.listing_id) {
            listing.quantity = U128(listing.quantity.0.saturating_add(quantity));
            return;
        }

        let mut restored = snapshot.clone();
        restored.quantity = U128(quantity);
        self.listings.insert(snapshot.listing_id, restored);

        let owner_id = snapshot.owner_id.clone();
        let mut owner_set = self.by_owner_id.remove(&owner_id).unwrap_or_else(|| {
            IterableSet::new(StorageKey::ByOwnerIdInner {
                account_id_hash: hash_account_id(&owner_id),
            })
        });
        owner_set.insert(snapshot.listing_id);
        self.by_owner_id.insert(owner_id, owner_set);
    }

    pub(crate) fn check_contract_owner(&self, caller: &AccountId) -> Result<(), MarketError> {
        if caller != &self.owner_id {
            return Err(MarketError::only_owner("the contract owner"));
        }
        Ok(())
    }

    pub(crate) fn check_approved_item_contract(
        &self,
        contract_id: &AccountId,
    ) -> Result<(), MarketError> {
        if !self.approved_item_contracts.contains(contract_id) {
            return Err(MarketError::Unauthorized(format!(
                "Item contract {} is not approved to list here",
                contract_id
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_listing_owner(listing: &Listing, caller: &AccountId) -> Result<(), MarketError> {
    if caller != &listing.owner_id {
        return Err(MarketError::only_owner("the listing owner"));
    }
    Ok(())
}

/// Hash an account ID for use in storage keys
pub(crate) fn hash_account_id(account_id: &AccountId) -> Vec<u8> {
    env::sha256(account_id.as_bytes())
}

/// Check exactly one yoctoNEAR is attached (security measure)
pub(crate) fn check_one_yocto() -> Result<(), MarketError> {
    if env::attached_deposit().as_yoctonear() != ONE_YOCTO.as_yoctonear() {
        return Err(MarketError::InsufficientDeposit(
            "Requires attached deposit of exactly 1 yoctoNEAR".into(),
        ));
    }
    Ok(())
}

/// Refund any deposit above `spent` back to `account_id`.
pub(crate) fn refund_excess(account_id: &AccountId, deposit: u128, spent: u128) {
    let excess = deposit.saturating_sub(spent);
    if excess > 0 {
        let _ = Promise::new(account_id.clone()).transfer(NearToken::from_yoctonear(excess));
    }
}
