// View/enumeration methods for querying marketplace data

use crate::*;

#[near]
impl Contract {
    /// Get a specific listing by id. Deleted ids stay deleted; they are
    /// never reassigned.
    pub fn get_listing(&self, listing_id: u64) -> Option<Listing> {
        self.listings.get(&listing_id).cloned()
    }

    /// Total number of live listings
    pub fn get_supply_listings(&self) -> u64 {
        self.listings.len() as u64
    }

    /// Number of live listings owned by `account_id`
    pub fn get_supply_by_owner_id(&self, account_id: AccountId) -> u64 {
        self.by_owner_id
            .get(&account_id)
            .map(|set| set.len() as u64)
            .unwrap_or(0)
    }

    /// All live listings in insertion order, paginated. Deleting a listing
    /// never reorders the survivors.
    pub fn get_listings(&self, from_index: Option<u64>, limit: Option<u64>) -> Vec<Listing> {
        let start = from_index.unwrap_or(0);
        let limit = limit.unwrap_or(50).min(100); // Max 100 per query

        self.listings
            .iter()
            .skip(start as usize)
            .take(limit as usize)
            .map(|(_, listing)| listing.clone())
            .collect()
    }

    /// Paginated listings by owner
    pub fn get_listings_by_owner_id(
        &self,
        account_id: AccountId,
        from_index: Option<u64>,
        limit: Option<u64>,
    ) -> Vec<Listing> {
        let ids = if let Some(ids) = self.by_owner_id.get(&account_id) {
            ids
        } else {
            return vec![];
        };

        let start = from_index.unwrap_or(0);
        let limit = limit.unwrap_or(50).min(100); // Max 100 per query

        ids.iter()
            .skip(start as usize)
            .take(limit as usize)
            .filter_map(|listing_id| self.listings.get(listing_id).cloned())
            .collect()
    }
}
