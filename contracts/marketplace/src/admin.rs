use crate::*;

const GAS_MIGRATE: Gas = Gas::from_tgas(200);

#[near]
impl Contract {
    // --- Init ---

    #[init]
    #[handle_result]
    pub fn new(
        owner_id: AccountId,
        staking_pool: AccountId,
        foundation: AccountId,
        market_fee_bps: Option<u16>,
    ) -> Result<Self, MarketError> {
        let fee_config = FeeConfig {
            market_fee_bps: market_fee_bps.unwrap_or(DEFAULT_MARKET_FEE_BPS),
        };
        fees::validate_market_fee_bps(fee_config.market_fee_bps)?;

        Ok(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            owner_id,
            staking_pool,
            foundation,
            fee_config,
            listings: TreeMap::new(StorageKey::Listings),
            by_owner_id: LookupMap::new(StorageKey::ByOwnerId),
            next_listing_id: 1,
            approved_item_contracts: IterableSet::new(StorageKey::ApprovedItemContracts),
        })
    }

    // --- Admin ---

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), MarketError> {
        crate::internal::check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        if new_owner == self.owner_id {
            return Err(MarketError::InvalidInput(
                "New owner must differ from current owner".to_string(),
            ));
        }
        let old_owner = self.owner_id.clone();
        self.owner_id = new_owner;
        events::emit_owner_transferred(&old_owner, &self.owner_id);
        Ok(())
    }

    /// Owner only. Updates either fee recipient; omitted ones keep their
    /// current value.
    #[payable]
    #[handle_result]
    pub fn set_fee_recipients(
        &mut self,
        staking_pool: Option<AccountId>,
        foundation: Option<AccountId>,
    ) -> Result<(), MarketError> {
        crate::internal::check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        if let Some(pool) = staking_pool {
            self.staking_pool = pool;
        }
        if let Some(treasury) = foundation {
            self.foundation = treasury;
        }
        events::emit_fee_recipients_changed(&self.owner_id, &self.staking_pool, &self.foundation);
        Ok(())
    }

    /// Owner only. Rejects rates over the cap.
    #[payable]
    #[handle_result]
    pub fn set_market_fee(&mut self, market_fee_bps: u16) -> Result<(), MarketError> {
        crate::internal::check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        fees::validate_market_fee_bps(market_fee_bps)?;
        self.fee_config.market_fee_bps = market_fee_bps;
        events::emit_fee_config_updated(&self.owner_id, market_fee_bps);
        Ok(())
    }

    // --- Approved item contracts ---

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn add_approved_item_contract(
        &mut self,
        item_contract_id: AccountId,
    ) -> Result<(), MarketError> {
        crate::internal::check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        self.approved_item_contracts.insert(item_contract_id.clone());
        events::emit_item_contract_approved(&self.owner_id, &item_contract_id);
        Ok(())
    }

    /// Owner only. Existing listings from the contract stay live; only new
    /// intake stops.
    #[payable]
    #[handle_result]
    pub fn remove_approved_item_contract(
        &mut self,
        item_contract_id: AccountId,
    ) -> Result<(), MarketError> {
        crate::internal::check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        self.approved_item_contracts.remove(&item_contract_id);
        events::emit_item_contract_removed(&self.owner_id, &item_contract_id);
        Ok(())
    }

    pub fn get_approved_item_contracts(&self) -> Vec<&AccountId> {
        self.approved_item_contracts.iter().collect()
    }

    // --- Config views ---

    pub fn get_owner(&self) -> &AccountId {
        &self.owner_id
    }

    pub fn get_fee_config(&self) -> &FeeConfig {
        &self.fee_config
    }

    pub fn get_fee_recipients(&self) -> (AccountId, AccountId) {
        (self.staking_pool.clone(), self.foundation.clone())
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }

    // --- Upgrade ---

    /// Owner only. Panics unless 1 yoctoNEAR attached. Reads WASM from `env::input()`.
    pub fn update_contract(&self) -> Promise {
        near_sdk::require!(
            env::attached_deposit().as_yoctonear() == 1,
            "Attach 1 yoctoNEAR"
        );
        near_sdk::require!(
            env::predecessor_account_id() == self.owner_id,
            "Only contract owner can upgrade"
        );
        let code = env::input().expect("No input").to_vec();
        Promise::new(env::current_account_id())
            .deploy_contract(code)
            .function_call(
                "migrate".to_string(),
                vec![],
                NearToken::from_near(0),
                GAS_MIGRATE,
            )
            .as_return()
    }

    /// Called automatically by `update_contract`; runs state migration on upgrade.
    #[private]
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        let mut contract: Self = env::state_read().expect("State read failed");
        let old_version = contract.version.clone();
        contract.version = env!("CARGO_PKG_VERSION").to_string();

        events::emit_contract_upgraded(&env::current_account_id(), &old_version, &contract.version);

        contract
    }
}
