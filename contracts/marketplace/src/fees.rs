//! Fee engine: the per-buy split of a gross payment between seller,
//! optional royalty recipient, staking pool, and foundation treasury.
//!
//! Integer arithmetic only; for fixed inputs the split is always the same.

use near_sdk::AccountId;
use primitive_types::U256;

use crate::constants::{BASIS_POINTS, MAX_MARKET_FEE_BPS};
use crate::MarketError;

/// One settlement's split of the gross payment. Computed per buy, never stored.
pub(crate) struct FeeSplit {
    pub gross_amount: u128,
    pub royalty_amount: u128,
    pub royalty_recipient: Option<AccountId>,
    pub platform_fee_amount: u128,
    pub staking_share: u128,
    pub foundation_share: u128,
    pub seller_net_amount: u128,
}

/// Split `gross_amount` for settlement.
///
/// `royalty` is the item contract's answer for this sale price, already
/// resolved to an absolute amount. A royalty that does not fit after the
/// platform fee is dropped (`royalty_recipient` comes back `None`); the
/// caller decides whether to log that.
///
/// Holds `royalty_amount + platform_fee_amount + seller_net_amount ==
/// gross_amount` and `staking_share + foundation_share ==
/// platform_fee_amount` exactly.
pub(crate) fn compute_split(
    gross_amount: u128,
    market_fee_bps: u16,
    royalty: Option<(AccountId, u128)>,
) -> FeeSplit {
    let platform_fee_amount = (U256::from(gross_amount) * U256::from(market_fee_bps)
        / U256::from(BASIS_POINTS))
    .as_u128();

    let (royalty_recipient, royalty_amount) = match royalty {
        Some((recipient, amount))
            if amount > 0 && amount <= gross_amount - platform_fee_amount =>
        {
            (Some(recipient), amount)
        }
        _ => (None, 0),
    };

    // Even split; the foundation absorbs the odd unit.
    let staking_share = platform_fee_amount / 2;
    let foundation_share = platform_fee_amount - staking_share;
    let seller_net_amount = gross_amount - platform_fee_amount - royalty_amount;

    FeeSplit {
        gross_amount,
        royalty_amount,
        royalty_recipient,
        platform_fee_amount,
        staking_share,
        foundation_share,
        seller_net_amount,
    }
}

/// Reject fee rates that cannot produce a valid split. Checked at setup,
/// never at settlement.
pub(crate) fn validate_market_fee_bps(bps: u16) -> Result<(), MarketError> {
    if bps > MAX_MARKET_FEE_BPS {
        return Err(MarketError::ConfigurationError(format!(
            "Market fee cannot exceed {} bps",
            MAX_MARKET_FEE_BPS
        )));
    }
    Ok(())
}
