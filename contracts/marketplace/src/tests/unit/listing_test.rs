use near_sdk::json_types::U128;

use crate::tests::test_utils::*;
use crate::*;

// --- Listing via mt_on_transfer ---

#[test]
fn listing_records_correct_fields() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 30, 200);

    let listing = contract.get_listing(id).unwrap();
    assert_eq!(listing.listing_id, id);
    assert_eq!(listing.owner_id, seller());
    assert_eq!(listing.item_contract_id, item_contract());
    assert_eq!(listing.token_id, "gold");
    assert_eq!(listing.protocol, ItemProtocol::MultiToken);
    assert_eq!(listing.quantity.0, 30);
    assert_eq!(listing.unit_price.0, 200);
}

#[test]
fn listing_from_unapproved_item_contract_fails() {
    let mut contract = new_contract();
    set_caller("rogue-items.test.near".parse().unwrap(), 0);
    let err = contract
        .mt_on_transfer(
            seller(),
            vec![seller()],
            vec!["gold".to_string()],
            vec![U128(5)],
            list_msg(100),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::Unauthorized(_)));
    assert_eq!(contract.get_supply_listings(), 0);
}

#[test]
fn listing_with_zero_price_fails() {
    let mut contract = new_contract();
    set_caller(item_contract(), 0);
    let err = contract
        .mt_on_transfer(
            seller(),
            vec![seller()],
            vec!["gold".to_string()],
            vec![U128(5)],
            list_msg(0),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn listing_with_multiple_kinds_in_one_transfer_fails() {
    let mut contract = new_contract();
    set_caller(item_contract(), 0);
    let err = contract
        .mt_on_transfer(
            seller(),
            vec![seller(), seller()],
            vec!["gold".to_string(), "silver".to_string()],
            vec![U128(5), U128(5)],
            list_msg(100),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn operator_initiated_listing_fails() {
    let mut contract = new_contract();
    set_caller(item_contract(), 0);
    let err = contract
        .mt_on_transfer(
            buyer(), // transfer initiator differs from the item owner
            vec![seller()],
            vec!["gold".to_string()],
            vec![U128(5)],
            list_msg(100),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::Unauthorized(_)));
}

#[test]
fn unparseable_message_fails() {
    let mut contract = new_contract();
    set_caller(item_contract(), 0);
    let err = contract
        .mt_on_transfer(
            seller(),
            vec![seller()],
            vec!["gold".to_string()],
            vec![U128(5)],
            "not json".to_string(),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

// --- Add quantity ---

#[test]
fn add_quantity_through_receiver_hook() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(item_contract(), 0);
    contract
        .mt_on_transfer(
            seller(),
            vec![seller()],
            vec!["gold".to_string()],
            vec![U128(5)],
            add_quantity_msg(id),
        )
        .unwrap();
    assert_eq!(contract.get_listing(id).unwrap().quantity.0, 30);
}

#[test]
fn add_quantity_with_mismatched_kind_leaves_listing_unchanged() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(item_contract(), 0);
    let err = contract
        .mt_on_transfer(
            seller(),
            vec![seller()],
            vec!["silver".to_string()],
            vec![U128(5)],
            add_quantity_msg(id),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::KindMismatch(_)));
    assert_eq!(contract.get_listing(id).unwrap().quantity.0, 25);
}

#[test]
fn add_quantity_to_unknown_listing_fails() {
    let mut contract = new_contract();
    set_caller(item_contract(), 0);
    let err = contract
        .mt_on_transfer(
            seller(),
            vec![seller()],
            vec!["gold".to_string()],
            vec![U128(5)],
            add_quantity_msg(999),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::NotFound(_)));
}

// --- Single-token listings ---

#[test]
fn nft_hook_creates_a_single_unit_listing() {
    let mut contract = new_contract();
    let id = list_single_item(&mut contract, seller(), "deed-1", 500);

    let listing = contract.get_listing(id).unwrap();
    assert_eq!(listing.protocol, ItemProtocol::SingleToken);
    assert_eq!(listing.quantity.0, 1);
    assert_eq!(listing.unit_price.0, 500);
}

#[test]
fn adding_quantity_to_a_single_token_listing_fails() {
    let mut contract = new_contract();
    let id = list_single_item(&mut contract, seller(), "deed-1", 500);

    set_caller(item_contract(), 0);
    let err = contract
        .nft_on_transfer(
            seller(),
            seller(),
            "deed-2".to_string(),
            add_quantity_msg(id),
        )
        .err().unwrap();
    assert!(matches!(err, MarketError::InvalidQuantity(_)));
}

// --- Price updates ---

#[test]
fn owner_updates_price() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(seller(), 1);
    contract.update_my_listing_price(id, U128(150)).unwrap();
    assert_eq!(contract.get_listing(id).unwrap().unit_price.0, 150);
}

#[test]
fn non_owner_price_update_fails_unchanged() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(buyer(), 1);
    let err = contract
        .update_my_listing_price(id, U128(150))
        .err().unwrap();
    assert!(matches!(err, MarketError::Unauthorized(_)));
    assert_eq!(contract.get_listing(id).unwrap().unit_price.0, 75);
}

#[test]
fn price_update_to_zero_fails() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(seller(), 1);
    let err = contract.update_my_listing_price(id, U128(0)).err().unwrap();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn price_update_without_one_yocto_fails() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(seller(), 0);
    let err = contract
        .update_my_listing_price(id, U128(150))
        .err().unwrap();
    assert!(matches!(err, MarketError::InsufficientDeposit(_)));
}

// --- Withdrawals ---

#[test]
fn withdraw_decrements_before_the_transfer_resolves() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(seller(), 1);
    contract.remove_my_listing_amount(id, U128(10)).unwrap();
    assert_eq!(contract.get_listing(id).unwrap().quantity.0, 15);
}

#[test]
fn withdraw_of_full_quantity_delists() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 1, 500);

    set_caller(seller(), 1);
    contract.remove_my_listing_amount(id, U128(1)).unwrap();
    assert!(contract.get_listing(id).is_none());
    assert_eq!(contract.get_supply_listings(), 0);
}

#[test]
fn withdraw_by_non_owner_fails() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(buyer(), 1);
    let err = contract
        .remove_my_listing_amount(id, U128(10))
        .err().unwrap();
    assert!(matches!(err, MarketError::Unauthorized(_)));
    assert_eq!(contract.get_listing(id).unwrap().quantity.0, 25);
}

#[test]
fn withdraw_more_than_listed_fails() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    set_caller(seller(), 1);
    let err = contract
        .remove_my_listing_amount(id, U128(26))
        .err().unwrap();
    assert!(matches!(err, MarketError::InvalidQuantity(_)));
}

#[test]
fn failed_withdraw_transfer_restores_quantity() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    let snapshot = contract.internal_decrease_quantity(id, 10).unwrap();
    contract.internal_finalize_withdraw(&snapshot, 10, false);
    assert_eq!(contract.get_listing(id).unwrap().quantity.0, 25);
}

#[test]
fn failed_withdraw_transfer_restores_a_delisted_listing() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 10, 75);

    let snapshot = contract.internal_decrease_quantity(id, 10).unwrap();
    assert!(contract.get_listing(id).is_none());

    contract.internal_finalize_withdraw(&snapshot, 10, false);
    assert_eq!(contract.get_listing(id).unwrap().quantity.0, 10);
}

#[test]
fn successful_withdraw_keeps_the_reduced_quantity() {
    let mut contract = new_contract();
    let id = list_items(&mut contract, seller(), "gold", 25, 75);

    let snapshot = contract.internal_decrease_quantity(id, 10).unwrap();
    contract.internal_finalize_withdraw(&snapshot, 10, true);
    assert_eq!(contract.get_listing(id).unwrap().quantity.0, 15);
}
