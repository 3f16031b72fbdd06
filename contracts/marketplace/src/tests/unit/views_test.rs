use near_sdk::json_types::U128;

use crate::tests::test_utils::*;

// --- Enumeration ---

#[test]
fn listings_enumerate_in_insertion_order() {
    let mut contract = new_contract();
    let a = list_items(&mut contract, seller(), "gold", 1, 500);
    let b = list_items(&mut contract, seller(), "silver", 25, 75);
    let c = list_items(&mut contract, buyer(), "iron", 10, 5);

    let ids: Vec<u64> = contract
        .get_listings(None, None)
        .iter()
        .map(|l| l.listing_id)
        .collect();
    assert_eq!(ids, vec![a, b, c]);
}

#[test]
fn deleting_an_interior_listing_preserves_survivor_order() {
    let mut contract = new_contract();
    let a = list_items(&mut contract, seller(), "gold", 1, 500);
    let b = list_items(&mut contract, seller(), "silver", 25, 75);
    let c = list_items(&mut contract, buyer(), "iron", 10, 5);

    // Drain the middle listing through the public withdraw path.
    set_caller(seller(), 1);
    contract.remove_my_listing_amount(b, U128(25)).unwrap();

    let ids: Vec<u64> = contract
        .get_listings(None, None)
        .iter()
        .map(|l| l.listing_id)
        .collect();
    assert_eq!(ids, vec![a, c]);
}

#[test]
fn enumeration_skips_failed_attempts() {
    let mut contract = new_contract();
    let a = list_items(&mut contract, seller(), "gold", 5, 100);

    // A rejected listing attempt leaves no trace.
    set_caller(item_contract(), 0);
    let _ = contract
        .mt_on_transfer(
            seller(),
            vec![seller()],
            vec!["silver".to_string()],
            vec![U128(5)],
            list_msg(0),
        )
        .err().unwrap();

    let listings = contract.get_listings(None, None);
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].listing_id, a);
}

#[test]
fn pagination_windows_the_result() {
    let mut contract = new_contract();
    for i in 0..5 {
        list_items(&mut contract, seller(), &format!("kind-{}", i), 1, 10);
    }

    let page = contract.get_listings(Some(1), Some(2));
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].token_id, "kind-1");
    assert_eq!(page[1].token_id, "kind-2");

    let tail = contract.get_listings(Some(4), Some(10));
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].token_id, "kind-4");
}

// --- Supply counters ---

#[test]
fn supply_counters_track_live_listings() {
    let mut contract = new_contract();
    assert_eq!(contract.get_supply_listings(), 0);

    let a = list_items(&mut contract, seller(), "gold", 1, 500);
    list_items(&mut contract, seller(), "silver", 25, 75);
    list_items(&mut contract, buyer(), "iron", 10, 5);
    assert_eq!(contract.get_supply_listings(), 3);
    assert_eq!(contract.get_supply_by_owner_id(seller()), 2);
    assert_eq!(contract.get_supply_by_owner_id(buyer()), 1);

    set_caller(seller(), 1);
    contract.remove_my_listing_amount(a, U128(1)).unwrap();
    assert_eq!(contract.get_supply_listings(), 2);
    assert_eq!(contract.get_supply_by_owner_id(seller()), 1);
}

#[test]
fn owner_views_for_unknown_accounts_are_empty() {
    let contract = new_contract();
    assert_eq!(contract.get_supply_by_owner_id(buyer()), 0);
    assert!(contract
        .get_listings_by_owner_id(buyer(), None, None)
        .is_empty());
}

#[test]
fn listings_by_owner_returns_only_their_listings() {
    let mut contract = new_contract();
    list_items(&mut contract, seller(), "gold", 1, 500);
    list_items(&mut contract, buyer(), "iron", 10, 5);
    list_items(&mut contract, seller(), "silver", 25, 75);

    let mine = contract.get_listings_by_owner_id(seller(), None, None);
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|l| l.owner_id == seller()));
}
