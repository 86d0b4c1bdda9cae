//! Integration tests for the item catalog over a real SQLite database.

mod common;

use rust_decimal_macros::dec;
use shopcart_core::errors::Error;
use shopcart_core::filters::{ItemFilter, Page};
use shopcart_core::items::{DeleteOutcome, ItemPatch, ItemServiceTrait, ItemUpdate, NewItem};

fn new_item(name: &str, price: rust_decimal::Decimal) -> NewItem {
    NewItem {
        name: name.to_string(),
        price,
    }
}

#[tokio::test]
async fn created_item_is_returned_by_id() {
    let ctx = common::setup();
    let created = ctx
        .items
        .create_item(new_item("Widget", dec!(10.00)))
        .await
        .unwrap();
    assert!(!created.deleted);
    assert_eq!(created.price, dec!(10.00));

    let fetched = ctx.items.get_item(created.id).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_item_is_not_found() {
    let ctx = common::setup();
    assert!(matches!(ctx.items.get_item(42), Err(Error::NotFound(_))));
}

#[tokio::test]
async fn listing_applies_inclusive_price_bounds_in_id_order() {
    let ctx = common::setup();
    for (name, price) in [
        ("Bolt", dec!(5.00)),
        ("Widget", dec!(10.00)),
        ("Gadget", dec!(15.00)),
        ("Gizmo", dec!(20.00)),
    ] {
        ctx.items.create_item(new_item(name, price)).await.unwrap();
    }

    let listed = ctx
        .items
        .list_items(ItemFilter {
            min_price: Some(dec!(10.00)),
            max_price: Some(dec!(15.00)),
            ..Default::default()
        })
        .unwrap();
    let names: Vec<&str> = listed.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Widget", "Gadget"]);
}

#[tokio::test]
async fn listing_paginates_the_candidate_set() {
    let ctx = common::setup();
    for name in ["a", "b", "c", "d", "e"] {
        ctx.items
            .create_item(new_item(name, dec!(1.00)))
            .await
            .unwrap();
    }

    let page = ctx
        .items
        .list_items(ItemFilter {
            page: Page {
                offset: 1,
                limit: 2,
            },
            ..Default::default()
        })
        .unwrap();
    let names: Vec<&str> = page.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);
}

#[tokio::test]
async fn deleted_items_are_hidden_unless_opted_in() {
    let ctx = common::setup();
    let keep = ctx
        .items
        .create_item(new_item("Keep", dec!(1.00)))
        .await
        .unwrap();
    let gone = ctx
        .items
        .create_item(new_item("Gone", dec!(2.00)))
        .await
        .unwrap();
    ctx.items.delete_item(gone.id).await.unwrap();

    let visible = ctx.items.list_items(ItemFilter::default()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, keep.id);

    let all = ctx
        .items
        .list_items(ItemFilter {
            include_deleted: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn update_replaces_name_and_price() {
    let ctx = common::setup();
    let created = ctx
        .items
        .create_item(new_item("Widget", dec!(10.00)))
        .await
        .unwrap();

    let updated = ctx
        .items
        .update_item(
            created.id,
            ItemUpdate {
                name: "Widget Mk II".to_string(),
                price: dec!(12.50),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Widget Mk II");
    assert_eq!(updated.price, dec!(12.50));
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_of_deleted_item_is_a_validation_error() {
    let ctx = common::setup();
    let created = ctx
        .items
        .create_item(new_item("Widget", dec!(10.00)))
        .await
        .unwrap();
    ctx.items.delete_item(created.id).await.unwrap();

    let result = ctx
        .items
        .update_item(
            created.id,
            ItemUpdate {
                name: "Widget Mk II".to_string(),
                price: dec!(12.50),
            },
        )
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn no_op_patch_is_not_modified_and_writes_nothing() {
    let ctx = common::setup();
    let created = ctx
        .items
        .create_item(new_item("Widget", dec!(10.00)))
        .await
        .unwrap();

    let result = ctx
        .items
        .patch_item(
            created.id,
            ItemPatch {
                name: Some("Widget".to_string()),
                price: Some(dec!(10.00)),
                deleted: None,
            },
        )
        .await;
    assert!(matches!(result, Err(Error::NotModified(_))));

    // The row was untouched: same update timestamp as at creation.
    let fetched = ctx.items.get_item(created.id).unwrap();
    assert_eq!(fetched.updated_at, created.updated_at);
}

#[tokio::test]
async fn effective_patch_updates_only_supplied_fields() {
    let ctx = common::setup();
    let created = ctx
        .items
        .create_item(new_item("Widget", dec!(10.00)))
        .await
        .unwrap();

    let patched = ctx
        .items
        .patch_item(
            created.id,
            ItemPatch {
                price: Some(dec!(11.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.name, "Widget");
    assert_eq!(patched.price, dec!(11.00));
}

#[tokio::test]
async fn patching_the_deleted_flag_is_forbidden() {
    let ctx = common::setup();
    let created = ctx
        .items
        .create_item(new_item("Widget", dec!(10.00)))
        .await
        .unwrap();

    let result = ctx
        .items
        .patch_item(
            created.id,
            ItemPatch {
                deleted: Some(false),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn delete_is_idempotent_and_keeps_the_row() {
    let ctx = common::setup();
    let created = ctx
        .items
        .create_item(new_item("Widget", dec!(10.00)))
        .await
        .unwrap();

    assert_eq!(
        ctx.items.delete_item(created.id).await.unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(
        ctx.items.delete_item(created.id).await.unwrap(),
        DeleteOutcome::AlreadyDeleted
    );

    // Soft delete only: the row is still there, flagged.
    let fetched = ctx.items.get_item(created.id).unwrap();
    assert!(fetched.deleted);
}
