//! Integration tests for the menu service using in-memory SurrealDB.

use std::collections::BTreeSet;

use qrmenu_catalog::MenuService;
use qrmenu_core::QrMenuError;
use qrmenu_core::models::menu::{
    CreateMenu, CreateMenuCategory, CreateMenuItem, CreateMenuSubCategory, UpdateMenu,
    UpdateMenuCategory, UpdateMenuItem,
};
use qrmenu_core::repository::Repository;
use qrmenu_db::SurrealDocumentStore;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn setup() -> MenuService<SurrealDocumentStore<Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    qrmenu_db::run_migrations(&db).await.unwrap();
    MenuService::new(Repository::new(SurrealDocumentStore::new(db)))
}

fn menu_input(establishment_id: &str, name: &str) -> CreateMenu {
    CreateMenu {
        establishment_id: establishment_id.into(),
        name: name.into(),
        description: None,
    }
}

fn category_input(name: &str, display_order: i32) -> CreateMenuCategory {
    CreateMenuCategory {
        name: name.into(),
        description: None,
        display_order,
    }
}

fn sub_category_input(name: &str, display_order: i32) -> CreateMenuSubCategory {
    CreateMenuSubCategory {
        name: name.into(),
        description: None,
        display_order,
    }
}

fn item_input(name: &str, price: Decimal) -> CreateMenuItem {
    CreateMenuItem {
        name: name.into(),
        description: Some("House favourite".into()),
        price,
        currency: "EUR".into(),
        is_vegetarian: true,
        is_vegan: false,
        is_gluten_free: false,
        image_url: None,
        allergens: BTreeSet::from(["milk".to_string()]),
        preparation_time_minutes: 5,
        display_order: 0,
    }
}

#[tokio::test]
async fn create_then_get_empty_menu() {
    let service = setup().await;

    let created = service.create(menu_input("est-1", "Breakfast")).await.unwrap();
    assert!(!created.id.is_empty());
    assert!(created.categories.is_empty());

    let fetched = service.get(&created.id).await.unwrap();
    assert_eq!(fetched.name, "Breakfast");
    assert_eq!(fetched.establishment_id, "est-1");
}

#[tokio::test]
async fn categories_come_back_in_display_order() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Dinner")).await.unwrap();

    let desserts = service
        .add_category(&menu.id, category_input("Desserts", 3))
        .await
        .unwrap();
    let starters = service
        .add_category(&menu.id, category_input("Starters", 1))
        .await
        .unwrap();
    let mains = service
        .add_category(&menu.id, category_input("Mains", 2))
        .await
        .unwrap();

    let fetched = service.get(&menu.id).await.unwrap();
    let order: Vec<&str> = fetched.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, [starters.id.as_str(), mains.id.as_str(), desserts.id.as_str()]);
}

#[tokio::test]
async fn full_tree_round_trips() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Lunch")).await.unwrap();

    let category = service
        .add_category(&menu.id, category_input("Drinks", 0))
        .await
        .unwrap();
    let sub = service
        .add_sub_category(&menu.id, &category.id, sub_category_input("Hot", 0))
        .await
        .unwrap();
    let item = service
        .add_item(
            &menu.id,
            &category.id,
            &sub.id,
            item_input("Flat White", Decimal::new(350, 2)),
        )
        .await
        .unwrap();

    let fetched = service.get(&menu.id).await.unwrap();
    let stored = &fetched.categories[0].sub_categories[0].items[0];
    assert_eq!(stored.id, item.id);
    assert_eq!(stored.price, Decimal::new(350, 2));
    assert_eq!(stored.currency, "EUR");
    assert!(stored.is_available);
    assert!(stored.allergens.contains("milk"));
}

#[tokio::test]
async fn update_item_replaces_fields() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Lunch")).await.unwrap();
    let category = service
        .add_category(&menu.id, category_input("Drinks", 0))
        .await
        .unwrap();
    let sub = service
        .add_sub_category(&menu.id, &category.id, sub_category_input("Hot", 0))
        .await
        .unwrap();
    let item = service
        .add_item(&menu.id, &category.id, &sub.id, item_input("Latte", Decimal::new(400, 2)))
        .await
        .unwrap();

    let updated = service
        .update_item(
            &menu.id,
            &category.id,
            &sub.id,
            &item.id,
            UpdateMenuItem {
                name: "Oat Latte".into(),
                description: None,
                price: Decimal::new(450, 2),
                currency: "EUR".into(),
                is_available: false,
                is_vegetarian: true,
                is_vegan: true,
                is_gluten_free: false,
                image_url: None,
                allergens: BTreeSet::new(),
                preparation_time_minutes: 6,
                display_order: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, item.id);

    let fetched = service.get(&menu.id).await.unwrap();
    let stored = &fetched.categories[0].sub_categories[0].items[0];
    assert_eq!(stored.name, "Oat Latte");
    assert_eq!(stored.price, Decimal::new(450, 2));
    assert!(!stored.is_available);
    assert!(stored.is_vegan);
    assert!(stored.allergens.is_empty());
}

#[tokio::test]
async fn non_positive_price_is_rejected() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Lunch")).await.unwrap();
    let category = service
        .add_category(&menu.id, category_input("Drinks", 0))
        .await
        .unwrap();
    let sub = service
        .add_sub_category(&menu.id, &category.id, sub_category_input("Hot", 0))
        .await
        .unwrap();

    let result = service
        .add_item(&menu.id, &category.id, &sub.id, item_input("Free", Decimal::ZERO))
        .await;
    assert!(matches!(result, Err(QrMenuError::Validation { .. })));

    let fetched = service.get(&menu.id).await.unwrap();
    assert!(fetched.categories[0].sub_categories[0].items.is_empty());
}

#[tokio::test]
async fn missing_nodes_are_not_found() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Lunch")).await.unwrap();

    assert!(matches!(
        service
            .add_category("missing", category_input("Drinks", 0))
            .await,
        Err(QrMenuError::NotFound { .. })
    ));
    assert!(matches!(
        service
            .add_sub_category(&menu.id, "missing", sub_category_input("Hot", 0))
            .await,
        Err(QrMenuError::NotFound { .. })
    ));
    assert!(matches!(
        service.remove_category(&menu.id, "missing").await,
        Err(QrMenuError::NotFound { .. })
    ));
    assert!(matches!(
        service
            .update_category(
                &menu.id,
                "missing",
                UpdateMenuCategory {
                    name: "Drinks".into(),
                    description: None,
                    display_order: 0,
                    is_active: true,
                },
            )
            .await,
        Err(QrMenuError::NotFound { .. })
    ));
}

#[tokio::test]
async fn remove_category_drops_its_subtree() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Lunch")).await.unwrap();
    let keep = service
        .add_category(&menu.id, category_input("Mains", 0))
        .await
        .unwrap();
    let drop = service
        .add_category(&menu.id, category_input("Drinks", 1))
        .await
        .unwrap();
    service
        .add_sub_category(&menu.id, &drop.id, sub_category_input("Hot", 0))
        .await
        .unwrap();

    service.remove_category(&menu.id, &drop.id).await.unwrap();

    let fetched = service.get(&menu.id).await.unwrap();
    assert_eq!(fetched.categories.len(), 1);
    assert_eq!(fetched.categories[0].id, keep.id);
}

#[tokio::test]
async fn update_menu_keeps_tree_and_owner() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Lunch")).await.unwrap();
    service
        .add_category(&menu.id, category_input("Mains", 0))
        .await
        .unwrap();

    let updated = service
        .update(
            &menu.id,
            UpdateMenu {
                name: "Weekday Lunch".into(),
                description: Some("Served 12 to 3".into()),
                is_active: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Weekday Lunch");
    assert_eq!(updated.establishment_id, "est-1");
    assert_eq!(updated.categories.len(), 1);
    assert_eq!(updated.created_at, menu.created_at);
}

#[tokio::test]
async fn menus_are_listed_per_establishment() {
    let service = setup().await;
    service.create(menu_input("est-1", "Breakfast")).await.unwrap();
    service.create(menu_input("est-1", "Dinner")).await.unwrap();
    service.create(menu_input("est-2", "Brunch")).await.unwrap();

    let menus = service.list_for_establishment("est-1").await.unwrap();
    assert_eq!(menus.len(), 2);
    assert!(menus.iter().all(|m| m.establishment_id == "est-1"));
}

#[tokio::test]
async fn delete_menu_twice_is_not_found() {
    let service = setup().await;
    let menu = service.create(menu_input("est-1", "Lunch")).await.unwrap();

    service.delete(&menu.id).await.unwrap();
    assert!(matches!(
        service.delete(&menu.id).await,
        Err(QrMenuError::NotFound { .. })
    ));
}
