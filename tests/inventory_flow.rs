mod common;

use std::sync::atomic::Ordering;

use serde_json::json;
use time::macros::date;

use kitchen_client::auth::services::login;
use kitchen_client::ingredients::{InventoryView, SortMode};
use kitchen_client::meals::{percentage, DayPlanner, MealSlot, NutrientGoals};

use common::{ingredient, spawn, state_for, Backend, USER_NO};

#[tokio::test]
async fn inventory_is_grouped_by_category_code() {
    let backend = Backend::new();
    *backend.ingredients.lock().unwrap() = vec![
        ingredient(1, 7, "유제품", "우유", "2025-03-04"),
        ingredient(2, 1, "과일", "사과", "2025-03-20"),
        ingredient(3, 7, "유제품", "치즈", "2025-02-28"),
        ingredient(4, 3, "채소", "양파", ""),
    ];
    let state = state_for(spawn(backend.clone()).await, true);
    login(&state.api, "cook@kitchen.kr", "secret12!").await.unwrap();

    let view = InventoryView::for_session(state.api.clone(), 3).unwrap();
    assert!(view.search("  우  ").await.unwrap());

    let query = backend.last_list_query.lock().unwrap().clone().unwrap();
    assert_eq!(query["userNo"], USER_NO.to_string());
    assert_eq!(query["sortNo"], "1");
    assert_eq!(query["keyword"], "우");

    let inventory = view.inventory().await;
    let names: Vec<_> = inventory.names().collect();
    assert_eq!(names, vec!["과일", "채소", "유제품"]);
    assert_eq!(inventory.len(), 4);
    assert!(!view.is_collapsed("유제품").await);

    view.toggle("유제품").await;
    assert!(view.is_collapsed("유제품").await);

    let near: Vec<_> = view
        .near_expiry(date!(2025 - 03 - 01))
        .await
        .into_iter()
        .map(|i| i.ing_name)
        .collect();
    assert_eq!(near, vec!["우유", "치즈"]);
}

#[tokio::test]
async fn delete_refetches_instead_of_editing_locally() {
    let backend = Backend::new();
    *backend.ingredients.lock().unwrap() = vec![
        ingredient(1, 1, "과일", "사과", "2025-03-20"),
        ingredient(2, 1, "과일", "배", "2025-03-21"),
    ];
    let state = state_for(spawn(backend.clone()).await, true);
    login(&state.api, "cook@kitchen.kr", "secret12!").await.unwrap();

    let view = InventoryView::for_session(state.api.clone(), 3).unwrap();
    view.set_sort(SortMode::Name).await.unwrap();
    assert_eq!(backend.list_calls.load(Ordering::SeqCst), 1);

    view.delete(1).await.unwrap();
    assert_eq!(backend.list_calls.load(Ordering::SeqCst), 2);
    let query = backend.last_list_query.lock().unwrap().clone().unwrap();
    assert_eq!(query["sortNo"], "3");

    let left: Vec<_> = view.inventory().await.items().map(|i| i.ing_no).collect();
    assert_eq!(left, vec![2]);
}

#[tokio::test]
async fn planner_totals_and_remove_reloads_day_and_stats() {
    let backend = Backend::new();
    *backend.meals.lock().unwrap() = json!({
        "BRK": [
            { "mealNo": 11, "foodName": "토스트", "energy": 250.0, "carb": 40.0, "quantity": 200.0 },
            { "mealNo": 12, "foodName": "우유", "energy": 60.0, "protein": 3.0 }
        ],
        "DIN": [
            { "mealNo": 13, "foodName": "닭가슴살", "energy": 240.0, "protein": 30.0, "quantity": null }
        ]
    });
    *backend.stats.lock().unwrap() = json!({
        "2025-03-10": { "energy": 1.0, "carbs": 150.0, "protein": 45.0, "fat": 20.0, "sodium": 900.0 }
    });
    let state = state_for(spawn(backend.clone()).await, true);
    login(&state.api, "cook@kitchen.kr", "secret12!").await.unwrap();

    let mut planner = DayPlanner::for_session(state.api.clone(), date!(2025 - 03 - 10)).unwrap();
    planner.load_day().await.unwrap();
    planner.load_stats().await.unwrap();

    let breakfast = planner.section(MealSlot::Breakfast).unwrap();
    assert_eq!(breakfast.items.len(), 2);
    assert_eq!(breakfast.energy(), 560.0);
    assert!(planner.section(MealSlot::Lunch).unwrap().items.is_empty());

    let daily = planner.daily();
    assert_eq!(daily.local.energy, 800.0);
    assert_eq!(daily.local.carb, 80.0);
    let totals = daily.totals();
    assert_eq!(totals.energy, 800.0);
    assert_eq!(totals.carb, 150.0);

    let bars = planner.progress(&NutrientGoals::default());
    assert_eq!(bars[0].percent, 32.0);
    assert_eq!(bars[1].percent, percentage(150.0, 300.0));

    planner.remove_item(13).await.unwrap();
    assert_eq!(backend.meal_calls.load(Ordering::SeqCst), 2);
    assert_eq!(backend.stats_calls.load(Ordering::SeqCst), 2);
    assert!(planner.section(MealSlot::Dinner).unwrap().items.is_empty());
    assert_eq!(planner.daily().local.energy, 560.0);
}

#[tokio::test]
async fn null_quantity_record_does_not_blank_inventory() {
    let backend = Backend::new();
    let mut tofu = ingredient(5, 4, "콩류", "두부", "2025-03-02");
    tofu["quantity"] = serde_json::Value::Null;
    *backend.ingredients.lock().unwrap() = vec![ingredient(1, 1, "과일", "사과", "2025-03-20"), tofu];
    let state = state_for(spawn(backend.clone()).await, true);
    login(&state.api, "cook@kitchen.kr", "secret12!").await.unwrap();

    let view = InventoryView::for_session(state.api.clone(), 3).unwrap();
    assert!(view.refresh().await.unwrap());

    let inventory = view.inventory().await;
    assert_eq!(inventory.len(), 2);
    let near = view.near_expiry(date!(2025 - 03 - 01)).await;
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].quantity, "");
}
