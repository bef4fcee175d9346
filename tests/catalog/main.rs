//! Integration tests for catalog loading, refresh and superseding.


use std::sync::Arc;

use dishcart::{
    ApiError, ClientConfig, Cuisine, CuisineId, InMemoryRestaurantApi, Item, ItemFilter, ItemId,
    LoadOutcome, LoadStatus, Money, RestaurantStore,
};
use support::{menu, GatedApi};

fn thai() -> Vec<Cuisine> {
    vec![Cuisine::new("9", "Thai").with_items(vec![
        Item::new(90, "Pad Thai", Money::from_major(210)).with_rating(4.9),
    ])]
}

fn store() -> RestaurantStore<InMemoryRestaurantApi> {
    RestaurantStore::new(InMemoryRestaurantApi::new(menu()), ClientConfig::default())
}

fn italian() -> CuisineId {
    CuisineId::new("1")
}

#[tokio::test]
async fn load_catalog_enters_ready() {
    let store = store();
    assert!(store.catalog().is_loading());

    assert_eq!(store.load_catalog().await, Ok(LoadOutcome::Applied));

    let catalog = store.catalog();
    assert_eq!(catalog.status(), &LoadStatus::Ready);
    assert_eq!(catalog.cuisines().len(), 3);
    let top: Vec<_> = catalog.top_dishes().iter().map(|item| item.id).collect();
    assert_eq!(top, [ItemId(20), ItemId(10), ItemId(31)]);
}

#[tokio::test]
async fn failed_load_then_refresh_recovers() {
    let store = store();
    let cause = ApiError::Network("network error".into());
    store.api().fail_next(cause.clone());

    assert_eq!(store.load_catalog().await, Err(cause.clone()));
    let failed = store.catalog();
    assert_eq!(failed.status(), &LoadStatus::Failed(cause.to_string()));
    assert_eq!(failed.error(), Some("network error: network error"));

    assert_eq!(store.refresh().await, Ok(LoadOutcome::Applied));
    let ready = store.catalog();
    assert_eq!(ready.status(), &LoadStatus::Ready);
    assert_eq!(ready.error(), None);
    assert_eq!(ready.cuisines().len(), 3);
}

#[tokio::test]
async fn failed_refresh_keeps_last_good_catalog() {
    let store = store();
    store.load_catalog().await.unwrap();

    store
        .api()
        .fail_next(ApiError::Decoding("unexpected token".into()));
    assert!(store.refresh().await.is_err());

    let catalog = store.catalog();
    assert_eq!(catalog.error(), Some("decoding error: unexpected token"));
    assert_eq!(catalog.cuisines().len(), 3);
    assert_eq!(catalog.top_dishes().len(), 3);
}

#[tokio::test]
async fn refresh_picks_up_new_data() {
    let store = store();
    store.load_catalog().await.unwrap();

    store.api().set_cuisines(thai());
    store.refresh().await.unwrap();

    let catalog = store.catalog();
    assert_eq!(catalog.cuisines().len(), 1);
    assert_eq!(catalog.top_dishes()[0].name, "Pad Thai");
}

#[tokio::test]
async fn page_size_comes_from_config() {
    let store = RestaurantStore::new(
        InMemoryRestaurantApi::new(menu()),
        ClientConfig::default().with_page_size(2),
    );
    store.load_catalog().await.unwrap();

    let catalog = store.catalog();
    assert_eq!(catalog.cuisines().len(), 2);
    assert_eq!(catalog.total_pages(), 2);
}

#[tokio::test]
async fn cuisine_items_merge_without_touching_others() {
    let store = store();
    store.load_catalog().await.unwrap();

    assert_eq!(store.load_cuisine_items(&italian()).await, Ok(LoadOutcome::Applied));

    let catalog = store.catalog();
    assert_eq!(catalog.cuisine_status(&italian()), Some(&LoadStatus::Ready));
    assert_eq!(catalog.cuisine(&italian()).unwrap().items.len(), 2);
    assert_eq!(catalog.cuisine(&CuisineId::new("3")).unwrap().items.len(), 2);
}

#[tokio::test]
async fn unknown_cuisine_fails_that_cuisine_only() {
    let store = store();
    store.load_catalog().await.unwrap();
    let unknown = CuisineId::new("42");

    let err = store.load_cuisine_items(&unknown).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound("cuisine 42".into()));

    let catalog = store.catalog();
    assert_eq!(
        catalog.cuisine_status(&unknown),
        Some(&LoadStatus::Failed("not found: cuisine 42".into()))
    );
    assert_eq!(catalog.status(), &LoadStatus::Ready);
}

#[tokio::test]
async fn item_details_and_search_do_not_mutate_the_snapshot() {
    let store = store();
    store.load_catalog().await.unwrap();
    let before = store.catalog();

    let details = store.item_details(ItemId(31)).await.unwrap();
    assert_eq!(details.cuisine_name, "Indian");
    assert_eq!(details.item.name, "Dal Makhani");

    let found = store
        .search(&ItemFilter::default().with_min_rating(4.5))
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Italian", "Chinese"]);

    assert!(Arc::ptr_eq(&before, &store.catalog()));
}

#[tokio::test]
async fn superseded_cuisine_load_is_discarded() {
    let (api, mut arrivals) = GatedApi::new(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));
    store.load_catalog().await.unwrap();

    let first = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let stale = arrivals.recv().await.unwrap();
    assert_eq!(stale.filter, ItemFilter::cuisine("Italian"));

    let second = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let fresh = arrivals.recv().await.unwrap();

    let newer = vec![Cuisine::new("1", "Italian").with_items(vec![
        Item::new(12, "Tiramisu", Money::from_major(190)).with_rating(4.9),
    ])];
    fresh.respond(Ok(newer));
    assert_eq!(second.await.unwrap(), Ok(LoadOutcome::Applied));

    let older = vec![Cuisine::new("1", "Italian").with_items(vec![
        Item::new(10, "Margherita", Money::from_major(250)).with_rating(4.6),
        Item::new(13, "Risotto", Money::from_major(280)).with_rating(4.0),
    ])];
    stale.respond(Ok(older));
    assert_eq!(first.await.unwrap(), Ok(LoadOutcome::Superseded));

    let catalog = store.catalog();
    let ids: Vec<_> = catalog
        .cuisine(&italian())
        .unwrap()
        .items
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, [ItemId(12)]);
    assert_eq!(catalog.cuisine_status(&italian()), Some(&LoadStatus::Ready));
}

#[tokio::test]
async fn superseded_failure_does_not_surface() {
    let (api, mut arrivals) = GatedApi::new(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));
    store.load_catalog().await.unwrap();

    let first = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let stale = arrivals.recv().await.unwrap();

    let second = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let fresh = arrivals.recv().await.unwrap();

    stale.respond(Err(ApiError::Network("connection reset".into())));
    assert_eq!(first.await.unwrap(), Ok(LoadOutcome::Superseded));
    assert_eq!(
        store.catalog().cuisine_status(&italian()),
        Some(&LoadStatus::Loading)
    );

    fresh.respond(Ok(menu()));
    assert_eq!(second.await.unwrap(), Ok(LoadOutcome::Applied));
    assert_eq!(
        store.catalog().cuisine_status(&italian()),
        Some(&LoadStatus::Ready)
    );
}

#[tokio::test]
async fn different_cuisines_load_independently() {
    let (api, mut arrivals) = GatedApi::new(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));
    store.load_catalog().await.unwrap();
    let chinese = CuisineId::new("2");

    let italian_load = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let italian_call = arrivals.recv().await.unwrap();

    let chinese_load = tokio::spawn({
        let store = Arc::clone(&store);
        let chinese = chinese.clone();
        async move { store.load_cuisine_items(&chinese).await }
    });
    let chinese_call = arrivals.recv().await.unwrap();
    assert_eq!(chinese_call.filter, ItemFilter::cuisine("Chinese"));

    chinese_call.respond(Ok(vec![Cuisine::new("2", "Chinese").with_items(vec![
        Item::new(21, "Spring Rolls", Money::from_major(120)).with_rating(4.0),
    ])]));
    assert_eq!(chinese_load.await.unwrap(), Ok(LoadOutcome::Applied));
    assert_eq!(
        store.catalog().cuisine_status(&italian()),
        Some(&LoadStatus::Loading)
    );

    italian_call.respond(Ok(menu()));
    assert_eq!(italian_load.await.unwrap(), Ok(LoadOutcome::Applied));

    let catalog = store.catalog();
    assert_eq!(catalog.cuisine(&chinese).unwrap().items[0].id, ItemId(21));
    assert_eq!(catalog.cuisine(&italian()).unwrap().items.len(), 2);
}

#[tokio::test]
async fn cart_mutations_do_not_wait_for_loads() {
    let (api, mut arrivals) = GatedApi::new(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));
    store.load_catalog().await.unwrap();

    let load = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let pending = arrivals.recv().await.unwrap();

    let pizza = store.catalog().item(ItemId(10)).cloned().unwrap();
    store.add_to_cart(&italian(), &pizza);
    assert_eq!(store.quantity_of(ItemId(10)), 1);

    pending.respond(Ok(menu()));
    load.await.unwrap().unwrap();
    assert_eq!(store.total_item_count(), 1);
}

#[tokio::test]
async fn superseded_catalog_failure_is_discarded() {
    let (api, _filters, mut pages) = GatedApi::gating_pages(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));

    let first = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_catalog().await }
    });
    let stale = pages.recv().await.unwrap();

    let second = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.refresh().await }
    });
    let fresh = pages.recv().await.unwrap();

    fresh.respond(Ok(thai()));
    assert_eq!(second.await.unwrap(), Ok(LoadOutcome::Applied));

    stale.respond(Err(ApiError::Network("timed out".into())));
    assert_eq!(first.await.unwrap(), Ok(LoadOutcome::Superseded));

    let catalog = store.catalog();
    assert_eq!(catalog.status(), &LoadStatus::Ready);
    let names: Vec<_> = catalog.cuisines().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Thai"]);
}

#[tokio::test]
async fn older_catalog_does_not_overwrite_newer() {
    let (api, _filters, mut pages) = GatedApi::gating_pages(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));

    let first = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_catalog().await }
    });
    let stale = pages.recv().await.unwrap();

    let second = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.refresh().await }
    });
    let fresh = pages.recv().await.unwrap();
    assert!(store.catalog().is_loading());

    fresh.respond(Ok(thai()));
    assert_eq!(second.await.unwrap(), Ok(LoadOutcome::Applied));

    stale.respond(Ok(menu()));
    assert_eq!(first.await.unwrap(), Ok(LoadOutcome::Superseded));

    let catalog = store.catalog();
    assert_eq!(catalog.cuisines().len(), 1);
    assert_eq!(catalog.top_dishes()[0].id, ItemId(90));
}

#[tokio::test]
async fn refresh_keeps_cuisine_loads_in_flight() {
    let (api, mut arrivals) = GatedApi::new(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));
    store.load_catalog().await.unwrap();

    let load = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let pending = arrivals.recv().await.unwrap();
    assert_eq!(
        store.catalog().cuisine_status(&italian()),
        Some(&LoadStatus::Loading)
    );

    assert_eq!(store.refresh().await, Ok(LoadOutcome::Applied));
    assert_eq!(
        store.catalog().cuisine_status(&italian()),
        Some(&LoadStatus::Loading)
    );

    pending.respond(Ok(menu()));
    assert_eq!(load.await.unwrap(), Ok(LoadOutcome::Applied));
    assert_eq!(
        store.catalog().cuisine_status(&italian()),
        Some(&LoadStatus::Ready)
    );
}

#[tokio::test]
async fn listed_zero_price_is_kept() {
    let (api, mut arrivals) = GatedApi::new(InMemoryRestaurantApi::new(menu()));
    let store = Arc::new(RestaurantStore::new(api, ClientConfig::default()));
    store.load_catalog().await.unwrap();

    let load = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load_cuisine_items(&italian()).await }
    });
    let pending = arrivals.recv().await.unwrap();
    pending.respond(Ok(vec![Cuisine::new("1", "Italian").with_items(vec![
        Item::new(10, "Margherita", Money::ZERO).with_rating(0.0),
    ])]));
    load.await.unwrap().unwrap();

    // A listed zero is a real price, not a missing one.
    let catalog = store.catalog();
    let margherita = catalog.item(ItemId(10)).unwrap();
    assert_eq!(margherita.price, Money::ZERO);
    assert_eq!(margherita.rating, 0.0);
}
