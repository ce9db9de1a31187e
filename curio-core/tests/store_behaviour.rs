//! Behavioural tests for the data-service contract, run against both the
//! SQLite and the in-memory backend so the two stay observably identical.

use curio_core::{
    CollectionError, DataService, InMemoryDataService, SqliteDataService, SqliteStoreOptions,
};
use curio_model::{ItemId, ItemType, LocationType, MediaItem, Medium, MediumId};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn sqlite_service(dir: &TempDir) -> SqliteDataService {
    init_tracing();
    let service = SqliteDataService::connect(SqliteStoreOptions::in_dir(dir.path()))
        .await
        .expect("open sqlite database");
    service.initialize().await.expect("initialize sqlite backend");
    service
}

async fn memory_service() -> InMemoryDataService {
    init_tracing();
    let service = InMemoryDataService::empty();
    service.initialize().await.expect("initialize memory backend");
    service
}

fn new_item(name: &str, media_type: ItemType, medium: Medium) -> MediaItem {
    MediaItem {
        id: ItemId(0),
        name: name.to_owned(),
        media_type,
        location: Some(LocationType::InCollection),
        medium,
    }
}

async fn medium(service: &dyn DataService, name: &str) -> Medium {
    service
        .medium(name)
        .await
        .expect("medium lookup")
        .unwrap_or_else(|| panic!("catalog is missing {name}"))
}

async fn assert_ids_are_max_plus_one(service: &dyn DataService) {
    let cd = medium(service, "CD").await;
    let mut last = 0;
    for name in ["Abbey Road", "Revolver", "Rubber Soul"] {
        let id = service
            .add_item(new_item(name, ItemType::Music, cd.clone()))
            .await
            .expect("add item");
        assert_eq!(id.as_i64(), last + 1, "id must be max existing + 1");
        last = id.as_i64();
    }
}

#[tokio::test]
async fn sqlite_ids_are_max_plus_one() {
    let dir = TempDir::new().unwrap();
    assert_ids_are_max_plus_one(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_ids_are_max_plus_one() {
    assert_ids_are_max_plus_one(&memory_service().await).await;
}

async fn assert_ids_restart_after_delete_all(service: &dyn DataService) {
    let cd = medium(service, "CD").await;

    let first = service
        .add_item(new_item("Abbey Road", ItemType::Music, cd.clone()))
        .await
        .unwrap();
    assert_eq!(first, ItemId(1));

    let stored = service.item(first).await.unwrap().expect("added item");
    service.delete_item(&stored).await.unwrap();
    assert!(service.items().await.unwrap().is_empty());

    // The collection is empty again, so assignment restarts at 1.
    let second = service
        .add_item(new_item("Let It Be", ItemType::Music, cd.clone()))
        .await
        .unwrap();
    assert_eq!(second, ItemId(1));

    // Deleting the highest id frees it for the next add: max is 1, next is 2,
    // and after removing id 2 the following add is assigned 2 again.
    let third = service
        .add_item(new_item("Help!", ItemType::Music, cd))
        .await
        .unwrap();
    assert_eq!(third, ItemId(2));
    let stored = service.item(third).await.unwrap().expect("added item");
    service.delete_item(&stored).await.unwrap();

    let fourth = service
        .add_item(new_item("Rubber Soul", ItemType::Music, medium(service, "Vinyl").await))
        .await
        .unwrap();
    assert_eq!(fourth, ItemId(2));
}

#[tokio::test]
async fn sqlite_ids_restart_after_delete_all() {
    let dir = TempDir::new().unwrap();
    assert_ids_restart_after_delete_all(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_ids_restart_after_delete_all() {
    assert_ids_restart_after_delete_all(&memory_service().await).await;
}

async fn assert_add_get_roundtrip(service: &dyn DataService) {
    let hardcover = medium(service, "Hardcover").await;
    let added = new_item("Dune", ItemType::Book, hardcover);

    let id = service.add_item(added.clone()).await.expect("add item");
    let stored = service
        .item(id)
        .await
        .expect("lookup")
        .expect("item exists after add");

    assert_eq!(stored, added.with_id(id));
}

#[tokio::test]
async fn sqlite_add_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    assert_add_get_roundtrip(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_add_get_roundtrip() {
    assert_add_get_roundtrip(&memory_service().await).await;
}

async fn assert_update_touches_only_target(service: &dyn DataService) {
    let dvd = medium(service, "DVD").await;
    let first = service
        .add_item(new_item("Alien", ItemType::Video, dvd.clone()))
        .await
        .unwrap();
    let second = service
        .add_item(new_item("Aliens", ItemType::Video, dvd.clone()))
        .await
        .unwrap();

    let mut updated = new_item("Alien (Director's Cut)", ItemType::Video, dvd).with_id(first);
    updated.location = Some(LocationType::Loaned);
    service.update_item(updated.clone()).await.expect("update");

    let items = service.items().await.unwrap();
    assert_eq!(items.len(), 2);
    // Position in iteration order is preserved.
    assert_eq!(items[0], updated);
    assert_eq!(items[1].id, second);
    assert_eq!(items[1].name, "Aliens");
    assert_eq!(items[1].location, Some(LocationType::InCollection));
}

#[tokio::test]
async fn sqlite_update_touches_only_target() {
    let dir = TempDir::new().unwrap();
    assert_update_touches_only_target(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_update_touches_only_target() {
    assert_update_touches_only_target(&memory_service().await).await;
}

async fn assert_update_missing_is_not_found(service: &dyn DataService) {
    let cd = medium(service, "CD").await;
    let ghost = new_item("Ghost", ItemType::Music, cd).with_id(41);

    match service.update_item(ghost).await {
        Err(CollectionError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn sqlite_update_missing_is_not_found() {
    let dir = TempDir::new().unwrap();
    assert_update_missing_is_not_found(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_update_missing_is_not_found() {
    assert_update_missing_is_not_found(&memory_service().await).await;
}

async fn assert_delete_missing_is_noop(service: &dyn DataService) {
    let vinyl = medium(service, "Vinyl").await;
    let kept = service
        .add_item(new_item("Kind of Blue", ItemType::Music, vinyl.clone()))
        .await
        .unwrap();

    let ghost = new_item("Ghost", ItemType::Music, vinyl).with_id(41);
    service.delete_item(&ghost).await.expect("tolerant delete");
    // A second delete of the same absent id also succeeds.
    service.delete_item(&ghost).await.expect("double delete");

    let items = service.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, kept);
}

#[tokio::test]
async fn sqlite_delete_missing_is_noop() {
    let dir = TempDir::new().unwrap();
    assert_delete_missing_is_noop(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_delete_missing_is_noop() {
    assert_delete_missing_is_noop(&memory_service().await).await;
}

async fn assert_medium_catalog_partition(service: &dyn DataService) {
    let all = service.mediums().await.unwrap();
    let names: Vec<&str> = all.iter().map(|medium| medium.name.as_str()).collect();
    assert_eq!(
        names,
        ["CD", "Vinyl", "Hardcover", "Paperback", "DVD", "Blu-Ray"]
    );

    for item_type in service.item_types() {
        let filtered = service.mediums_for(item_type).await.unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|medium| medium.media_type == item_type));
    }
}

#[tokio::test]
async fn sqlite_medium_catalog_partition() {
    let dir = TempDir::new().unwrap();
    assert_medium_catalog_partition(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_medium_catalog_partition() {
    assert_medium_catalog_partition(&memory_service().await).await;
}

/// The full first-run scenario: seed, add, read back, relocate, delete.
async fn assert_abbey_road_scenario(service: &dyn DataService) {
    assert_eq!(service.mediums().await.unwrap().len(), 6);

    let cd = medium(service, "CD").await;
    let id = service
        .add_item(new_item("Abbey Road", ItemType::Music, cd))
        .await
        .unwrap();
    assert_eq!(id, ItemId(1));

    let mut stored = service.item(id).await.unwrap().expect("added item");
    assert_eq!(stored.name, "Abbey Road");
    assert_eq!(stored.media_type, ItemType::Music);
    assert_eq!(stored.location, Some(LocationType::InCollection));
    assert_eq!(stored.medium.name, "CD");

    stored.location = Some(LocationType::Loaned);
    service.update_item(stored.clone()).await.unwrap();
    let relocated = service.item(id).await.unwrap().expect("updated item");
    assert_eq!(relocated.location, Some(LocationType::Loaned));

    service.delete_item(&stored).await.unwrap();
    assert!(service.items().await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_abbey_road_scenario() {
    let dir = TempDir::new().unwrap();
    assert_abbey_road_scenario(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_abbey_road_scenario() {
    assert_abbey_road_scenario(&memory_service().await).await;
}

async fn assert_operations_require_initialize(service: &dyn DataService) {
    let orphan = Medium::new(1, "CD", ItemType::Music);

    assert!(matches!(
        service.items().await,
        Err(CollectionError::Uninitialized)
    ));
    assert!(matches!(
        service.item(ItemId(1)).await,
        Err(CollectionError::Uninitialized)
    ));
    assert!(matches!(
        service.mediums().await,
        Err(CollectionError::Uninitialized)
    ));
    assert!(matches!(
        service
            .add_item(new_item("Too Early", ItemType::Music, orphan))
            .await,
        Err(CollectionError::Uninitialized)
    ));
}

#[tokio::test]
async fn sqlite_operations_require_initialize() {
    let dir = TempDir::new().unwrap();
    let service = SqliteDataService::connect(SqliteStoreOptions::in_dir(dir.path()))
        .await
        .unwrap();
    assert_operations_require_initialize(&service).await;
}

#[tokio::test]
async fn memory_operations_require_initialize() {
    assert_operations_require_initialize(&InMemoryDataService::empty()).await;
}

async fn assert_initialize_is_idempotent(service: &dyn DataService) {
    let paperback = medium(service, "Paperback").await;
    let id = service
        .add_item(new_item("Neuromancer", ItemType::Book, paperback))
        .await
        .unwrap();

    service.initialize().await.expect("second initialize");

    assert_eq!(service.mediums().await.unwrap().len(), 6);
    let items = service.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, id);
}

#[tokio::test]
async fn sqlite_initialize_is_idempotent() {
    let dir = TempDir::new().unwrap();
    assert_initialize_is_idempotent(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_initialize_is_idempotent() {
    assert_initialize_is_idempotent(&memory_service().await).await;
}

async fn assert_unknown_medium_is_rejected(service: &dyn DataService) {
    let bogus = Medium::new(99, "Betamax", ItemType::Video);
    match service
        .add_item(new_item("The Thing", ItemType::Video, bogus))
        .await
    {
        Err(CollectionError::Validation(_)) => {}
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn sqlite_unknown_medium_is_rejected() {
    let dir = TempDir::new().unwrap();
    assert_unknown_medium_is_rejected(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_unknown_medium_is_rejected() {
    assert_unknown_medium_is_rejected(&memory_service().await).await;
}

async fn assert_selection_cursor(service: &dyn DataService) {
    assert_eq!(service.selected_item(), None);
    service.set_selected_item(Some(ItemId(7)));
    assert_eq!(service.selected_item(), Some(ItemId(7)));

    // Initialize clears the transient cursor.
    service.initialize().await.unwrap();
    assert_eq!(service.selected_item(), None);
}

#[tokio::test]
async fn sqlite_selection_cursor() {
    let dir = TempDir::new().unwrap();
    assert_selection_cursor(&sqlite_service(&dir).await).await;
}

#[tokio::test]
async fn memory_selection_cursor() {
    assert_selection_cursor(&memory_service().await).await;
}

#[tokio::test]
async fn sqlite_items_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let id = {
        let service = sqlite_service(&dir).await;
        let blu_ray = medium(&service, "Blu-Ray").await;
        service
            .add_item(new_item("The Mummy", ItemType::Video, blu_ray))
            .await
            .unwrap()
    };

    let reopened = sqlite_service(&dir).await;
    let items = reopened.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, id);
    assert_eq!(items[0].name, "The Mummy");
    assert_eq!(items[0].medium.id, MediumId(6));
}

#[tokio::test]
async fn memory_demo_seed_is_present() {
    let service = InMemoryDataService::new();
    service.initialize().await.unwrap();

    let items = service.items().await.unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(
        names,
        ["Classical Favorites", "Classic Fairy Tales", "The Mummy"]
    );

    // Seeded ids occupy 1..=3, so the next add continues from there.
    let cd = medium(&service, "CD").await;
    let id = service
        .add_item(new_item("Abbey Road", ItemType::Music, cd))
        .await
        .unwrap();
    assert_eq!(id, ItemId(4));
}

#[tokio::test]
async fn taxonomies_are_in_declaration_order() {
    let service = memory_service().await;
    assert_eq!(
        service.item_types(),
        vec![ItemType::Book, ItemType::Music, ItemType::Video]
    );
    assert_eq!(
        service.location_types(),
        vec![LocationType::InCollection, LocationType::Loaned]
    );
}
