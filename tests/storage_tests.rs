//! Persistence tests on in-memory SQLite

use milecount::models::{NewVehicle, VehicleQuery};
use milecount::storage::{Database, Store};
use milecount::AppError;

async fn store() -> Store {
    Store::open("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

fn vehicle(submodel: Option<&str>, city_mpg: Option<f64>) -> NewVehicle {
    let mut query = VehicleQuery::new("Toyota", "Camry", "2018");
    query.submodel = submodel.map(str::to_string);
    NewVehicle {
        vehicle: query,
        city_mpg,
    }
}

#[tokio::test]
async fn test_connect_runs_migrations() {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'vehicles') ORDER BY name",
    )
    .fetch_all(db.pool())
    .await
    .unwrap();

    let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(names, vec!["users", "vehicles"]);
}

#[tokio::test]
async fn test_file_database_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("milecount.db");
    let url = format!("sqlite:{}", path.display());

    let store = Store::open(&url).await.unwrap();
    store.users.create_user("file@example.com", "longenough").await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_create_and_verify_user() {
    let store = store().await;

    let user = store
        .users
        .create_user("Driver@Example.com", "correct horse")
        .await
        .unwrap();
    assert_eq!(user.email, "driver@example.com");
    assert_ne!(user.password_hash, "correct horse");
    assert!(user.password_hash.starts_with("$argon2"));

    let verified = store
        .users
        .verify("driver@example.com", "correct horse")
        .await
        .unwrap();
    assert_eq!(verified.map(|u| u.id), Some(user.id));

    assert!(store
        .users
        .verify("driver@example.com", "wrong horse")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .users
        .verify("nobody@example.com", "correct horse")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let store = store().await;

    store.users.create_user("driver@example.com", "password-one").await.unwrap();
    let err = store
        .users
        .create_user("DRIVER@example.com", "password-two")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_find_user() {
    let store = store().await;
    let user = store.users.create_user("driver@example.com", "longenough").await.unwrap();

    let by_email = store.users.find_by_email(" driver@example.com ").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    let by_id = store.users.find_by_id(user.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.email), Some("driver@example.com".to_string()));

    assert!(store.users.find_by_id(user.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_and_list_vehicles() {
    let store = store().await;
    let owner = store.users.create_user("driver@example.com", "longenough").await.unwrap();
    let other = store.users.create_user("other@example.com", "longenough").await.unwrap();

    let first = store
        .vehicles
        .save_vehicle(owner.id, &vehicle(Some("SE"), Some(28.0)))
        .await
        .unwrap();
    store
        .vehicles
        .save_vehicle(owner.id, &vehicle(None, None))
        .await
        .unwrap();
    store
        .vehicles
        .save_vehicle(other.id, &vehicle(Some("XLE"), Some(27.0)))
        .await
        .unwrap();

    let list = store.vehicles.list_by_owner(owner.id).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, first.id);
    assert_eq!(list[0].submodel.as_deref(), Some("SE"));
    assert_eq!(list[0].known_mpg(), Some(28.0));
    assert_eq!(list[1].submodel, None);
    assert_eq!(list[1].known_mpg(), None);
}

#[tokio::test]
async fn test_non_positive_mpg_is_stored_as_unknown() {
    let store = store().await;
    let owner = store.users.create_user("driver@example.com", "longenough").await.unwrap();

    let saved = store
        .vehicles
        .save_vehicle(owner.id, &vehicle(None, Some(0.0)))
        .await
        .unwrap();
    assert_eq!(saved.city_mpg, None);
}

#[tokio::test]
async fn test_find_matching_vehicle() {
    let store = store().await;
    let owner = store.users.create_user("driver@example.com", "longenough").await.unwrap();
    store
        .vehicles
        .save_vehicle(owner.id, &vehicle(Some("Hybrid"), Some(51.0)))
        .await
        .unwrap();

    let query = VehicleQuery::new("toyota", "CAMRY", "2018").with_submodel("hybrid");
    let found = store.vehicles.find_matching(owner.id, &query).await.unwrap();
    assert_eq!(found.and_then(|v| v.known_mpg()), Some(51.0));

    let other_year = VehicleQuery::new("Toyota", "Camry", "2019").with_submodel("Hybrid");
    assert!(store
        .vehicles
        .find_matching(owner.id, &other_year)
        .await
        .unwrap()
        .is_none());

    let no_submodel = VehicleQuery::new("Toyota", "Camry", "2018");
    assert!(store
        .vehicles
        .find_matching(owner.id, &no_submodel)
        .await
        .unwrap()
        .is_none());
}
