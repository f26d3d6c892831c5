//! Integration tests for the PostgreSQL owner and visit repositories.
//!
//! Runs against a real database with the sample-data migration applied.
//! Needs `DATABASE_URL`; run with `cargo test -p petclinic-db -- --ignored`.

use assert_matches::assert_matches;
use petclinic_db::models::owner::Owner;
use petclinic_db::repositories::{OwnerRepo, OwnerRepository, VisitRepo, VisitRepository};
use sqlx::PgPool;

fn new_owner(first: &str, last: &str) -> Owner {
    Owner {
        first_name: first.to_string(),
        last_name: last.to_string(),
        address: "4 Elm St.".to_string(),
        city: "Verona".to_string(),
        telephone: "6085550101".to_string(),
        ..Owner::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_by_id_loads_pets_in_name_order(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    let jean = repo.find_by_id(6).await.unwrap().expect("seeded owner 6");

    assert_eq!(jean.first_name, "Jean");
    let pets: Vec<_> = jean.pets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(pets, ["Max", "Samantha"]);
    assert_eq!(jean.pets[0].pet_type, "cat");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_by_id_missing_returns_none(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    assert!(repo.find_by_id(999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn empty_first_name_matches_all(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    assert_eq!(repo.find_by_first_name("").await.unwrap().len(), 10);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn first_name_prefix_search_is_ordered_by_last_name(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    let owners = repo.find_by_first_name("Je").await.unwrap();
    let names: Vec<_> = owners.iter().map(|o| o.last_name.as_str()).collect();
    assert_eq!(names, ["Black", "Coleman"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn like_wildcards_in_filter_match_literally(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    assert!(repo.find_by_first_name("%").await.unwrap().is_empty());
    assert!(repo.find_by_first_name("_eff").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_new_owner_assigns_id(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    let saved = repo.save(&new_owner("Zoe", "Quinn")).await.unwrap();

    let id = saved.id.expect("id assigned on insert");
    let loaded = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded.first_name, "Zoe");
    assert!(loaded.pets.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_existing_owner_updates_fields_and_keeps_pets(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    let mut edited = new_owner("Georgina", "Franklin");
    edited.id = Some(1);

    let saved = repo.save(&edited).await.unwrap();
    assert_eq!(saved.id, Some(1));
    assert_eq!(saved.first_name, "Georgina");
    assert_eq!(saved.pets.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_unknown_id_is_row_not_found(pool: PgPool) {
    let repo = OwnerRepo::new(pool);
    let mut ghost = new_owner("No", "Body");
    ghost.id = Some(999_999);
    assert_matches!(repo.save(&ghost).await, Err(sqlx::Error::RowNotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn visits_are_loaded_per_pet_oldest_first(pool: PgPool) {
    let repo = VisitRepo::new(pool);
    let visits = repo.find_by_pet_id(8).await.unwrap();
    let descriptions: Vec<_> = visits.iter().map(|v| v.description.as_str()).collect();
    assert_eq!(descriptions, ["rabies shot", "neutered"]);
    assert!(repo.find_by_pet_id(1).await.unwrap().is_empty());
}
