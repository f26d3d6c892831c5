//! In-memory clinic store.
//!
//! Implements the same repository contracts as the PostgreSQL repositories.
//! Used when no `DATABASE_URL` is configured and by the HTTP tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use petclinic_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::owner::Owner;
use crate::models::pet::{NewPet, Pet};
use crate::models::visit::{NewVisit, Visit};
use crate::repositories::{OwnerRepository, VisitRepository};

#[derive(Debug, Default)]
struct ClinicData {
    /// Owners without pets; pets are attached on read.
    owners: BTreeMap<DbId, Owner>,
    pets: BTreeMap<DbId, Pet>,
    visits: BTreeMap<DbId, Visit>,
    next_owner_id: DbId,
    next_pet_id: DbId,
    next_visit_id: DbId,
}

impl ClinicData {
    fn next_id(counter: &mut DbId) -> DbId {
        *counter += 1;
        *counter
    }

    fn with_pets(&self, owner: &Owner) -> Owner {
        let mut owner = owner.clone();
        let mut pets: Vec<Pet> = self
            .pets
            .values()
            .filter(|pet| Some(pet.owner_id) == owner.id)
            .cloned()
            .collect();
        pets.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        owner.pets = pets;
        owner
    }
}

/// Thread-safe in-memory store implementing both repository traits.
#[derive(Debug, Default)]
pub struct InMemoryClinic {
    data: RwLock<ClinicData>,
}

impl InMemoryClinic {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the sample clinic data.
    ///
    /// Fails if a sample pet or visit refers to a row that was not loaded.
    pub async fn with_sample_data() -> Result<Self, sqlx::Error> {
        let store = Self::new();
        store.load_sample_data().await?;
        Ok(store)
    }

    /// Register a pet. Fails with `RowNotFound` if the owner does not exist.
    pub async fn add_pet(&self, input: NewPet) -> Result<Pet, sqlx::Error> {
        let mut data = self.data.write().await;
        if !data.owners.contains_key(&input.owner_id) {
            return Err(sqlx::Error::RowNotFound);
        }
        let id = ClinicData::next_id(&mut data.next_pet_id);
        let pet = Pet {
            id,
            owner_id: input.owner_id,
            name: input.name,
            birth_date: input.birth_date,
            pet_type: input.pet_type,
            visits: Vec::new(),
        };
        data.pets.insert(id, pet.clone());
        Ok(pet)
    }

    /// Record a visit. Fails with `RowNotFound` if the pet does not exist.
    pub async fn add_visit(&self, input: NewVisit) -> Result<Visit, sqlx::Error> {
        let mut data = self.data.write().await;
        if !data.pets.contains_key(&input.pet_id) {
            return Err(sqlx::Error::RowNotFound);
        }
        let id = ClinicData::next_id(&mut data.next_visit_id);
        let visit = Visit {
            id,
            pet_id: input.pet_id,
            visit_date: input.visit_date,
            description: input.description,
        };
        data.visits.insert(id, visit.clone());
        Ok(visit)
    }

    pub async fn owner_count(&self) -> usize {
        self.data.read().await.owners.len()
    }

    async fn load_sample_data(&self) -> Result<(), sqlx::Error> {
        for (first, last, address, city, telephone) in SAMPLE_OWNERS {
            let owner = Owner {
                first_name: first.to_string(),
                last_name: last.to_string(),
                address: address.to_string(),
                city: city.to_string(),
                telephone: telephone.to_string(),
                ..Owner::default()
            };
            self.save(&owner).await?;
        }
        for (owner_id, name, birth_date, pet_type) in SAMPLE_PETS {
            self.add_pet(NewPet {
                owner_id,
                name: name.to_string(),
                birth_date: Some(parse_sample_date(birth_date)?),
                pet_type: pet_type.to_string(),
            })
            .await?;
        }
        for (pet_id, visit_date, description) in SAMPLE_VISITS {
            self.add_visit(NewVisit {
                pet_id,
                visit_date: parse_sample_date(visit_date)?,
                description: description.to_string(),
            })
            .await?;
        }
        tracing::debug!(
            owners = SAMPLE_OWNERS.len(),
            pets = SAMPLE_PETS.len(),
            visits = SAMPLE_VISITS.len(),
            "Loaded sample clinic data"
        );
        Ok(())
    }
}

fn parse_sample_date(value: &str) -> Result<NaiveDate, sqlx::Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

#[async_trait]
impl OwnerRepository for InMemoryClinic {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Owner>, sqlx::Error> {
        let data = self.data.read().await;
        Ok(data.owners.get(&id).map(|owner| data.with_pets(owner)))
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Owner>, sqlx::Error> {
        let data = self.data.read().await;
        let mut owners: Vec<Owner> = data
            .owners
            .values()
            .filter(|owner| owner.first_name.starts_with(first_name))
            .map(|owner| data.with_pets(owner))
            .collect();
        owners.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(owners)
    }

    async fn save(&self, owner: &Owner) -> Result<Owner, sqlx::Error> {
        let mut data = self.data.write().await;
        let id = match owner.id {
            Some(id) if data.owners.contains_key(&id) => id,
            Some(_) => return Err(sqlx::Error::RowNotFound),
            None => ClinicData::next_id(&mut data.next_owner_id),
        };
        let stored = Owner {
            id: Some(id),
            pets: Vec::new(),
            ..owner.clone()
        };
        data.owners.insert(id, stored);
        Ok(data.with_pets(&data.owners[&id]))
    }
}

#[async_trait]
impl VisitRepository for InMemoryClinic {
    async fn find_by_pet_id(&self, pet_id: DbId) -> Result<Vec<Visit>, sqlx::Error> {
        let data = self.data.read().await;
        let mut visits: Vec<Visit> = data
            .visits
            .values()
            .filter(|visit| visit.pet_id == pet_id)
            .cloned()
            .collect();
        visits.sort_by(|a, b| a.visit_date.cmp(&b.visit_date).then(a.id.cmp(&b.id)));
        Ok(visits)
    }
}

// Same rows as the `0002_sample_data` migration.

const SAMPLE_OWNERS: [(&str, &str, &str, &str, &str); 10] = [
    ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    ("Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    ("Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    ("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    ("Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

const SAMPLE_PETS: [(DbId, &str, &str, &str); 13] = [
    (1, "Leo", "2010-09-07", "cat"),
    (2, "Basil", "2012-08-06", "hamster"),
    (3, "Rosy", "2011-04-17", "dog"),
    (3, "Jewel", "2010-03-07", "dog"),
    (4, "Iggy", "2010-11-30", "lizard"),
    (5, "George", "2010-01-20", "snake"),
    (6, "Samantha", "2012-09-04", "cat"),
    (6, "Max", "2012-09-04", "cat"),
    (7, "Lucky", "2011-08-06", "bird"),
    (8, "Mulligan", "2007-02-24", "dog"),
    (9, "Freddy", "2010-03-09", "bird"),
    (10, "Lucky", "2010-06-24", "dog"),
    (10, "Sly", "2012-06-08", "cat"),
];

const SAMPLE_VISITS: [(DbId, &str, &str); 4] = [
    (7, "2013-01-01", "rabies shot"),
    (8, "2013-01-02", "rabies shot"),
    (8, "2013-01-03", "neutered"),
    (7, "2013-01-04", "spayed"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn owner(first: &str, last: &str) -> Owner {
        Owner {
            first_name: first.into(),
            last_name: last.into(),
            address: "1 Main St.".into(),
            city: "Madison".into(),
            telephone: "6085550000".into(),
            ..Owner::default()
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let store = InMemoryClinic::new();
        let first = store.save(&owner("Ann", "Lee")).await.unwrap();
        let second = store.save(&owner("Bob", "Ray")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn save_with_id_updates_in_place_and_keeps_pets() {
        let store = InMemoryClinic::new();
        let saved = store.save(&owner("Ann", "Lee")).await.unwrap();
        let id = saved.id.unwrap();
        store
            .add_pet(NewPet {
                owner_id: id,
                name: "Rex".into(),
                birth_date: None,
                pet_type: "dog".into(),
            })
            .await
            .unwrap();

        let mut edited = owner("Anne", "Lee");
        edited.id = Some(id);
        let updated = store.save(&edited).await.unwrap();

        assert_eq!(updated.first_name, "Anne");
        assert_eq!(updated.pets.len(), 1);
        assert_eq!(store.owner_count().await, 1);
    }

    #[tokio::test]
    async fn save_unknown_id_is_row_not_found() {
        let store = InMemoryClinic::new();
        let mut ghost = owner("Ann", "Lee");
        ghost.id = Some(404);
        assert_matches!(store.save(&ghost).await, Err(sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn first_name_search_is_a_case_sensitive_prefix_match() {
        let store = InMemoryClinic::with_sample_data().await.unwrap();
        let hits = store.find_by_first_name("Je").await.unwrap();
        let names: Vec<_> = hits.iter().map(|o| o.first_name.as_str()).collect();
        assert_eq!(names, ["Jeff", "Jean"]);
        assert!(store.find_by_first_name("je").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_filter_matches_everyone() {
        let store = InMemoryClinic::with_sample_data().await.unwrap();
        assert_eq!(store.find_by_first_name("").await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn pets_are_ordered_by_name() {
        let store = InMemoryClinic::with_sample_data().await.unwrap();
        let jean = store.find_by_id(6).await.unwrap().unwrap();
        let names: Vec<_> = jean.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Max", "Samantha"]);
    }

    #[tokio::test]
    async fn visits_belong_to_their_pet() {
        let store = InMemoryClinic::with_sample_data().await.unwrap();
        let visits = store.find_by_pet_id(7).await.unwrap();
        let descriptions: Vec<_> = visits.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(descriptions, ["rabies shot", "spayed"]);
    }

    #[tokio::test]
    async fn pet_for_missing_owner_is_rejected() {
        let store = InMemoryClinic::new();
        let result = store
            .add_pet(NewPet {
                owner_id: 1,
                name: "Stray".into(),
                birth_date: None,
                pet_type: "cat".into(),
            })
            .await;
        assert_matches!(result, Err(sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn sample_data_loads_completely() {
        let store = InMemoryClinic::with_sample_data().await.unwrap();
        assert_eq!(store.owner_count().await, SAMPLE_OWNERS.len());
        let data = store.data.read().await;
        assert_eq!(data.pets.len(), SAMPLE_PETS.len());
        assert_eq!(data.visits.len(), SAMPLE_VISITS.len());
    }

    #[test]
    fn malformed_sample_date_is_a_decode_error() {
        assert_matches!(parse_sample_date("2013-13-01"), Err(sqlx::Error::Decode(_)));
        assert_eq!(
            parse_sample_date("2013-01-04").unwrap(),
            NaiveDate::from_ymd_opt(2013, 1, 4).unwrap()
        );
    }

    #[tokio::test]
    async fn visit_for_missing_pet_is_rejected() {
        let store = InMemoryClinic::new();
        let result = store
            .add_visit(NewVisit {
                pet_id: 1,
                visit_date: NaiveDate::from_ymd_opt(2013, 1, 1).unwrap(),
                description: "checkup".into(),
            })
            .await;
        assert_matches!(result, Err(sqlx::Error::RowNotFound));
    }
}
