//! Repository for the `owners` table and the pets they own.

use std::collections::HashMap;

use async_trait::async_trait;
use petclinic_core::search::escape_like;
use petclinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::owner::Owner;
use crate::models::pet::Pet;
use crate::repositories::OwnerRepository;

/// Column list shared across owner queries.
const COLUMNS: &str = "id, first_name, last_name, address, city, telephone";

/// Pet columns with the type name joined in.
const PET_COLUMNS: &str = "p.id, p.owner_id, p.name, p.birth_date, t.name AS pet_type";

/// PostgreSQL-backed owner repository.
#[derive(Clone)]
pub struct OwnerRepo {
    pool: PgPool,
}

impl OwnerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, owner: &Owner) -> Result<Owner, sqlx::Error> {
        let query = format!(
            "INSERT INTO owners (first_name, last_name, address, city, telephone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Owner>(&query)
            .bind(&owner.first_name)
            .bind(&owner.last_name)
            .bind(&owner.address)
            .bind(&owner.city)
            .bind(&owner.telephone)
            .fetch_one(&self.pool)
            .await
    }

    /// Overwrite the contact fields of an existing owner. Pets are untouched.
    async fn update(&self, id: DbId, owner: &Owner) -> Result<Owner, sqlx::Error> {
        let query = format!(
            "UPDATE owners SET
                first_name = $2,
                last_name = $3,
                address = $4,
                city = $5,
                telephone = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let mut updated = sqlx::query_as::<_, Owner>(&query)
            .bind(id)
            .bind(&owner.first_name)
            .bind(&owner.last_name)
            .bind(&owner.address)
            .bind(&owner.city)
            .bind(&owner.telephone)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        updated.pets = self.pets_for_owners(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(updated)
    }

    /// Pets for the given owners, grouped by owner and ordered by name.
    async fn pets_for_owners(
        &self,
        owner_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Pet>>, sqlx::Error> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {PET_COLUMNS} FROM pets p
             JOIN pet_types t ON t.id = p.type_id
             WHERE p.owner_id = ANY($1)
             ORDER BY p.name ASC, p.id ASC"
        );
        let pets = sqlx::query_as::<_, Pet>(&query)
            .bind(owner_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Pet>> = HashMap::new();
        for pet in pets {
            grouped.entry(pet.owner_id).or_default().push(pet);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl OwnerRepository for OwnerRepo {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners WHERE id = $1");
        let Some(mut owner) = sqlx::query_as::<_, Owner>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };
        owner.pets = self.pets_for_owners(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(Some(owner))
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Owner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM owners
             WHERE first_name LIKE $1 || '%' ESCAPE '\\'
             ORDER BY last_name ASC, first_name ASC, id ASC"
        );
        let mut owners = sqlx::query_as::<_, Owner>(&query)
            .bind(escape_like(first_name))
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<DbId> = owners.iter().filter_map(|o| o.id).collect();
        let mut pets = self.pets_for_owners(&ids).await?;
        for owner in &mut owners {
            if let Some(id) = owner.id {
                owner.pets = pets.remove(&id).unwrap_or_default();
            }
        }
        Ok(owners)
    }

    async fn save(&self, owner: &Owner) -> Result<Owner, sqlx::Error> {
        match owner.id {
            None => self.insert(owner).await,
            Some(id) => self.update(id, owner).await,
        }
    }
}
