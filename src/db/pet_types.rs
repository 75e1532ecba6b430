use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone, Serialize)]
pub struct PetTypeRecord {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a batch of pet type names in one transaction. All rows commit or
/// none do.
pub async fn insert_pet_types(pool: &PgPool, names: &[String]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;
    for name in names {
        let result = sqlx::query("INSERT INTO pet_types (name) VALUES ($1)")
            .bind(name)
            .execute(&mut tx)
            .await?;
        inserted += result.rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

pub async fn list_pet_types(pool: &PgPool) -> Result<Vec<PetTypeRecord>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, name, created_at FROM pet_types ORDER BY name, id")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| PetTypeRecord {
            id: r.get("id"),
            name: r.get("name"),
            created_at: r.get("created_at"),
        })
        .collect())
}
