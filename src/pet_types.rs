use axum::{extract::Extension, Json};
use sqlx::PgPool;

use crate::db::pet_types::{list_pet_types as list_from_db, PetTypeRecord};
use crate::error::AppResult;

pub async fn list_pet_types(
    Extension(pool): Extension<PgPool>,
) -> AppResult<Json<Vec<PetTypeRecord>>> {
    let types = list_from_db(&pool).await?;
    Ok(Json(types))
}
