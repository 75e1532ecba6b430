use axum::{routing::get, Router};

use crate::pet_types;

pub async fn root() -> &'static str {
    "Petclinic API"
}

pub fn api_routes() -> Router {
    Router::new().route("/api/pettypes", get(pet_types::list_pet_types))
}
