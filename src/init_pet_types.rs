//! One-shot pet-type bootstrap that runs on the startup path.
//!
//! Downloads the configured bootstrap object, optionally decrypts it, and
//! persists one pet type per non-blank line. Every external call is isolated:
//! a failure degrades the feature, never application startup.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::cloud::{KeyService, ObjectStore};
use crate::config;
use crate::db;

/// Batch persistence seam for the bootstrap run. All rows commit or none do.
#[async_trait]
pub trait PetTypeRepository: Send + Sync {
    async fn save_all(&self, names: &[String]) -> Result<u64, sqlx::Error>;
}

pub struct PgPetTypeRepository {
    pool: PgPool,
}

impl PgPetTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetTypeRepository for PgPetTypeRepository {
    async fn save_all(&self, names: &[String]) -> Result<u64, sqlx::Error> {
        db::pet_types::insert_pet_types(&self.pool, names).await
    }
}

/// Bootstrap settings, resolved once at startup and immutable afterward.
#[derive(Debug, Clone)]
pub struct InitSettings {
    pub bucket: String,
    pub object_key: String,
    pub kms_encrypted: bool,
    pub kms_key_alias: String,
}

impl InitSettings {
    pub fn from_env() -> Self {
        Self {
            bucket: config::INIT_PET_TYPES_BUCKET.clone(),
            object_key: config::INIT_PET_TYPES_KEY.clone(),
            kms_encrypted: *config::INIT_PET_TYPES_KMS_ENCRYPTED,
            kms_key_alias: config::INIT_PET_TYPES_KMS_KEY_ALIAS.clone(),
        }
    }
}

pub struct PetTypeInitializer {
    settings: InitSettings,
    object_store: Option<Arc<dyn ObjectStore>>,
    key_service: Option<Arc<dyn KeyService>>,
    repository: Arc<dyn PetTypeRepository>,
}

impl PetTypeInitializer {
    pub fn new(
        settings: InitSettings,
        object_store: Option<Arc<dyn ObjectStore>>,
        key_service: Option<Arc<dyn KeyService>>,
        repository: Arc<dyn PetTypeRepository>,
    ) -> Self {
        Self {
            settings,
            object_store,
            key_service,
            repository,
        }
    }

    /// Run the bootstrap pipeline: fetch, optional decrypt, parse, persist,
    /// cleanup. Never returns an error; each stage logs its own failure and
    /// either stops the run or lets it continue where that is safe.
    pub async fn run(&self) {
        let Some(store) = self.object_store.as_deref() else {
            info!("no object store configured, skipping pet type bootstrap");
            return;
        };

        info!(
            bucket = %self.settings.bucket,
            key = %self.settings.object_key,
            "loading pet types from object store"
        );
        let Some(contents) = self.fetch(store).await else {
            return;
        };
        let contents = self.maybe_decrypt(contents).await;

        let names = parse_pet_type_names(&contents);
        info!(count = names.len(), "found pet types");
        if names.is_empty() {
            return;
        }

        if !self.persist(&names).await {
            return;
        }
        self.cleanup(store).await;
    }

    async fn fetch(&self, store: &dyn ObjectStore) -> Option<String> {
        match store
            .get_object(&self.settings.bucket, &self.settings.object_key)
            .await
        {
            Ok(contents) => Some(contents),
            Err(error) => {
                warn!(%error, "failed retrieving pet types from object store (skipping bootstrap)");
                None
            }
        }
    }

    /// Decrypt the fetched contents when the object is marked encrypted. A
    /// missing key service or a failed decrypt keeps the original contents.
    async fn maybe_decrypt(&self, contents: String) -> String {
        if !self.settings.kms_encrypted {
            return contents;
        }
        let Some(kms) = self.key_service.as_deref() else {
            warn!("decryption requested but no key service available; skipping decryption");
            return contents;
        };

        info!(key_alias = %self.settings.kms_key_alias, "decrypting pet types");
        match kms
            .decrypt(contents.as_bytes(), &self.settings.kms_key_alias)
            .await
        {
            Ok(plaintext) => match String::from_utf8(plaintext) {
                Ok(decrypted) => decrypted,
                Err(error) => {
                    warn!(%error, "decrypted payload is not UTF-8 (continuing with original contents)");
                    contents
                }
            },
            Err(error) => {
                warn!(%error, "failed decrypt (continuing with original contents)");
                contents
            }
        }
    }

    async fn persist(&self, names: &[String]) -> bool {
        match self.repository.save_all(names).await {
            Ok(saved) => {
                info!(saved, "saved pet types");
                true
            }
            Err(error) => {
                warn!(%error, "failed persisting pet types (keeping bootstrap object)");
                false
            }
        }
    }

    async fn cleanup(&self, store: &dyn ObjectStore) {
        info!(
            bucket = %self.settings.bucket,
            key = %self.settings.object_key,
            "deleting pet types bootstrap object"
        );
        if let Err(error) = store
            .delete_object(&self.settings.bucket, &self.settings.object_key)
            .await
        {
            warn!(%error, "failed deleting pet types bootstrap object");
        }
    }
}

/// One candidate name per non-blank line.
pub fn parse_pet_type_names(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}
