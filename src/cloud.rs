use std::sync::Arc;

use async_trait::async_trait;
use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::Region;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_kms::primitives::Blob;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("object fetch failed: {0}")]
    Fetch(String),
    #[error("object delete failed: {0}")]
    Delete(String),
    #[error("decrypt failed: {0}")]
    Decrypt(String),
    #[error("object is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Get/delete against a named bucket/key pair in blob storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<String, CloudError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), CloudError>;
}

/// Decrypt ciphertext with a managed key identified by alias.
#[async_trait]
pub trait KeyService: Send + Sync {
    async fn decrypt(&self, ciphertext: &[u8], key_alias: &str) -> Result<Vec<u8>, CloudError>;
}

/// Probe the default AWS credential chain and force one resolution. `None`
/// disables every downstream cloud feature; the application keeps booting.
pub async fn resolve_credentials() -> Option<SharedCredentialsProvider> {
    let chain = DefaultCredentialsChain::builder().build().await;
    match chain.provide_credentials().await {
        Ok(_) => Some(SharedCredentialsProvider::new(chain)),
        Err(error) => {
            tracing::info!(%error, "no AWS credentials available; running without AWS integration");
            None
        }
    }
}

fn region() -> Region {
    config::AWS_REGION
        .clone()
        .map(Region::new)
        .unwrap_or_else(|| Region::new(config::DEFAULT_AWS_REGION))
}

/// Build the S3-backed object store, or `None` when credentials are absent.
pub async fn object_store(
    credentials: Option<&SharedCredentialsProvider>,
) -> Option<Arc<dyn ObjectStore>> {
    let credentials = credentials?;
    let sdk_config = aws_config::from_env()
        .region(region())
        .credentials_provider(credentials.clone())
        .load()
        .await;
    Some(Arc::new(S3ObjectStore {
        client: aws_sdk_s3::Client::new(&sdk_config),
    }))
}

/// Build the KMS-backed key service, or `None` when credentials are absent.
pub async fn key_service(
    credentials: Option<&SharedCredentialsProvider>,
) -> Option<Arc<dyn KeyService>> {
    let credentials = credentials?;
    let sdk_config = aws_config::from_env()
        .region(region())
        .credentials_provider(credentials.clone())
        .load()
        .await;
    Some(Arc::new(KmsKeyService {
        client: aws_sdk_kms::Client::new(&sdk_config),
    }))
}

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<String, CloudError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CloudError::Fetch(e.to_string()))?;
        let data = output
            .body
            .collect()
            .await
            .map_err(|e| CloudError::Fetch(e.to_string()))?;
        Ok(String::from_utf8(data.into_bytes().to_vec())?)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), CloudError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CloudError::Delete(e.to_string()))?;
        Ok(())
    }
}

pub struct KmsKeyService {
    client: aws_sdk_kms::Client,
}

#[async_trait]
impl KeyService for KmsKeyService {
    async fn decrypt(&self, ciphertext: &[u8], key_alias: &str) -> Result<Vec<u8>, CloudError> {
        let result = self
            .client
            .decrypt()
            .ciphertext_blob(Blob::new(ciphertext))
            .key_id(key_alias)
            .send()
            .await
            .map_err(|e| CloudError::Decrypt(e.to_string()))?;
        let plaintext = result
            .plaintext()
            .ok_or_else(|| CloudError::Decrypt("no plaintext returned".into()))?;
        Ok(plaintext.as_ref().to_vec())
    }
}
