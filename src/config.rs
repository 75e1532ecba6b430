use once_cell::sync::Lazy;

/// Address the HTTP server should bind to. Defaults to `0.0.0.0`.
pub static BIND_ADDRESS: Lazy<String> =
    Lazy::new(|| std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()));

/// Port the HTTP server should listen on. Defaults to `3000`.
pub static BIND_PORT: Lazy<u16> = Lazy::new(|| {
    std::env::var("BIND_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3000)
});

/// When set to a truthy value, allows the application to continue running even if database
/// migrations fail. Defaults to `false`.
pub static ALLOW_MIGRATION_FAILURE: Lazy<bool> =
    Lazy::new(|| truthy_env("ALLOW_MIGRATION_FAILURE"));

/// Region used for the S3 and KMS clients. Read from `AWS_REGION`, then
/// `AWS_DEFAULT_REGION`. Absent means [`DEFAULT_AWS_REGION`].
pub static AWS_REGION: Lazy<Option<String>> = Lazy::new(|| {
    read_optional_env("AWS_REGION").or_else(|| read_optional_env("AWS_DEFAULT_REGION"))
});

/// Fallback region when no region env variable is set.
pub const DEFAULT_AWS_REGION: &str = "ap-south-1";

/// Bucket holding the pet-type bootstrap object.
pub static INIT_PET_TYPES_BUCKET: Lazy<String> = Lazy::new(|| {
    std::env::var("INIT_PET_TYPES_BUCKET")
        .unwrap_or_else(|_| "spring-petclinic-init-demo1".to_string())
});

/// Object key of the pet-type bootstrap file.
pub static INIT_PET_TYPES_KEY: Lazy<String> = Lazy::new(|| {
    std::env::var("INIT_PET_TYPES_KEY").unwrap_or_else(|_| "petclinic-pettypes.txt".to_string())
});

/// Whether the bootstrap object is KMS-encrypted. Defaults to `false`.
pub static INIT_PET_TYPES_KMS_ENCRYPTED: Lazy<bool> =
    Lazy::new(|| truthy_env("INIT_PET_TYPES_KMS_ENCRYPTED"));

/// KMS key alias used to decrypt the bootstrap object.
pub static INIT_PET_TYPES_KMS_KEY_ALIAS: Lazy<String> = Lazy::new(|| {
    std::env::var("INIT_PET_TYPES_KMS_KEY_ALIAS")
        .unwrap_or_else(|_| "alias/spring-petclinic-init-demo1".to_string())
});

fn read_optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn truthy_env(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|value| {
            let normalized = value.trim().to_ascii_lowercase();
            matches!(normalized.as_str(), "1" | "true" | "yes")
        })
        .unwrap_or(false)
}
