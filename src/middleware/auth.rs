use crate::core::AppError;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Characters of the key stored in clear for lookup
pub const KEY_PREFIX_LEN: usize = 12;

/// API Key authentication middleware
pub struct ApiKeyAuth {
    pool: MySqlPool,
}

impl ApiKeyAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();

        Box::pin(async move {
            if super::is_public_path(req.path()) {
                return svc.call(req).await;
            }

            let api_key = req
                .headers()
                .get("X-API-Key")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-API-Key header")))?
                .to_string();

            let record = validate_api_key(&pool, &api_key)
                .await
                .map_err(Error::from)?;

            req.extensions_mut().insert(StaffId(record.staff_id.clone()));
            req.extensions_mut().insert(record);

            svc.call(req).await
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRecord {
    pub id: String,
    pub key_prefix: String,
    pub key_hash: String,
    pub staff_id: String,
    pub is_active: bool,
}

/// Authenticated staff member, set by [`ApiKeyAuth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffId(pub String);

impl StaffId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromRequest for StaffId {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<StaffId>()
                .cloned()
                .ok_or_else(|| AppError::unauthorized("Request is not authenticated").into()),
        )
    }
}

/// Lookup prefix of a presented key
pub fn key_prefix(api_key: &str) -> Option<&str> {
    api_key.get(..KEY_PREFIX_LEN)
}

async fn validate_api_key(pool: &MySqlPool, api_key: &str) -> crate::core::Result<ApiKeyRecord> {
    let prefix = key_prefix(api_key).ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

    let record = sqlx::query_as::<_, ApiKeyRecord>(
        r#"
        SELECT id, key_prefix, key_hash, staff_id, is_active
        FROM api_keys
        WHERE key_prefix = ?
        LIMIT 1
        "#,
    )
    .bind(prefix)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

    if !verify_api_key(api_key, &record.key_hash)? {
        return Err(AppError::unauthorized("Invalid API key"));
    }

    if !record.is_active {
        return Err(AppError::unauthorized("API key is inactive"));
    }

    // Best effort; a failed timestamp update does not fail the request
    if let Err(e) = sqlx::query("UPDATE api_keys SET last_used_at = UTC_TIMESTAMP() WHERE id = ?")
        .bind(&record.id)
        .execute(pool)
        .await
    {
        tracing::warn!(api_key_id = record.id.as_str(), error = %e, "Failed to update last_used_at");
    }

    Ok(record)
}

/// Hash an API key with Argon2 for storage
pub fn hash_api_key(api_key: &str) -> crate::core::Result<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
        Argon2,
    };

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(api_key.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash API key: {}", e)))
}

/// Check a presented key against its stored Argon2 hash
pub fn verify_api_key(api_key: &str, hash: &str) -> crate::core::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(api_key.as_bytes(), &parsed_hash)
        .is_ok())
}
