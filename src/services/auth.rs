/// Authentication service: registration, login and bearer token resolution
use crate::error::{ApiError, Result};
use chrono::Utc;
use model::entities::user;
use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr,
};
use tracing::{debug, info, instrument, trace, warn};

/// Random bytes per token; rendered as twice as many hex characters.
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct AuthService {
    hash_cost: u32,
}

impl AuthService {
    pub fn new(hash_cost: u32) -> Self {
        Self { hash_cost }
    }

    /// Hash a password using bcrypt on the blocking pool
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.hash_cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    /// Verify a password against a hash on the blocking pool
    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }

    /// Generate a fresh, unpredictable bearer token.
    pub fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Create a user with a hashed password.
    #[instrument(skip(self, db, password))]
    pub async fn register<C: ConnectionTrait>(
        &self,
        db: &C,
        username: &str,
        password: &str,
        email: Option<String>,
    ) -> Result<user::Model> {
        trace!("Checking whether username is taken");
        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?;
        if existing.is_some() {
            warn!("Registration rejected, username '{}' already exists", username);
            return Err(ApiError::DuplicateUsername(username.to_string()));
        }

        let new_user = user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email),
            password_hash: Set(self.hash_password(password).await?),
            token: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match new_user.insert(db).await {
            Ok(user_model) => {
                info!("User registered with ID: {}, username: {}", user_model.id, user_model.username);
                Ok(user_model)
            }
            // A concurrent registration can pass the pre-check; the unique index decides.
            Err(db_error) if matches!(db_error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                warn!("Registration lost a race for username '{}'", username);
                Err(ApiError::DuplicateUsername(username.to_string()))
            }
            Err(db_error) => Err(db_error.into()),
        }
    }

    /// Check credentials and issue a new token, replacing any previous one.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    #[instrument(skip(self, db, password))]
    pub async fn login<C: ConnectionTrait>(
        &self,
        db: &C,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let Some(user_model) = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?
        else {
            debug!("Login failed: no such user");
            return Err(ApiError::InvalidCredentials);
        };

        if !self.verify_password(password, &user_model.password_hash).await? {
            debug!("Login failed: password mismatch for user ID {}", user_model.id);
            return Err(ApiError::InvalidCredentials);
        }

        let token = Self::generate_token();
        let user_id = user_model.id;
        let mut active: user::ActiveModel = user_model.into();
        active.token = Set(Some(token.clone()));
        active.update(db).await?;

        info!("Issued new token for user ID {}", user_id);
        Ok(token)
    }

    /// Resolve the value of an `Authorization` header to the user it belongs to.
    #[instrument(skip_all)]
    pub async fn resolve<C: ConnectionTrait>(
        &self,
        db: &C,
        authorization: Option<&str>,
    ) -> Result<user::Model> {
        let token = parse_bearer(authorization)?;

        match user::Entity::find()
            .filter(user::Column::Token.eq(token))
            .one(db)
            .await?
        {
            Some(user_model) => {
                trace!("Resolved token to user ID {}", user_model.id);
                Ok(user_model)
            }
            None => {
                debug!("Presented token matches no user");
                Err(ApiError::Unauthenticated("Invalid token"))
            }
        }
    }
}

/// Split a `Bearer <token>` header value into its token.
fn parse_bearer(authorization: Option<&str>) -> Result<&str> {
    let header = authorization.ok_or(ApiError::Unauthenticated("Missing authorization header"))?;

    let mut parts = header.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ApiError::Unauthenticated("Invalid authorization header"));
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::Unauthenticated("Invalid auth scheme"));
    }
    Ok(token)
}
