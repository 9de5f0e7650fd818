//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use super::referenced;
use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        user::{CreateUser, UpdateUser},
        LoginRequest, LoginResponse, PageQuery, Role, User, UserClaims,
    },
    repository::Repository,
};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by email and password and issue a JWT
    pub async fn authenticate(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .repository
            .users
            .get_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(&user.password, &request.password)? {
            tracing::warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        tracing::info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in(),
            user,
        })
    }

    fn expires_in(&self) -> i64 {
        self.config.jwt_expiration_hours as i64 * 3600
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp: now + self.expires_in(),
            iat: now,
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    pub async fn list(&self, page: &PageQuery) -> AppResult<(Vec<User>, i64)> {
        self.repository.users.list(page.per_page(), page.offset()).await
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()?;
        if self.repository.users.email_exists(&data.email, None).await? {
            return Err(AppError::Conflict(format!("Email {} is already registered", data.email)));
        }
        self.check_references(data.department_id, data.location_id).await?;

        let hash = hash_password(&data.password)?;
        let user = self.repository.users.create(data, &hash).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        data.validate()?;
        if let Some(ref email) = data.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict(format!("Email {} is already registered", email)));
            }
        }
        self.check_references(data.department_id, data.location_id).await?;

        let hash = data.password.as_deref().map(hash_password).transpose()?;
        let user = self.repository.users.update(id, data, hash.as_deref()).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Soft-delete a user who holds no assets and manages no department
    pub async fn delete(&self, id: i32, actor_id: i32) -> AppResult<()> {
        if id == actor_id {
            return Err(AppError::BusinessRule("You cannot delete your own account".to_string()));
        }
        self.repository.users.get_by_id(id).await?;

        if self.repository.assets.exists_assigned_to(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete user: assets are still checked out to them".to_string(),
            ));
        }
        if self.repository.departments.exists_for_manager(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete user: they manage a department".to_string(),
            ));
        }
        self.repository.users.soft_delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Create an administrator, or promote and reset the password of an
    /// existing account with that email
    pub async fn create_admin(&self, email: &str, name: &str, password: &str) -> AppResult<User> {
        let data = CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Some(Role::Admin),
            department_id: None,
            location_id: None,
        };
        data.validate()?;

        if let Some(existing) = self.repository.users.get_by_email(email).await? {
            let hash = hash_password(password)?;
            self.repository
                .users
                .set_credentials(existing.id, Role::Admin, &hash)
                .await?;
            tracing::info!(user_id = existing.id, "Existing user promoted to admin");
            return self.repository.users.get_by_id(existing.id).await;
        }

        self.create(&data).await
    }

    async fn check_references(&self, department_id: Option<i32>, location_id: Option<i32>) -> AppResult<()> {
        if let Some(department_id) = department_id {
            referenced(self.repository.departments.get_by_id(department_id).await)?;
        }
        if let Some(location_id) = location_id {
            referenced(self.repository.locations.get_by_id(location_id).await)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse battery").unwrap());
        assert!(!verify_password(&hash, "wrong password").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("not-a-hash", "whatever"),
            Err(AppError::Internal(_))
        ));
    }
}
