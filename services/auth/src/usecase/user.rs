use crate::domain::repository::UserStore;
use crate::domain::types::{NewUser, User};
use crate::error::AuthServiceError;

pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// Registration proxies to the external users service after validating input
/// and rejecting duplicate emails up front.
pub struct RegisterUserUseCase<U: UserStore> {
    pub users: U,
}

impl<U: UserStore> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, AuthServiceError> {
        if input.username.is_empty() || input.email.is_empty() {
            return Err(AuthServiceError::MissingUserFields);
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthServiceError::EmailInUse);
        }

        self.users
            .create(&NewUser {
                name: input.username,
                email: input.email,
                avatar: input.avatar,
            })
            .await
    }
}
