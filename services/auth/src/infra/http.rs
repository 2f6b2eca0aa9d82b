use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::UserStore;
use crate::domain::types::{NewUser, User};
use crate::error::AuthServiceError;

/// Users-service client. The auth service owns no user rows; lookups and
/// registration go over HTTP to the users service.
#[derive(Clone)]
pub struct HttpUserStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserStore {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[derive(Deserialize)]
struct UserDto {
    id: Uuid,
    name: Option<String>,
    email: String,
    avatar: Option<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            avatar: dto.avatar,
        }
    }
}

#[derive(Serialize)]
struct CreateUserDto<'a> {
    name: &'a str,
    email: &'a str,
    avatar: Option<&'a str>,
}

impl UserStore for HttpUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError> {
        let response = self
            .client
            .get(format!("{}/users", self.base_url))
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("users service find_by_email failed: {e}"))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let dto: UserDto = response
                    .json()
                    .await
                    .map_err(|e| anyhow::anyhow!("users service returned invalid body: {e}"))?;
                Ok(Some(dto.into()))
            }
            status => Err(anyhow::anyhow!("users service find_by_email returned {status}").into()),
        }
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, AuthServiceError> {
        let response = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(&CreateUserDto {
                name: &new_user.name,
                email: &new_user.email,
                avatar: new_user.avatar.as_deref(),
            })
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("users service create failed: {e}"))?;

        match response.status() {
            StatusCode::CONFLICT => Err(AuthServiceError::EmailInUse),
            status if status.is_success() => {
                let dto: UserDto = response
                    .json()
                    .await
                    .map_err(|e| anyhow::anyhow!("users service returned invalid body: {e}"))?;
                Ok(dto.into())
            }
            status => Err(anyhow::anyhow!("users service create returned {status}").into()),
        }
    }
}
