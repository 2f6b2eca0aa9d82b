use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use sesame_auth_schema::otps;

use crate::domain::repository::OtpRepository;
use crate::domain::types::OtpRecord;
use crate::error::AuthServiceError;

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn upsert(&self, record: &OtpRecord) -> Result<(), AuthServiceError> {
        // user_id is the primary key; conflicting inserts replace the row,
        // which is what invalidates any prior unconsumed code.
        let model = otps::ActiveModel {
            user_id: Set(record.user_id),
            code: Set(record.code.clone()),
            expires_at: Set(record.expires_at),
            created_at: Set(record.created_at),
        };
        otps::Entity::insert(model)
            .on_conflict(
                OnConflict::column(otps::Column::UserId)
                    .update_columns([
                        otps::Column::Code,
                        otps::Column::ExpiresAt,
                        otps::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .context("upsert otp")?;
        Ok(())
    }

    async fn find(&self, user_id: Uuid) -> Result<Option<OtpRecord>, AuthServiceError> {
        let model = otps::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find otp")?;
        Ok(model.map(otp_from_model))
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), AuthServiceError> {
        // rows_affected == 0 is fine: deleting a missing record is a no-op.
        otps::Entity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .context("delete otp")?;
        Ok(())
    }

    async fn consume(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AuthServiceError> {
        // Single conditional DELETE: the row goes away only if the code
        // matches exactly and has not expired, so a still-valid code can be
        // consumed at most once even under concurrent verification.
        let result = otps::Entity::delete_many()
            .filter(otps::Column::UserId.eq(user_id))
            .filter(otps::Column::Code.eq(code))
            .filter(otps::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("consume otp")?;
        Ok(result.rows_affected > 0)
    }
}

fn otp_from_model(model: otps::Model) -> OtpRecord {
    OtpRecord {
        user_id: model.user_id,
        code: model.code,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}
