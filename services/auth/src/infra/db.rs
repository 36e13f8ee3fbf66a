use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, SqlErr, TransactionTrait,
};

use equiptrack_auth_schema::{email_verification_tokens, one_time_codes, users};
use equiptrack_domain::user::UserRole;

use crate::domain::repository::{
    OneTimeCodeRepository, UserRepository, VerificationTokenRepository,
};
use crate::domain::types::{NewUser, OneTimeCode, User, VerificationToken};
use crate::error::AuthServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &NewUser) -> Result<i64, AuthServiceError> {
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            security_question_1: Set(user.security_question_1.clone()),
            answer_1_hash: Set(user.answer_1_hash.clone()),
            security_question_2: Set(user.security_question_2.clone()),
            answer_2_hash: Set(user.answer_2_hash.clone()),
            role: Set(UserRole::default().as_str().to_owned()),
            verified: Set(false),
            disabled: Set(false),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        match model.insert(&self.db).await {
            Ok(inserted) => Ok(inserted.id),
            // The pre-insert duplicate checks race under concurrency; the
            // unique indexes are the source of truth for who won.
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("idx_users_email") => {
                    Err(AuthServiceError::EmailTaken)
                }
                Some(SqlErr::UniqueConstraintViolation(msg))
                    if msg.contains("idx_users_username") =>
                {
                    Err(AuthServiceError::UsernameTaken)
                }
                _ => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, AuthServiceError> {
        let models = users::Entity::find()
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn set_role(&self, id: i64, role: UserRole) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            role: Set(role.as_str().to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user role")?;
        Ok(())
    }

    async fn set_verified(&self, id: i64) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            verified: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user verified")?;
        Ok(())
    }

    async fn set_disabled(&self, id: i64, disabled: bool) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            disabled: Set(disabled),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user disabled")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, AuthServiceError> {
    let role = UserRole::from_str(&model.role)
        .ok_or_else(|| anyhow::anyhow!("unknown role in users table: {}", model.role))?;
    Ok(User {
        id: model.id,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        password_hash: model.password_hash,
        security_question_1: model.security_question_1,
        answer_1_hash: model.answer_1_hash,
        security_question_2: model.security_question_2,
        answer_2_hash: model.answer_2_hash,
        role,
        verified: model.verified,
        disabled: model.disabled,
        created_at: model.created_at,
    })
}

// ── One-time-code repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOneTimeCodeRepository {
    pub db: DatabaseConnection,
}

impl OneTimeCodeRepository for DbOneTimeCodeRepository {
    async fn replace(&self, code: &OneTimeCode) -> Result<(), AuthServiceError> {
        // Delete + insert under one transaction: user_id is the primary key,
        // so this keeps the single-live-code policy without an upsert.
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let code = code.clone();
                Box::pin(async move {
                    one_time_codes::Entity::delete_by_id(code.user_id)
                        .exec(txn)
                        .await?;
                    insert_one_time_code(txn, &code).await?;
                    Ok(())
                })
            })
            .await
            .context("replace one-time code")?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<OneTimeCode>, AuthServiceError> {
        let model = one_time_codes::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find one-time code by user")?;
        Ok(model.map(otc_from_model))
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<(), AuthServiceError> {
        one_time_codes::Entity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .context("delete one-time code")?;
        Ok(())
    }
}

async fn insert_one_time_code(
    txn: &DatabaseTransaction,
    code: &OneTimeCode,
) -> Result<(), sea_orm::DbErr> {
    one_time_codes::ActiveModel {
        user_id: Set(code.user_id),
        code_hash: Set(code.code_hash.clone()),
        expires_at: Set(code.expires_at),
        created_at: Set(code.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn otc_from_model(model: one_time_codes::Model) -> OneTimeCode {
    OneTimeCode {
        user_id: model.user_id,
        code_hash: model.code_hash,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Verification-token repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationTokenRepository {
    pub db: DatabaseConnection,
}

impl VerificationTokenRepository for DbVerificationTokenRepository {
    async fn create(&self, token: &VerificationToken) -> Result<(), AuthServiceError> {
        email_verification_tokens::ActiveModel {
            token: Set(token.token.clone()),
            user_id: Set(token.user_id),
            expires_at: Set(token.expires_at),
            created_at: Set(token.created_at),
        }
        .insert(&self.db)
        .await
        .context("create verification token")?;
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<VerificationToken>, AuthServiceError> {
        let model = email_verification_tokens::Entity::find_by_id(token.to_owned())
            .one(&self.db)
            .await
            .context("find verification token")?;
        Ok(model.map(verification_token_from_model))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AuthServiceError> {
        email_verification_tokens::Entity::delete_by_id(token.to_owned())
            .exec(&self.db)
            .await
            .context("delete verification token")?;
        Ok(())
    }
}

fn verification_token_from_model(model: email_verification_tokens::Model) -> VerificationToken {
    VerificationToken {
        token: model.token,
        user_id: model.user_id,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}
