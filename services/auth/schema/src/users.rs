use sea_orm::entity::prelude::*;

/// User account owned by the auth service.
///
/// Credentials (`password_hash`, `answer_*_hash`) are bcrypt hashes of the
/// peppered secret; plaintext never reaches this table. Email and username
/// carry unique indexes so concurrent duplicate registrations resolve to
/// exactly one winner at the database, not in application code.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub security_question_1: String,
    pub answer_1_hash: String,
    pub security_question_2: String,
    pub answer_2_hash: String,
    pub role: String,
    pub verified: bool,
    pub disabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::one_time_codes::Entity")]
    OneTimeCodes,
    #[sea_orm(has_many = "super::email_verification_tokens::Entity")]
    EmailVerificationTokens,
}

impl Related<super::one_time_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OneTimeCodes.def()
    }
}

impl Related<super::email_verification_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailVerificationTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
