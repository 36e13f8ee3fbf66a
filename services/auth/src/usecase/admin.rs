use equiptrack_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::AuthServiceError;

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self) -> Result<Vec<User>, AuthServiceError> {
        self.users.list().await
    }
}

pub struct SetRoleUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetRoleUseCase<U> {
    /// Role changes take effect on the target's next refresh, when the
    /// role is re-read from the store.
    pub async fn execute(&self, user_id: i64, role: UserRole) -> Result<(), AuthServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;
        self.users.set_role(user_id, role).await
    }
}

pub struct SetDisabledUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetDisabledUseCase<U> {
    pub async fn execute(&self, user_id: i64, disabled: bool) -> Result<(), AuthServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;
        self.users.set_disabled(user_id, disabled).await
    }
}
