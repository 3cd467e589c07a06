use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::{OperationError, ServiceError};
use crate::domain::ports::{TransactionManager, UserDirectory};
use crate::use_cases::transaction::in_transaction;

// Example business operations run behind the request wrapper.
pub struct UserService<D, M> {
    pub directory: D,
    pub transactions: M,
}

impl<D, M> UserService<D, M>
where
    D: UserDirectory,
    M: TransactionManager,
{
    pub async fn list_users(&self) -> Result<Vec<User>, OperationError> {
        self.directory
            .list()
            .await
            .map_err(OperationError::unexpected)
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User, OperationError> {
        in_transaction(&self.transactions, move || async move {
            if user_id == 0 {
                return Err(OperationError::from(
                    ServiceError::new("Invalid user ID")
                        .with_code("INVALID_USER_ID")
                        .with_details(json!({ "user_id": user_id })),
                ));
            }

            self.directory
                .get(user_id)
                .await
                .map_err(OperationError::unexpected)?
                .ok_or_else(|| {
                    OperationError::from(
                        ServiceError::new("User not found")
                            .with_code("USER_NOT_FOUND")
                            .with_details(json!({ "user_id": user_id })),
                    )
                })
        })
        .await
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, OperationError> {
        in_transaction(&self.transactions, move || async move {
            let existing = self
                .directory
                .list()
                .await
                .map_err(OperationError::unexpected)?;
            if existing
                .iter()
                .any(|known| known.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(OperationError::from(
                    ServiceError::new("Email already registered")
                        .with_code("EMAIL_TAKEN")
                        .with_details(json!({ "email": user.email.clone() })),
                ));
            }

            self.directory
                .insert(user)
                .await
                .map_err(OperationError::unexpected)
        })
        .await
    }
}
