use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::{NewUser, User};
use crate::domain::ports::{TransactionManager, UserDirectory};
use crate::domain::validation::ValidationLocation;
use crate::interface_adapters::logger::TracingLogger;
use crate::interface_adapters::validation::{FieldRules, Rule, ValidatorConfigError};
use crate::use_cases::UserService;

// Validators for each route, built once at startup.
#[derive(Clone)]
pub struct RouteValidators {
    pub list_users: Arc<FieldRules>,
    pub get_user: Arc<FieldRules>,
    pub create_user: Arc<FieldRules>,
}

impl RouteValidators {
    pub fn build() -> Result<Self, ValidatorConfigError> {
        let get_user = FieldRules::builder()
            .rule(ValidationLocation::Params, "id", Rule::PositiveInteger)
            .build()?;
        let create_user = FieldRules::builder()
            .rule(ValidationLocation::Body, "name", Rule::Text)
            .rule(ValidationLocation::Body, "name", Rule::Length { min: 1, max: 64 })
            .rule(ValidationLocation::Body, "email", Rule::Text)
            .rule(ValidationLocation::Body, "email", Rule::Email)
            .build()?;

        Ok(Self {
            list_users: Arc::new(FieldRules::none()),
            get_user: Arc::new(get_user),
            create_user: Arc::new(create_user),
        })
    }
}

// Application state shared by every route.
#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    pub logger: TracingLogger,
    pub users: InMemoryUserDirectory,
    pub validators: RouteValidators,
}

impl AppState {
    pub fn new(
        service_name: &str,
        users: InMemoryUserDirectory,
    ) -> Result<Self, ValidatorConfigError> {
        Ok(Self {
            service_name: Arc::from(service_name),
            logger: TracingLogger,
            users,
            validators: RouteValidators::build()?,
        })
    }

    pub fn user_service(&self) -> UserService<InMemoryUserDirectory, InMemoryTransactions> {
        UserService {
            directory: self.users.clone(),
            transactions: InMemoryTransactions,
        }
    }
}

// In-memory user directory adapter.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    pub users: Arc<Mutex<BTreeMap<u64, User>>>,
}

impl InMemoryUserDirectory {
    pub fn seeded(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(
                users.into_iter().map(|user| (user.id, user)).collect(),
            )),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list(&self) -> Result<Vec<User>, String> {
        let users = self.users.lock().await;
        Ok(users.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> Result<Option<User>, String> {
        let users = self.users.lock().await;
        Ok(users.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, String> {
        let mut users = self.users.lock().await;
        let id = users.keys().next_back().copied().unwrap_or(0) + 1;
        let user = User {
            id,
            name: user.name,
            email: user.email,
        };
        users.insert(id, user.clone());
        Ok(user)
    }
}

// The in-memory directory applies writes immediately; there is nothing to
// commit or roll back.
#[derive(Clone, Copy, Default)]
pub struct InMemoryTransactions;

#[async_trait]
impl TransactionManager for InMemoryTransactions {
    async fn begin(&self) -> Result<(), String> {
        Ok(())
    }

    async fn commit(&self) -> Result<(), String> {
        Ok(())
    }

    async fn rollback(&self) -> Result<(), String> {
        Ok(())
    }
}
