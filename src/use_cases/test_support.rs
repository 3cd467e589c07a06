use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::OperationError;
use crate::domain::ports::{
    ErrorForwarder, RequestValidator, ServiceLogger, TransactionManager, UserDirectory,
};
use crate::domain::request::ServiceRequest;
use crate::domain::validation::{ValidationError, ValidationResult};

// Validator fake that returns the same outcome for every request.
#[derive(Clone, Default)]
pub(crate) struct StaticValidator {
    errors: Vec<ValidationError>,
}

impl StaticValidator {
    pub(crate) fn passing() -> Self {
        Self::default()
    }

    pub(crate) fn failing(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl RequestValidator for StaticValidator {
    fn validate(&self, _request: &ServiceRequest) -> ValidationResult {
        ValidationResult::from(self.errors.clone())
    }
}

// Logger fake that records every call for later assertions.
#[derive(Clone, Default)]
pub(crate) struct RecordingLogger {
    errors: Arc<Mutex<Vec<String>>>,
    infos: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("errors mutex poisoned").clone()
    }

    pub(crate) fn infos(&self) -> Vec<String> {
        self.infos.lock().expect("infos mutex poisoned").clone()
    }
}

impl ServiceLogger for RecordingLogger {
    fn error(&self, message: &str, failure: &OperationError) {
        let mut guard = self.errors.lock().expect("errors mutex poisoned");
        guard.push(format!("{message}: {failure}"));
    }

    fn info(&self, _message: &str, service: &str) {
        let mut guard = self.infos.lock().expect("infos mutex poisoned");
        guard.push(service.to_string());
    }
}

// Transaction fake that records the begin/commit/rollback sequence.
#[derive(Clone, Default)]
pub(crate) struct RecordingTransactions {
    events: Arc<Mutex<Vec<&'static str>>>,
    fail_begin: bool,
    fail_commit: bool,
}

impl RecordingTransactions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_begin(mut self) -> Self {
        self.fail_begin = true;
        self
    }

    pub(crate) fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub(crate) fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("events mutex poisoned").clone()
    }

    fn record(&self, event: &'static str) {
        self.events.lock().expect("events mutex poisoned").push(event);
    }
}

#[async_trait]
impl TransactionManager for RecordingTransactions {
    async fn begin(&self) -> Result<(), String> {
        if self.fail_begin {
            return Err("begin failed".to_string());
        }
        self.record("begin");
        Ok(())
    }

    async fn commit(&self) -> Result<(), String> {
        if self.fail_commit {
            return Err("commit failed".to_string());
        }
        self.record("commit");
        Ok(())
    }

    async fn rollback(&self) -> Result<(), String> {
        self.record("rollback");
        Ok(())
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub list: bool,
    pub get: bool,
    pub insert: bool,
}

// Directory fake backed by a shared map with injectable failures.
#[derive(Clone)]
pub(crate) struct RecordingDirectory {
    users: Arc<Mutex<BTreeMap<u64, User>>>,
    failures: FailureFlags,
}

impl RecordingDirectory {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(BTreeMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_user(&self, id: u64, name: &str) {
        let mut guard = self.users.lock().expect("users mutex poisoned");
        guard.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: format!("{}@example.com", name.to_ascii_lowercase()),
            },
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.users.lock().expect("users mutex poisoned").len()
    }
}

#[async_trait]
impl UserDirectory for RecordingDirectory {
    async fn list(&self) -> Result<Vec<User>, String> {
        if self.failures.list {
            return Err("list failed".to_string());
        }
        let guard = self.users.lock().expect("users mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> Result<Option<User>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }
        let guard = self.users.lock().expect("users mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }
        let mut guard = self.users.lock().expect("users mutex poisoned");
        let id = guard.keys().next_back().copied().unwrap_or(0) + 1;
        let user = User {
            id,
            name: user.name,
            email: user.email,
        };
        guard.insert(id, user.clone());
        Ok(user)
    }
}

// Forwarder fake that captures forwarded failures.
#[derive(Clone, Default)]
pub(crate) struct RecordingForwarder {
    forwarded: Arc<Mutex<Vec<String>>>,
}

impl RecordingForwarder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn forwarded(&self) -> Vec<String> {
        self.forwarded.lock().expect("forwarded mutex poisoned").clone()
    }
}

impl ErrorForwarder<OperationError> for RecordingForwarder {
    fn forward(&self, error: OperationError) {
        let mut guard = self.forwarded.lock().expect("forwarded mutex poisoned");
        guard.push(error.client_message());
    }
}
