use serde::{Deserialize, Serialize};

// User record served by the example directory service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

// Fields accepted when registering a user; the directory assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}
