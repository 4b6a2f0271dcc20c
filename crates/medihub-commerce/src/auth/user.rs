//! User types.

use std::fmt;

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Customer,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Customer => "CUSTOMER",
            Role::Staff => "STAFF",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Check if the user can use the admin back-office.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "ADMIN");
        assert_eq!(serde_json::from_str::<Role>("\"STAFF\"").unwrap(), Role::Staff);
        assert_eq!(Role::default(), Role::Customer);
    }

    #[test]
    fn test_is_admin() {
        let user = User {
            id: UserId::new("u"),
            name: "Staff Member".to_string(),
            email: "staff@medihub.africa".to_string(),
            role: Role::Staff,
        };
        assert!(!user.is_admin());
    }
}
