use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[display("ADMIN")]
    #[serde(rename = "ADMIN", alias = "admin", alias = "Admin")]
    Admin,
    #[display("CASHIER")]
    #[serde(rename = "CASHIER", alias = "cashier", alias = "Cashier")]
    Cashier,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("admin") {
            Ok(Self::Admin)
        } else if s.eq_ignore_ascii_case("cashier") {
            Ok(Self::Cashier)
        } else {
            Err(format!("Invalid role: {s}"))
        }
    }
}

/// An account as seen over the wire, never carries credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_case_insensitive() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("CASHIER".parse::<Role>(), Ok(Role::Cashier));
        assert!("chef".parse::<Role>().is_err());

        let user: User = serde_json::from_str(r#"{"username":"ana","role":"admin","extra":1}"#).unwrap();
        assert!(user.is_admin());
        assert_eq!(serde_json::to_value(&user).unwrap()["role"], "ADMIN");
    }
}
