use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Caller role as reported by the session provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Anything other than `admin` is an ordinary user
    pub fn from_wire(value: &str) -> Self {
        if value == "admin" {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Subscription state of the caller.
///
/// Only the exact wire value `active` maps to [`SubscriptionStatus::Active`];
/// every other value is kept verbatim so it can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Other(String),
}

impl SubscriptionStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "active" => SubscriptionStatus::Active,
            "inactive" => SubscriptionStatus::Inactive,
            other => SubscriptionStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::Other(value) => value,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Role::from_wire(&value))
    }
}

impl Serialize for SubscriptionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SubscriptionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(SubscriptionStatus::from_wire(&value))
    }
}

/// Per-request view of the caller, supplied by the session provider.
///
/// Derived fresh for each export attempt and passed explicitly; nothing in
/// the core holds on to one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessContext {
    pub role: Role,
    pub subscription_status: Option<SubscriptionStatus>,
}

impl AccessContext {
    pub fn new(role: Role, subscription_status: Option<SubscriptionStatus>) -> Self {
        Self {
            role,
            subscription_status,
        }
    }

    /// Caller with no session at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin, None)
    }

    pub fn subscriber() -> Self {
        Self::new(Role::User, Some(SubscriptionStatus::Active))
    }
}
