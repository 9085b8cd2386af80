//! Authenticated user account and role gates

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role attached to the authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Role {
    ClientAdmin,
    ClientUser,
    PartnerUser,
    Other(String),
    #[default]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::ClientAdmin => "client_admin",
            Role::ClientUser => "client_user",
            Role::PartnerUser => "partner_user",
            Role::Other(name) => name,
            Role::Unknown => "",
        }
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        match name {
            "client_admin" => Role::ClientAdmin,
            "client_user" => Role::ClientUser,
            "partner_user" => Role::PartnerUser,
            "" => Role::Unknown,
            other => Role::Other(other.to_string()),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map(Role::from).unwrap_or_default())
    }
}

/// Account record as returned by the auth service. Read-only here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub role_name: Role,
}

/// Whether a rescan may be fired immediately for the whole organization
pub fn can_auto_dispatch(role: &Role) -> bool {
    *role == Role::ClientAdmin
}

/// Whether a rescan trigger has to go through the domain confirmation dialog.
///
/// Client and partner users never dispatch directly.
pub fn requires_confirmation(role: &Role) -> bool {
    !can_auto_dispatch(role)
}
