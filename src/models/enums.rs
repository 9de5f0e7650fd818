//! Shared domain enums stored as lowercase text columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements string conversions and SQLx text mapping for a fieldless enum.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as Decode<Postgres>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// StatusKind
// ---------------------------------------------------------------------------

/// Lifecycle state class of a status label.
///
/// The label name is for display only; every rule in the system branches on
/// the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Available in the pool, can be checked out
    Deployable,
    /// Assigned to a user
    Deployed,
    /// Not yet usable (awaiting setup, under repair)
    Pending,
    Archived,
    Broken,
    Lost,
}

text_enum!(StatusKind {
    Deployable => "deployable",
    Deployed => "deployed",
    Pending => "pending",
    Archived => "archived",
    Broken => "broken",
    Lost => "lost",
});

impl StatusKind {
    pub fn is_deployable(&self) -> bool {
        matches!(self, StatusKind::Deployable)
    }
}

// ---------------------------------------------------------------------------
// CategoryKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Asset,
    Accessory,
    License,
}

text_enum!(CategoryKind {
    Asset => "asset",
    Accessory => "accessory",
    License => "license",
});

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

/// Kind of event recorded in the asset history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Checkout,
    Checkin,
    Audit,
    Maintenance,
}

text_enum!(ActionType {
    Checkout => "checkout",
    Checkin => "checkin",
    Audit => "audit",
    Maintenance => "maintenance",
});

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Operator role, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    EndUser,
    Staff,
    Admin,
}

text_enum!(Role {
    EndUser => "end_user",
    Staff => "staff",
    Admin => "admin",
});

impl Default for Role {
    fn default() -> Self {
        Role::EndUser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_kind_round_trip() {
        for kind in StatusKind::ALL {
            assert_eq!(kind.as_str().parse::<StatusKind>().unwrap(), *kind);
        }
        assert_eq!("Deployable".parse::<StatusKind>().unwrap(), StatusKind::Deployable);
        assert!("ready".parse::<StatusKind>().is_err());
    }

    #[test]
    fn test_only_deployable_is_deployable() {
        let deployable: Vec<_> = StatusKind::ALL.iter().filter(|k| k.is_deployable()).collect();
        assert_eq!(deployable, vec![&StatusKind::Deployable]);
    }

    #[test]
    fn test_status_kind_serde_matches_column_text() {
        let json = serde_json::to_string(&StatusKind::Broken).unwrap();
        assert_eq!(json, "\"broken\"");
        let role: Role = serde_json::from_str("\"end_user\"").unwrap();
        assert_eq!(role, Role::EndUser);
        assert_eq!(role.as_str(), "end_user");
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin > Role::Staff);
        assert!(Role::Staff > Role::EndUser);
    }
}
