//! Coin groups and their membership.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A coin group row.
///
/// Exactly one member holds the coin at any time. Only the holder may
/// pass it on, which increments `coin` and hands it to a random member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Group {
    /// Group identifier.
    pub id: Uuid,
    /// Number of times the coin has been passed, starting at 1.
    pub coin: i64,
    /// Username of the creator. A user creates at most one group.
    pub creator: String,
    /// Username of the member currently holding the coin.
    pub coin_holder: String,
    /// Creation time.
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// A group together with its member list, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDetails {
    /// Group fields.
    #[serde(flatten)]
    pub group: Group,
    /// Member usernames in join order.
    pub members: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_serialize_flat() {
        let details = GroupDetails {
            group: Group {
                id: Uuid::nil(),
                coin: 3,
                creator: "alice".to_string(),
                coin_holder: "bob".to_string(),
                created_at: Utc::now(),
            },
            members: vec!["alice".to_string(), "bob".to_string()],
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["coin"], 3);
        assert_eq!(json["creator"], "alice");
        assert_eq!(json["coin_holder"], "bob");
        assert_eq!(json["members"][1], "bob");
        assert!(json.get("created_at").is_none());
    }
}
