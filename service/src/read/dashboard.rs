//! Dashboards read models definitions.

use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{Deserialize, Deserializer, Serialize};

use super::Review;

/// Platform-wide statistics shown to an administrator.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Stats {
    /// Total number of registered users.
    #[serde(default, rename = "totalUsers", deserialize_with = "count")]
    pub total_users: u64,

    /// Total number of registered stores.
    #[serde(default, rename = "totalStores", deserialize_with = "count")]
    pub total_stores: u64,

    /// Total number of submitted ratings.
    #[serde(default, rename = "totalRatings", deserialize_with = "count")]
    pub total_ratings: u64,
}

/// Deserializes a counter the backend may send as a numeric string.
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(common::number::serde::deserialize(deserializer)?
        .and_then(|n| n.trunc().to_u64())
        .unwrap_or_default())
}

/// Overview of a store shown to its owner.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Owner {
    /// Average rating of the store.
    #[serde(
        default,
        rename = "averageRating",
        with = "common::number::serde"
    )]
    pub average_rating: Option<Decimal>,

    /// [`Review`]s of the store.
    #[serde(default)]
    pub ratings: Vec<Review>,
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Owner, Stats};

    #[test]
    fn reads_owner_dashboard() {
        let owner = serde_json::from_str::<Owner>(
            r#"{"averageRating": "3.67", "ratings": [
                {"id": 9, "userName": "Dana", "rating": 4,
                 "created_at": "2024-01-01T00:00:00Z",
                 "updated_at": "2024-01-01T00:00:00Z"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(owner.average_rating, Some(Decimal::new(367, 2)));
        assert_eq!(owner.ratings.len(), 1);

        let empty =
            serde_json::from_str::<Owner>(r#"{"averageRating": null}"#)
                .unwrap();
        assert_eq!(empty.average_rating, None);
        assert!(empty.ratings.is_empty());
    }

    #[test]
    fn reads_stats() {
        let stats = serde_json::from_str::<Stats>(
            r#"{"totalUsers": "12", "totalStores": 3, "totalRatings": 40}"#,
        )
        .unwrap();
        assert_eq!(
            stats,
            Stats {
                total_users: 12,
                total_stores: 3,
                total_ratings: 40,
            },
        );
    }
}
