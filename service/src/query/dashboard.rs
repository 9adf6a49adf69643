//! [`Query`] collection related to dashboards.

#[cfg(doc)]
use crate::Query;
use crate::infra::backend::endpoint;

use super::BackendQuery;

/// Queries platform totals shown on the administrator dashboard.
pub type Stats = BackendQuery<endpoint::Stats>;

/// Queries the average rating and reviews of the logged in store owner.
pub type Owner = BackendQuery<endpoint::OwnerDashboard>;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        domain::user::Token, infra::backend::mock::Mock, Query as _,
        Service,
    };

    use super::{Owner, Stats};

    #[tokio::test]
    async fn fetches_stats() {
        let svc = Service::new(Mock::replying(json!({
            "totalUsers": "12", "totalStores": 3, "totalRatings": 40,
        })))
        .authorized(Some(Token::from("adm.in.tok")));

        let stats = svc.execute(Stats::default()).await.unwrap();

        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.total_ratings, 40);
        assert_eq!(svc.backend().calls()[0].path, "/admin/dashboard");
    }

    #[tokio::test]
    async fn fetches_owner_reviews() {
        let svc = Service::new(Mock::replying(json!({
            "averageRating": "3.50",
            "ratings": [{
                "id": 1, "userName": "Reviewer", "rating": 4,
                "created_at": "2024-03-01T10:00:00Z",
                "updated_at": "2024-03-01T10:00:00Z",
            }],
        })))
        .authorized(Some(Token::from("own.er.tok")));

        let owner = svc.execute(Owner::default()).await.unwrap();

        assert_eq!(owner.average_rating, Some(Decimal::new(35, 1)));
        assert_eq!(owner.ratings.len(), 1);
    }
}
