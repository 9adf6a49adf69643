//! [`Query`] collection related to the multiple stores.

#[cfg(doc)]
use crate::{read, Query};
use crate::infra::backend::endpoint;

use super::BackendQuery;

/// Queries a list of stores matching a [`read::store::list::Filter`], as
/// seen by an administrator.
pub type List = BackendQuery<endpoint::Stores>;

/// Queries a list of stores matching a [`read::store::rated::Filter`], along
/// with the ratings given by the logged in user.
pub type Rated = BackendQuery<endpoint::RatedStores>;

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::user::Token, infra::backend::mock::Mock, read, Query as _,
        Service,
    };

    use super::{List, Rated};

    #[tokio::test]
    async fn lists_stores_for_admin() {
        let svc = Service::new(Mock::replying(json!([{
            "id": 2, "name": "Corner Grocery And Bakery",
            "email": "shop@corner.io", "address": null,
            "owner_name": null, "rating": "4.5",
        }])))
        .authorized(Some(Token::from("adm.in.tok")));

        let stores = svc
            .execute(List::by(read::store::list::Filter {
                search: "corner".into(),
            }))
            .await
            .unwrap();

        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].owner_name, None);
        let calls = svc.backend().calls();
        assert_eq!(calls[0].path, "/admin/stores");
        assert_eq!(calls[0].params, json!({"search": "corner"}));
    }

    #[tokio::test]
    async fn lists_rated_stores() {
        let svc = Service::new(Mock::replying(json!([{
            "id": "s-1", "name": "Corner Grocery And Bakery",
            "address": "1 Main st.", "averageRating": null, "userRating": 3,
        }])))
        .authorized(Some(Token::from("use.r.tok")));

        let stores = svc.execute(Rated::default()).await.unwrap();

        assert_eq!(stores[0].average_rating, None);
        assert_eq!(svc.backend().calls()[0].path, "/stores");
    }

    #[tokio::test]
    async fn requires_session() {
        let svc = Service::new(Mock::replying(json!([])));

        let err = svc.execute(Rated::default()).await.unwrap_err();

        assert!(err.as_ref().is_unauthorized());
    }
}
