//! [`Endpoint`]s of the store rating REST API.

use derive_more::From;
use http::Method;
use secrecy::{zeroize::Zeroize, ExposeSecret as _, SecretBox};
use serde::{de::IgnoredAny, Deserialize, Serialize, Serializer};

use crate::{
    domain::{
        rating, store,
        user::{self, Credential, Password, Role, Token},
        User,
    },
    read,
};

use super::Endpoint;

/// Serializes a secret string as is.
fn expose<T, S>(secret: &SecretBox<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<str> + Zeroize,
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret().as_ref())
}

/// Authenticates a [`User`] by credentials.
#[derive(Clone, Debug, Serialize)]
pub struct Login {
    /// Email address of the [`User`].
    pub email: String,

    /// [`Credential`] of the [`User`].
    #[serde(serialize_with = "expose")]
    pub password: SecretBox<Credential>,
}

/// Successful response of the [`Login`] [`Endpoint`].
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    /// Authenticated [`User`].
    pub user: User,

    /// Session [`Token`] of the [`User`].
    pub token: Token,
}

impl Endpoint for Login {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/auth/login";
    const AUTHORIZED: bool = false;
    type Response = LoginResponse;
}

/// Registers a new [`Role::Normal`] [`User`].
#[derive(Clone, Debug, Serialize)]
pub struct Register {
    /// Name of the [`User`].
    pub name: user::Name,

    /// Email address of the [`User`].
    pub email: user::Email,

    /// [`Password`] of the [`User`].
    #[serde(serialize_with = "expose")]
    pub password: SecretBox<Password>,

    /// Address of the [`User`].
    pub address: user::Address,
}

impl Endpoint for Register {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/auth/register";
    const AUTHORIZED: bool = false;
    type Response = IgnoredAny;
}

/// Changes the [`Password`] of the logged in [`User`].
#[derive(Clone, Debug, Serialize)]
pub struct ChangePassword {
    /// Current [`Credential`] of the [`User`].
    #[serde(rename = "currentPassword", serialize_with = "expose")]
    pub current: SecretBox<Credential>,

    /// New [`Password`] of the [`User`].
    #[serde(rename = "newPassword", serialize_with = "expose")]
    pub new: SecretBox<Password>,
}

impl Endpoint for ChangePassword {
    const METHOD: Method = Method::PUT;
    const PATH: &'static str = "/auth/change-password";
    type Response = IgnoredAny;
}

/// Fetches platform-wide [`read::dashboard::Stats`].
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Stats;

impl Endpoint for Stats {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/admin/dashboard";
    type Response = read::dashboard::Stats;
}

/// Lists [`User`]s matching a [`read::user::list::Filter`].
#[derive(Clone, Debug, Default, From, Serialize)]
pub struct Users(pub read::user::list::Filter);

impl Endpoint for Users {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/admin/users";
    type Response = Vec<read::user::list::Entry>;
}

/// Creates a new [`User`] of any [`Role`].
#[derive(Clone, Debug, Serialize)]
pub struct CreateUser {
    /// Name of the [`User`].
    pub name: user::Name,

    /// Email address of the [`User`].
    pub email: user::Email,

    /// [`Password`] of the [`User`].
    #[serde(serialize_with = "expose")]
    pub password: SecretBox<Password>,

    /// Address of the [`User`].
    pub address: user::Address,

    /// [`Role`] of the [`User`].
    pub role: Role,
}

impl Endpoint for CreateUser {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/admin/users";
    type Response = IgnoredAny;
}

/// Lists stores matching a [`read::store::list::Filter`].
#[derive(Clone, Debug, Default, From, Serialize)]
pub struct Stores(pub read::store::list::Filter);

impl Endpoint for Stores {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/admin/stores";
    type Response = Vec<read::store::list::Entry>;
}

/// Creates a new store.
#[derive(Clone, Debug, Serialize)]
pub struct CreateStore {
    /// Name of the store.
    pub name: store::Name,

    /// Contact email address of the store.
    pub email: store::Email,

    /// Address of the store.
    pub address: store::Address,

    /// ID of the [`Role::StoreOwner`] [`User`] owning the store, if any.
    pub owner_id: Option<user::Id>,
}

impl Endpoint for CreateStore {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/admin/stores";
    type Response = IgnoredAny;
}

/// Lists stores matching a [`read::store::rated::Filter`] along with their
/// ratings.
#[derive(Clone, Debug, Default, From, Serialize)]
pub struct RatedStores(pub read::store::rated::Filter);

impl Endpoint for RatedStores {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/stores";
    type Response = Vec<read::store::rated::Entry>;
}

/// Submits or replaces the rating of a store by the logged in [`User`].
#[derive(Clone, Debug, Serialize)]
pub struct Rate {
    /// ID of the rated store.
    #[serde(rename = "storeId")]
    pub store_id: store::Id,

    /// [`rating::Value`] given.
    pub rating: rating::Value,
}

impl Endpoint for Rate {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/ratings";
    type Response = IgnoredAny;
}

/// Fetches the [`read::dashboard::Owner`] of the store owned by the logged in
/// [`User`].
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct OwnerDashboard;

impl Endpoint for OwnerDashboard {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/stores/owner-dashboard";
    type Response = read::dashboard::Owner;
}
