use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Anything that can report whether it describes a usable identity
pub trait Validity {
    fn is_valid(&self) -> bool;
}

impl<T: Validity + ?Sized> Validity for Box<T> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}

/// Identity attributes asserted by the provider beyond the subject identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    /// Subject identifier of the identity assertion
    pub name_id: String,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub birth_place_country: Option<String>,
    pub birth_place_locality: Option<String>,
}

impl Validity for FederatedIdentity {
    fn is_valid(&self) -> bool {
        let name_parts_ok = [&self.given_name, &self.middle_name, &self.surname]
            .into_iter()
            .flatten()
            .all(|part| !part.trim().is_empty());

        !self.name_id.is_empty() && name_parts_ok
    }
}

/// Authenticated principal produced by a successful SAML exchange.
///
/// All fields are supplied together at construction and cannot be changed
/// afterwards, so a model can be shared between request handlers freely.
/// `F` is the federated identity relation; any [`Validity`] implementor works,
/// including another `IdentityModel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityModel<F = FederatedIdentity> {
    name_id: String,
    session_index: String,
    attributes: Option<IndexMap<String, String>>,
    federated_identity: Option<F>,
}

impl<F> IdentityModel<F> {
    pub fn new(
        name_id: impl Into<String>,
        session_index: impl Into<String>,
        attributes: Option<IndexMap<String, String>>,
        federated_identity: Option<F>,
    ) -> Self {
        Self {
            name_id: name_id.into(),
            session_index: session_index.into(),
            attributes,
            federated_identity,
        }
    }

    /// Provider-issued opaque subject identifier
    pub fn name_id(&self) -> &str {
        &self.name_id
    }

    /// Provider-issued session correlation token (used for single logout)
    pub fn session_index(&self) -> &str {
        &self.session_index
    }

    pub fn attributes(&self) -> Option<&IndexMap<String, String>> {
        self.attributes.as_ref()
    }

    pub fn federated_identity(&self) -> Option<&F> {
        self.federated_identity.as_ref()
    }
}

impl<F: Validity> IdentityModel<F> {
    /// Same answer as [`Validity::is_valid`]; reads better at call sites that
    /// gate access on a logged-in session.
    pub fn is_authenticated(&self) -> bool {
        self.is_valid()
    }
}

impl<F: Validity> Validity for IdentityModel<F> {
    fn is_valid(&self) -> bool {
        !self.name_id.is_empty()
            && !self.session_index.is_empty()
            && self.attributes.is_some()
            && self
                .federated_identity
                .as_ref()
                .is_none_or(Validity::is_valid)
    }
}
