use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Claim key carrying the session identity.
pub const EMAIL: &str = "email";

/// Flat claim set carried in the token payload.
///
/// Keys are unique and map to string values. Serialized as a flat JSON object;
/// the ordered map only makes serialization deterministic, verification never
/// depends on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, String>);

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a signed-in user.
    ///
    /// # Arguments
    /// * `email` - Identity stored under the `email` key
    pub fn for_email(email: impl ToString) -> Self {
        Self::new().with_claim(EMAIL, email)
    }

    /// Add or replace a claim.
    pub fn with_claim(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a claim in place, returning the previous value.
    pub fn insert(&mut self, key: impl ToString, value: impl ToString) -> Option<String> {
        self.0.insert(key.to_string(), value.to_string())
    }

    /// Look up a claim value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get the identity claim (convenience method).
    pub fn email(&self) -> Option<&str> {
        self.get(EMAIL)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
