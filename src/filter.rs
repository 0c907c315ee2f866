//! Query parameters for restricting results to a single user.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de};

use crate::UserId;

/// Optionally restricts listings and dashboard aggregates to one user's items.
///
/// Both a missing and an empty `user_id` query parameter mean "all users".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    /// The user to restrict results to, or `None` for every user.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub user_id: Option<UserId>,
}

impl UserFilter {
    /// A filter that matches every user's items.
    pub fn all() -> Self {
        Self { user_id: None }
    }

    /// A filter that only matches the items owned by `user_id`.
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let maybe_string = Option::<String>::deserialize(deserializer)?;

    match maybe_string.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(string) => string.parse().map(Some).map_err(de::Error::custom),
    }
}
