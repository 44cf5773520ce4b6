//! User records and the user-matching query

use serde::{Deserialize, Serialize};

/// A member of the organization.
///
/// Users carry two identifiers on the wire: the organization-scoped `id`
/// and the identity-scoped `userId`. Records elsewhere (control owners,
/// proof authors) may reference either one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUser {
    /// Organization-scoped user ID.
    pub id: String,
    /// Identity-scoped user ID, when exposed.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Surname.
    #[serde(default)]
    pub surname: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Account status.
    #[serde(default)]
    pub status: Option<String>,
}

impl OrgUser {
    /// True when `id` refers to this user by either identifier.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id == id || self.user_id.as_deref() == Some(id)
    }
}

/// The currently authenticated user, as returned by `/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User ID.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Surname.
    #[serde(default)]
    pub surname: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Criteria for resolving a set of organization users client-side.
///
/// When `user_id` is present it wins and is matched exactly against both
/// wire identifiers. Otherwise the provided name fields are matched
/// case-sensitively and AND-combined.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Exact user identifier.
    pub user_id: Option<String>,
    /// Exact given name.
    pub given_name: Option<String>,
    /// Exact surname.
    pub surname: Option<String>,
}

impl UserQuery {
    /// Match by user identifier.
    #[must_use]
    pub fn by_id(user_id: impl Into<String>) -> Self {
        Self { user_id: Some(user_id.into()), ..Self::default() }
    }

    /// Add a given-name criterion.
    #[must_use]
    pub fn with_given_name(mut self, given_name: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self
    }

    /// Add a surname criterion.
    #[must_use]
    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    /// True when no criterion was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.given_name.is_none() && self.surname.is_none()
    }

    /// Evaluate this query against one user record.
    #[must_use]
    pub fn matches(&self, user: &OrgUser) -> bool {
        if let Some(id) = &self.user_id {
            return user.has_id(id);
        }
        if self.is_empty() {
            return false;
        }
        let given_ok = self
            .given_name
            .as_deref()
            .map_or(true, |name| user.given_name.as_deref() == Some(name));
        let surname_ok = self
            .surname
            .as_deref()
            .map_or(true, |name| user.surname.as_deref() == Some(name));
        given_ok && surname_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, user_id: Option<&str>, given: &str, surname: &str) -> OrgUser {
        OrgUser {
            id: id.to_owned(),
            user_id: user_id.map(str::to_owned),
            given_name: Some(given.to_owned()),
            surname: Some(surname.to_owned()),
            email: None,
            status: None,
        }
    }

    #[test]
    fn id_query_matches_either_identifier() {
        let jane = user("u1", Some("ext-9"), "Jane", "Doe");

        assert!(UserQuery::by_id("u1").matches(&jane));
        assert!(UserQuery::by_id("ext-9").matches(&jane));
        assert!(!UserQuery::by_id("u2").matches(&jane));
    }

    #[test]
    fn name_criteria_are_and_combined() {
        let jane_doe = user("u1", None, "Jane", "Doe");
        let jane_smith = user("u2", None, "Jane", "Smith");

        let query = UserQuery::default().with_given_name("Jane").with_surname("Doe");
        assert!(query.matches(&jane_doe));
        assert!(!query.matches(&jane_smith));
    }

    #[test]
    fn single_name_criterion_is_enough() {
        let jane_smith = user("u2", None, "Jane", "Smith");

        assert!(UserQuery::default().with_given_name("Jane").matches(&jane_smith));
        assert!(UserQuery::default().with_surname("Smith").matches(&jane_smith));
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let jane = user("u1", None, "Jane", "Doe");

        assert!(!UserQuery::default().with_given_name("jane").matches(&jane));
    }

    #[test]
    fn empty_query_matches_nothing() {
        let jane = user("u1", None, "Jane", "Doe");

        let query = UserQuery::default();
        assert!(query.is_empty());
        assert!(!query.matches(&jane));
    }

    #[test]
    fn id_query_ignores_name_fields() {
        // An explicit identifier wins over any name criteria.
        let jane = user("u1", None, "Jane", "Doe");

        let query = UserQuery::by_id("u1").with_given_name("Someone").with_surname("Else");
        assert!(query.matches(&jane));
    }
}
