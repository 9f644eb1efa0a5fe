//! Caller profiles and per-list roles.

use serde::{Deserialize, Serialize};

/// Error returned for a profile token outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid profile: {0}")]
pub struct ProfileError(pub String);

/// The role a caller claims for a request.
///
/// Parsing is case-insensitive; the canonical form is lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Any signed-in caller; may create and read lists.
    User,
    /// Owner of a list; manages the list and its members.
    Owner,
    /// Member of a list; manages its items.
    Member,
}

impl Profile {
    /// Every profile, in declaration order.
    pub const ALL: [Self; 3] = [Self::User, Self::Owner, Self::Member];

    /// Lower-case token for this profile.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Owner => "owner",
            Self::Member => "member",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Profile {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "owner" => Ok(Self::Owner),
            "member" => Ok(Self::Member),
            _ => Err(ProfileError(s.to_owned())),
        }
    }
}

/// The relationship between a caller and one particular list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListRole {
    Owner,
    Member,
}

impl ListRole {
    /// Owner if `user_id` created the list, member otherwise.
    #[must_use]
    pub fn for_caller(owner_id: &str, user_id: &str) -> Self {
        if owner_id == user_id {
            Self::Owner
        } else {
            Self::Member
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parse_is_case_insensitive() {
        assert_eq!("OWNER".parse::<Profile>().unwrap(), Profile::Owner);
        assert_eq!("Member".parse::<Profile>().unwrap(), Profile::Member);
        assert_eq!("user".parse::<Profile>().unwrap(), Profile::User);
    }

    #[test]
    fn test_profile_parse_rejects_unknown() {
        assert!("admin".parse::<Profile>().is_err());
        assert!("".parse::<Profile>().is_err());
    }

    #[test]
    fn test_profile_display_round_trips() {
        for profile in Profile::ALL {
            assert_eq!(profile.to_string().parse::<Profile>().unwrap(), profile);
        }
    }

    #[test]
    fn test_list_role_for_caller() {
        assert_eq!(ListRole::for_caller("u1", "u1"), ListRole::Owner);
        assert_eq!(ListRole::for_caller("u1", "u2"), ListRole::Member);
        assert_eq!(
            serde_json::to_value(ListRole::Owner).unwrap(),
            serde_json::json!("owner")
        );
    }
}
