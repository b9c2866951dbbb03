//! Association entity and identifier types.
//!
//! An association is a joinable community record: name, description,
//! category, member list, and member count. Documents read from the store
//! may omit optional fields; all defaulting happens once, at the
//! deserialization boundary via [`AssociationDraft`], rather than at each
//! read site.
//!
//! `member_count` and `members` are stored as separate fields, mirroring
//! the document shape. The entity does not force
//! `member_count == members.len()`; the repository's atomic toggle keeps
//! them in sync, but documents written by other producers may drift.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation failures raised when constructing association types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssociationValidationError {
    /// Association identifiers must contain non-whitespace characters.
    #[error("association id must not be empty")]
    EmptyAssociationId,
    /// User identifiers must contain non-whitespace characters.
    #[error("user id must not be empty")]
    EmptyUserId,
    /// Display names must contain non-whitespace characters.
    #[error("association name must not be empty")]
    EmptyName,
    /// The category string does not name a known category.
    #[error("unknown association category: {value}")]
    UnknownCategory {
        /// The rejected input.
        value: String,
    },
}

/// Opaque, validated association identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AssociationId(String);

impl AssociationId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, AssociationValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AssociationValidationError::EmptyAssociationId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for AssociationId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for AssociationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque, validated user identifier.
///
/// The only attribute of a user this service consults; it is tested for
/// set membership and inserted into or removed from member lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, AssociationValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AssociationValidationError::EmptyUserId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed set of association categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssociationCategory {
    /// Study groups, honour societies, subject clubs.
    Academic,
    /// Social and hobby communities.
    Social,
    /// Sport teams and athletics clubs.
    Sports,
    /// Cultural and arts associations.
    Cultural,
    /// Career and industry networks.
    Professional,
    /// Community service and volunteering groups.
    Volunteering,
}

impl AssociationCategory {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::Academic,
        Self::Social,
        Self::Sports,
        Self::Cultural,
        Self::Professional,
        Self::Volunteering,
    ];

    /// Stable lowercase name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Social => "social",
            Self::Sports => "sports",
            Self::Cultural => "cultural",
            Self::Professional => "professional",
            Self::Volunteering => "volunteering",
        }
    }
}

impl std::fmt::Display for AssociationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssociationCategory {
    type Err = AssociationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AssociationValidationError::UnknownCategory {
                value: s.to_owned(),
            })
    }
}

/// Raw document shape for [`Association::new`].
///
/// This is the single place where absent optional fields receive their
/// defaults: `member_count` falls back to 0, `members` to an empty list,
/// and `updated_at` to the creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AssociationDraft {
    /// Unique document identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description; may be empty.
    #[serde(default)]
    pub description: String,
    /// Category from the fixed enumerated set.
    pub category: AssociationCategory,
    /// Member count; absent in sparse documents.
    #[serde(default)]
    pub member_count: u32,
    /// Ordered member identifiers; absent in sparse documents.
    #[serde(default)]
    pub members: Vec<String>,
    /// Optional banner image reference.
    #[serde(default)]
    pub banner_image: Option<String>,
    /// Optional logo image reference.
    #[serde(default)]
    pub logo_image: Option<String>,
    /// Document creation time; listing order is descending on this field.
    pub created_at: DateTime<Utc>,
    /// Last mutation time; defaults to `created_at` when absent.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Joinable community record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    id: AssociationId,
    name: String,
    description: String,
    category: AssociationCategory,
    member_count: u32,
    members: Vec<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Association {
    /// Validate and construct an association from a raw document.
    pub fn new(draft: AssociationDraft) -> Result<Self, AssociationValidationError> {
        Self::try_from(draft)
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> &AssociationId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Category from the fixed enumerated set.
    #[must_use]
    pub fn category(&self) -> AssociationCategory {
        self.category
    }

    /// Member count as stored on the document.
    #[must_use]
    pub fn member_count(&self) -> u32 {
        self.member_count
    }

    /// Ordered member identifiers.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Optional banner image reference.
    #[must_use]
    pub fn banner_image(&self) -> Option<&str> {
        self.banner_image.as_deref()
    }

    /// Optional logo image reference.
    #[must_use]
    pub fn logo_image(&self) -> Option<&str> {
        self.logo_image.as_deref()
    }

    /// Document creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the given user currently appears in the member list.
    #[must_use]
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }

    /// Append a member and increment the count, stamping the update time.
    ///
    /// No-op when the user is already present.
    pub(crate) fn admit_member(&mut self, user_id: UserId, now: DateTime<Utc>) {
        if self.members.contains(&user_id) {
            return;
        }
        self.members.push(user_id);
        self.member_count += 1;
        self.updated_at = now;
    }

    /// Remove a member order-preservingly and decrement the count,
    /// clamping at zero, stamping the update time.
    pub(crate) fn retire_member(&mut self, user_id: &UserId, now: DateTime<Utc>) {
        self.members.retain(|member| member != user_id);
        self.member_count = self.member_count.saturating_sub(1);
        self.updated_at = now;
    }
}

impl TryFrom<AssociationDraft> for Association {
    type Error = AssociationValidationError;

    fn try_from(draft: AssociationDraft) -> Result<Self, Self::Error> {
        let id = AssociationId::new(draft.id)?;
        if draft.name.trim().is_empty() {
            return Err(AssociationValidationError::EmptyName);
        }
        let members = draft
            .members
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            member_count: draft.member_count,
            members,
            banner_image: draft.banner_image,
            logo_image: draft.logo_image,
            created_at: draft.created_at,
            updated_at: draft.updated_at.unwrap_or(draft.created_at),
        })
    }
}

impl<'de> Deserialize<'de> for Association {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        AssociationDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}
