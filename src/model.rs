//! Canonical entities produced by the normalization pipeline.
//!
//! Every entity is an immutable value built fresh from a single response. Unknown server
//! fields are kept in each entity's `extra` map, so re-normalizing a canonical entity never
//! loses or duplicates data.

pub mod meta;
pub mod page;
pub mod project;
pub mod role;
pub mod token;

pub use meta::*;
pub use page::*;
pub use project::*;
pub use role::*;
pub use token::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// Entity kinds understood by [`Mangler`](crate::mangle::Mangler) implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
	/// Unscoped token from password auth.
	Token,
	/// Project-scoped token from a token exchange.
	ProjectToken,
	/// Project (v3) or tenant (v2).
	Project,
	/// Role definition.
	Role,
	/// Binding of a user or group to a role on a scope.
	RoleAssignment,
	/// Metadata extension: environment value.
	MetaEnvironment,
	/// Metadata extension: owning group value.
	MetaOwningGroup,
	/// Metadata extension: a project's key-value metadata.
	ProjectMeta,
}
impl EntityKind {
	/// Every kind, in declaration order.
	pub const ALL: [EntityKind; 8] = [
		EntityKind::Token,
		EntityKind::ProjectToken,
		EntityKind::Project,
		EntityKind::Role,
		EntityKind::RoleAssignment,
		EntityKind::MetaEnvironment,
		EntityKind::MetaOwningGroup,
		EntityKind::ProjectMeta,
	];

	/// Returns the kind name passed to manglers.
	pub const fn as_str(self) -> &'static str {
		match self {
			EntityKind::Token => "Token",
			EntityKind::ProjectToken => "ProjectToken",
			EntityKind::Project => "Project",
			EntityKind::Role => "Role",
			EntityKind::RoleAssignment => "RoleAssignment",
			EntityKind::MetaEnvironment => "MetaEnvironment",
			EntityKind::MetaOwningGroup => "MetaOwningGroup",
			EntityKind::ProjectMeta => "ProjectMeta",
		}
	}
}
impl Display for EntityKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Canonical entity decoded from a mangled JSON object.
pub trait Entity
where
	Self: DeserializeOwned,
{
	/// Kind handed to the mangler for raw objects of this entity.
	const KIND: EntityKind;
}

/// Entity returned by list endpoints under a fixed array field.
pub trait CollectionEntity
where
	Self: Entity,
{
	/// Name of the response field that holds the array (`projects`, `roles`, ...).
	const COLLECTION: &'static str;
}

/// Minimal `{id, name}` reference embedded in tokens and assignments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reference {
	/// Identifier of the referenced entity.
	pub id: String,
	/// Display name, when the server includes it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Remaining server fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
