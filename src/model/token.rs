//! Unscoped and project-scoped tokens.

// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	model::{Entity, EntityKind, Reference},
};

/// Token issued by username/password authentication.
///
/// The bearer value is always under [`token`](Self::token), whichever protocol delivered it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
	/// Bearer credential for subsequent calls.
	pub token: BearerToken,
	/// Authenticated user.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<Reference>,
	/// Project the token is scoped to (v2 tenants included).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project: Option<Reference>,
	/// Expiry instant as reported by Keystone.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<String>,
	/// Issue instant as reported by Keystone.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issued_at: Option<String>,
	/// Authentication methods that produced the token.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub methods: Vec<String>,
	/// Roles granted on the scope.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub roles: Vec<Reference>,
	/// Remaining identity claims (catalog, audit ids, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl Entity for Token {
	const KIND: EntityKind = EntityKind::Token;
}

/// Token scoped to a single project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectToken {
	/// Bearer credential for calls against the project.
	pub token: BearerToken,
	/// Project the token is scoped to.
	pub project: Reference,
	/// Authenticated user.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<Reference>,
	/// Expiry instant as reported by Keystone.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<String>,
	/// Issue instant as reported by Keystone.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issued_at: Option<String>,
	/// Authentication methods that produced the token.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub methods: Vec<String>,
	/// Roles granted on the project.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub roles: Vec<Reference>,
	/// Remaining claims (catalog, audit ids, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl Entity for ProjectToken {
	const KIND: EntityKind = EntityKind::ProjectToken;
}
