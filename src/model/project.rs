//! Project entity.

// self
use crate::{
	_prelude::*,
	model::{CollectionEntity, Entity, EntityKind},
};

/// Keystone project (a tenant in v2 terms).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
	/// Project identifier.
	pub id: String,
	/// Project name, unique within its domain.
	pub name: String,
	/// Owning domain.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain_id: Option<String>,
	/// Free-form description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether the project is enabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enabled: Option<bool>,
	/// Whether the project acts as a domain.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_domain: Option<bool>,
	/// Parent project in a hierarchy.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
	/// Remaining server fields (tags, options, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl Entity for Project {
	const KIND: EntityKind = EntityKind::Project;
}
impl CollectionEntity for Project {
	const COLLECTION: &'static str = "projects";
}
