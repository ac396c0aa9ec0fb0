//! Role definitions and role assignments.

// self
use crate::{
	_prelude::*,
	model::{CollectionEntity, Entity, EntityKind},
};

/// Role definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
	/// Role identifier.
	pub id: String,
	/// Role name.
	pub name: String,
	/// Domain for domain-specific roles.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain_id: Option<String>,
	/// Remaining server fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl Entity for Role {
	const KIND: EntityKind = EntityKind::Role;
}
impl CollectionEntity for Role {
	const COLLECTION: &'static str = "roles";
}

/// Kind of subject a role is assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
	/// A single user.
	User,
	/// A group of users.
	Group,
}
impl SubjectKind {
	/// Returns the kind label (`user` or `group`).
	pub const fn as_str(self) -> &'static str {
		match self {
			SubjectKind::User => "user",
			SubjectKind::Group => "group",
		}
	}

	/// Returns the path segment used by the assignment endpoints.
	pub const fn path_segment(self) -> &'static str {
		match self {
			SubjectKind::User => "users",
			SubjectKind::Group => "groups",
		}
	}
}
impl Display for SubjectKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// User or group holding an assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
	/// Whether the subject is a user or a group.
	pub kind: SubjectKind,
	/// Subject identifier.
	pub id: String,
}

/// Scope an assignment applies to.
///
/// Decodes both the v3 wire shape (`project.id`, `domain.id`) and the flattened form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawScope")]
pub struct AssignmentScope {
	/// Project scope.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project_id: Option<String>,
	/// Domain scope.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain_id: Option<String>,
	/// Remaining scope fields (inheritance markers, system scope, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl From<RawScope> for AssignmentScope {
	fn from(raw: RawScope) -> Self {
		Self {
			project_id: raw.project_id.or(raw.project.map(|project| project.id)),
			domain_id: raw.domain_id.or(raw.domain.map(|domain| domain.id)),
			extra: raw.extra,
		}
	}
}

/// Binding of a subject to a role on a scope.
///
/// Decodes the v3 wire shape (`role.id`, `user`/`group`, nested scope references) as well
/// as its own serialized form, so no normalization strategy has to reshape it first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignment")]
pub struct RoleAssignment {
	/// Assigned role.
	pub role_id: String,
	/// User or group holding the role.
	pub subject: Subject,
	/// Where the role applies.
	#[serde(default)]
	pub scope: AssignmentScope,
	/// Remaining server fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl TryFrom<RawAssignment> for RoleAssignment {
	type Error = String;

	fn try_from(raw: RawAssignment) -> Result<Self, Self::Error> {
		let role_id = raw
			.role_id
			.or(raw.role.map(|role| role.id))
			.ok_or_else(|| String::from("assignment names no role"))?;
		let mut subjects = raw
			.subject
			.into_iter()
			.chain(raw.user.map(|user| Subject { kind: SubjectKind::User, id: user.id }))
			.chain(raw.group.map(|group| Subject { kind: SubjectKind::Group, id: group.id }));
		let subject = subjects.next().ok_or_else(|| String::from("assignment names no subject"))?;

		if subjects.next().is_some() {
			return Err("assignment names more than one subject".into());
		}

		Ok(Self { role_id, subject, scope: raw.scope, extra: raw.extra })
	}
}
impl Entity for RoleAssignment {
	const KIND: EntityKind = EntityKind::RoleAssignment;
}
impl CollectionEntity for RoleAssignment {
	const COLLECTION: &'static str = "role_assignments";
}

#[derive(Deserialize)]
struct IdRef {
	id: String,
}

#[derive(Deserialize)]
struct RawScope {
	project_id: Option<String>,
	domain_id: Option<String>,
	project: Option<IdRef>,
	domain: Option<IdRef>,
	#[serde(flatten)]
	extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawAssignment {
	role_id: Option<String>,
	role: Option<IdRef>,
	subject: Option<Subject>,
	user: Option<IdRef>,
	group: Option<IdRef>,
	#[serde(default)]
	scope: AssignmentScope,
	#[serde(flatten)]
	extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn wire_and_canonical_assignments_decode_alike() {
		let wire: RoleAssignment = serde_json::from_value(json!({
			"role": { "id": "r-1" },
			"group": { "id": "g-1" },
			"scope": { "project": { "id": "p-1" }, "OS-INHERIT:inherited_to": "projects" }
		}))
		.expect("Wire assignment should decode.");

		assert_eq!(wire.role_id, "r-1");
		assert_eq!(wire.subject, Subject { kind: SubjectKind::Group, id: "g-1".into() });
		assert_eq!(wire.scope.project_id.as_deref(), Some("p-1"));
		assert_eq!(wire.scope.extra.get("OS-INHERIT:inherited_to"), Some(&json!("projects")));
		assert!(wire.extra.is_empty());

		let canonical = serde_json::to_value(&wire).expect("Assignment should serialize.");
		let again: RoleAssignment =
			serde_json::from_value(canonical).expect("Canonical assignment should decode.");

		assert_eq!(again, wire);
	}

	#[test]
	fn assignments_need_exactly_one_subject_and_a_role() {
		let two = serde_json::from_value::<RoleAssignment>(json!({
			"role": { "id": "r-1" },
			"user": { "id": "u-1" },
			"group": { "id": "g-1" }
		}))
		.expect_err("Two subjects are ambiguous.");

		assert!(two.to_string().contains("more than one subject"));
		assert!(
			serde_json::from_value::<RoleAssignment>(json!({ "user": { "id": "u-1" } })).is_err()
		);
		assert!(
			serde_json::from_value::<RoleAssignment>(json!({ "role": { "id": "r-1" } })).is_err()
		);
	}
}
