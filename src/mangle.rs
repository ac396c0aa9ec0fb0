//! Normalization strategies ("manglers") that reshape raw Keystone objects.
//!
//! A [`Mangler`] receives an [`EntityKind`] and the raw JSON object exactly as the server sent
//! it, and returns the canonical JSON shape of that entity. The client then decodes the result
//! into the typed entity; any mismatch is a [`NormalizeError`] and no partial entity escapes.
//! Implementations must be pure: no I/O, no shared mutable state.

// self
use crate::{
	_prelude::*,
	model::{Entity, EntityKind},
};

/// Failures raised while normalizing a raw object.
#[derive(Debug, ThisError)]
pub enum NormalizeError {
	/// The raw value was not a JSON object.
	#[error("Raw {kind} payload is not a JSON object.")]
	NotAnObject {
		/// Kind being normalized.
		kind: EntityKind,
	},
	/// A mangler refused the raw object.
	#[error("Mangler rejected the {kind} payload: {reason}.")]
	Rejected {
		/// Kind being normalized.
		kind: EntityKind,
		/// Mangler-supplied reason.
		reason: String,
	},
	/// The mangled object does not match the canonical entity.
	#[error("Normalized {kind} does not match the canonical shape.")]
	Shape {
		/// Kind being normalized.
		kind: EntityKind,
		/// Path-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Strategy that maps raw server objects onto canonical entity shapes.
///
/// Swap implementations per client with
/// [`KeystoneClient::with_mangler`](crate::KeystoneClient::with_mangler). Closures of the
/// form `Fn(EntityKind, Value) -> Result<Value, NormalizeError>` implement the trait too.
pub trait Mangler: Send + Sync {
	/// Returns the canonical JSON object for `raw`.
	fn mangle(&self, kind: EntityKind, raw: Value) -> Result<Value, NormalizeError>;
}
impl<F> Mangler for F
where
	F: Send + Sync + Fn(EntityKind, Value) -> Result<Value, NormalizeError>,
{
	fn mangle(&self, kind: EntityKind, raw: Value) -> Result<Value, NormalizeError> {
		self(kind, raw)
	}
}

/// Mangler that returns every object untouched.
///
/// Canonical entities decode the raw wire shapes of both protocols, so this is a complete
/// strategy; server fields it leaves alone end up in each entity's `extra` map.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughMangler;
impl Mangler for PassthroughMangler {
	fn mangle(&self, _kind: EntityKind, raw: Value) -> Result<Value, NormalizeError> {
		Ok(raw)
	}
}

/// Default mangler: pass-through with light, idempotent reshaping.
///
/// - `Token`/`ProjectToken`: v2 `expires` becomes `expires_at`, v2 `tenant` becomes `project`.
/// - `Project`/`Role`/`RoleAssignment`: the per-entity `links` block is dropped.
/// - `MetaEnvironment`/`MetaOwningGroup`: numeric ids are rendered as strings.
/// - `ProjectMeta`: untouched.
///
/// Each rule only fires on the raw field it rewrites, so feeding a canonical object back in
/// returns it unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMangler;
impl Mangler for DefaultMangler {
	fn mangle(&self, kind: EntityKind, raw: Value) -> Result<Value, NormalizeError> {
		let Value::Object(mut object) = raw else {
			return Err(NormalizeError::NotAnObject { kind });
		};

		match kind {
			EntityKind::Token | EntityKind::ProjectToken => {
				rename_absent(&mut object, "expires", "expires_at");
				rename_absent(&mut object, "tenant", "project");
			},
			EntityKind::Project | EntityKind::Role | EntityKind::RoleAssignment => {
				object.remove("links");
			},
			EntityKind::MetaEnvironment | EntityKind::MetaOwningGroup => {
				if let Some(Value::Number(id)) = object.get("id") {
					let id = id.to_string();

					object.insert("id".into(), Value::String(id));
				}
			},
			EntityKind::ProjectMeta => {},
		}

		Ok(Value::Object(object))
	}
}

/// Runs `raw` through `mangler` and decodes the canonical entity.
pub fn normalize<E>(mangler: &dyn Mangler, raw: Value) -> Result<E, NormalizeError>
where
	E: Entity,
{
	let canonical = mangler.mangle(E::KIND, raw)?;

	serde_path_to_error::deserialize(canonical)
		.map_err(|source| NormalizeError::Shape { kind: E::KIND, source })
}

fn rename_absent(object: &mut Map<String, Value>, from: &str, to: &str) {
	if object.contains_key(to) {
		return;
	}
	if let Some(value) = object.remove(from) {
		object.insert(to.into(), value);
	}
}
