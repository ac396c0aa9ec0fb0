//! Metadata extension entities.

// crates.io
use serde::{Deserializer, de::Error as _};
// self
use crate::{
	_prelude::*,
	model::{CollectionEntity, Entity, EntityKind},
};

macro_rules! def_meta_value {
	($name:ident, $doc:literal, $kind:ident, $collection:literal) => {
		#[doc = $doc]
		#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
		pub struct $name {
			/// Value identifier; numeric ids are rendered as strings.
			#[serde(deserialize_with = "string_or_number")]
			pub id: String,
			/// Display name.
			pub name: String,
			/// Remaining server fields.
			#[serde(flatten)]
			pub extra: Map<String, Value>,
		}
		impl Entity for $name {
			const KIND: EntityKind = EntityKind::$kind;
		}
		impl CollectionEntity for $name {
			const COLLECTION: &'static str = $collection;
		}
	};
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(id) => Ok(id),
		Value::Number(id) => Ok(id.to_string()),
		other => Err(D::Error::custom(format!("expected a string or numeric id, found {other}"))),
	}
}

def_meta_value! { MetaEnvironment, "Environment a project can be tagged with.", MetaEnvironment, "environments" }
def_meta_value! { MetaOwningGroup, "Group that can own a project.", MetaOwningGroup, "owning_groups" }

/// Key-value metadata attached to a project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectMeta(pub BTreeMap<String, Value>);
impl ProjectMeta {
	/// Looks up a metadata value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}
}
impl Entity for ProjectMeta {
	const KIND: EntityKind = EntityKind::ProjectMeta;
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn meta_ids_accept_numbers() {
		let value: MetaEnvironment = serde_json::from_value(json!({ "id": 3, "name": "qa" }))
			.expect("Numeric ids should decode.");

		assert_eq!(value.id, "3");
		assert!(
			serde_json::from_value::<MetaOwningGroup>(json!({ "id": null, "name": "ops" })).is_err()
		);
	}
}
