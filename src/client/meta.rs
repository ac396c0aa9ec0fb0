//! Project metadata extension endpoints.

// self
use crate::{
	_prelude::*,
	client::KeystoneClient,
	http::{HttpMethod, JsonBody, segment},
	model::{MetaEnvironment, MetaOwningGroup, ProjectMeta},
	obs::{self, Operation},
};

impl KeystoneClient {
	/// Lists the environments a project can be tagged with.
	pub async fn list_meta_environments(&self, auth_token: &str) -> Result<Vec<MetaEnvironment>> {
		const OP: Operation = Operation::ListMetaEnvironments;

		obs::observe(OP, self.list_values(OP, auth_token, "/meta_values/environment")).await
	}

	/// Lists the groups that can own a project.
	pub async fn list_meta_owning_groups(&self, auth_token: &str) -> Result<Vec<MetaOwningGroup>> {
		const OP: Operation = Operation::ListMetaOwningGroups;

		obs::observe(OP, self.list_values(OP, auth_token, "/meta_values/owning_group")).await
	}

	/// Reads the metadata attached to `project_id`.
	pub async fn list_project_meta(
		&self,
		project_token: &str,
		project_id: &str,
	) -> Result<ProjectMeta> {
		const OP: Operation = Operation::ListProjectMeta;

		obs::observe(OP, async move {
			let path = meta_path(project_id);
			let descriptor = self.request_descriptor(project_token, &path, JsonBody::Flag);
			let response = self.send(OP, HttpMethod::Get, descriptor).await?;

			self.meta_from_body(OP, response.body)
		})
		.await
	}

	/// Replaces the metadata of `project_id` and returns what Keystone stored.
	pub async fn update_project_meta(
		&self,
		project_token: &str,
		project_id: &str,
		meta: &ProjectMeta,
	) -> Result<ProjectMeta> {
		const OP: Operation = Operation::UpdateProjectMeta;

		obs::observe(OP, async move {
			let path = meta_path(project_id);
			let entries = meta.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect::<Map<_, _>>();
			let mut payload = Map::new();

			payload.insert("meta".into(), Value::Object(entries));

			let descriptor = self.request_descriptor(project_token, &path, Value::Object(payload));
			let response = self.send(OP, HttpMethod::Put, descriptor).await?;

			self.meta_from_body(OP, response.body)
		})
		.await
	}

	fn meta_from_body(&self, operation: Operation, body: Option<Value>) -> Result<ProjectMeta> {
		match body {
			Some(Value::Object(mut body)) => match body.remove("meta") {
				Some(meta @ Value::Object(_)) => self.normalize(meta),
				_ => Err(Error::malformed(operation, "`meta` object is missing")),
			},
			_ => Err(Error::malformed(operation, "response body is not a JSON object")),
		}
	}
}

fn meta_path(project_id: &str) -> String {
	format!("/projects/{}/meta", segment(project_id))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		ApiVersion,
		client::tests::{StubTransport, client},
		http::TransportResponse,
	};

	#[tokio::test]
	async fn meta_values_coerce_numeric_ids() {
		let transport = StubTransport::replying([Ok(TransportResponse::new(200).with_body(json!({
			"environments": [{ "id": 1, "name": "dev" }, { "id": "2", "name": "prod" }]
		})))]);
		let client = client(ApiVersion::V3, transport);
		let values = client.list_meta_environments("t").await.expect("Environments should list.");

		assert_eq!(values.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), ["1", "2"]);
		assert_eq!(values[0].name, "dev");
	}

	#[tokio::test]
	async fn update_wraps_payload_and_returns_stored_meta() {
		let transport = StubTransport::replying([Ok(TransportResponse::new(200)
			.with_body(json!({ "meta": { "environment": "dev", "group": "marketing" } })))]);
		let client = client(ApiVersion::V3, transport.clone());
		let mut meta = ProjectMeta::default();

		meta.0.insert("environment".into(), json!("dev"));
		meta.0.insert("group".into(), json!("marketing"));

		let stored =
			client.update_project_meta("pt", "p-1", &meta).await.expect("Update should succeed.");

		assert_eq!(stored, meta);

		let calls = transport.calls.lock();

		assert_eq!(calls[0].0, HttpMethod::Put);
		assert_eq!(calls[0].1.url, "https://keystone.example.com/v3/projects/p-1/meta");
		assert_eq!(
			calls[0].1.json,
			JsonBody::Payload(json!({ "meta": { "environment": "dev", "group": "marketing" } }))
		);
	}

	#[tokio::test]
	async fn project_meta_requires_meta_object() {
		let transport =
			StubTransport::replying([Ok(TransportResponse::new(200).with_body(json!({ "other": {} })))]);
		let client = client(ApiVersion::V3, transport);

		assert!(matches!(
			client.list_project_meta("pt", "p-1").await,
			Err(Error::MalformedResponse { operation: Operation::ListProjectMeta, .. })
		));
	}
}
