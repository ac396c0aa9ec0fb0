//! Bearer token extraction from authentication responses.
//!
//! Keystone v3 delivers the token in the `X-Subject-Token` response header while v2 nests it
//! in the body under `access.token.id`. The extractors validate the response shape, locate the
//! bearer value for the configured protocol, and merge it into the raw token object under the
//! single `token` field so the rest of the pipeline is version-agnostic.

// self
use crate::{_prelude::*, config::ApiVersion, http::TransportResponse, obs::Operation};

/// Response header carrying the v3 bearer token.
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";
/// `Vary` value Keystone sends when the token is delivered through header negotiation.
pub const VARY_TOKEN_MARKER: &str = "X-Auth-Token";
/// Field of the canonical token object that holds the bearer value.
pub const BEARER_FIELD: &str = "token";

/// Extracts the raw token object from a password-auth response.
///
/// Both checks must pass before extraction: the body carries `token` or `access.token`, and
/// the response carries either the `X-Subject-Token` header or the `Vary: X-Auth-Token`
/// marker. v3 then reads the bearer from the header; v2 reads `access.token.id` and folds
/// `access.user` into the token object. A missing or empty bearer is always an error.
pub fn extract_token(
	version: ApiVersion,
	operation: Operation,
	response: &TransportResponse,
) -> Result<Map<String, Value>> {
	let body = body_object(operation, response)?;
	let access_token = body.get("access").and_then(|access| access.get("token"));

	if !body.get("token").is_some_and(Value::is_object)
		&& !access_token.is_some_and(Value::is_object)
	{
		return Err(Error::malformed(operation, "body carries neither `token` nor `access.token`"));
	}
	if response.header(SUBJECT_TOKEN_HEADER).is_none() && !has_vary_marker(response) {
		return Err(Error::malformed(
			operation,
			"response carries neither the X-Subject-Token header nor the Vary: X-Auth-Token marker",
		));
	}

	match version {
		ApiVersion::V3 => {
			let bearer = subject_header(operation, response)?;
			let mut token = object_field(operation, body, "token")?;

			token.insert(BEARER_FIELD.into(), Value::String(bearer.to_owned()));

			Ok(token)
		},
		ApiVersion::V2 => {
			let access = object_field(operation, body, "access")?;
			let mut token = object_field(operation, &access, "token")?;
			let bearer = match token.remove("id") {
				Some(Value::String(id)) if !id.is_empty() => id,
				_ => return Err(Error::malformed(operation, "`access.token.id` is missing")),
			};

			if let Some(user) = access.get("user") {
				token.insert("user".into(), user.clone());
			}

			token.insert(BEARER_FIELD.into(), Value::String(bearer));

			Ok(token)
		},
	}
}

/// Extracts the raw token object from a project-scope exchange response.
///
/// Scoped exchanges are v3-only, so the bearer must come from the `X-Subject-Token` header
/// and the body must carry a `token` object; the vary marker is not accepted here.
pub fn extract_project_token(
	operation: Operation,
	response: &TransportResponse,
) -> Result<Map<String, Value>> {
	let body = body_object(operation, response)?;
	let mut token = object_field(operation, body, "token")?;
	let bearer = subject_header(operation, response)?;

	token.insert(BEARER_FIELD.into(), Value::String(bearer.to_owned()));

	Ok(token)
}

fn body_object(operation: Operation, response: &TransportResponse) -> Result<&Map<String, Value>> {
	response
		.body
		.as_ref()
		.and_then(Value::as_object)
		.ok_or_else(|| Error::malformed(operation, "response body is not a JSON object"))
}

fn object_field(
	operation: Operation,
	object: &Map<String, Value>,
	field: &str,
) -> Result<Map<String, Value>> {
	match object.get(field) {
		Some(Value::Object(inner)) => Ok(inner.clone()),
		_ => Err(Error::malformed(operation, format!("`{field}` object is missing"))),
	}
}

fn subject_header(operation: Operation, response: &TransportResponse) -> Result<&str> {
	response
		.header(SUBJECT_TOKEN_HEADER)
		.filter(|value| !value.is_empty())
		.ok_or_else(|| Error::malformed(operation, "X-Subject-Token header is missing"))
}

fn has_vary_marker(response: &TransportResponse) -> bool {
	response
		.header("vary")
		.is_some_and(|vary| vary.split(',').any(|item| item.trim().eq_ignore_ascii_case(VARY_TOKEN_MARKER)))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn v3_body() -> Value {
		json!({ "token": { "methods": ["password"], "user": { "id": "u-1", "name": "alice" } } })
	}

	fn v2_body() -> Value {
		json!({
			"access": {
				"token": { "id": "xyz", "expires": "2030-01-01T00:00:00Z", "tenant": { "id": "t-1" } },
				"user": { "id": "u-2", "name": "bob" }
			}
		})
	}

	#[test]
	fn v3_bearer_comes_from_header() {
		let response =
			TransportResponse::new(201).with_header(SUBJECT_TOKEN_HEADER, "abc").with_body(v3_body());
		let token = extract_token(ApiVersion::V3, Operation::GetToken, &response)
			.expect("Well-formed v3 response should extract.");

		assert_eq!(token["token"], "abc");
		assert_eq!(token["user"]["name"], "alice");
	}

	#[test]
	fn v2_bearer_comes_from_body() {
		let response =
			TransportResponse::new(200).with_header("Vary", "X-Auth-Token").with_body(v2_body());
		let token = extract_token(ApiVersion::V2, Operation::GetToken, &response)
			.expect("Well-formed v2 response should extract.");

		assert_eq!(token["token"], "xyz");
		assert_eq!(token["user"]["id"], "u-2");
		assert!(!token.contains_key("id"));
	}

	#[test]
	fn v2_ignores_subject_header_when_body_carries_token() {
		let response = TransportResponse::new(200)
			.with_header(SUBJECT_TOKEN_HEADER, "from-header")
			.with_body(v2_body());
		let token = extract_token(ApiVersion::V2, Operation::GetToken, &response)
			.expect("v2 response with a stray header should extract.");

		assert_eq!(token["token"], "xyz");
	}

	#[test]
	fn missing_header_and_vary_marker_is_malformed() {
		let response = TransportResponse::new(201).with_body(v3_body());
		let err = extract_token(ApiVersion::V3, Operation::GetToken, &response)
			.expect_err("Responses without a token location must fail.");

		assert!(matches!(err, Error::MalformedResponse { operation: Operation::GetToken, .. }));
	}

	#[test]
	fn v3_vary_marker_without_header_never_yields_null_bearer() {
		let response =
			TransportResponse::new(201).with_header("Vary", "X-Auth-Token").with_body(v3_body());

		assert!(matches!(
			extract_token(ApiVersion::V3, Operation::GetToken, &response),
			Err(Error::MalformedResponse { .. })
		));
	}

	#[test]
	fn missing_token_body_is_malformed_even_with_header() {
		let response = TransportResponse::new(201)
			.with_header(SUBJECT_TOKEN_HEADER, "abc")
			.with_body(json!({ "unexpected": true }));

		assert!(matches!(
			extract_token(ApiVersion::V3, Operation::GetToken, &response),
			Err(Error::MalformedResponse { .. })
		));
	}

	#[test]
	fn v2_without_token_id_is_malformed() {
		let response = TransportResponse::new(200)
			.with_header("Vary", "X-Auth-Token")
			.with_body(json!({ "access": { "token": { "expires": "2030-01-01T00:00:00Z" } } }));

		assert!(matches!(
			extract_token(ApiVersion::V2, Operation::GetToken, &response),
			Err(Error::MalformedResponse { .. })
		));
	}

	#[test]
	fn project_token_requires_subject_header() {
		let body = json!({ "token": { "project": { "id": "p-1", "name": "web" } } });
		let ok = TransportResponse::new(201)
			.with_header(SUBJECT_TOKEN_HEADER, "scoped")
			.with_body(body.clone());
		let token = extract_project_token(Operation::GetProjectToken, &ok)
			.expect("Scoped response should extract.");

		assert_eq!(token["token"], "scoped");
		assert_eq!(token["project"]["id"], "p-1");

		let vary_only =
			TransportResponse::new(201).with_header("Vary", "X-Auth-Token").with_body(body);

		assert!(extract_project_token(Operation::GetProjectToken, &vary_only).is_err());
	}
}
