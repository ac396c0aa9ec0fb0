//! Credential envelopes for the two Keystone protocols.
//!
//! Each builder dispatches on [`ApiVersion`]; the v2 and v3 shapes are separate branches and
//! are never merged.

// crates.io
use serde_json::json;
// self
use crate::{_prelude::*, config::ApiVersion, error::ConfigError};

/// Domain name used for v3 password authentication.
pub const DEFAULT_DOMAIN_NAME: &str = "Default";

/// Target project of a scoped-token exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectScope {
	/// Project addressed by its unique identifier.
	Id(String),
	/// Project addressed by owning domain identifier plus name.
	Name {
		/// Identifier of the domain that owns the project.
		domain_id: String,
		/// Project name, unique within the domain.
		name: String,
	},
}

/// Request path plus JSON envelope for an authentication call.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthRequest {
	/// Path below the client's base URL.
	pub path: &'static str,
	/// JSON body to post.
	pub payload: Value,
}

/// Builds the username/password envelope for `version`.
///
/// `tenant_name` only exists in the v2 protocol; v3 password auth always targets the
/// [`DEFAULT_DOMAIN_NAME`] domain and ignores it.
pub fn password_auth(
	version: ApiVersion,
	username: &str,
	password: &str,
	tenant_name: Option<&str>,
) -> AuthRequest {
	match version {
		ApiVersion::V3 => AuthRequest {
			path: "/auth/tokens",
			payload: json!({
				"auth": {
					"identity": {
						"methods": ["password"],
						"password": {
							"user": {
								"domain": { "name": DEFAULT_DOMAIN_NAME },
								"name": username,
								"password": password,
							}
						}
					}
				}
			}),
		},
		ApiVersion::V2 => {
			let mut auth = Map::new();

			auth.insert(
				"passwordCredentials".into(),
				json!({ "username": username, "password": password }),
			);

			if let Some(tenant) = tenant_name {
				auth.insert("tenantName".into(), Value::String(tenant.to_owned()));
			}

			AuthRequest { path: "/tokens", payload: json!({ "auth": auth }) }
		},
	}
}

/// Builds the token-for-project-token exchange envelope for `version`.
///
/// Only v3 can express a scoped exchange; v2 fails with
/// [`ConfigError::UnsupportedScopeExchange`] instead of guessing a shape.
pub fn scoped_token_auth(
	version: ApiVersion,
	access_token: &str,
	scope: &ProjectScope,
) -> Result<AuthRequest, ConfigError> {
	match version {
		ApiVersion::V3 => {
			let project = match scope {
				ProjectScope::Id(id) => json!({ "id": id }),
				ProjectScope::Name { domain_id, name } =>
					json!({ "domain": { "id": domain_id }, "name": name }),
			};

			Ok(AuthRequest {
				path: "/auth/tokens",
				payload: json!({
					"auth": {
						"identity": {
							"methods": ["token"],
							"token": { "id": access_token },
						},
						"scope": { "project": project },
					}
				}),
			})
		},
		ApiVersion::V2 =>
			Err(ConfigError::UnsupportedScopeExchange { version: ApiVersion::V2.as_str() }),
	}
}
