//! Authentication operations: password tokens and project-scoped exchanges.

// self
use crate::{
	_prelude::*,
	auth::{self, ProjectScope},
	client::KeystoneClient,
	http::HttpMethod,
	model::{ProjectToken, Token},
	obs::{self, Operation},
};

/// Placeholder bearer for bootstrap calls; the header is stripped before dispatch.
const UNAUTHENTICATED: &str = "unauthenticated";

impl KeystoneClient {
	/// Authenticates with username and password.
	///
	/// `tenant_name` is only sent by v2 clients. The returned token carries the bearer value
	/// under [`Token::token`] whether Keystone delivered it in the `X-Subject-Token` header
	/// (v3) or in `access.token.id` (v2).
	pub async fn get_token(
		&self,
		username: &str,
		password: &str,
		tenant_name: Option<&str>,
	) -> Result<Token> {
		const OP: Operation = Operation::GetToken;

		obs::observe(OP, async move {
			let request = auth::password_auth(self.version, username, password, tenant_name);
			let descriptor = self
				.request_descriptor(UNAUTHENTICATED, request.path, request.payload)
				.without_auth();
			let response = self.send(OP, HttpMethod::Post, descriptor).await?;
			let raw = auth::extract_token(self.version, OP, &response)?;

			self.normalize(Value::Object(raw))
		})
		.await
	}

	/// Exchanges `access_token` for a token scoped to the project with `project_id`.
	pub async fn get_project_token(
		&self,
		access_token: &str,
		project_id: &str,
	) -> Result<ProjectToken> {
		self.exchange_project_token(access_token, ProjectScope::Id(project_id.to_owned())).await
	}

	/// Alias of [`get_project_token`](Self::get_project_token).
	pub async fn get_project_token_by_id(
		&self,
		access_token: &str,
		project_id: &str,
	) -> Result<ProjectToken> {
		self.get_project_token(access_token, project_id).await
	}

	/// Exchanges `access_token` for a token scoped to `project_name` within `domain_id`.
	pub async fn get_project_token_by_name(
		&self,
		access_token: &str,
		domain_id: &str,
		project_name: &str,
	) -> Result<ProjectToken> {
		let scope = ProjectScope::Name {
			domain_id: domain_id.to_owned(),
			name: project_name.to_owned(),
		};

		self.exchange_project_token(access_token, scope).await
	}

	async fn exchange_project_token(
		&self,
		access_token: &str,
		scope: ProjectScope,
	) -> Result<ProjectToken> {
		const OP: Operation = Operation::GetProjectToken;

		obs::observe(OP, async move {
			let request = auth::scoped_token_auth(self.version, access_token, &scope)?;
			let descriptor = self
				.request_descriptor(UNAUTHENTICATED, request.path, request.payload)
				.without_auth();
			let response = self.send(OP, HttpMethod::Post, descriptor).await?;
			let raw = auth::extract_project_token(OP, &response)?;

			self.normalize(Value::Object(raw))
		})
		.await
	}
}
