//! Keystone client and its operation set.
//!
//! [`KeystoneClient`] owns read-only configuration (base URL, protocol version, timeout
//! override) plus shared handles to the transport and mangler. Every operation builds one
//! [`RequestDescriptor`], issues exactly one transport call, validates the response shape,
//! and normalizes entities; nothing is cached or retried between calls.

mod list;
mod meta;
mod project;
mod role;
mod token;

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
use crate::{
	_prelude::*,
	config::{self, ApiVersion},
	error::ConfigError,
	http::{HttpMethod, JsonBody, KeystoneTransport, RequestDescriptor, TransportResponse},
	mangle::{self, DefaultMangler, Mangler},
	model::Entity,
	obs::{self, Operation},
};

/// Client for a single Keystone endpoint speaking one protocol version.
///
/// Cloning is cheap; clones share the transport and mangler. Reconfiguration goes through
/// `&mut self` setters, so it can never race with operations borrowed from the same value.
#[derive(Clone)]
pub struct KeystoneClient {
	base_url: String,
	version: ApiVersion,
	timeout: Option<Duration>,
	transport: Arc<dyn KeystoneTransport>,
	mangler: Arc<dyn Mangler>,
}
impl KeystoneClient {
	/// Creates a client that talks to `base_url` through `transport`.
	///
	/// The base URL must parse; one trailing slash is stripped. The default mangler is
	/// [`DefaultMangler`].
	pub fn with_transport(
		base_url: &str,
		version: ApiVersion,
		transport: Arc<dyn KeystoneTransport>,
	) -> Result<Self> {
		Ok(Self {
			base_url: config::normalize_base_url(base_url)?,
			version,
			timeout: None,
			transport,
			mangler: Arc::new(DefaultMangler),
		})
	}

	/// Creates a client from a textual version label (`"v2"` or `"v3"`).
	///
	/// Unknown labels fail with [`ConfigError::UnknownVersion`] before any request is built.
	pub fn from_version_label(
		base_url: &str,
		version: &str,
		transport: Arc<dyn KeystoneTransport>,
	) -> Result<Self> {
		let version = version.parse::<ApiVersion>()?;

		Self::with_transport(base_url, version, transport)
	}

	/// Overrides the per-request timeout for this instance.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Replaces the normalization strategy.
	pub fn with_mangler(mut self, mangler: impl 'static + Mangler) -> Self {
		self.mangler = Arc::new(mangler);

		self
	}

	/// Sets or clears the instance timeout override.
	pub fn set_timeout(&mut self, timeout: Option<Duration>) {
		self.timeout = timeout;
	}

	/// Replaces the transport used by subsequent operations.
	pub fn set_transport(&mut self, transport: Arc<dyn KeystoneTransport>) {
		self.transport = transport;
	}

	/// Replaces the mangler used by subsequent operations.
	pub fn set_mangler(&mut self, mangler: Arc<dyn Mangler>) {
		self.mangler = mangler;
	}

	/// Base URL without a trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Protocol version fixed at construction.
	pub fn version(&self) -> ApiVersion {
		self.version
	}

	/// Instance timeout override, if any.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	/// Builds a descriptor for `path` carrying `bearer` in `X-Auth-Token`.
	///
	/// The timeout is this instance's override when set, otherwise the process default.
	pub fn request_descriptor(
		&self,
		bearer: &str,
		path: &str,
		json: impl Into<JsonBody>,
	) -> RequestDescriptor {
		RequestDescriptor::build(&self.base_url, self.timeout, bearer, path, json)
	}

	/// Issues one transport call and rejects non-success statuses.
	async fn send(
		&self,
		operation: Operation,
		method: HttpMethod,
		descriptor: RequestDescriptor,
	) -> Result<TransportResponse> {
		let descriptor = descriptor.with_log_tag(operation.log_tag());

		obs::trace_dispatch(method.as_str(), &descriptor.url, descriptor.log_tag);

		let call = match method {
			HttpMethod::Get => self.transport.get(descriptor),
			HttpMethod::Post => self.transport.post(descriptor),
			HttpMethod::Put => self.transport.put(descriptor),
			HttpMethod::Delete => self.transport.delete(descriptor),
		};
		let response = call.await.map_err(|source| Error::Transport { operation, source })?;

		if !response.is_success() {
			return Err(status_error(operation, &response));
		}

		Ok(response)
	}

	fn normalize<E>(&self, raw: Value) -> Result<E>
	where
		E: Entity,
	{
		Ok(mangle::normalize(self.mangler.as_ref(), raw)?)
	}
}
#[cfg(feature = "reqwest")]
impl KeystoneClient {
	/// Creates a client backed by a default [`ReqwestTransport`].
	pub fn new(base_url: &str, version: ApiVersion) -> Result<Self> {
		Self::with_transport(base_url, version, Arc::new(ReqwestTransport::default()))
	}

	/// Creates a client backed by a reqwest client built from `builder`.
	pub fn with_reqwest_builder(
		base_url: &str,
		version: ApiVersion,
		builder: reqwest::ClientBuilder,
	) -> Result<Self> {
		let client = builder.build().map_err(ConfigError::from)?;

		Self::with_transport(base_url, version, Arc::new(ReqwestTransport::with_client(client)))
	}
}
impl Debug for KeystoneClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("KeystoneClient")
			.field("base_url", &self.base_url)
			.field("version", &self.version)
			.field("timeout", &self.timeout)
			.finish()
	}
}

const MESSAGE_PREVIEW_LIMIT: usize = 256;

fn status_error(operation: Operation, response: &TransportResponse) -> Error {
	let message = match response.body.as_ref() {
		Some(body) => body
			.pointer("/error/message")
			.and_then(Value::as_str)
			.map(str::to_owned)
			.unwrap_or_else(|| match body {
				Value::String(text) => truncate_preview(text),
				other => truncate_preview(&other.to_string()),
			}),
		None => "empty response body".into(),
	};

	Error::Status { operation, status: response.status, message }
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= MESSAGE_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(MESSAGE_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
pub(crate) mod tests {
	// crates.io
	use parking_lot::Mutex;
	use serde_json::json;
	// self
	use super::*;
	use crate::{error::TransportError, http::TransportFuture};

	/// Transport that records every call and replays canned responses in order.
	#[derive(Default)]
	pub(crate) struct StubTransport {
		responses: Mutex<Vec<Result<TransportResponse, TransportError>>>,
		pub(crate) calls: Mutex<Vec<(HttpMethod, RequestDescriptor)>>,
	}
	impl StubTransport {
		pub(crate) fn replying(
			responses: impl IntoIterator<Item = Result<TransportResponse, TransportError>>,
		) -> Arc<Self> {
			let mut responses = responses.into_iter().collect::<Vec<_>>();

			responses.reverse();

			Arc::new(Self { responses: Mutex::new(responses), calls: Default::default() })
		}
	}
	impl KeystoneTransport for StubTransport {
		fn execute(&self, method: HttpMethod, request: RequestDescriptor) -> TransportFuture<'_> {
			self.calls.lock().push((method, request));

			let next = self.responses.lock().pop().expect("Stub transport ran out of responses.");

			Box::pin(async move { next })
		}
	}

	pub(crate) fn client(version: ApiVersion, transport: Arc<StubTransport>) -> KeystoneClient {
		KeystoneClient::with_transport("https://keystone.example.com/v3/", version, transport)
			.expect("Stub client should build.")
	}

	#[test]
	fn construction_normalizes_configuration() {
		let transport = StubTransport::replying([]);
		let client = client(ApiVersion::V3, transport.clone());

		assert_eq!(client.base_url(), "https://keystone.example.com/v3");
		assert_eq!(client.version(), ApiVersion::V3);
		assert_eq!(client.timeout(), None);

		let err = KeystoneClient::from_version_label("https://k.example.com", "v1", transport)
			.expect_err("Unknown version labels must fail fast.");

		assert!(matches!(err, Error::Config(ConfigError::UnknownVersion { .. })));
	}

	#[test]
	fn descriptor_timeout_prefers_instance_override() {
		let mut client = client(ApiVersion::V3, StubTransport::replying([]));

		assert_eq!(
			client.request_descriptor("t", "/roles", JsonBody::Flag).timeout,
			config::default_timeout()
		);

		client.set_timeout(Some(Duration::from_millis(1_500)));

		let descriptor = client.request_descriptor("t", "/roles", JsonBody::Flag);

		assert_eq!(descriptor.timeout, Duration::from_millis(1_500));
		assert_eq!(descriptor.url, "https://keystone.example.com/v3/roles");
	}

	#[tokio::test]
	async fn send_maps_status_and_transport_failures() {
		let transport = StubTransport::replying([
			Ok(TransportResponse::new(401).with_body(json!({
				"error": { "code": 401, "message": "The request you have made requires authentication.", "title": "Unauthorized" }
			}))),
			Err(TransportError::Timeout { timeout: Duration::from_millis(10) }),
		]);
		let client = client(ApiVersion::V3, transport.clone());
		let err = client
			.send(Operation::ListRoles, HttpMethod::Get, client.request_descriptor("t", "/roles", JsonBody::Flag))
			.await
			.expect_err("401 must surface as an error.");

		match err {
			Error::Status { operation, status, message } => {
				assert_eq!(operation, Operation::ListRoles);
				assert_eq!(status, 401);
				assert_eq!(message, "The request you have made requires authentication.");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		let err = client
			.send(Operation::ListRoles, HttpMethod::Get, client.request_descriptor("t", "/roles", JsonBody::Flag))
			.await
			.expect_err("Timeouts must surface as transport failures.");

		assert!(matches!(
			err,
			Error::Transport { operation: Operation::ListRoles, source: TransportError::Timeout { .. } }
		));

		let calls = transport.calls.lock();

		assert_eq!(calls.len(), 2);
		assert_eq!(calls[0].1.log_tag, "api-calls.keystone.roles-get");
	}

	#[test]
	fn status_previews_are_truncated() {
		let long = "x".repeat(MESSAGE_PREVIEW_LIMIT + 10);
		let err = status_error(
			Operation::GetToken,
			&TransportResponse::new(500).with_body(Value::String(long)),
		);

		match err {
			Error::Status { message, .. } => {
				assert_eq!(message.chars().count(), MESSAGE_PREVIEW_LIMIT + 1);
				assert!(message.ends_with('…'));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
