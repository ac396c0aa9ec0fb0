//! Request descriptors handed to [`KeystoneTransport`](crate::http::KeystoneTransport)
//! implementations.

// self
use crate::{_prelude::*, config};

/// Header carrying the caller's bearer token on authenticated requests.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// JSON mode of a request: either "speak JSON" with no request body, or a JSON payload.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonBody {
	/// Exchange JSON without sending a request body.
	Flag,
	/// Serialize this value as the request body.
	Payload(Value),
}
impl From<Value> for JsonBody {
	fn from(value: Value) -> Self {
		Self::Payload(value)
	}
}

/// Transport-ready description of a single Keystone call.
#[derive(Clone, PartialEq)]
pub struct RequestDescriptor {
	/// Absolute target URL (base URL + path).
	pub url: String,
	/// Request headers; authenticated calls carry [`AUTH_TOKEN_HEADER`].
	pub headers: BTreeMap<String, String>,
	/// JSON flag or payload.
	pub json: JsonBody,
	/// Per-call timeout resolved from the instance override or the process default.
	pub timeout: Duration,
	/// Log path used by instrumented transports.
	pub log_tag: &'static str,
}
impl RequestDescriptor {
	/// Builds a descriptor for `path` below `base_url`.
	///
	/// The effective timeout is `timeout_override` when set, otherwise
	/// [`config::default_timeout`]. The bearer token is always attached; bootstrap calls
	/// that authenticate through the payload strip it with [`without_auth`](Self::without_auth).
	pub fn build(
		base_url: &str,
		timeout_override: Option<Duration>,
		bearer: &str,
		path: &str,
		json: impl Into<JsonBody>,
	) -> Self {
		let timeout = timeout_override.unwrap_or_else(config::default_timeout);
		let mut headers = BTreeMap::new();

		headers.insert(AUTH_TOKEN_HEADER.to_owned(), bearer.to_owned());

		Self { url: format!("{base_url}{path}"), headers, json: json.into(), timeout, log_tag: "" }
	}

	/// Clears every header, including the bearer token.
	pub fn without_auth(mut self) -> Self {
		self.headers.clear();

		self
	}

	/// Sets the log path for instrumented transports.
	pub fn with_log_tag(mut self, log_tag: &'static str) -> Self {
		self.log_tag = log_tag;

		self
	}
}
impl Debug for RequestDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestDescriptor")
			.field("url", &self.url)
			.field("auth_header_set", &self.headers.contains_key(AUTH_TOKEN_HEADER))
			.field("json", &matches!(self.json, JsonBody::Payload(_)))
			.field("timeout", &self.timeout)
			.field("log_tag", &self.log_tag)
			.finish()
	}
}

/// Appends `key=value` to `path`, percent-encoding the value.
pub(crate) fn with_query(path: &str, key: &str, value: &str) -> String {
	let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();

	format!("{path}?{key}={encoded}")
}

/// Percent-encodes a single path segment.
pub(crate) fn segment(value: &str) -> String {
	url::form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>().replace('+', "%20")
}
