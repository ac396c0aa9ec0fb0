//! Transport primitives for Keystone calls.
//!
//! The module exposes [`KeystoneTransport`], the client's only dependency on an HTTP stack,
//! together with the crate-owned [`TransportResponse`] view so downstream crates can plug in
//! custom clients (recording stubs, instrumented wrappers, ...) without touching reqwest
//! types. The default [`ReqwestTransport`] is available behind the `reqwest` feature.

pub mod descriptor;

pub use descriptor::*;

// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`KeystoneTransport`] verbs.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + 'a + Send>>;

/// HTTP verbs used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the upper-case method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Abstraction over HTTP transports capable of executing Keystone requests.
///
/// Implementations must be `Send + Sync + 'static` so a single handle can be shared by
/// many clients behind `Arc<dyn KeystoneTransport>`. Only [`execute`](Self::execute) is
/// required; the verb helpers delegate to it. A transport performs exactly one request per
/// call and must not retry; exceeding [`RequestDescriptor::timeout`] is reported as
/// [`TransportError::Timeout`].
pub trait KeystoneTransport
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `request` with the provided verb.
	fn execute(&self, method: HttpMethod, request: RequestDescriptor) -> TransportFuture<'_>;

	/// Dispatches a `POST`.
	fn post(&self, request: RequestDescriptor) -> TransportFuture<'_> {
		self.execute(HttpMethod::Post, request)
	}

	/// Dispatches a `GET`.
	fn get(&self, request: RequestDescriptor) -> TransportFuture<'_> {
		self.execute(HttpMethod::Get, request)
	}

	/// Dispatches a `PUT`.
	fn put(&self, request: RequestDescriptor) -> TransportFuture<'_> {
		self.execute(HttpMethod::Put, request)
	}

	/// Dispatches a `DELETE`.
	fn delete(&self, request: RequestDescriptor) -> TransportFuture<'_> {
		self.execute(HttpMethod::Delete, request)
	}
}

/// Status, headers, and decoded JSON body of a completed Keystone call.
///
/// Header names are stored lower-cased; use [`header`](Self::header) for case-insensitive
/// lookups. `body` is `None` when the server sent no content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers keyed by lower-cased name.
	pub headers: BTreeMap<String, String>,
	/// Decoded JSON body, if any.
	pub body: Option<Value>,
}
impl TransportResponse {
	/// Creates an empty response with the provided status.
	pub fn new(status: u16) -> Self {
		Self { status, headers: BTreeMap::new(), body: None }
	}

	/// Adds a header, normalizing its name to lower case.
	pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
		self.headers.insert(name.to_ascii_lowercase(), value.into());

		self
	}

	/// Sets the decoded JSON body.
	pub fn with_body(mut self, body: Value) -> Self {
		self.body = Some(body);

		self
	}

	/// Looks up a header by name, ignoring case.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Default transport backed by a shared [`ReqwestClient`].
///
/// Response bodies are decoded as JSON when non-empty. Error responses whose body is not
/// JSON keep the raw text as a JSON string so status mapping can still preview it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl KeystoneTransport for ReqwestTransport {
	fn execute(&self, method: HttpMethod, request: RequestDescriptor) -> TransportFuture<'_> {
		Box::pin(async move {
			let timeout = request.timeout;
			let mut builder = self
				.0
				.request(reqwest_method(method), &request.url)
				.timeout(timeout)
				.header(reqwest::header::ACCEPT, "application/json");

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let JsonBody::Payload(payload) = &request.json {
				builder = builder.json(payload);
			}

			let response =
				builder.send().await.map_err(|e| map_reqwest_error(e, timeout))?;
			let status = response.status();
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|v| (name.as_str().to_ascii_lowercase(), v.to_owned()))
				})
				.collect();
			let bytes = response.bytes().await.map_err(|e| map_reqwest_error(e, timeout))?;
			let body = decode_body(&bytes, status.is_success())?;

			Ok(TransportResponse { status: status.as_u16(), headers, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: HttpMethod) -> reqwest::Method {
	match method {
		HttpMethod::Get => reqwest::Method::GET,
		HttpMethod::Post => reqwest::Method::POST,
		HttpMethod::Put => reqwest::Method::PUT,
		HttpMethod::Delete => reqwest::Method::DELETE,
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError, timeout: Duration) -> TransportError {
	if err.is_timeout() {
		TransportError::Timeout { timeout }
	} else {
		TransportError::network(err)
	}
}

#[cfg(feature = "reqwest")]
fn decode_body(bytes: &[u8], success: bool) -> Result<Option<Value>, TransportError> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}

	match serde_json::from_slice(bytes) {
		Ok(value) => Ok(Some(value)),
		Err(_) if !success => Ok(Some(Value::String(String::from_utf8_lossy(bytes).into_owned()))),
		Err(source) => Err(TransportError::InvalidBody { source }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn header_lookup_ignores_case() {
		let response = TransportResponse::new(201).with_header("X-Subject-Token", "abc");

		assert_eq!(response.header("x-subject-token"), Some("abc"));
		assert_eq!(response.header("X-SUBJECT-TOKEN"), Some("abc"));
		assert!(response.is_success());
		assert!(!TransportResponse::new(404).is_success());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn empty_bodies_decode_to_none() {
		assert_eq!(decode_body(b"", true).expect("Empty body should decode."), None);
		assert_eq!(decode_body(b" \n", true).expect("Blank body should decode."), None);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn non_json_error_bodies_are_kept_as_text() {
		let body = decode_body(b"<html>oops</html>", false)
			.expect("Error bodies should not fail decoding.");

		assert_eq!(body, Some(Value::String("<html>oops</html>".into())));
		assert!(matches!(
			decode_body(b"<html>oops</html>", true),
			Err(TransportError::InvalidBody { .. })
		));
	}
}
