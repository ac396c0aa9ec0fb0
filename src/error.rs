//! Client-level error types shared across operations, transports, and manglers.

// self
use crate::{_prelude::*, mangle::NormalizeError, obs::Operation};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Remote conditions never panic; every failure surfaces here, tagged with the
/// [`Operation`] that produced it where one was in flight.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (unknown protocol version, bad base URL, ...).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Normalization strategy could not produce a canonical entity.
	#[error(transparent)]
	Normalization(#[from] NormalizeError),

	/// The transport failed before a response was available.
	#[error("Transport failed during {operation}.")]
	Transport {
		/// Operation that issued the call.
		operation: Operation,
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// Keystone answered with a non-success status.
	#[error("Keystone rejected {operation} with HTTP {status}: {message}.")]
	Status {
		/// Operation that issued the call.
		operation: Operation,
		/// HTTP status code returned by Keystone.
		status: u16,
		/// Keystone-supplied error message or a preview of the raw body.
		message: String,
	},
	/// The response succeeded at the transport level but lacks required fields.
	#[error("Keystone returned a malformed response for {operation}: {reason}.")]
	MalformedResponse {
		/// Operation that issued the call.
		operation: Operation,
		/// Which expectation the response failed.
		reason: String,
	},
	/// A by-name lookup matched more than one entity.
	#[error("Keystone returned {matches} matches for {operation}; expected at most one.")]
	Ambiguous {
		/// Operation that issued the call.
		operation: Operation,
		/// Number of entities the server returned.
		matches: usize,
	},
}
impl Error {
	/// Builds a [`Error::MalformedResponse`] for the provided operation.
	pub fn malformed(operation: Operation, reason: impl Into<String>) -> Self {
		Self::MalformedResponse { operation, reason: reason.into() }
	}

	/// Returns the operation that produced the error, when one was in flight.
	pub fn operation(&self) -> Option<Operation> {
		match self {
			Self::Transport { operation, .. }
			| Self::Status { operation, .. }
			| Self::MalformedResponse { operation, .. }
			| Self::Ambiguous { operation, .. } => Some(*operation),
			Self::Config(_) | Self::Normalization(_) => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Protocol version label is neither `v2` nor `v3`.
	#[error("Unknown Keystone API version `{label}`.")]
	UnknownVersion {
		/// Label that failed to parse.
		label: String,
	},
	/// Base URL cannot be parsed.
	#[error("Keystone base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// URL that failed validation.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Project-scoped token exchange is not expressible in the configured protocol.
	#[error("Project-scoped token exchange is not supported by Keystone {version}.")]
	UnsupportedScopeExchange {
		/// Configured protocol version label.
		version: &'static str,
	},
	/// The process-wide default timeout was initialized more than once.
	#[error("The process-wide default timeout has already been initialized.")]
	DefaultTimeoutAlreadySet,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures: network errors, timeouts, and undecodable bodies.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling Keystone.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request exceeded the descriptor's timeout.
	#[error("Request to Keystone timed out after {timeout:?}.")]
	Timeout {
		/// Timeout that was attached to the request.
		timeout: Duration,
	},
	/// Response body could not be decoded as JSON.
	#[error("Keystone response body is not valid JSON.")]
	InvalidBody {
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn operation_is_reported_for_remote_failures() {
		let err = Error::malformed(Operation::ListRoles, "missing links.self");

		assert_eq!(err.operation(), Some(Operation::ListRoles));
		assert_eq!(
			err.to_string(),
			"Keystone returned a malformed response for list_roles: missing links.self."
		);

		let err: Error = ConfigError::UnknownVersion { label: "v4".into() }.into();

		assert_eq!(err.operation(), None);
	}
}
