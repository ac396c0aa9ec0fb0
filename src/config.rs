//! Client configuration: protocol version, base URL, and request timeouts.

// std
use std::sync::OnceLock;
// self
use crate::{_prelude::*, error::ConfigError};

/// Timeout applied to every request when neither the process nor the instance overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(9_000);

static PROCESS_TIMEOUT: OnceLock<Duration> = OnceLock::new();

/// Initializes the process-wide default timeout.
///
/// The value can be set once; later calls fail with
/// [`ConfigError::DefaultTimeoutAlreadySet`] so every client observes the same default.
pub fn init_default_timeout(timeout: Duration) -> Result<(), ConfigError> {
	PROCESS_TIMEOUT.set(timeout).map_err(|_| ConfigError::DefaultTimeoutAlreadySet)
}

/// Returns the process-wide default timeout ([`DEFAULT_TIMEOUT`] unless initialized).
pub fn default_timeout() -> Duration {
	PROCESS_TIMEOUT.get().copied().unwrap_or(DEFAULT_TIMEOUT)
}

/// Keystone identity protocol spoken by a client instance.
///
/// Fixed at construction; the v2 and v3 request and response shapes are never mixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ApiVersion {
	/// Legacy Identity API v2.0 (`/tokens`, body-delivered tokens).
	V2,
	#[default]
	/// Identity API v3 (`/auth/tokens`, header-delivered tokens).
	V3,
}
impl ApiVersion {
	/// Returns the version label (`v2` or `v3`).
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiVersion::V2 => "v2",
			ApiVersion::V3 => "v3",
		}
	}
}
impl Display for ApiVersion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ApiVersion {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"v2" => Ok(ApiVersion::V2),
			"v3" => Ok(ApiVersion::V3),
			other => Err(ConfigError::UnknownVersion { label: other.to_owned() }),
		}
	}
}
impl TryFrom<String> for ApiVersion {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<ApiVersion> for String {
	fn from(value: ApiVersion) -> Self {
		value.as_str().to_owned()
	}
}

/// Validates a Keystone base URL and strips one trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
	Url::parse(raw)
		.map_err(|source| ConfigError::InvalidBaseUrl { url: raw.to_owned(), source })?;

	Ok(raw.strip_suffix('/').unwrap_or(raw).to_owned())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn version_labels_round_trip() {
		assert_eq!("v2".parse::<ApiVersion>().expect("v2 should parse."), ApiVersion::V2);
		assert_eq!("v3".parse::<ApiVersion>().expect("v3 should parse."), ApiVersion::V3);
		assert_eq!(ApiVersion::default(), ApiVersion::V3);
		assert_eq!(ApiVersion::V2.to_string(), "v2");

		let err = "v2.0".parse::<ApiVersion>().expect_err("Unknown labels must be rejected.");

		assert!(matches!(err, ConfigError::UnknownVersion { label } if label == "v2.0"));
	}

	#[test]
	fn version_deserializes_from_label() {
		let version: ApiVersion =
			serde_json::from_str("\"v2\"").expect("Version label should deserialize.");

		assert_eq!(version, ApiVersion::V2);
		assert!(serde_json::from_str::<ApiVersion>("\"v1\"").is_err());
	}

	#[test]
	fn base_url_strips_trailing_slash() {
		assert_eq!(
			normalize_base_url("https://keystone.example.com:5000/v3/")
				.expect("Base URL should be valid."),
			"https://keystone.example.com:5000/v3"
		);
		assert_eq!(
			normalize_base_url("https://keystone.example.com/v2.0")
				.expect("Base URL should be valid."),
			"https://keystone.example.com/v2.0"
		);
		assert!(matches!(
			normalize_base_url("not a url"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
	}

	#[test]
	fn default_timeout_falls_back_to_constant() {
		// The process value is never initialized inside this test binary.
		assert_eq!(default_timeout(), DEFAULT_TIMEOUT);
	}
}
