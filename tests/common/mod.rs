// crates.io
use httpmock::MockServer;
// self
use keystone_client::{ApiVersion, KeystoneClient};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const PROJECT_TOKEN: &str = "project-token";

/// Builds a reqwest-backed client pointed at the mock server's `/v3` prefix.
pub fn build_client(server: &MockServer, version: ApiVersion) -> KeystoneClient {
	KeystoneClient::new(&server.url("/v3/"), version)
		.expect("Client should build against the mock server.")
}
