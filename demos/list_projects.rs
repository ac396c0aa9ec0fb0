//! Authenticates against Keystone and prints every visible project.
//!
//! ```sh
//! KEYSTONE_URL=https://keystone.example.com/v3 KEYSTONE_USER=admin KEYSTONE_PASSWORD=secret \
//! 	cargo run --example list_projects
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::WrapErr};
// self
use keystone_client::{ApiVersion, KeystoneClient};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let base_url = env::var("KEYSTONE_URL").wrap_err("KEYSTONE_URL must be set.")?;
	let username = env::var("KEYSTONE_USER").wrap_err("KEYSTONE_USER must be set.")?;
	let password = env::var("KEYSTONE_PASSWORD").wrap_err("KEYSTONE_PASSWORD must be set.")?;
	let version = env::var("KEYSTONE_VERSION").unwrap_or_else(|_| "v3".into());
	let client = KeystoneClient::new(&base_url, version.parse::<ApiVersion>()?)?;
	let token = client.get_token(&username, &password, None).await?;
	let projects = client.list_projects(token.token.expose()).await?;

	for project in &projects {
		println!("{}\t{}", project.id, project.name);
	}

	if let Some(next) = projects.next() {
		println!("more results at {next}");
	}

	Ok(())
}
