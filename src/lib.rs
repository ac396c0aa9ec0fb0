//! Keystone identity client speaking both the v2 and v3 wire protocols.
//!
//! The crate builds protocol-correct authentication requests, pulls bearer tokens out of
//! whichever response location the server chose (the `X-Subject-Token` header for v3, the
//! `access.token.id` body field for v2), and reshapes version-specific JSON into canonical
//! entities through a pluggable [`mangle::Mangler`]. Every list-returning operation yields a
//! [`model::PaginatedList`] carrying the server's `self`/`previous`/`next` links.
//!
//! The HTTP stack is pluggable as well: implement [`http::KeystoneTransport`] or enable the
//! default `reqwest` feature and use [`http::ReqwestTransport`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mangle;
pub mod model;
pub mod obs;

pub use client::KeystoneClient;
pub use config::ApiVersion;
pub use error::{Error, Result};

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
