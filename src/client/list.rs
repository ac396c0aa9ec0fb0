//! Shared list handling: one generic path for every collection endpoint.

// self
use crate::{
	_prelude::*,
	client::KeystoneClient,
	http::{HttpMethod, JsonBody},
	model::{CollectionEntity, PageLinks, PaginatedList},
	obs::Operation,
};

impl KeystoneClient {
	/// Fetches `path` and wraps the normalized `E::COLLECTION` array in a [`PaginatedList`].
	///
	/// The body must carry the array and a `links` block with a string `self`; a missing
	/// links block is malformed even when the array is empty.
	pub(crate) async fn list_paginated<E>(
		&self,
		operation: Operation,
		bearer: &str,
		path: &str,
	) -> Result<PaginatedList<E>>
	where
		E: CollectionEntity,
	{
		let mut body = self.fetch_object(operation, bearer, path).await?;
		let raw_items = take_array(operation, &mut body, E::COLLECTION)?;
		let links = match body.remove("links") {
			Some(links @ Value::Object(_)) => serde_json::from_value::<PageLinks>(links)
				.map_err(|_| Error::malformed(operation, "`links.self` is missing or invalid"))?,
			_ => return Err(Error::malformed(operation, "`links` block is missing")),
		};
		let items = self.normalize_all(raw_items)?;

		Ok(PaginatedList::new(items, links))
	}

	/// Fetches `path` and normalizes the `E::COLLECTION` array; no links are expected.
	///
	/// Meta value endpoints send a bare array with no `links` block, so there is no page to
	/// describe and they return a plain `Vec` instead of a [`PaginatedList`].
	pub(crate) async fn list_values<E>(
		&self,
		operation: Operation,
		bearer: &str,
		path: &str,
	) -> Result<Vec<E>>
	where
		E: CollectionEntity,
	{
		let mut body = self.fetch_object(operation, bearer, path).await?;
		let raw_items = take_array(operation, &mut body, E::COLLECTION)?;

		self.normalize_all(raw_items)
	}

	/// Issues an authenticated `GET` and returns the body as a JSON object.
	pub(crate) async fn fetch_object(
		&self,
		operation: Operation,
		bearer: &str,
		path: &str,
	) -> Result<Map<String, Value>> {
		let descriptor = self.request_descriptor(bearer, path, JsonBody::Flag);
		let response = self.send(operation, HttpMethod::Get, descriptor).await?;

		match response.body {
			Some(Value::Object(body)) => Ok(body),
			_ => Err(Error::malformed(operation, "response body is not a JSON object")),
		}
	}

	fn normalize_all<E>(&self, raw_items: Vec<Value>) -> Result<Vec<E>>
	where
		E: CollectionEntity,
	{
		raw_items.into_iter().map(|raw| self.normalize(raw)).collect()
	}
}

/// Removes `field` from `body`, requiring a JSON array.
pub(crate) fn take_array(
	operation: Operation,
	body: &mut Map<String, Value>,
	field: &str,
) -> Result<Vec<Value>> {
	match body.remove(field) {
		Some(Value::Array(items)) => Ok(items),
		_ => Err(Error::malformed(operation, format!("`{field}` array is missing"))),
	}
}
