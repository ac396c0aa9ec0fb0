//! Uniform envelope returned by every paginated list operation.

// std
use std::{ops::Deref, slice::Iter, vec::IntoIter};
// self
use crate::_prelude::*;

/// Pagination references copied from a response's `links` block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
	/// Link to the page that was returned; always present.
	#[serde(rename = "self")]
	pub self_link: String,
	/// Link to the previous page, when the server supplied one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub previous: Option<String>,
	/// Link to the next page, when the server supplied one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next: Option<String>,
}

/// Ordered, normalized entities plus the pagination links of the page they came from.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginatedList<T> {
	items: Vec<T>,
	links: PageLinks,
}
impl<T> PaginatedList<T> {
	/// Wraps `items` (in server order) with their page links.
	pub fn new(items: Vec<T>, links: PageLinks) -> Self {
		Self { items, links }
	}

	/// Link to this page.
	pub fn self_link(&self) -> &str {
		&self.links.self_link
	}

	/// Link to the previous page, if any.
	pub fn previous(&self) -> Option<&str> {
		self.links.previous.as_deref()
	}

	/// Link to the next page, if any.
	pub fn next(&self) -> Option<&str> {
		self.links.next.as_deref()
	}

	/// All page links.
	pub fn links(&self) -> &PageLinks {
		&self.links
	}

	/// Consumes the page, returning the entities.
	pub fn into_items(self) -> Vec<T> {
		self.items
	}
}
impl<T> Deref for PaginatedList<T> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		&self.items
	}
}
impl<T> IntoIterator for PaginatedList<T> {
	type IntoIter = IntoIter<T>;
	type Item = T;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}
impl<'a, T> IntoIterator for &'a PaginatedList<T> {
	type IntoIter = Iter<'a, T>;
	type Item = &'a T;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn exposes_links_and_items() {
		let links: PageLinks = serde_json::from_value(serde_json::json!({
			"self": "https://k/v3/roles",
			"previous": null,
			"next": "https://k/v3/roles?marker=r-2"
		}))
		.expect("Links should deserialize.");
		let page = PaginatedList::new(vec!["admin", "member"], links);

		assert_eq!(page.self_link(), "https://k/v3/roles");
		assert_eq!(page.previous(), None);
		assert_eq!(page.next(), Some("https://k/v3/roles?marker=r-2"));
		assert_eq!(page.len(), 2);
		assert_eq!(page.iter().copied().collect::<Vec<_>>(), ["admin", "member"]);
		assert_eq!(page.into_items(), vec!["admin", "member"]);
	}
}
