// self
use crate::{
	_prelude::*,
	client::{KeystoneClient, list},
	http::{segment, with_query},
	model::{PaginatedList, Project},
	obs::{self, Operation},
};

impl KeystoneClient {
	/// Lists every project visible to `admin_token`.
	pub async fn list_projects(&self, admin_token: &str) -> Result<PaginatedList<Project>> {
		const OP: Operation = Operation::ListProjects;

		obs::observe(OP, self.list_paginated(OP, admin_token, "/projects")).await
	}

	/// Lists the projects `username` has access to.
	pub async fn list_user_projects(
		&self,
		username: &str,
		token: &str,
	) -> Result<PaginatedList<Project>> {
		const OP: Operation = Operation::ListUserProjects;

		let path = format!("/users/{}/projects", segment(username));

		obs::observe(OP, self.list_paginated(OP, token, &path)).await
	}

	/// Looks up a project by its exact name.
	///
	/// Zero matches is `Ok(None)`. More than one match fails with [`Error::Ambiguous`] rather
	/// than picking one.
	pub async fn get_project_by_name(
		&self,
		admin_token: &str,
		project_name: &str,
	) -> Result<Option<Project>> {
		const OP: Operation = Operation::GetProjectByName;

		obs::observe(OP, async move {
			let path = with_query("/projects", "name", project_name);
			let mut body = self.fetch_object(OP, admin_token, &path).await?;
			let mut matches = list::take_array(OP, &mut body, "projects")?;

			match matches.len() {
				0 => Ok(None),
				1 => {
					let raw = matches.swap_remove(0);

					Ok(Some(self.normalize(raw)?))
				},
				n => Err(Error::Ambiguous { operation: OP, matches: n }),
			}
		})
		.await
	}
}
