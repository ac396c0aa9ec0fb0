// self
use crate::{
	_prelude::*,
	client::KeystoneClient,
	http::{HttpMethod, JsonBody, segment, with_query},
	model::{PaginatedList, Role, RoleAssignment, SubjectKind},
	obs::{self, Operation},
};

impl KeystoneClient {
	/// Lists role definitions.
	pub async fn list_roles(&self, project_token: &str) -> Result<PaginatedList<Role>> {
		const OP: Operation = Operation::ListRoles;

		obs::observe(OP, self.list_paginated(OP, project_token, "/roles")).await
	}

	/// Lists the role assignments scoped to `project_id`.
	pub async fn list_role_assignments(
		&self,
		project_token: &str,
		project_id: &str,
	) -> Result<PaginatedList<RoleAssignment>> {
		const OP: Operation = Operation::ListRoleAssignments;

		let path = with_query("/role_assignments", "scope.project.id", project_id);

		obs::observe(OP, self.list_paginated(OP, project_token, &path)).await
	}

	/// Grants `role_id` on `project_id` to a user or group.
	///
	/// Issued as an idempotent `PUT`; Keystone replies without a body.
	pub async fn add_role_assignment(
		&self,
		project_token: &str,
		project_id: &str,
		subject_id: &str,
		subject_kind: SubjectKind,
		role_id: &str,
	) -> Result<()> {
		const OP: Operation = Operation::AddRoleAssignment;

		let path = assignment_path(project_id, subject_kind, subject_id, role_id);

		obs::observe(OP, self.assignment_call(OP, HttpMethod::Put, project_token, &path)).await
	}

	/// Revokes `role_id` on `project_id` from a user or group.
	pub async fn remove_role_assignment(
		&self,
		project_token: &str,
		project_id: &str,
		subject_id: &str,
		subject_kind: SubjectKind,
		role_id: &str,
	) -> Result<()> {
		const OP: Operation = Operation::RemoveRoleAssignment;

		let path = assignment_path(project_id, subject_kind, subject_id, role_id);

		obs::observe(OP, self.assignment_call(OP, HttpMethod::Delete, project_token, &path)).await
	}

	async fn assignment_call(
		&self,
		operation: Operation,
		method: HttpMethod,
		project_token: &str,
		path: &str,
	) -> Result<()> {
		let descriptor = self.request_descriptor(project_token, path, JsonBody::Flag);

		self.send(operation, method, descriptor).await?;

		Ok(())
	}
}

fn assignment_path(
	project_id: &str,
	subject_kind: SubjectKind,
	subject_id: &str,
	role_id: &str,
) -> String {
	format!(
		"/projects/{}/{}/{}/roles/{}",
		segment(project_id),
		subject_kind.path_segment(),
		segment(subject_id),
		segment(role_id),
	)
}
