//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `keystone_client.operation` with the
//!   `operation` and `log_tag` fields.
//! - Enable `metrics` to increment the `keystone_client_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Public operations issued by [`KeystoneClient`](crate::KeystoneClient).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Username/password authentication.
	GetToken,
	/// Token exchange for a project-scoped token (by id or by domain + name).
	GetProjectToken,
	/// Admin listing of every project.
	ListProjects,
	/// Projects visible to a single user.
	ListUserProjects,
	/// Project lookup by unique name.
	GetProjectByName,
	/// Role listing.
	ListRoles,
	/// Role assignments scoped to a project.
	ListRoleAssignments,
	/// Grants a role to a user or group on a project.
	AddRoleAssignment,
	/// Revokes a role from a user or group on a project.
	RemoveRoleAssignment,
	/// Metadata extension: environment values.
	ListMetaEnvironments,
	/// Metadata extension: owning group values.
	ListMetaOwningGroups,
	/// Metadata extension: a project's metadata map.
	ListProjectMeta,
	/// Metadata extension: replaces a project's metadata map.
	UpdateProjectMeta,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::GetToken => "get_token",
			Operation::GetProjectToken => "get_project_token",
			Operation::ListProjects => "list_projects",
			Operation::ListUserProjects => "list_user_projects",
			Operation::GetProjectByName => "get_project_by_name",
			Operation::ListRoles => "list_roles",
			Operation::ListRoleAssignments => "list_role_assignments",
			Operation::AddRoleAssignment => "add_role_assignment",
			Operation::RemoveRoleAssignment => "remove_role_assignment",
			Operation::ListMetaEnvironments => "list_meta_environments",
			Operation::ListMetaOwningGroups => "list_meta_owning_groups",
			Operation::ListProjectMeta => "list_project_meta",
			Operation::UpdateProjectMeta => "update_project_meta",
		}
	}

	/// Returns the log path attached to every request descriptor of this operation.
	pub const fn log_tag(self) -> &'static str {
		match self {
			Operation::GetToken => "api-calls.keystone.tokens-get",
			Operation::GetProjectToken => "api-calls.keystone.tokens-get-project",
			Operation::ListProjects => "api-calls.keystone.projects-list",
			Operation::ListUserProjects => "api-calls.keystone.projects-list-user",
			Operation::GetProjectByName => "api-calls.keystone.projects-get-by-name",
			Operation::ListRoles => "api-calls.keystone.roles-get",
			Operation::ListRoleAssignments => "api-calls.keystone.role-assignments-list",
			Operation::AddRoleAssignment => "api-calls.keystone.role-assignments-add",
			Operation::RemoveRoleAssignment => "api-calls.keystone.role-assignments-remove",
			Operation::ListMetaEnvironments => "api-calls.keystone.meta-environments-get",
			Operation::ListMetaOwningGroups => "api-calls.keystone.meta-owninggroups-get",
			Operation::ListProjectMeta => "api-calls.keystone.projects-meta-get",
			Operation::UpdateProjectMeta => "api-calls.keystone.projects-meta-update",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Wraps an operation future with its span and attempt/success/failure counters.
pub(crate) async fn observe<T, Fut>(operation: Operation, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(operation);

	record_operation_outcome(operation, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_operation_outcome(operation, OperationOutcome::Success),
		Err(e) => {
			trace_failure(operation, e);
			record_operation_outcome(operation, OperationOutcome::Failure);
		},
	}

	result
}
