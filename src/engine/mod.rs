//! Batch operations over the projects of a group
//!
//! Every batch visits its projects one after another in the given order.
//! A project that is not cloned, can not be opened or whose operation fails
//! is reported through the [`ProgressListener`] and recorded in the outcome;
//! the batch always carries on with the next project. Only malformed input
//! is returned as an [`Error`](crate::Error).

mod context;
mod progress;

use std::collections::BTreeMap;
use std::path::Path;

pub use context::GroupContext;
pub use progress::{ProgressListener, SilentListener};

use crate::catalog;
use crate::git::{GitRepo, Identity};
use crate::model::{Branch, OperationStatus, Project, ProjectId};
use crate::{Error, Result};

/// Per-project result of one batch
pub type BatchOutcome = BTreeMap<ProjectId, OperationStatus>;

/// Message and identities of a batch commit
#[derive(Debug, Clone, Default)]
pub struct CommitRequest {
    pub message: String,
    /// Stage modified and deleted tracked files before committing
    pub stage_all: bool,
    pub author: Option<Identity>,
    pub committer: Option<Identity>,
}

impl CommitRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn stage_all(mut self, stage_all: bool) -> Self {
        self.stage_all = stage_all;
        self
    }

    pub fn author(mut self, author: Identity) -> Self {
        self.author = Some(author);
        self
    }

    pub fn committer(mut self, committer: Identity) -> Self {
        self.committer = Some(committer);
        self
    }
}

pub struct BatchOperationEngine {
    context: GroupContext,
}

impl BatchOperationEngine {
    pub fn new(context: GroupContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &GroupContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GroupContext {
        &mut self.context
    }

    pub fn into_context(self) -> GroupContext {
        self.context
    }

    /// Clone every project of the group into `<dest>/<group>/<project>`.
    ///
    /// A group that is already cloned or has no projects is refused with a
    /// single error event and an empty outcome. Otherwise the group is
    /// marked cloned once all projects were attempted, even when some of
    /// them failed.
    pub fn clone_group(
        &mut self,
        dest: &Path,
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::new();
        listener.on_start();

        let group = self.context.group_mut();
        if group.is_cloned() {
            let message = format!(
                "The operation is impossible, the {} group is already cloned",
                group.name
            );
            tracing::warn!("{}", message);
            listener.on_error(100, None, &message);
            listener.on_finish(None);
            return Ok(outcome);
        }
        if group.projects.is_empty() {
            let message = format!("Cloning error. {} group doesn't have projects", group.name);
            tracing::warn!("{}", message);
            listener.on_error(100, None, &message);
            listener.on_finish(None);
            return Ok(outcome);
        }

        let group_path = dest.join(&group.name);
        let step = 100 / group.projects.len() as u32;
        let mut progress = 0;

        for project in group.projects.iter_mut() {
            progress += step;
            let path = group_path.join(&project.name);

            match GitRepo::clone(&project.remote_url, &path) {
                Ok(_) => {
                    project.mark_cloned(path);
                    listener.on_success(progress, Some(&*project));
                    outcome.insert(project.id, OperationStatus::Successful);
                }
                Err(e) => {
                    tracing::warn!("Cloning error of {} project: {:#}", project.name, e);
                    listener.on_error(
                        progress,
                        Some(&*project),
                        &format!("Cloning error of {} project", project.name),
                    );
                    outcome.insert(project.id, OperationStatus::Failed);
                }
            }
        }

        group.mark_cloned(group_path);
        listener.on_finish(Some(&format!("{} group cloned", group.name)));
        Ok(outcome)
    }

    /// Pull the current branch of every project
    pub fn pull(
        &self,
        projects: &[&Project],
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        let current_user = self.context.current_user();
        self.run_batch(projects, "pull", listener, |repo| repo.pull(current_user))
    }

    /// Commit in every project
    pub fn commit(
        &self,
        projects: &[&Project],
        request: &CommitRequest,
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        Self::check_message(request)?;
        self.run_batch(projects, "commit", listener, |repo| self.commit_one(repo, request))
    }

    /// Push the current branch of every project
    pub fn push(
        &self,
        projects: &[&Project],
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        self.run_batch(projects, "push", listener, |repo| repo.push())
    }

    /// Commit in every project and push the ones that committed
    pub fn commit_and_push(
        &self,
        projects: &[&Project],
        request: &CommitRequest,
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        Self::check_message(request)?;
        self.run_batch(projects, "commit and push", listener, |repo| {
            match self.commit_one(repo, request) {
                OperationStatus::Successful => repo.push(),
                status => status,
            }
        })
    }

    /// Create a branch at HEAD in every project
    pub fn create_branch(
        &self,
        projects: &[&Project],
        name: &str,
        force: bool,
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        if name.is_empty() {
            return Err(Error::invalid("branch name must not be empty"));
        }
        self.run_batch(projects, "create branch in", listener, |repo| {
            repo.create_branch(name, force)
        })
    }

    /// Switch every project to `branch`.
    ///
    /// A remote branch becomes a new local branch tracking it.
    pub fn switch_to(
        &self,
        projects: &[&Project],
        branch: &Branch,
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        if branch.name.is_empty() {
            return Err(Error::invalid("branch name must not be empty"));
        }
        self.run_batch(projects, "switch branch in", listener, |repo| {
            repo.checkout(&branch.name, branch.is_remote())
        })
    }

    /// Delete a local branch in every project
    pub fn delete_branch(
        &self,
        projects: &[&Project],
        name: &str,
        force: bool,
        listener: &mut dyn ProgressListener,
    ) -> Result<BatchOutcome> {
        if name.is_empty() {
            return Err(Error::invalid("branch name must not be empty"));
        }
        self.run_batch(projects, "delete branch in", listener, |repo| {
            repo.delete_branch(name, force)
        })
    }

    /// Whether `project` has all (`only_common`) or any of `branches`
    pub fn contains_branches(
        &self,
        project: &Project,
        branches: &[Branch],
        only_common: bool,
    ) -> Result<bool> {
        if branches.is_empty() {
            return Err(Error::invalid("no branches to look for"));
        }
        Ok(catalog::contains_branches(project, branches, only_common))
    }

    fn check_message(request: &CommitRequest) -> Result<()> {
        if request.message.is_empty() {
            return Err(Error::invalid("commit message must not be empty"));
        }
        Ok(())
    }

    fn commit_one(&self, repo: &GitRepo, request: &CommitRequest) -> OperationStatus {
        repo.commit(
            &request.message,
            request.stage_all,
            request.author.as_ref(),
            request.committer.as_ref(),
            self.context.current_user(),
        )
        .unwrap_or(OperationStatus::Failed)
    }

    /// Open a project for the batch, or say why it has to be skipped
    fn open(&self, project: &Project) -> std::result::Result<GitRepo, String> {
        let Some(path) = project.cloned_path() else {
            return Err(format!(
                "{} project is not cloned. The operation is impossible",
                project.name
            ));
        };

        GitRepo::open(path)
            .map(|repo| repo.with_remote(self.context.remote()))
            .map_err(|e| {
                tracing::warn!("Failed to open {} project at {:?}: {:#}", project.name, path, e);
                format!("{} project can not be opened. The operation is impossible", project.name)
            })
    }

    fn run_batch<F>(
        &self,
        projects: &[&Project],
        operation: &str,
        listener: &mut dyn ProgressListener,
        mut apply: F,
    ) -> Result<BatchOutcome>
    where
        F: FnMut(&GitRepo) -> OperationStatus,
    {
        if projects.is_empty() {
            return Err(Error::invalid(format!("no projects to {operation}")));
        }

        let step = 100 / projects.len() as u32;
        let mut progress = 0;
        let mut outcome = BatchOutcome::new();
        listener.on_start();

        for &project in projects {
            progress += step;

            let status = match self.open(project) {
                Ok(repo) => apply(&repo),
                Err(reason) => {
                    tracing::warn!("{}", reason);
                    listener.on_error(progress, Some(project), &reason);
                    outcome.insert(project.id, OperationStatus::Failed);
                    continue;
                }
            };

            if status.is_successful() {
                listener.on_success(progress, Some(project));
            } else {
                listener.on_error(
                    progress,
                    Some(project),
                    &format!("Failed to {operation} {} project: {status}", project.name),
                );
            }
            outcome.insert(project.id, status);
        }

        listener.on_finish(Some(&format!("Finished: {operation} {} projects", projects.len())));
        Ok(outcome)
    }
}
