use crate::git::{Identity, DEFAULT_REMOTE};
use crate::model::{Group, Project, ProjectId};

/// Everything a batch needs to know about the group it works on.
///
/// One context is built per group and owned by its engine.
#[derive(Debug, Clone)]
pub struct GroupContext {
    group: Group,
    remote: String,
    current_user: Option<Identity>,
}

impl GroupContext {
    pub fn new(group: Group) -> Self {
        Self {
            group,
            remote: DEFAULT_REMOTE.to_string(),
            current_user: None,
        }
    }

    /// Remote used for push, fetch and pull
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Identity used for commits that do not name their own author or committer
    pub fn with_current_user(mut self, user: Option<Identity>) -> Self {
        self.current_user = user;
        self
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut Group {
        &mut self.group
    }

    pub fn into_group(self) -> Group {
        self.group
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.current_user.as_ref()
    }

    /// Every project of the group, subgroups included
    pub fn projects(&self) -> Vec<&Project> {
        self.group.all_projects()
    }

    /// Projects with the given ids, in the order of `ids`; unknown ids are skipped
    pub fn projects_by_ids(&self, ids: &[ProjectId]) -> Vec<&Project> {
        let projects = self.projects();
        ids.iter()
            .filter_map(|id| projects.iter().find(|p| p.id == *id).copied())
            .collect()
    }

    /// Projects a batch can safely work on: cloned and without conflicts in
    /// their last status snapshot
    pub fn correct_projects(&self) -> Vec<&Project> {
        self.projects()
            .into_iter()
            .filter(|p| p.is_cloned() && !p.has_conflicts())
            .collect()
    }

    pub fn ids_of(projects: &[&Project]) -> Vec<ProjectId> {
        projects.iter().map(|p| p.id).collect()
    }

    /// Recompute the status snapshot of every cloned project
    pub fn refresh_statuses(&mut self) {
        fn refresh(group: &mut Group) {
            for project in &mut group.projects {
                project.refresh_status();
            }
            for subgroup in &mut group.subgroups {
                refresh(subgroup);
            }
        }
        refresh(&mut self.group);
    }
}

#[cfg(test)]
mod tests {
    use super::GroupContext;
    use crate::model::{Group, Project};
    use crate::test_utils::{create_test_repo, RepoTestOperations};

    fn sample_group() -> Group {
        let mut nested = Group::new("nested", "org/nested");
        nested.projects.push(Project::new(3, "nested-app", "url-3"));
        let mut group = Group::new("org", "org").with_projects(vec![
            Project::cloned_at(1, "api", "url-1", "/tmp/org/api"),
            Project::new(2, "web", "url-2"),
        ]);
        group.subgroups.push(nested);
        group
    }

    #[test]
    fn projects_by_ids_keeps_requested_order() {
        let context = GroupContext::new(sample_group());

        let projects = context.projects_by_ids(&[3, 42, 1]);

        assert_eq!(GroupContext::ids_of(&projects), vec![3, 1]);
        assert_eq!(context.projects().len(), 3);
    }

    #[test]
    fn correct_projects_excludes_uncloned_and_conflicting() {
        let (_temp_dir, repo) = create_test_repo();
        repo.add_file_and_commit("README.md", "initial", "Initial commit")
            .unwrap();
        let mut group = sample_group();
        group.projects[0].mark_cloned(repo.path());
        let mut context = GroupContext::new(group);
        context.refresh_statuses();

        let correct = context.correct_projects();

        assert_eq!(GroupContext::ids_of(&correct), vec![1]);
        assert_eq!(
            context.group().projects[0]
                .status()
                .and_then(|s| s.current_branch.as_deref()),
            Some("master")
        );
    }

    #[test]
    fn defaults_to_origin_without_user() {
        let context = GroupContext::new(sample_group()).with_remote("upstream");

        assert_eq!(context.remote(), "upstream");
        assert!(context.current_user().is_none());
        assert_eq!(context.into_group().name, "org");
    }
}
