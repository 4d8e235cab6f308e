//! Branch sets across one or many projects

use std::collections::BTreeSet;

use crate::git::GitRepo;
use crate::model::{Branch, BranchType, Project};

/// Branches of a single project, empty when it is not cloned or can not be opened
pub fn branches_of(project: &Project, branch_type: BranchType) -> BTreeSet<Branch> {
    let Some(path) = project.cloned_path() else {
        tracing::warn!("{} project is not cloned, it has no branches", project.name);
        return BTreeSet::new();
    };

    match GitRepo::open(path) {
        Ok(repo) => repo.branches(branch_type).into_iter().collect(),
        Err(e) => {
            tracing::warn!("Failed to open {} project: {:#}", project.name, e);
            BTreeSet::new()
        }
    }
}

/// Union of the branches of `projects`, or with `only_common` the branches
/// present in every one of them.
///
/// Projects that contribute no branches at all (not cloned, unreadable or
/// without commits) are left out, so they neither seed nor empty the
/// intersection and the visiting order never changes the result.
pub fn branches_of_projects<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    branch_type: BranchType,
    only_common: bool,
) -> BTreeSet<Branch> {
    let mut accumulated: Option<BTreeSet<Branch>> = None;

    for project in projects {
        let branches = branches_of(project, branch_type);
        if branches.is_empty() {
            tracing::debug!("{} project has no {:?} branches", project.name, branch_type);
            continue;
        }

        accumulated = Some(match accumulated {
            None => branches,
            Some(acc) if only_common => acc.intersection(&branches).cloned().collect(),
            Some(mut acc) => {
                acc.extend(branches);
                acc
            }
        });
    }

    accumulated.unwrap_or_default()
}

/// Whether the project has all (`only_common`) or any of `branches`
pub fn contains_branches(project: &Project, branches: &[Branch], only_common: bool) -> bool {
    let existing = branches_of(project, BranchType::All);

    if only_common {
        branches.iter().all(|branch| existing.contains(branch))
    } else {
        branches.iter().any(|branch| existing.contains(branch))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test_utils::{create_test_repo, RepoTestOperations};

    fn repo_with_branches(branches: &[&str]) -> (assert_fs::TempDir, GitRepo) {
        let (temp_dir, repo) = create_test_repo();
        repo.add_file_and_commit("README.md", "initial", "Initial commit")
            .unwrap();
        for branch in branches {
            repo.create_branch(branch, false);
        }
        (temp_dir, repo)
    }

    fn project_for(id: u64, repo: &GitRepo) -> Project {
        Project::cloned_at(id, format!("project-{id}"), "", repo.path())
    }

    fn local(names: &[&str]) -> BTreeSet<Branch> {
        names.iter().map(|name| Branch::local(*name)).collect()
    }

    #[test]
    fn common_branches_are_the_intersection() {
        let (_dir_a, repo_a) = repo_with_branches(&["dev"]);
        let (_dir_b, repo_b) = repo_with_branches(&["feature"]);
        let projects = vec![project_for(1, &repo_a), project_for(2, &repo_b)];

        assert_eq!(
            branches_of_projects(&projects, BranchType::Local, true),
            local(&["master"])
        );
        assert_eq!(
            branches_of_projects(&projects, BranchType::Local, false),
            local(&["dev", "feature", "master"])
        );
    }

    #[test]
    fn visiting_order_does_not_matter() {
        let (_dir_a, repo_a) = repo_with_branches(&["dev", "release"]);
        let (_dir_b, repo_b) = repo_with_branches(&["dev"]);
        let (_dir_c, empty_repo) = create_test_repo();
        let a = project_for(1, &repo_a);
        let b = project_for(2, &repo_b);
        let empty = project_for(3, &empty_repo);

        let forward = branches_of_projects([&empty, &a, &b], BranchType::Local, true);
        let backward = branches_of_projects([&b, &a, &empty], BranchType::Local, true);

        assert_eq!(forward, local(&["dev", "master"]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn uncloned_projects_are_skipped() {
        let (_dir_a, repo_a) = repo_with_branches(&["dev"]);
        let uncloned = Project::new(2, "uncloned", "https://example.com/uncloned.git");

        assert!(branches_of(&uncloned, BranchType::Local).is_empty());
        assert_eq!(
            branches_of_projects([&uncloned, &project_for(1, &repo_a)], BranchType::Local, true),
            local(&["dev", "master"])
        );
    }

    #[test]
    fn no_projects_yield_no_branches() {
        let projects: Vec<Project> = Vec::new();

        assert!(branches_of_projects(&projects, BranchType::All, true).is_empty());
    }

    #[test]
    fn contains_branches_all_or_any() {
        let (_dir, repo) = repo_with_branches(&["dev"]);
        let project = project_for(1, &repo);
        let wanted = [Branch::local("dev"), Branch::local("missing")];

        assert!(contains_branches(&project, &wanted, false));
        assert!(!contains_branches(&project, &wanted, true));
        assert!(contains_branches(&project, &wanted[..1], true));
    }
}
