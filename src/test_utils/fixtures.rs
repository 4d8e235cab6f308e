use assert_fs::TempDir;

use super::repo_extensions::{create_test_bare_repo, create_test_repo, RepoTestOperations};
use crate::engine::ProgressListener;
use crate::git::GitRepo;
use crate::model::{Group, Project, ProjectId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Start,
    Success(u32, Option<ProjectId>),
    Error(u32, Option<ProjectId>, String),
    Finish(Option<String>),
}

/// Listener that keeps every event for later assertions
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub events: Vec<ProgressEvent>,
}

impl RecordingListener {
    pub fn errors(&self) -> Vec<(u32, Option<ProjectId>, String)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Error(progress, id, message) => {
                    Some((*progress, *id, message.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn success_progress(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Success(progress, _) => Some(*progress),
                _ => None,
            })
            .collect()
    }
}

impl ProgressListener for RecordingListener {
    fn on_start(&mut self) {
        self.events.push(ProgressEvent::Start);
    }

    fn on_success(&mut self, progress: u32, project: Option<&Project>) {
        self.events
            .push(ProgressEvent::Success(progress, project.map(|p| p.id)));
    }

    fn on_error(&mut self, progress: u32, project: Option<&Project>, message: &str) {
        self.events.push(ProgressEvent::Error(
            progress,
            project.map(|p| p.id),
            message.to_string(),
        ));
    }

    fn on_finish(&mut self, message: Option<&str>) {
        self.events
            .push(ProgressEvent::Finish(message.map(str::to_string)));
    }
}

/// A group whose projects are backed by bare repositories on disk.
///
/// Each bare remote has a seed repository with one commit of `README.md`
/// on master that can push further changes to it.
pub struct GroupFixture {
    pub workspace: TempDir,
    pub group: Group,
    seeds: Vec<(TempDir, GitRepo)>,
    _remotes: Vec<(TempDir, GitRepo)>,
}

impl GroupFixture {
    /// Replace the project with `id` by an uncloned copy of itself
    pub fn uncloned(&mut self, id: ProjectId) {
        if let Some(project) = self.group.projects.iter_mut().find(|p| p.id == id) {
            *project = Project::new(project.id, project.name.clone(), project.remote_url.clone());
        }
    }

    /// Commit `content` to `file` on the remote of the project at `index`
    pub fn push_remote_change(&self, index: usize, file: &str, content: &str) {
        let (_, seed) = &self.seeds[index];
        seed.add_file_and_commit(file, content, &format!("Remote change of {file}"))
            .unwrap();
        seed.push_branch("origin", "master").unwrap();
    }
}

/// Uncloned group named `group` with one project per name, ids starting at 1
pub fn remote_group(names: &[&str]) -> GroupFixture {
    let mut seeds = Vec::new();
    let mut remotes = Vec::new();
    let mut projects = Vec::new();

    for (index, name) in names.iter().enumerate() {
        let (remote_dir, remote_repo) = create_test_bare_repo();
        let (seed_dir, seed) = create_test_repo();
        seed.add_file_and_commit("README.md", name, "Initial commit")
            .unwrap()
            .add_local_remote("origin", &remote_repo)
            .unwrap();
        seed.push_branch("origin", "master").unwrap();

        let url = remote_repo.path().to_str().unwrap().to_string();
        projects.push(Project::new(index as u64 + 1, *name, url));
        seeds.push((seed_dir, seed));
        remotes.push((remote_dir, remote_repo));
    }

    GroupFixture {
        workspace: TempDir::new().unwrap(),
        group: Group::new("group", "org/group").with_projects(projects),
        seeds,
        _remotes: remotes,
    }
}

/// Like [`remote_group`], with every project cloned into the workspace
pub fn cloned_group(names: &[&str]) -> GroupFixture {
    let mut fixture = remote_group(names);
    let group_path = fixture.workspace.path().join(&fixture.group.name);

    for project in fixture.group.projects.iter_mut() {
        let path = group_path.join(&project.name);
        GitRepo::clone(&project.remote_url, &path).unwrap();
        project.mark_cloned(path);
    }
    fixture.group.mark_cloned(group_path);
    fixture
}
