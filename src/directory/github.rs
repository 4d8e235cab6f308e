use async_trait::async_trait;
use octocrab::Octocrab;

use super::DirectoryService;
use crate::model::{Group, Project};
use crate::{Error, Result};

/// GitHub organizations as groups, their repositories as projects
pub struct GitHubDirectory {
    octocrab: Octocrab,
    organizations: Vec<String>,
}

impl GitHubDirectory {
    pub const SERVER: &'static str = "github.com";

    pub fn new(token: Option<String>, organizations: Vec<String>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        let octocrab = builder
            .build()
            .map_err(|e| Error::Directory(format!("Failed to create GitHub client: {e}")))?;

        Ok(Self {
            octocrab,
            organizations,
        })
    }

    async fn organization(&self, org: &str) -> Result<Group> {
        tracing::debug!("Listing repositories of {}", org);

        let page = self
            .octocrab
            .orgs(org)
            .list_repos()
            .per_page(100)
            .send()
            .await
            .map_err(|e| Error::Directory(format!("Failed to list repositories of {org}: {e}")))?;
        let repositories = self
            .octocrab
            .all_pages(page)
            .await
            .map_err(|e| Error::Directory(format!("Failed to list repositories of {org}: {e}")))?;

        let entries = repositories
            .into_iter()
            .filter_map(|repo| {
                let url = repo.clone_url?.to_string();
                Some((repo.id.0, repo.name, url))
            })
            .collect();

        Ok(group_from_entries(org, entries))
    }
}

/// Build an uncloned group from `(id, name, clone_url)` entries, sorted by name
fn group_from_entries(org: &str, mut entries: Vec<(u64, String, String)>) -> Group {
    entries.sort_by(|a, b| a.1.cmp(&b.1));
    let projects = entries
        .into_iter()
        .map(|(id, name, url)| Project::new(id, name, url))
        .collect();

    Group::new(org, org).with_projects(projects)
}

#[async_trait]
impl DirectoryService for GitHubDirectory {
    fn name(&self) -> &'static str {
        Self::SERVER
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let mut groups = Vec::new();
        for org in &self.organizations {
            groups.push(self.organization(org).await?);
        }
        Ok(groups)
    }

    async fn find_group(&self, name: &str) -> Result<Group> {
        self.organization(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::group_from_entries;

    #[test]
    fn entries_become_sorted_uncloned_projects() {
        let group = group_from_entries(
            "acme",
            vec![
                (2, "web".to_string(), "https://github.com/acme/web.git".to_string()),
                (1, "api".to_string(), "https://github.com/acme/api.git".to_string()),
            ],
        );

        assert_eq!(group.name, "acme");
        assert!(!group.is_cloned());
        let names: Vec<_> = group.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["api", "web"]);
        assert_eq!(group.projects[0].id, 1);
        assert!(group.projects.iter().all(|p| !p.is_cloned()));
    }
}
