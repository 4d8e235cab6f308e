//! Remote directory of groups and their projects

mod github;

use async_trait::async_trait;

pub use github::GitHubDirectory;

use crate::model::Group;
use crate::{Error, Result};

/// Source of the groups a user can clone
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Short name of the service, used as the storage namespace
    fn name(&self) -> &'static str;

    /// Every group visible to the user, none of them cloned
    async fn list_groups(&self) -> Result<Vec<Group>>;

    /// The group called `name`
    async fn find_group(&self, name: &str) -> Result<Group> {
        self.list_groups()
            .await?
            .into_iter()
            .find(|group| group.name == name)
            .ok_or_else(|| Error::Directory(format!("Group '{name}' not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;

    struct StaticDirectory(Vec<Group>);

    #[async_trait]
    impl DirectoryService for StaticDirectory {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn list_groups(&self) -> Result<Vec<Group>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn find_group_looks_up_by_name() {
        let directory = StaticDirectory(vec![
            Group::new("tools", "tools"),
            Group::new("apps", "apps").with_projects(vec![Project::new(7, "web", "url")]),
        ]);

        let group = directory.find_group("apps").await.unwrap();
        assert_eq!(group.projects.len(), 1);

        let missing = directory.find_group("nope").await;
        assert!(matches!(missing, Err(Error::Directory(_))));
    }
}
