use std::path::Path;

use tracing::debug;

/// Text contents of a working tree, captured once per run.
#[derive(Debug, Clone, Default)]
pub struct RepositorySnapshot {
    files: Vec<RepositoryFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFile {
    pub path: String,
    pub content: String,
}

impl RepositorySnapshot {
    /// Reads every listed path under `root`. Paths that are not valid UTF-8
    /// text or cannot be read are left out.
    pub async fn load(root: &Path, paths: &[String]) -> Self {
        let mut snapshot = Self::default();
        for path in paths {
            match tokio::fs::read_to_string(root.join(path)).await {
                Ok(content) => snapshot.insert(path.clone(), content),
                Err(err) => debug!(path = %path, error = %err, "skipping unreadable file"),
            }
        }
        snapshot
    }

    pub fn insert(&mut self, path: String, content: String) {
        match self.files.iter_mut().find(|file| file.path == path) {
            Some(existing) => existing.content = content,
            None => self.files.push(RepositoryFile { path, content }),
        }
    }

    pub fn files(&self) -> impl Iterator<Item = &RepositoryFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for RepositorySnapshot {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut snapshot = Self::default();
        for (path, content) in iter {
            snapshot.insert(path.into(), content.into());
        }
        snapshot
    }
}
