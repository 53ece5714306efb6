use std::path::{Component, Path, PathBuf};

use tracing::debug;

pub const RECORD_DELIMITER: &str = "---";

/// New full contents keyed by file path, in the order the model proposed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeMap {
    entries: Vec<(String, String)>,
}

impl ChangeMap {
    /// Decodes `FILENAME: <content>` records separated by `---` lines.
    ///
    /// Records without a colon, or with an empty filename, are dropped. A
    /// repeated filename replaces the earlier content.
    pub fn parse(proposal: &str) -> Self {
        let mut changes = Self::default();
        for section in split_records(proposal) {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }
            let Some((filename, content)) = section.split_once(':') else {
                debug!(record = %preview(section), "dropping change record without filename");
                continue;
            };
            let filename = filename.trim();
            if filename.is_empty() {
                debug!(record = %preview(section), "dropping change record with empty filename");
                continue;
            }
            changes.insert(filename.to_string(), content.trim().to_string());
        }
        changes
    }

    /// Keys are normalized first, so `./a.py` and `a.py` name the same entry.
    pub fn insert(&mut self, path: String, content: String) {
        let path = normalize_key(&path).unwrap_or(path);
        match self.entries.iter_mut().find(|(existing, _)| *existing == path) {
            Some(entry) => entry.1 = content,
            None => self.entries.push((path, content)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<&str> {
        let path = normalize_key(path).unwrap_or_else(|| path.to_string());
        self.entries
            .iter()
            .find(|(existing, _)| *existing == path)
            .map(|(_, content)| content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drops `.` segments and repeated separators. `..` and a leading root are
/// kept for the writer to reject. `None` when nothing is left.
fn normalize_key(path: &str) -> Option<String> {
    let normalized: PathBuf = Path::new(path)
        .components()
        .filter(|part| !matches!(part, Component::CurDir))
        .collect();
    let normalized = normalized.to_string_lossy();
    (!normalized.is_empty()).then(|| normalized.into_owned())
}

/// A delimiter is a whole line of `---`; hyphens inside a line stay content.
/// Other lines keep their original endings.
fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    for line in text.split_inclusive('\n') {
        if line.trim() == RECORD_DELIMITER {
            records.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
        }
    }
    records.push(current);
    records
}

fn preview(section: &str) -> String {
    section.chars().take(40).collect()
}
