use crate::error::{GitBumpError, Result};
use crate::git::{sort_tags_by_version, Repository};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Mock repository for testing without actual git operations
///
/// Local tags, tags waiting on the remote and pushed tags are kept separately
/// so tests can observe what a workflow fetched, created and published.
#[derive(Default)]
pub struct MockRepository {
    head_subject: Option<String>,
    fetch_error: Option<String>,
    push_error: Option<String>,
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    local_tags: HashMap<String, String>,
    remote_tags: Vec<String>,
    pushed_tags: Vec<(String, String)>,
    fetch_count: usize,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HEAD commit subject
    pub fn with_head_subject(mut self, subject: impl Into<String>) -> Self {
        self.head_subject = Some(subject.into());
        self
    }

    /// Add local tags (as lightweight, message-less tags)
    pub fn with_tags(self, tags: &[&str]) -> Self {
        {
            let mut state = self.lock();
            for tag in tags {
                state.local_tags.insert(tag.to_string(), String::new());
            }
        }
        self
    }

    /// Add tags that only become visible locally after a fetch
    pub fn with_remote_tags(self, tags: &[&str]) -> Self {
        self.lock()
            .remote_tags
            .extend(tags.iter().map(|t| t.to_string()));
        self
    }

    /// Make every fetch fail with this message
    pub fn failing_fetch(mut self, message: impl Into<String>) -> Self {
        self.fetch_error = Some(message.into());
        self
    }

    /// Make every push fail with this message
    pub fn failing_push(mut self, message: impl Into<String>) -> Self {
        self.push_error = Some(message.into());
        self
    }

    /// Names of local tags, latest version first
    pub fn local_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.lock().local_tags.keys().cloned().collect();
        sort_tags_by_version(&mut tags);
        tags
    }

    /// Annotation message of a local tag
    pub fn tag_message(&self, name: &str) -> Option<String> {
        self.lock().local_tags.get(name).cloned()
    }

    /// `(remote, tag)` pairs pushed so far, in push order
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.lock().pushed_tags.clone()
    }

    /// Number of fetch attempts, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.lock().fetch_count
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Repository for MockRepository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let mut state = self.lock();
        state.fetch_count += 1;

        if let Some(message) = &self.fetch_error {
            return Err(GitBumpError::Git(git2::Error::from_str(&format!(
                "cannot fetch from '{}': {}",
                remote, message
            ))));
        }

        let fetched = std::mem::take(&mut state.remote_tags);
        for tag in fetched {
            state.local_tags.entry(tag).or_default();
        }
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.local_tags())
    }

    fn head_subject(&self) -> Result<Option<String>> {
        Ok(self.head_subject.clone())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut state = self.lock();
        if state.local_tags.contains_key(name) {
            return Err(GitBumpError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }

        state
            .local_tags
            .insert(name.to_string(), message.to_string());
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        if let Some(message) = &self.push_error {
            return Err(GitBumpError::Git(git2::Error::from_str(message)));
        }

        let mut state = self.lock();
        if !state.local_tags.contains_key(name) {
            return Err(GitBumpError::Git(git2::Error::from_str(&format!(
                "src refspec refs/tags/{} does not match any",
                name
            ))));
        }

        state
            .pushed_tags
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        match self.lock().local_tags.remove(name) {
            Some(_) => Ok(()),
            None => Err(GitBumpError::publish(format!("tag '{}' not found", name))),
        }
    }
}
