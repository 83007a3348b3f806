use crate::config::TaggerConfig;
use crate::error::{GitBumpError, Result};
use crate::git::sort_tags_by_version;
use git2::{Cred, CredentialType, RemoteCallbacks, Repository as Git2Repo, Signature};
use std::path::Path;
use tracing::debug;

/// Identity used when neither the config nor the repository provides one
const FALLBACK_TAGGER_NAME: &str = "git-bump";
const FALLBACK_TAGGER_EMAIL: &str = "git-bump@localhost";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    tagger: Option<TaggerConfig>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo, tagger: None })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo, tagger: None }
    }

    /// Record tags with this identity instead of the repository signature
    pub fn with_tagger(mut self, tagger: Option<TaggerConfig>) -> Self {
        self.tagger = tagger;
        self
    }

    fn tagger_signature(&self) -> Result<Signature<'static>> {
        if let Some(tagger) = &self.tagger {
            return Ok(Signature::now(&tagger.name, &tagger.email)?);
        }

        match self.repo.signature() {
            Ok(sig) => Ok(sig.to_owned()),
            Err(e) => {
                debug!(error = %e, "no repository signature configured, using fallback tagger");
                Ok(Signature::now(FALLBACK_TAGGER_NAME, FALLBACK_TAGGER_EMAIL)?)
            }
        }
    }
}

/// Credential callbacks for fetch and push.
///
/// Tries SSH keys from ~/.ssh/, then the SSH agent, then default credentials.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        remote.fetch(&["+refs/tags/*:refs/tags/*"], Some(&mut fetch_options), None)?;

        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        let mut tags: Vec<String> = tags.iter().flatten().map(|s| s.to_string()).collect();
        sort_tags_by_version(&mut tags);
        Ok(tags)
    }

    fn head_subject(&self) -> Result<Option<String>> {
        let commit = self.repo.head()?.peel_to_commit()?;

        Ok(commit.summary().map(|s| s.to_string()))
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = self.tagger_signature()?;

        self.repo
            .tag(name, head.as_object(), &tagger, message, false)?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;

        let mut callbacks = remote_callbacks();
        // Server-side rejections only surface through this callback
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote.push(&[refspec.as_str()], Some(&mut push_options))?;

        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo
            .tag_delete(name)
            .map_err(|e| GitBumpError::publish(format!("Cannot delete tag '{}': {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use tempfile::TempDir;

    fn repo_with_commit(subject: &str) -> (TempDir, Git2Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let sig = Signature::now("Test", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, subject, &tree, &[])
                .unwrap();
        }
        (dir, Git2Repository::from_git2(repo))
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Git2Repository::open(dir.path()).is_err());
    }

    #[test]
    fn test_head_subject_is_first_line() {
        let (_dir, repo) = repo_with_commit("[patch] fix parser\n\nlonger body");
        assert_eq!(
            repo.head_subject().unwrap(),
            Some("[patch] fix parser".to_string())
        );
    }

    #[test]
    fn test_create_list_delete_tags() {
        let (_dir, repo) = repo_with_commit("initial");
        let repo = repo.with_tagger(Some(TaggerConfig {
            name: "Bot".to_string(),
            email: "bot@example.com".to_string(),
        }));

        repo.create_annotated_tag("v0.9.0", "Release v0.9.0").unwrap();
        repo.create_annotated_tag("v0.10.0", "Release v0.10.0").unwrap();
        assert_eq!(repo.list_tags().unwrap(), vec!["v0.10.0", "v0.9.0"]);

        assert!(repo.create_annotated_tag("v0.10.0", "again").is_err());

        repo.delete_tag("v0.10.0").unwrap();
        assert_eq!(repo.list_tags().unwrap(), vec!["v0.9.0"]);
    }

    #[test]
    fn test_annotated_tag_records_message_and_tagger() {
        let (_dir, repo) = repo_with_commit("initial");
        let repo = repo.with_tagger(Some(TaggerConfig {
            name: "Bot".to_string(),
            email: "bot@example.com".to_string(),
        }));

        repo.create_annotated_tag("v1.0.0", "Release v1.0.0").unwrap();

        let reference = repo.repo.find_reference("refs/tags/v1.0.0").unwrap();
        let tag = reference.peel_to_tag().unwrap();
        assert_eq!(tag.message().map(str::trim_end), Some("Release v1.0.0"));
        assert_eq!(tag.tagger().unwrap().name(), Some("Bot"));
    }

    #[test]
    fn test_fetch_unknown_remote_fails() {
        let (_dir, repo) = repo_with_commit("initial");
        assert!(repo.fetch_tags("nowhere").is_err());
    }
}
