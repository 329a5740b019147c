use std::env;
use std::path::{Path, PathBuf};

/// Upstream project publishing the florida-server binaries
pub const UPSTREAM_REPO: &str = "Ylarod/Florida";

const DEFAULT_REPOSITORY: &str = "znmn/magiskhluda";
const DEFAULT_AUTHOR: &str = "The Community";
const API_BASE: &str = "https://api.github.com";
const DOWNLOAD_BASE: &str = "https://github.com";
const RECENT_RELEASES_PAGE_SIZE: usize = 10;

// ============================================================================
// Identity
// ============================================================================

/// Who is publishing the packaged module
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// `owner/name` slug of the repository that hosts the module releases
    pub repository: String,
    pub author: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

impl Identity {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, fallback: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        Self {
            repository: get("GITHUB_REPOSITORY", DEFAULT_REPOSITORY),
            author: get("GITHUB_ACTOR", DEFAULT_AUTHOR),
        }
    }
}

// ============================================================================
// Build Config
// ============================================================================

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub upstream: String,
    pub api_base: String,
    pub download_base: String,
    /// Root directory every output is written under
    pub work_dir: PathBuf,
    pub identity: Identity,
    /// Optional API token, only ever sent to `api_base`
    pub token: Option<String>,
    pub page_size: usize,
    pub log_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            upstream: UPSTREAM_REPO.to_string(),
            api_base: API_BASE.to_string(),
            download_base: DOWNLOAD_BASE.to_string(),
            work_dir: PathBuf::from("."),
            identity: Identity::default(),
            token: None,
            page_size: RECENT_RELEASES_PAGE_SIZE,
            log_dir: None,
        }
    }
}

impl BuildConfig {
    pub fn from_env() -> Self {
        Self {
            identity: Identity::from_env(),
            token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            log_dir: env::var_os("HLUDA_LOG_DIR").map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Same configuration rooted at another directory
    pub fn in_dir(mut self, work_dir: impl AsRef<Path>) -> Self {
        self.work_dir = work_dir.as_ref().to_path_buf();
        self
    }

    pub fn marker_path(&self) -> PathBuf {
        self.work_dir.join("currentTag.txt")
    }

    pub fn module_prop_path(&self) -> PathBuf {
        self.work_dir.join("module_template").join("module.prop")
    }

    pub fn update_json_path(&self) -> PathBuf {
        self.work_dir.join("update.json")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.work_dir.join("bin")
    }

    pub fn release_by_tag_url(&self, tag: &str) -> String {
        format!("{}/repos/{}/releases/tags/{}", self.api_base, self.upstream, tag)
    }

    pub fn recent_releases_url(&self) -> String {
        format!(
            "{}/repos/{}/releases?per_page={}",
            self.api_base, self.upstream, self.page_size
        )
    }

    pub fn server_download_url(&self, tag: &str, asset_name: &str) -> String {
        format!(
            "{}/{}/releases/download/{}/{}",
            self.download_base, self.upstream, tag, asset_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_defaults() {
        let identity = Identity::from_lookup(|_| None);
        assert_eq!(identity.repository, "znmn/magiskhluda");
        assert_eq!(identity.author, "The Community");
    }

    #[test]
    fn test_identity_empty_values_fall_back() {
        let identity = Identity::from_lookup(|key| match key {
            "GITHUB_REPOSITORY" => Some(String::new()),
            "GITHUB_ACTOR" => Some("octocat".to_string()),
            _ => None,
        });
        assert_eq!(identity.repository, "znmn/magiskhluda");
        assert_eq!(identity.author, "octocat");
    }

    #[test]
    fn test_urls() {
        let config = BuildConfig::default();
        assert_eq!(
            config.release_by_tag_url("16.5.9"),
            "https://api.github.com/repos/Ylarod/Florida/releases/tags/16.5.9"
        );
        assert_eq!(
            config.recent_releases_url(),
            "https://api.github.com/repos/Ylarod/Florida/releases?per_page=10"
        );
        assert_eq!(
            config.server_download_url("16.5.9", "florida-server-16.5.9-android-arm.gz"),
            "https://github.com/Ylarod/Florida/releases/download/16.5.9/florida-server-16.5.9-android-arm.gz"
        );
    }

    #[test]
    fn test_output_paths() {
        let config = BuildConfig::default().in_dir("/tmp/out");
        assert_eq!(config.marker_path(), PathBuf::from("/tmp/out/currentTag.txt"));
        assert_eq!(
            config.module_prop_path(),
            PathBuf::from("/tmp/out/module_template/module.prop")
        );
        assert_eq!(config.bin_dir(), PathBuf::from("/tmp/out/bin"));
    }
}
