//! Release selection
//!
//! Picks the upstream tag to package: a pinned version when it exists and
//! ships server binaries, otherwise the newest recent release that does.

use std::fs;

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::github::{decode_release, decode_release_list};
use crate::http::HttpClient;
use crate::logging::{log_info, log_skip, log_warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// The requested version was used as-is
    Preferred,
    /// Found by scanning the recent release list
    AutoPicked,
}

/// Outcome of a successful selection
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub tag: String,
    pub origin: SelectionOrigin,
    /// Tags passed over during auto-pick, newest first
    pub skipped: Vec<String>,
}

pub struct ReleaseSelector<'a, C: HttpClient> {
    client: &'a C,
    config: &'a BuildConfig,
}

impl<'a, C: HttpClient> ReleaseSelector<'a, C> {
    pub fn new(client: &'a C, config: &'a BuildConfig) -> Self {
        Self { client, config }
    }

    /// Select the tag to package and record it in the marker file.
    pub fn select_tag(&self, preferred_version: Option<&str>) -> Result<Selection> {
        let preferred = preferred_version.filter(|v| !v.trim().is_empty());

        let selection = match preferred.and_then(|v| self.try_preferred(v)) {
            Some(selection) => selection,
            None => self.auto_pick()?,
        };

        let marker = self.config.marker_path();
        fs::write(&marker, &selection.tag).map_err(|e| Error::io(&marker, e))?;

        Ok(selection)
    }

    /// Phase 1. `None` means fall back to auto-pick.
    fn try_preferred(&self, version: &str) -> Option<Selection> {
        log_info(&format!("Preferred version specified: {}", version));

        let url = self.config.release_by_tag_url(version);
        let response = match self.client.get(&url) {
            Ok(response) => response,
            Err(e) => {
                log_warning(&format!(
                    "Version {} could not be queried ({}), falling back to auto-pick",
                    version, e
                ));
                return None;
            }
        };

        if !response.is_success() {
            log_warning(&format!(
                "Version {} not found (HTTP {}), falling back to auto-pick",
                version, response.status
            ));
            return None;
        }

        match decode_release(&response.body) {
            Ok(release) if release.has_server_assets() => {
                log_info(&format!(
                    "Preferred version {} found with server assets!",
                    version
                ));
                Some(Selection {
                    tag: version.to_string(),
                    origin: SelectionOrigin::Preferred,
                    skipped: Vec::new(),
                })
            }
            Ok(_) => {
                log_warning(&format!(
                    "Version {} exists but has no server assets, falling back to auto-pick",
                    version
                ));
                None
            }
            Err(e) => {
                log_warning(&format!(
                    "Version {} returned an unreadable release ({}), falling back to auto-pick",
                    version, e
                ));
                None
            }
        }
    }

    /// Phase 2: first qualifying release among the most recent ones.
    fn auto_pick(&self) -> Result<Selection> {
        log_info("Auto-picking latest version with server assets...");

        let url = self.config.recent_releases_url();
        let response = self
            .client
            .get(&url)
            .map_err(|e| Error::api(format!("fetching releases failed: {}", e)))?;

        if !response.is_success() {
            return Err(Error::api(format!(
                "HTTP error fetching releases: {} {}",
                response.status,
                response.body_text()
            )));
        }

        let releases = decode_release_list(&response.body)?;
        let scanned = releases.len();
        let mut skipped = Vec::new();

        for entry in releases {
            let release = match entry {
                Ok(release) => release,
                Err(reason) => {
                    log_skip(&format!("Skipping malformed release entry ({})", reason));
                    continue;
                }
            };

            if release.has_server_assets() {
                log_info(&format!(
                    "Found release with server assets: {}",
                    release.tag_name
                ));
                return Ok(Selection {
                    tag: release.tag_name,
                    origin: SelectionOrigin::AutoPicked,
                    skipped,
                });
            }

            log_skip(&format!(
                "Skipping release {} (no server assets)",
                release.tag_name
            ));
            skipped.push(release.tag_name);
        }

        Err(Error::NotFound {
            repo: self.config.upstream.clone(),
            scanned,
        })
    }
}
