//! One packaging run: pick the tag, render the descriptors, fetch the servers.

use crate::config::BuildConfig;
use crate::error::Result;
use crate::fetcher::{ArtifactFetcher, FetchedArtifact};
use crate::http::HttpClient;
use crate::logging::log_info;
use crate::metadata::write_metadata;
use crate::selector::{ReleaseSelector, Selection};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub selection: Selection,
    pub artifacts: Vec<FetchedArtifact>,
}

/// Any error aborts the run; files written before it stay on disk.
pub fn run<C: HttpClient>(
    client: &C,
    config: &BuildConfig,
    preferred_version: Option<&str>,
) -> Result<RunSummary> {
    let selection = ReleaseSelector::new(client, config).select_tag(preferred_version)?;
    log_info(&format!("Packaging florida-server {}", selection.tag));

    write_metadata(&selection.tag, config)?;

    let artifacts = ArtifactFetcher::new(client, config).fetch_all(&selection.tag)?;
    log_info(&format!(
        "Done: {} server binaries for {}",
        artifacts.len(),
        selection.tag
    ));

    Ok(RunSummary {
        selection,
        artifacts,
    })
}
