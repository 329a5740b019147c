//! Downloads the florida-server binary for every packaged architecture

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::arch::Arch;
use crate::config::BuildConfig;
use crate::error::{DownloadFailure, Error, Result};
use crate::http::HttpClient;
use crate::logging::{log_download, log_error};

/// A server binary written to disk
#[derive(Debug, Clone)]
pub struct FetchedArtifact {
    pub arch: Arch,
    pub path: PathBuf,
    pub bytes: usize,
    pub elapsed: Duration,
}

pub struct ArtifactFetcher<'a, C: HttpClient> {
    client: &'a C,
    config: &'a BuildConfig,
}

impl<'a, C: HttpClient> ArtifactFetcher<'a, C> {
    pub fn new(client: &'a C, config: &'a BuildConfig) -> Self {
        Self { client, config }
    }

    /// Download every architecture in order, stopping at the first failure.
    pub fn fetch_all(&self, tag: &str) -> Result<Vec<FetchedArtifact>> {
        let bin_dir = self.config.bin_dir();
        fs::create_dir_all(&bin_dir).map_err(|e| Error::io(&bin_dir, e))?;

        Arch::ALL
            .iter()
            .map(|&arch| {
                self.fetch(tag, arch).inspect_err(|e| log_error(&e.to_string()))
            })
            .collect()
    }

    /// Download one architecture. Nothing is written unless the server
    /// answered with a success status.
    pub fn fetch(&self, tag: &str, arch: Arch) -> Result<FetchedArtifact> {
        let start = Instant::now();
        log_download(&format!("Starting download of florida for arch: {}", arch));

        let url = self.config.server_download_url(tag, &arch.asset_name(tag));
        let response = self.client.get(&url).map_err(|e| Error::Download {
            arch,
            cause: DownloadFailure::Transport(e.to_string()),
        })?;

        if !response.is_success() {
            return Err(Error::Download {
                arch,
                cause: DownloadFailure::Status {
                    status: response.status,
                    body: response.body_text(),
                },
            });
        }

        let path = self.config.bin_dir().join(arch.output_file_name());
        fs::write(&path, &response.body).map_err(|e| Error::io(&path, e))?;

        let elapsed = start.elapsed();
        log_download(&format!(
            "Successfully downloaded florida for arch: {} ({} bytes). Took {:.3}s",
            arch,
            response.body.len(),
            elapsed.as_secs_f64()
        ));

        Ok(FetchedArtifact {
            arch,
            path,
            bytes: response.body.len(),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockClient;

    const TAG: &str = "16.5.9";

    fn url(arch: &str) -> String {
        format!(
            "https://github.com/Ylarod/Florida/releases/download/{0}/florida-server-{0}-android-{1}.gz",
            TAG, arch
        )
    }

    fn setup() -> (tempfile::TempDir, BuildConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default().in_dir(dir.path());
        (dir, config)
    }

    #[test]
    fn test_fetch_all_writes_every_arch() {
        let (_dir, config) = setup();
        let client = MockClient::new()
            .respond(&url("arm"), 200, vec![0x1f, 0x8b, 0x00])
            .respond(&url("arm64"), 200, vec![0x1f, 0x8b, 0x01])
            .respond(&url("x86"), 200, vec![0x1f, 0x8b, 0x02])
            .respond(&url("x86_64"), 200, vec![0x1f, 0x8b, 0xff, 0x00]);

        let fetched = ArtifactFetcher::new(&client, &config).fetch_all(TAG).unwrap();

        assert_eq!(fetched.len(), 4);
        let bin = config.bin_dir();
        assert_eq!(fs::read(bin.join("florida-arm.gz")).unwrap(), vec![0x1f, 0x8b, 0x00]);
        assert_eq!(fs::read(bin.join("florida-arm64.gz")).unwrap(), vec![0x1f, 0x8b, 0x01]);
        assert_eq!(fs::read(bin.join("florida-x86.gz")).unwrap(), vec![0x1f, 0x8b, 0x02]);
        assert_eq!(
            fs::read(bin.join("florida-x64.gz")).unwrap(),
            vec![0x1f, 0x8b, 0xff, 0x00]
        );
        assert!(!bin.join("florida-x86_64.gz").exists());
        assert_eq!(fetched[3].bytes, 4);
    }

    #[test]
    fn test_failure_stops_remaining_downloads() {
        let (_dir, config) = setup();
        let client = MockClient::new()
            .respond(&url("arm"), 200, b"arm".to_vec())
            .respond(&url("arm64"), 404, b"Not Found".to_vec())
            .respond(&url("x86"), 200, b"x86".to_vec())
            .respond(&url("x86_64"), 200, b"x64".to_vec());

        let err = ArtifactFetcher::new(&client, &config).fetch_all(TAG).unwrap_err();

        match err {
            Error::Download {
                arch: Arch::Arm64,
                cause: DownloadFailure::Status { status, body },
            } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Not Found");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let bin = config.bin_dir();
        assert!(bin.join("florida-arm.gz").exists());
        assert!(!bin.join("florida-arm64.gz").exists());
        assert!(!bin.join("florida-x86.gz").exists());
        assert_eq!(client.calls_to(&url("x86")), 0);
        assert_eq!(client.calls_to(&url("x86_64")), 0);
    }

    #[test]
    fn test_transport_failure() {
        let (_dir, config) = setup();
        let client = MockClient::new().fail(&url("arm"), "connection refused");

        let err = ArtifactFetcher::new(&client, &config).fetch_all(TAG).unwrap_err();

        assert!(matches!(
            err,
            Error::Download { arch: Arch::Arm, cause: DownloadFailure::Transport(_) }
        ));
        assert_eq!(err.to_string(), "error downloading arm: transport error: connection refused");
        assert_eq!(client.calls.borrow().len(), 1);
    }

    #[test]
    fn test_single_arch_output_path() {
        let (_dir, config) = setup();
        fs::create_dir_all(config.bin_dir()).unwrap();
        let client = MockClient::new().respond(&url("x86_64"), 200, b"payload".to_vec());

        let artifact = ArtifactFetcher::new(&client, &config)
            .fetch(TAG, Arch::X86_64)
            .unwrap();

        assert_eq!(artifact.path, config.bin_dir().join("florida-x64.gz"));
        assert_eq!(fs::read(&artifact.path).unwrap(), b"payload");
    }
}
