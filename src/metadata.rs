//! Module descriptor (`module.prop`) and update feed (`update.json`)

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::{BuildConfig, Identity};
use crate::error::{Error, Result};
use crate::logging::{log_info, log_warning};

const MODULE_ID: &str = "magisk-hluda";
const MODULE_NAME: &str = "Frida(Florida) Server on Boot";
const MODULE_DESCRIPTION: &str = "Runs a stealthier frida-server on boot";
const UPSTREAM_AUTHORS: &str = "Ylarod - Exo1i";
const CHANGELOG_URL: &str = "https://gist.githubusercontent.com/znmn/d18d6bcbb4a8a0dbfe24e243c19b4195/raw/077a548931b8101c31722bc52b1a34b4bbf206c0/gistfile1.txt";

/// Display version: the tag up to its first `-`
pub fn display_version(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Version code: the tag with every `.` removed.
///
/// Suffixes survive verbatim, so `17.2.0-android` gives `1720-android`.
pub fn version_code(tag: &str) -> String {
    tag.replace('.', "")
}

pub fn render_module_prop(tag: &str, identity: &Identity) -> String {
    [
        format!("id={}", MODULE_ID),
        format!("name={}", MODULE_NAME),
        format!("version={}", display_version(tag)),
        format!("versionCode={}", version_code(tag)),
        format!("author={} - {}", identity.author, UPSTREAM_AUTHORS),
        format!("description={}", MODULE_DESCRIPTION),
        format!(
            "updateJson=https://github.com/{}/releases/latest/download/update.json",
            identity.repository
        ),
    ]
    .join("\n")
}

// ============================================================================
// update.json
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum VersionCode {
    Numeric(u64),
    /// Tags with a non-numeric suffix keep it; the manager will not be able
    /// to compare these
    Text(String),
}

impl VersionCode {
    pub fn from_tag(tag: &str) -> Self {
        let code = version_code(tag);
        match code.parse::<u64>() {
            Ok(n) if code.bytes().all(|b| b.is_ascii_digit()) => VersionCode::Numeric(n),
            _ => VersionCode::Text(code),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManifest {
    pub version: String,
    pub version_code: VersionCode,
    pub zip_url: String,
    pub changelog: String,
}

impl UpdateManifest {
    pub fn new(tag: &str, identity: &Identity) -> Self {
        Self {
            version: tag.to_string(),
            version_code: VersionCode::from_tag(tag),
            zip_url: format!(
                "https://github.com/{0}/releases/download/{1}/Magisk-Florida-Universal-{1}.zip",
                identity.repository, tag
            ),
            changelog: CHANGELOG_URL.to_string(),
        }
    }
}

pub fn render_update_json(tag: &str, identity: &Identity) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(&UpdateManifest::new(tag, identity))?;
    Ok(json + "\n")
}

// ============================================================================
// Writers
// ============================================================================

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// Render and write both descriptors for `tag`
pub fn write_metadata(tag: &str, config: &BuildConfig) -> Result<()> {
    if let VersionCode::Text(code) = VersionCode::from_tag(tag) {
        log_warning(&format!(
            "Tag {} yields non-numeric versionCode '{}'",
            tag, code
        ));
    }

    let module_prop = config.module_prop_path();
    write_text(&module_prop, &render_module_prop(tag, &config.identity))?;
    log_info(&format!("Wrote {}", module_prop.display()));

    let update_json = config.update_json_path();
    let rendered = render_update_json(tag, &config.identity)
        .map_err(|e| Error::io(&update_json, e.into()))?;
    write_text(&update_json, &rendered)?;
    log_info(&format!("Wrote {}", update_json.display()));

    Ok(())
}
