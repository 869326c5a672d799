//! Frontend and theme asset discovery.
//!
//! The scaffold ships frontends as directories of templates and scripts; the
//! serving layer asks this module which frontends are installed and which
//! script assets a frontend wants loaded. Pure directory listing, filtered by
//! extension and the DHTML-history feature flag; no rendering here.

use anyhow::{Context, Result};
use camino::Utf8Path;

/// Relative asset path for a frontend file, stable regardless of
/// per-controller frontend overrides.
pub fn asset_path(frontend: &str, filename: &str) -> String {
    format!("scaffold/{frontend}/{filename}")
}

/// Installed frontends: the subdirectory names under `frontends_dir`,
/// skipping dotfiles. Sorted for stable output.
pub fn available_frontends(frontends_dir: &Utf8Path) -> Result<Vec<String>> {
    let mut frontends = Vec::new();
    let entries = frontends_dir
        .read_dir_utf8()
        .with_context(|| format!("Failed to list frontends directory: {}", frontends_dir))?;

    for entry in entries {
        let entry = entry.with_context(|| {
            format!("Failed to read frontends directory entry in {}", frontends_dir)
        })?;
        let file_type = entry.file_type().with_context(|| {
            format!("Failed to stat frontends directory entry in {}", frontends_dir)
        })?;
        let name = entry.file_name();
        if !file_type.is_dir() || name.starts_with('.') {
            continue;
        }
        frontends.push(name.to_string());
    }

    frontends.sort();
    tracing::debug!(
        "Discovered {} frontends in {}",
        frontends.len(),
        frontends_dir
    );
    Ok(frontends)
}

/// Script assets a frontend wants loaded: `.js` files in `javascript_dir`,
/// with DHTML-history scripts filtered out when the feature is disabled.
pub fn javascript_assets(javascript_dir: &Utf8Path, dhtml_history: bool) -> Result<Vec<String>> {
    let mut scripts = Vec::new();
    let entries = javascript_dir
        .read_dir_utf8()
        .with_context(|| format!("Failed to list javascript directory: {}", javascript_dir))?;

    for entry in entries {
        let entry = entry.with_context(|| {
            format!("Failed to read javascript directory entry in {}", javascript_dir)
        })?;
        let name = entry.file_name();
        if !name.ends_with(".js") {
            continue;
        }
        if !dhtml_history && name.contains("dhtml_history") {
            continue;
        }
        scripts.push(name.to_string());
    }

    scripts.sort();
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(asset_path("default", "list.js"), "scaffold/default/list.js");
    }

    #[test]
    fn test_available_frontends_skips_dotfiles() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(&temp_dir);
        fs::create_dir(root.join("default")).unwrap();
        fs::create_dir(root.join("compact")).unwrap();
        fs::create_dir(root.join(".git")).unwrap();

        let frontends = available_frontends(&root).unwrap();
        assert_eq!(frontends, vec!["compact", "default"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = utf8(&temp_dir).join("nope");
        assert!(available_frontends(&missing).is_err());
    }

    #[test]
    fn test_javascript_assets_filters_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(&temp_dir);
        fs::write(root.join("scaffold.js"), "").unwrap();
        fs::write(root.join("readme.txt"), "").unwrap();
        fs::write(root.join("dhtml_history.js"), "").unwrap();

        let scripts = javascript_assets(&root, true).unwrap();
        assert_eq!(scripts, vec!["dhtml_history.js", "scaffold.js"]);
    }

    #[test]
    fn test_javascript_assets_respects_dhtml_flag() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8(&temp_dir);
        fs::write(root.join("scaffold.js"), "").unwrap();
        fs::write(root.join("dhtml_history.js"), "").unwrap();

        let scripts = javascript_assets(&root, false).unwrap();
        assert_eq!(scripts, vec!["scaffold.js"]);
    }
}
