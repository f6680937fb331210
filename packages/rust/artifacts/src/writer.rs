//! Writes a package directory to disk.
//!
//! Layout:
//! ```text
//! <package_dir>/
//! ├── index.html
//! ├── styles.css
//! ├── script.js
//! ├── assets/
//! ├── README.md
//! └── package.json     (receipt: checksums, run id, template)
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use portfoliobuilder_shared::{PortfolioBuilderError, Result, RunId};

use crate::manifest::{ArtifactManifest, PartKind};

/// Receipt file written next to the package contents.
pub const RECEIPT_FILE: &str = "package.json";

/// Checksum metadata for one written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub filename: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// Identifying details recorded in the receipt.
#[derive(Debug, Clone)]
pub struct ReceiptInfo {
    pub run_id: RunId,
    pub tool_version: String,
    pub template: String,
    pub color_scheme: String,
}

/// The `package.json` structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageReceipt {
    pub run_id: RunId,
    pub tool_version: String,
    pub template: String,
    pub color_scheme: String,
    pub created_at: DateTime<Utc>,
    pub files: Vec<FileMeta>,
}

/// Write `files` (`(filename, content)` pairs) plus the manifest's folders
/// into `package_dir`, then record checksums in `package.json`.
///
/// Each file is written to a dot-prefixed temp name and renamed into place,
/// so a reader never observes a half-written file.
#[instrument(skip_all, fields(dir = %package_dir.display(), files = files.len()))]
pub fn write_package(
    package_dir: &Path,
    manifest: &ArtifactManifest,
    files: &[(&str, &str)],
    info: &ReceiptInfo,
) -> Result<PackageReceipt> {
    std::fs::create_dir_all(package_dir)
        .map_err(|e| PortfolioBuilderError::io(package_dir, e))?;

    for part in &manifest.parts {
        if part.kind == PartKind::Directory {
            let dir = package_dir.join(part.name.trim_end_matches('/'));
            std::fs::create_dir_all(&dir).map_err(|e| PortfolioBuilderError::io(&dir, e))?;
        }
    }

    let mut metas = Vec::with_capacity(files.len());
    for (filename, content) in files {
        write_atomic(package_dir, filename, content)?;
        metas.push(FileMeta {
            filename: (*filename).to_string(),
            sha256: sha256_hex(content),
            size_bytes: content.len(),
        });
        debug!(file = %filename, size = content.len(), "wrote package file");
    }

    let receipt = PackageReceipt {
        run_id: info.run_id,
        tool_version: info.tool_version.clone(),
        template: info.template.clone(),
        color_scheme: info.color_scheme.clone(),
        created_at: Utc::now(),
        files: metas,
    };

    let json = serde_json::to_string_pretty(&receipt).map_err(|e| {
        PortfolioBuilderError::validation(format!("JSON serialization failed: {e}"))
    })?;
    write_atomic(package_dir, RECEIPT_FILE, &json)?;

    info!(count = receipt.files.len(), "package written");
    Ok(receipt)
}

/// Verify that a package directory matches its receipt and manifest.
pub fn validate_package(package_dir: &Path, manifest: &ArtifactManifest) -> Result<PackageReceipt> {
    let receipt_path = package_dir.join(RECEIPT_FILE);
    let content = std::fs::read_to_string(&receipt_path)
        .map_err(|e| PortfolioBuilderError::io(&receipt_path, e))?;
    let receipt: PackageReceipt = serde_json::from_str(&content).map_err(|e| {
        PortfolioBuilderError::validation(format!("invalid {RECEIPT_FILE}: {e}"))
    })?;

    for part in &manifest.parts {
        let path = package_dir.join(part.name.trim_end_matches('/'));
        let present = match part.kind {
            PartKind::File => path.is_file(),
            PartKind::Directory => path.is_dir(),
        };
        if !present {
            return Err(PortfolioBuilderError::validation(format!(
                "missing package part {}",
                part.name
            )));
        }
    }

    for meta in &receipt.files {
        let path = package_dir.join(&meta.filename);
        let body =
            std::fs::read_to_string(&path).map_err(|e| PortfolioBuilderError::io(&path, e))?;
        if sha256_hex(&body) != meta.sha256 {
            return Err(PortfolioBuilderError::validation(format!(
                "checksum mismatch for {}",
                meta.filename
            )));
        }
    }

    Ok(receipt)
}

fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<()> {
    let target = dir.join(filename);
    let temp = dir.join(format!(".{filename}.tmp"));
    std::fs::write(&temp, content).map_err(|e| PortfolioBuilderError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| PortfolioBuilderError::io(&target, e))?;
    Ok(())
}

fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pb-package-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn info() -> ReceiptInfo {
        ReceiptInfo {
            run_id: RunId::new(),
            tool_version: "0.1.0-test".into(),
            template: "minimal-pro".into(),
            color_scheme: "Classic".into(),
        }
    }

    fn files() -> Vec<(&'static str, &'static str)> {
        vec![
            ("index.html", "<h1>Ada</h1>"),
            ("styles.css", "body {}"),
            ("script.js", "// js"),
            ("README.md", "# Ada"),
        ]
    }

    #[test]
    fn write_package_creates_all_parts() {
        let tmp = temp_dir();
        let manifest = ArtifactManifest::package();
        let receipt = write_package(&tmp, &manifest, &files(), &info()).unwrap();

        assert_eq!(receipt.files.len(), 4);
        assert_eq!(receipt.files[0].sha256.len(), 64);
        assert!(tmp.join("assets").is_dir());
        assert!(tmp.join(RECEIPT_FILE).is_file());
        assert_eq!(
            std::fs::read_to_string(tmp.join("index.html")).unwrap(),
            "<h1>Ada</h1>"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn write_package_leaves_no_temp_files() {
        let tmp = temp_dir();
        write_package(&tmp, &ArtifactManifest::package(), &files(), &info()).unwrap();

        for entry in std::fs::read_dir(&tmp).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn validate_package_roundtrip() {
        let tmp = temp_dir();
        let manifest = ArtifactManifest::package();
        let written = write_package(&tmp, &manifest, &files(), &info()).unwrap();
        let read = validate_package(&tmp, &manifest).unwrap();
        assert_eq!(read.run_id, written.run_id);
        assert_eq!(read.files, written.files);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn validate_package_detects_tampering() {
        let tmp = temp_dir();
        let manifest = ArtifactManifest::package();
        write_package(&tmp, &manifest, &files(), &info()).unwrap();
        std::fs::write(tmp.join("styles.css"), "body { color: red }").unwrap();

        let err = validate_package(&tmp, &manifest).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch for styles.css"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn validate_package_missing_part() {
        let tmp = temp_dir();
        let manifest = ArtifactManifest::package();
        write_package(&tmp, &manifest, &files(), &info()).unwrap();
        std::fs::remove_file(tmp.join("README.md")).unwrap();

        let err = validate_package(&tmp, &manifest).unwrap_err();
        assert!(err.to_string().contains("README.md"));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
