//! The fixed manifest of a downloadable portfolio package.

use serde::{Deserialize, Serialize};

/// Entry page file name.
pub const INDEX_HTML: &str = "index.html";
/// Stylesheet file name.
pub const STYLES_CSS: &str = "styles.css";
/// Script file name.
pub const SCRIPT_JS: &str = "script.js";
/// Asset folder name (with trailing slash, as listed to users).
pub const ASSETS_DIR: &str = "assets/";
/// Setup instructions file name.
pub const README_MD: &str = "README.md";

/// Whether a manifest part is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    File,
    Directory,
}

/// One named part of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPart {
    pub name: String,
    pub description: String,
    pub kind: PartKind,
}

impl ArtifactPart {
    fn file(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind: PartKind::File,
        }
    }
}

/// Ordered list of the parts a download delivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub parts: Vec<ArtifactPart>,
}

impl ArtifactManifest {
    /// The five-part package every download produces.
    pub fn package() -> Self {
        Self {
            parts: vec![
                ArtifactPart::file(INDEX_HTML, "Your portfolio page"),
                ArtifactPart::file(STYLES_CSS, "Custom styling"),
                ArtifactPart::file(SCRIPT_JS, "Interactive features"),
                ArtifactPart {
                    name: ASSETS_DIR.to_string(),
                    description: "Images and resources".to_string(),
                    kind: PartKind::Directory,
                },
                ArtifactPart::file(README_MD, "Setup instructions"),
            ],
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_manifest_is_fixed() {
        let manifest = ArtifactManifest::package();
        assert_eq!(manifest.len(), 5);
        assert_eq!(
            manifest.names(),
            vec!["index.html", "styles.css", "script.js", "assets/", "README.md"]
        );
        assert_eq!(manifest.parts[3].kind, PartKind::Directory);
    }
}
