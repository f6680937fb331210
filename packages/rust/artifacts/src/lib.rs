//! Portfolio package artifacts.
//!
//! This crate provides:
//! - [`ArtifactManifest`]: the fixed list of parts a download delivers
//! - [`generate`]: pure text generators for each file
//! - [`writer`]: atomic package writing with a checksum receipt

pub mod generate;
pub mod manifest;
pub mod writer;

pub use generate::{
    escape_html, generate_index_html, generate_readme, generate_script_js, generate_styles_css,
};
pub use manifest::{
    ASSETS_DIR, ArtifactManifest, ArtifactPart, INDEX_HTML, PartKind, README_MD, SCRIPT_JS,
    STYLES_CSS,
};
pub use writer::{
    FileMeta, PackageReceipt, RECEIPT_FILE, ReceiptInfo, validate_package, write_package,
};
