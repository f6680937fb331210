//! Package delivery: renders a document and writes it under the output root.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use portfoliobuilder_artifacts::{
    ArtifactManifest, INDEX_HTML, README_MD, ReceiptInfo, SCRIPT_JS, STYLES_CSS,
    generate_index_html, generate_readme, generate_script_js, generate_styles_css, write_package,
};
use portfoliobuilder_shared::{
    Catalogs, ColorScheme, Document, PortfolioBuilderError, Result, RunId, Template,
};

use crate::pipeline::Delivery;
use crate::preview;

/// Writes `<output_root>/<slug>-portfolio/` for each successful download.
#[derive(Debug, Clone)]
pub struct PackageDelivery {
    output_root: PathBuf,
    template: Template,
    scheme: ColorScheme,
    tool_version: String,
}

impl PackageDelivery {
    /// Resolve the template and color scheme up front so a bad id fails
    /// before any run starts.
    pub fn new(
        catalogs: &Catalogs,
        output_root: impl Into<PathBuf>,
        template_id: &str,
        scheme_name: &str,
        tool_version: impl Into<String>,
    ) -> Result<Self> {
        let template = catalogs.template(template_id)?.clone();
        let scheme = template
            .scheme(scheme_name)
            .cloned()
            .ok_or_else(|| PortfolioBuilderError::unknown("color scheme", scheme_name))?;
        Ok(Self {
            output_root: output_root.into(),
            template,
            scheme,
            tool_version: tool_version.into(),
        })
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Directory a package for `document` lands in.
    pub fn package_dir(&self, document: &Document) -> PathBuf {
        self.output_root
            .join(format!("{}-portfolio", slugify(document.full_name())))
    }
}

impl Delivery for PackageDelivery {
    #[instrument(skip_all, fields(%run_id))]
    fn deliver(
        &self,
        run_id: RunId,
        document: &Document,
        manifest: &ArtifactManifest,
    ) -> Result<Option<PathBuf>> {
        let view = preview::project(document);
        let index = generate_index_html(&view, &self.template, &self.tool_version);
        let styles = generate_styles_css(&self.template, &self.scheme);
        let script = generate_script_js();
        let readme = generate_readme(&view.identity.name, &self.template, &self.tool_version);

        let files = [
            (INDEX_HTML, index.as_str()),
            (STYLES_CSS, styles.as_str()),
            (SCRIPT_JS, script.as_str()),
            (README_MD, readme.as_str()),
        ];
        let info = ReceiptInfo {
            run_id,
            tool_version: self.tool_version.clone(),
            template: self.template.id.to_string(),
            color_scheme: self.scheme.name.to_string(),
        };

        let dir = self.package_dir(document);
        write_package(&dir, manifest, &files, &info)?;
        info!(dir = %dir.display(), "portfolio package delivered");
        Ok(Some(dir))
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes; `my` when empty.
pub fn slugify(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() { "my".to_string() } else { slug }
}
