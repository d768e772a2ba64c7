pub mod fixtures;

use mixview::{ActionRuntime, MixPage, MixRenderingProvider, MixviewError, RenderingBuilder, RenderingConfig, render_page};
use mixview_traits::RequestContext;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A web root on disk that lives as long as the value.
pub struct TestSite {
    pub dir: TempDir,
}

impl TestSite {
    /// Creates an empty web root with the standard layout template.
    pub fn new() -> std::io::Result<Self> {
        let site = Self { dir: TempDir::new()? };
        site.add_view("/common/layout.html", fixtures::LAYOUT)?;
        Ok(site)
    }

    /// Writes a template below the default view prefix.
    pub fn add_view(&self, route: &str, content: &str) -> std::io::Result<()> {
        self.add_file(&format!("WEB-INF/view{route}"), content)
    }

    pub fn add_file(&self, relative: &str, content: &str) -> std::io::Result<()> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn provider(&self, config: RenderingConfig) -> Result<MixRenderingProvider, MixviewError> {
        RenderingBuilder::new().with_web_root(self.root()).with_config(config).build()
    }
}

/// Renders a route of the site with the default configuration.
pub fn render_route<P: MixPage + 'static>(
    site: &TestSite,
    request: &dyn RequestContext,
    route: &str,
    page: P,
) -> Result<String, MixviewError> {
    let provider = site.provider(RenderingConfig::new())?;
    render_page(&provider, request, &ActionRuntime::new("MemberListAction", "index"), route, page)
}
