// src/builder.rs
use crate::error::MixviewError;
use mixview_core::{
    ActionRuntime, BufferedResponse, MixPage, MixRenderingProvider, NextJourney, RenderingConfig, RequestContext,
};
use mixview_resource::FilesystemResourceProvider;
use mixview_traits::{ClassificationProvider, ResourceProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for a `MixRenderingProvider` serving templates from directories.
#[derive(Default)]
pub struct RenderingBuilder {
    web_root: Option<PathBuf>,
    packaged: Option<PathBuf>,
    config: RenderingConfig,
    classifications: Option<Arc<dyn ClassificationProvider>>,
}

impl RenderingBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// The web root, searched first. Routes are looked up below the view prefix.
    pub fn with_web_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.web_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Packaged resources, searched when the web root has no such template.
    pub fn with_packaged<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.packaged = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_config(mut self, config: RenderingConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads the configuration from a JSON file. Missing keys keep their defaults.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, MixviewError> {
        self.config = RenderingConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_version_query(mut self, enabled: bool) -> Self {
        self.config.version_query = enabled;
        self
    }

    pub fn with_classification_provider(mut self, provider: Arc<dyn ClassificationProvider>) -> Self {
        self.classifications = Some(provider);
        self
    }

    pub fn build(self) -> Result<MixRenderingProvider, MixviewError> {
        if self.web_root.is_none() && self.packaged.is_none() {
            return Err(MixviewError::Config(
                "No template directory has been configured. Use `with_web_root` or `with_packaged`.".to_string(),
            ));
        }
        let web_root = self.web_root.map(|dir| directory_provider(&dir)).transpose()?;
        let packaged = self.packaged.map(|dir| directory_provider(&dir)).transpose()?;
        let provider = MixRenderingProvider::new(web_root, packaged, self.config);
        Ok(match self.classifications {
            Some(classifications) => provider.with_classification_provider(classifications),
            None => provider,
        })
    }
}

fn directory_provider(dir: &Path) -> Result<Arc<dyn ResourceProvider>, MixviewError> {
    if !dir.is_dir() {
        return Err(MixviewError::Config(format!(
            "Template directory '{}' does not exist",
            dir.display()
        )));
    }
    Ok(Arc::new(FilesystemResourceProvider::new(dir)))
}

/// Renders `route` through the provider's typical view around `page` and
/// returns the page text.
pub fn render_page<P: MixPage + 'static>(
    provider: &MixRenderingProvider,
    request: &dyn RequestContext,
    runtime: &ActionRuntime,
    route: &str,
    page: P,
) -> Result<String, MixviewError> {
    let journey = NextJourney::new(route).with_view(provider.typical_view(page));
    let renderer = provider
        .provide_renderer(&journey)
        .ok_or_else(|| MixviewError::NoRenderer(route.to_string()))?;
    let mut response = BufferedResponse::new();
    renderer.render(request, &mut response, runtime, &journey)?;
    Ok(response.body().unwrap_or_default().to_string())
}
