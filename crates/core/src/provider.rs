//! Entry point for the framework's view dispatch.

use crate::config::RenderingConfig;
use crate::engine::MixEngine;
use crate::renderer::MixHtmlRenderer;
use crate::typical::{MixPage, TypicalMixView};
use crate::view::NextJourney;
use mixview_template_core::TemplateLocator;
use mixview_traits::{ClassificationProvider, ResourceProvider};
use std::sync::Arc;

const JSP_SUFFIX: &str = ".jsp";

/// Owns the engine and configuration for the life of the application and
/// hands out a renderer per journey.
pub struct MixRenderingProvider {
    engine: MixEngine,
    config: RenderingConfig,
    classifications: Option<Arc<dyn ClassificationProvider>>,
}

impl MixRenderingProvider {
    pub fn new(
        web_root: Option<Arc<dyn ResourceProvider>>,
        packaged: Option<Arc<dyn ResourceProvider>>,
        config: RenderingConfig,
    ) -> Self {
        let mut locator = TemplateLocator::new().with_view_prefix(config.view_prefix.clone());
        if let Some(provider) = web_root {
            locator = locator.with_web_root(provider);
        }
        if let Some(provider) = packaged {
            locator = locator.with_packaged(provider);
        }
        log::info!(
            "Mix rendering ready: view prefix '{}', layout '{}'",
            config.view_prefix,
            config.layout_path
        );
        Self {
            engine: MixEngine::new(locator),
            config,
            classifications: None,
        }
    }

    pub fn with_classification_provider(mut self, provider: Arc<dyn ClassificationProvider>) -> Self {
        self.classifications = Some(provider);
        self
    }

    /// A renderer for the journey, or `None` when the route belongs to
    /// another view technology (`.jsp`).
    pub fn provide_renderer(&self, journey: &NextJourney) -> Option<MixHtmlRenderer<'_>> {
        if journey.routing_path().ends_with(JSP_SUFFIX) {
            log::debug!("Leaving {} to the default renderer", journey.routing_path());
            return None;
        }
        let renderer = MixHtmlRenderer::new(&self.engine);
        Some(match self.classifications.as_deref() {
            Some(provider) => renderer.with_classifications(provider),
            None => renderer,
        })
    }

    /// Forward path of the error page.
    pub fn show_errors_path(&self) -> &str {
        &self.config.show_errors_path
    }

    /// Wraps a page in the standard resolver passes configured here.
    pub fn typical_view<P: MixPage>(&self, page: P) -> TypicalMixView<P> {
        TypicalMixView::from_config(page, &self.config)
    }

    pub fn engine(&self) -> &MixEngine {
        &self.engine
    }

    pub fn config(&self) -> &RenderingConfig {
        &self.config
    }
}
