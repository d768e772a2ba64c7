//! The owned template engine handed to every renderer.

use mixview_dom::{DomError, Element, HtmlDocument, write_document, write_element};
use mixview_template_core::{LoadedTemplate, TemplateError, TemplateLocator, TemplateReader};
use mixview_traits::ResourceProvider;
use std::sync::Arc;

/// Locates, reads and writes templates.
///
/// Built once by the rendering provider and borrowed by each render; it holds
/// no per-request state.
#[derive(Debug, Clone, Default)]
pub struct MixEngine {
    locator: TemplateLocator,
    reader: TemplateReader,
}

impl MixEngine {
    pub fn new(locator: TemplateLocator) -> Self {
        Self {
            locator,
            reader: TemplateReader::new(),
        }
    }

    /// An engine serving templates from a web root only.
    pub fn with_web_root(provider: Arc<dyn ResourceProvider>) -> Self {
        Self::new(TemplateLocator::new().with_web_root(provider))
    }

    pub fn locator(&self) -> &TemplateLocator {
        &self.locator
    }

    pub fn reader(&self) -> &TemplateReader {
        &self.reader
    }

    /// Locates and reads the template of a route.
    pub fn load(&self, route: &str) -> Result<LoadedTemplate, TemplateError> {
        let bytes = self.locator.locate(route)?;
        self.reader.read(&bytes, route)
    }

    /// Loads a template only for its fragments.
    pub fn load_parts(&self, path: &str) -> Result<HtmlDocument, TemplateError> {
        self.load(path).map(LoadedTemplate::into_document)
    }

    /// Writes the page and reverses the reader's patches.
    pub fn save_to_string(&self, loaded: &LoadedTemplate) -> Result<String, DomError> {
        let text = write_document(loaded.document())?;
        Ok(loaded.restore(&text))
    }

    pub fn element_to_string(&self, element: &Element) -> Result<String, DomError> {
        write_element(element)
    }
}
