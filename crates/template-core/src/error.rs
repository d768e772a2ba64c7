use mixview_dom::DomError;
use mixview_traits::ResourceError;
use thiserror::Error;

/// Errors that can occur while locating or reading a template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Not found the template HTML file '{route}' (web path '{web_path}')")]
    NotFound { route: String, web_path: String },

    #[error(
        "Template '{path}' should have the DOCTYPE definition in its first line.\n\
         Advice: write the DOCTYPE alone on the first line, e.g.\n\
         \x20 (o) <!DOCTYPE html>\n\
         \x20     <html>\n\
         \x20 (x) <!DOCTYPE html><html><head>\n\
         First line: {line}"
    )]
    MissingDoctype { path: String, line: String },

    #[error(
        "Template '{path}' should have the HTML tag in its second line.\n\
         Advice: write the opening tag alone on the second line, e.g.\n\
         \x20 (o) <html>\n\
         \x20 (x) <!-- comment --> before <html>\n\
         \x20 (x) <html><head>\n\
         Second line: {line}"
    )]
    MissingHtmlTag { path: String, line: String },

    #[error("Template '{path}' is not valid UTF-8: {message}")]
    Encoding { path: String, message: String },

    #[error("Failed to parse the template '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: DomError,
    },

    #[error("Failed to load template resource: {0}")]
    Resource(#[from] ResourceError),
}

impl TemplateError {
    /// True for every failure caused by the template text itself.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            TemplateError::MissingDoctype { .. }
                | TemplateError::MissingHtmlTag { .. }
                | TemplateError::Encoding { .. }
                | TemplateError::Parse { .. }
        )
    }
}
