//! Defines the error taxonomy for one render.
//!
//! Every failure is fatal for the current request. Variants carry the action,
//! template path or element identifier that identifies what to fix.

use mixview_dom::{DomError, QueryError, TagKind};
use mixview_template_core::TemplateError;
use mixview_traits::{ClassificationError, MessageError, ResourceError, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Not found the template HTML file.\n  Action: {action}\n  Template: {route}\n  Web Path: {web_path}")]
    TemplateNotFound {
        action: String,
        route: String,
        web_path: String,
    },

    #[error("Failed to parse the template HTML.\n  Action: {action}\n  Template: {path}\n  Cause: {source}")]
    TemplateParseFailure {
        action: String,
        path: String,
        #[source]
        source: TemplateError,
    },

    #[error(
        "Not implemented the mix view interface.\n  Advice: the view of a template route must implement MixView \
         and expose it through ViewProducer::as_mix_view()\n  Action: {action}\n  Your View: {view}"
    )]
    ViewContractViolation { action: String, view: String },

    #[error("Failed to make the HTML dynamic.\n  Action: {action}\n  Template: {route}\n  View: {view}\n  Cause: {source}")]
    DynamicRenderFailure {
        action: String,
        route: String,
        view: String,
        #[source]
        source: Box<RenderError>,
    },

    #[error("Failed to get the element by id '{id}': {reason}")]
    GetByIdFailure { id: String, reason: String },

    #[error("Not found the element by id '{id}'")]
    GetByIdNotFound { id: String },

    #[error("Failed to replace the element by id '{id}': {reason}")]
    ReplaceByIdFailure { id: String, reason: String },

    #[error("Not found the element to replace by id '{id}'")]
    ReplaceByIdNotFound { id: String },

    #[error("Not found the <{kind}> element named '{name}'")]
    ElementByNameNotFound { kind: TagKind, name: String },

    #[error("Found {count} <{kind}> elements named '{name}', the name should be unique")]
    ElementByNameFailure {
        kind: TagKind,
        name: String,
        count: usize,
    },

    #[error("Not found the prototype row <tr> in the table body '{id}'")]
    TableRowNotFound { id: String },

    #[error("Not found the classification '{name}': {reason}")]
    ClassificationNotFound { name: String, reason: String },

    #[error("Failed to resolve a message: {0}")]
    MessageNotFound(#[from] MessageError),

    #[error("Failed to load a resource: {0}")]
    Resource(#[from] ResourceError),

    #[error("Failed to serialize the HTML: {0}")]
    Serialize(#[source] DomError),

    #[error("Failed to write the response: {0}")]
    Response(#[from] ResponseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("View error: {0}")]
    View(String),
}

impl RenderError {
    /// A failure raised by application view code.
    pub fn view(message: impl Into<String>) -> Self {
        RenderError::View(message.into())
    }

    /// Lookup and replacement failures keep their own identity when they
    /// escape a view.
    pub fn is_tree_error(&self) -> bool {
        matches!(
            self,
            RenderError::GetByIdFailure { .. }
                | RenderError::GetByIdNotFound { .. }
                | RenderError::ReplaceByIdFailure { .. }
                | RenderError::ReplaceByIdNotFound { .. }
        )
    }

    pub(crate) fn from_template(action: &str, err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound { route, web_path } => RenderError::TemplateNotFound {
                action: action.to_string(),
                route,
                web_path,
            },
            TemplateError::Resource(e) => RenderError::Resource(e),
            other => {
                let path = match &other {
                    TemplateError::MissingDoctype { path, .. }
                    | TemplateError::MissingHtmlTag { path, .. }
                    | TemplateError::Encoding { path, .. }
                    | TemplateError::Parse { path, .. } => path.clone(),
                    _ => String::new(),
                };
                RenderError::TemplateParseFailure {
                    action: action.to_string(),
                    path,
                    source: other,
                }
            }
        }
    }

    pub(crate) fn from_find(err: QueryError) -> Self {
        match err {
            QueryError::NotFound { id } => RenderError::GetByIdNotFound { id },
            QueryError::Duplicate { ref id, .. } | QueryError::KindMismatch { ref id, .. } => {
                RenderError::GetByIdFailure {
                    id: id.clone(),
                    reason: err.to_string(),
                }
            }
        }
    }

    pub(crate) fn from_replace(err: QueryError) -> Self {
        match err {
            QueryError::NotFound { id } => RenderError::ReplaceByIdNotFound { id },
            QueryError::Duplicate { ref id, .. } | QueryError::KindMismatch { ref id, .. } => {
                RenderError::ReplaceByIdFailure {
                    id: id.clone(),
                    reason: err.to_string(),
                }
            }
        }
    }

    pub(crate) fn from_classification(err: ClassificationError) -> Self {
        match err {
            ClassificationError::NotFound(name) => RenderError::ClassificationNotFound {
                reason: format!("no classification is defined by the name '{name}'"),
                name,
            },
        }
    }
}
