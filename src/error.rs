use mixview_core::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixviewError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration is invalid or incomplete: {0}")]
    Config(String),

    #[error("No mix renderer handles the route '{0}'")]
    NoRenderer(String),
}
