//! Named classifications (ordered code/alias enumerations).

use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("Not found the classification: {0}")]
    NotFound(String),
}

/// One entry of a classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub code: String,
    pub alias: String,
}

impl Classification {
    pub fn new(code: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            alias: alias.into(),
        }
    }
}

/// Provides classifications by name, entries in their defined order.
pub trait ClassificationProvider: Send + Sync {
    fn provide(&self, name: &str) -> Result<Vec<Classification>, ClassificationError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryClassificationProvider {
    classifications: HashMap<String, Vec<Classification>>,
}

impl InMemoryClassificationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, entries: Vec<Classification>) -> Self {
        self.classifications.insert(name.into(), entries);
        self
    }
}

impl ClassificationProvider for InMemoryClassificationProvider {
    fn provide(&self, name: &str) -> Result<Vec<Classification>, ClassificationError> {
        self.classifications
            .get(name)
            .cloned()
            .ok_or_else(|| ClassificationError::NotFound(name.to_string()))
    }
}
