//! Module for reading models and media
pub mod json;
pub mod media;

use thiserror::Error;

use crate::metabolic_model::compound::CompoundBuilderError;
use crate::metabolic_model::medium::Medium;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::ReactionBuilderError;

/// Produces a [`Model`] from some source (a path, or raw document text)
pub trait ModelLoader {
    fn load(&self, source: &str) -> Result<Model, IoError>;
}

/// Produces a [`Medium`] from some source (a path, or raw document text)
pub trait MediumLoader {
    fn load_medium(&self, source: &str) -> Result<Medium, IoError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IoError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse input due to {0}")]
    Parse(String),
    #[error("Invalid medium entry on line {line}: {reason}")]
    InvalidMedium { line: usize, reason: String },
    #[error("Unable to build reaction: {0}")]
    UnableToBuildReaction(String),
    #[error("Unable to build compound: {0}")]
    UnableToBuildCompound(String),
}

impl From<ReactionBuilderError> for IoError {
    fn from(err: ReactionBuilderError) -> Self {
        IoError::UnableToBuildReaction(err.to_string())
    }
}

impl From<CompoundBuilderError> for IoError {
    fn from(err: CompoundBuilderError) -> Self {
        IoError::UnableToBuildCompound(err.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(err: serde_json::Error) -> Self {
        IoError::Parse(err.to_string())
    }
}
