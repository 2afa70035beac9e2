//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid request configuration, catalog lookups and entries, parameter access on texture
//! instances, and generic errors.
use thiserror::Error;

use crate::catalog::TextureVariant;
use crate::uniform::SemanticType;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("the texture type '{name}' does not exist")]
    UnknownTextureType { name: String },

    #[error("texture '{texture}' has no parameter '{parameter}'")]
    UnknownParameter { texture: String, parameter: String },

    #[error("parameter '{parameter}' expects {expected} but got {got}")]
    TypeMismatch {
        parameter: String,
        expected: SemanticType,
        got: &'static str,
    },

    #[error("texture '{texture}' has no {variant} variant")]
    MissingVariant {
        texture: String,
        variant: TextureVariant,
    },

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn type_mismatch_names_both_sides() {
        let err = Error::TypeMismatch {
            parameter: "color".into(),
            expected: SemanticType::Vec3,
            got: "vec2",
        };
        assert_eq!(
            err.to_string(),
            "parameter 'color' expects vec3 but got vec2"
        );
    }

    #[test]
    fn unknown_texture_type_message_matches_diagnostic() {
        let err = Error::UnknownTextureType {
            name: "marble".into(),
        };
        assert_eq!(err.to_string(), "the texture type 'marble' does not exist");
    }
}
