//! Catalog of procedural texture types.
//!
//! A [`TextureType`] pairs GLSL function sources with an ordered parameter schema. The
//! [`TextureCatalog`] is built once (usually via [`TextureCatalog::builtin`]) and then shared
//! read-only with [`crate::texture::TextureRegistry`]. Adding a texture type is a data entry:
//! construct a [`TextureType`] and [`TextureCatalog::insert`] it, or load entries from RON with
//! the `ron` feature.
pub mod builtin;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::uniform::{SemanticType, UniformValue};

/// Which GLSL variant of a texture type an instance calls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureVariant {
    /// Evaluated from the 3D surface position: `f( pos, nor, ... )`.
    Solid,
    /// Evaluated from 2D surface coordinates: `f( uv, nor, ... )`.
    Planar,
}

impl TextureVariant {
    /// Name of the GLSL argument the dispatch passes as the first parameter.
    pub fn coordinate_argument(self) -> &'static str {
        match self {
            TextureVariant::Solid => "pos",
            TextureVariant::Planar => "uv",
        }
    }
}

impl fmt::Display for TextureVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureVariant::Solid => f.write_str("solid (3D)"),
            TextureVariant::Planar => f.write_str("planar (2D)"),
        }
    }
}

/// One declared parameter of a texture type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSchema {
    /// Parameter name, unique within its texture type.
    pub name: String,
    /// GLSL type of the parameter.
    pub ty: SemanticType,
    /// Default components: one value (broadcast) or exactly `ty.component_count()` values.
    pub default: Vec<f32>,
}

impl ParameterSchema {
    /// Creates a parameter. `default` holds one float per component.
    pub fn new(name: impl Into<String>, ty: SemanticType, default: &[f32]) -> Self {
        Self {
            name: name.into(),
            ty,
            default: default.to_vec(),
        }
    }

    /// The default as a typed value. Falls back to zero for malformed defaults, which
    /// [`TextureType::validate`] rejects before they reach a catalog.
    pub fn default_value(&self) -> UniformValue {
        UniformValue::from_components(self.ty, &self.default)
            .unwrap_or_else(|| UniformValue::zero(self.ty))
    }
}

/// GLSL source for one variant of a texture type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSource {
    /// Name of the entry function defined by `glsl`.
    pub function: String,
    /// GLSL source defining `function`.
    pub glsl: String,
    /// Helper definitions `glsl` depends on. Emitted once per shader even when shared
    /// between several entries.
    #[cfg_attr(feature = "serde", serde(default))]
    pub helpers: Vec<String>,
}

impl TextureSource {
    /// Creates a source whose entry function `function` is defined in `glsl`.
    pub fn new(function: impl Into<String>, glsl: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            glsl: glsl.into(),
            helpers: Vec::new(),
        }
    }

    /// Adds a GLSL chunk emitted once before the entry function.
    pub fn with_helper(mut self, helper: impl Into<String>) -> Self {
        self.helpers.push(helper.into());
        self
    }
}

/// A catalog entry describing one procedural texture.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct TextureType {
    /// Unique type name used by [`crate::texture::TextureRegistry::instantiate`].
    pub name: String,
    /// 3D variant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub solid: Option<TextureSource>,
    /// 2D variant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub planar: Option<TextureSource>,
    /// Ordered parameters, matching the entry functions' arguments after the coordinate
    /// and normal prefix.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: Vec<ParameterSchema>,
}

impl TextureType {
    /// Creates a texture type without variants or parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            solid: None,
            planar: None,
            parameters: Vec::new(),
        }
    }

    /// Sets the 3D variant.
    pub fn with_solid(mut self, source: TextureSource) -> Self {
        self.solid = Some(source);
        self
    }

    /// Sets the 2D variant.
    pub fn with_planar(mut self, source: TextureSource) -> Self {
        self.planar = Some(source);
        self
    }

    /// Appends a parameter to the schema.
    pub fn with_parameter(mut self, name: &str, ty: SemanticType, default: &[f32]) -> Self {
        self.parameters.push(ParameterSchema::new(name, ty, default));
        self
    }

    /// The source for `variant`, if the type provides it.
    pub fn source(&self, variant: TextureVariant) -> Option<&TextureSource> {
        match variant {
            TextureVariant::Solid => self.solid.as_ref(),
            TextureVariant::Planar => self.planar.as_ref(),
        }
    }

    /// The variant used when the caller does not pick one: solid if present, else planar.
    pub fn default_variant(&self) -> Option<TextureVariant> {
        if self.solid.is_some() {
            Some(TextureVariant::Solid)
        } else if self.planar.is_some() {
            Some(TextureVariant::Planar)
        } else {
            None
        }
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSchema> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Checks the entry invariants: a non-empty name, at least one variant with a named
    /// entry function, unique parameter names and defaults matching their types.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Catalog("texture type name must not be empty".into()));
        }

        if self.solid.is_none() && self.planar.is_none() {
            return Err(Error::Catalog(format!(
                "texture type '{}' defines neither a solid nor a planar variant",
                self.name
            )));
        }

        for source in self.solid.iter().chain(self.planar.iter()) {
            if source.function.trim().is_empty() {
                return Err(Error::Catalog(format!(
                    "texture type '{}' has a variant without an entry function name",
                    self.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(Error::Catalog(format!(
                    "texture type '{}' declares parameter '{}' twice",
                    self.name, param.name
                )));
            }
            if UniformValue::from_components(param.ty, &param.default).is_none() {
                return Err(Error::Catalog(format!(
                    "parameter '{}.{}' of type {} has {} default components",
                    self.name,
                    param.name,
                    param.ty,
                    param.default.len()
                )));
            }
        }

        Ok(())
    }
}

/// Immutable lookup table of texture types keyed by name.
#[derive(Clone, Debug, Default)]
pub struct TextureCatalog {
    types: Vec<Arc<TextureType>>,
    index: HashMap<String, usize>,
}

impl TextureCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in texture types.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.extend_builtin();
        catalog
    }

    /// Inserts the built-in texture types that are not already present.
    pub fn extend_builtin(&mut self) {
        for ty in builtin::texture_types() {
            if self.contains(&ty.name) {
                continue;
            }
            if let Err(err) = self.insert(ty) {
                warn!("Skipping built-in texture type: {}", err);
            }
        }
    }

    /// Adds a new entry. Names are append-only: an existing name is rejected.
    pub fn insert(&mut self, ty: TextureType) -> Result<()> {
        ty.validate()?;
        if self.index.contains_key(&ty.name) {
            return Err(Error::Catalog(format!(
                "texture type '{}' is already defined",
                ty.name
            )));
        }
        self.index.insert(ty.name.clone(), self.types.len());
        self.types.push(Arc::new(ty));
        Ok(())
    }

    /// Builder form of [`TextureCatalog::insert`].
    pub fn with_type(mut self, ty: TextureType) -> Result<Self> {
        self.insert(ty)?;
        Ok(self)
    }

    /// Looks up a texture type by name.
    pub fn lookup(&self, name: &str) -> Option<&Arc<TextureType>> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// Returns `true` if a texture type named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of texture types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the catalog holds no texture types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Texture type names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    /// Texture types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TextureType>> {
        self.types.iter()
    }

    /// Parses a RON list of [`TextureType`]s and inserts each of them.
    ///
    /// Entries are validated individually; the first invalid entry aborts the load and
    /// leaves the entries before it inserted.
    #[cfg(feature = "ron")]
    pub fn extend_from_ron(&mut self, source: &str) -> Result<usize> {
        let types: Vec<TextureType> =
            ron::from_str(source).map_err(|e| Error::Catalog(e.to_string()))?;
        let count = types.len();
        for ty in types {
            self.insert(ty)?;
        }
        Ok(count)
    }
}
