//! Texture instances: a catalog entry plus one typed uniform per parameter.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::catalog::{ParameterSchema, TextureSource, TextureType, TextureVariant};
use crate::error::{Error, Result};
use crate::uniform::{ParamInput, Uniform, UniformValue};

/// Parameters with this name are inlined as constants instead of being declared as uniforms.
pub const MATERIAL_PARAMETER: &str = "material";

/// Dense, zero-based position of a registered instance. Also its dispatch case label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub usize);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-instance parameter values that replace schema defaults.
#[derive(Clone, Debug, Default)]
pub struct TextureOverrides {
    values: HashMap<String, ParamInput>,
}

impl TextureOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override and returns `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamInput>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamInput>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<ParamInput> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

/// A live texture: one entry of the catalog with its own uniform per parameter.
///
/// Instances are created by [`crate::texture::TextureRegistry::instantiate`] and receive
/// their [`TextureId`] when registered. Two instances of the same type share nothing but
/// their GLSL source.
#[derive(Clone, Debug)]
pub struct TextureInstance {
    id: Option<TextureId>,
    kind: Arc<TextureType>,
    variant: TextureVariant,
    /// One uniform per schema parameter, in schema order.
    uniforms: Vec<Uniform>,
}

impl TextureInstance {
    /// Materializes `kind`, seeding each parameter from `overrides` when present and
    /// well-typed, else from its schema default.
    pub fn new(kind: Arc<TextureType>, overrides: &TextureOverrides) -> Result<Self> {
        let variant = kind
            .default_variant()
            .ok_or_else(|| Error::MissingVariant {
                texture: kind.name.clone(),
                variant: TextureVariant::Solid,
            })?;

        for name in overrides.names() {
            if kind.parameter(name).is_none() {
                warn!(
                    "Ignoring override '{}' for texture '{}': no such parameter.",
                    name, kind.name
                );
            }
        }

        let uniforms = kind
            .parameters
            .iter()
            .map(|param| Uniform::new(unbound_name(&kind.name, param), seed(&kind, param, overrides)))
            .collect();

        Ok(Self {
            id: None,
            kind,
            variant,
            uniforms,
        })
    }

    /// The id assigned at registration, `None` before.
    pub fn id(&self) -> Option<TextureId> {
        self.id
    }

    pub fn texture_type(&self) -> &Arc<TextureType> {
        &self.kind
    }

    pub fn type_name(&self) -> &str {
        &self.kind.name
    }

    pub fn variant(&self) -> TextureVariant {
        self.variant
    }

    /// Switches the GLSL variant this instance dispatches to.
    pub fn set_variant(&mut self, variant: TextureVariant) -> Result<()> {
        if self.kind.source(variant).is_none() {
            return Err(Error::MissingVariant {
                texture: self.kind.name.clone(),
                variant,
            });
        }
        self.variant = variant;
        Ok(())
    }

    /// Builder form of [`TextureInstance::set_variant`].
    pub fn with_variant(mut self, variant: TextureVariant) -> Result<Self> {
        self.set_variant(variant)?;
        Ok(self)
    }

    /// GLSL source of the selected variant.
    pub fn source(&self) -> &TextureSource {
        match self.kind.source(self.variant) {
            Some(source) => source,
            // `variant` is only ever set to a variant the type defines.
            None => unreachable!("texture '{}' lost its {} source", self.kind.name, self.variant),
        }
    }

    /// Name of the GLSL entry function this instance calls.
    pub fn entry_function(&self) -> &str {
        &self.source().function
    }

    /// Current value of a parameter.
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.uniform(name).map(Uniform::value)
    }

    /// The uniform backing a parameter.
    pub fn uniform(&self, name: &str) -> Option<&Uniform> {
        self.position(name).map(|i| &self.uniforms[i])
    }

    /// Sets a parameter. A scalar is broadcast over vector parameters; vectors must match
    /// the parameter's arity. Marks the parameter dirty.
    pub fn set(&mut self, name: &str, value: impl Into<ParamInput>) -> Result<()> {
        let Some(i) = self.position(name) else {
            return Err(Error::UnknownParameter {
                texture: self.kind.name.clone(),
                parameter: name.to_string(),
            });
        };
        self.uniforms[i].set(value).map_err(|err| match err {
            Error::TypeMismatch { expected, got, .. } => Error::TypeMismatch {
                parameter: name.to_string(),
                expected,
                got,
            },
            other => other,
        })
    }

    /// Schema entries paired with their uniforms, in schema order.
    pub fn parameters(&self) -> impl Iterator<Item = (&ParameterSchema, &Uniform)> {
        self.kind.parameters.iter().zip(self.uniforms.iter())
    }

    /// Marks every parameter dirty.
    pub fn mark_dirty(&mut self) {
        for uniform in &mut self.uniforms {
            uniform.mark_dirty();
        }
    }

    /// Whether any uniform-backed parameter awaits upload.
    pub fn is_dirty(&self) -> bool {
        self.parameters()
            .any(|(param, uniform)| is_uniform_backed(param) && uniform.is_dirty())
    }

    /// The dispatch call for this instance, e.g. `checkers( pos, nor, tex0_size, ... )`.
    pub fn emit_call(&self) -> String {
        let mut args = vec![
            self.variant.coordinate_argument().to_string(),
            "nor".to_string(),
        ];
        for (param, uniform) in self.parameters() {
            if is_uniform_backed(param) {
                args.push(uniform.emit().to_string());
            } else {
                args.push(uniform.emit_literal());
            }
        }
        format!("{}( {} )", self.entry_function(), args.join(", "))
    }

    /// Uniforms that are declared, bound and uploaded.
    pub(crate) fn uniforms_mut(&mut self) -> impl Iterator<Item = &mut Uniform> {
        self.kind
            .parameters
            .iter()
            .zip(self.uniforms.iter_mut())
            .filter(|(param, _)| is_uniform_backed(param))
            .map(|(_, uniform)| uniform)
    }

    pub(crate) fn declared_uniforms(&self) -> impl Iterator<Item = &Uniform> {
        self.parameters()
            .filter(|(param, _)| is_uniform_backed(param))
            .map(|(_, uniform)| uniform)
    }

    /// Assigns the registration id, renames the uniforms after it and marks them dirty.
    pub(crate) fn assign_id(&mut self, id: TextureId) {
        self.id = Some(id);
        for (param, uniform) in self.kind.parameters.iter().zip(self.uniforms.iter_mut()) {
            uniform.rename(format!("tex{}_{}", id.0, param.name));
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.kind.parameters.iter().position(|p| p.name == name)
    }
}

fn is_uniform_backed(param: &ParameterSchema) -> bool {
    param.name != MATERIAL_PARAMETER
}

fn unbound_name(type_name: &str, param: &ParameterSchema) -> String {
    format!("{}_{}", type_name, param.name)
}

fn seed(kind: &TextureType, param: &ParameterSchema, overrides: &TextureOverrides) -> UniformValue {
    let Some(input) = overrides.get(&param.name) else {
        return param.default_value();
    };
    match input.resolve(param.ty) {
        Some(value) => value,
        None => {
            warn!(
                "Override for '{}.{}' is a {} but the parameter is {}; using the default.",
                kind.name,
                param.name,
                input.describe(),
                param.ty
            );
            param.default_value()
        }
    }
}
