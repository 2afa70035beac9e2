//! Semantic types, stored uniform values and caller-side parameter inputs.
use std::fmt;

use glam::{Vec2, Vec3, Vec4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::glsl::{float_literal, int_literal, vec_literal};

/// The GLSL type of a uniform variable.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl SemanticType {
    /// GLSL spelling of this type.
    pub fn glsl_name(self) -> &'static str {
        match self {
            SemanticType::Int => "int",
            SemanticType::Float => "float",
            SemanticType::Vec2 => "vec2",
            SemanticType::Vec3 => "vec3",
            SemanticType::Vec4 => "vec4",
        }
    }

    /// Number of scalar components.
    pub fn component_count(self) -> usize {
        match self {
            SemanticType::Int | SemanticType::Float => 1,
            SemanticType::Vec2 => 2,
            SemanticType::Vec3 => 3,
            SemanticType::Vec4 => 4,
        }
    }

    /// Parses the GLSL spelling produced by [`SemanticType::glsl_name`].
    pub fn from_glsl_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(SemanticType::Int),
            "float" => Some(SemanticType::Float),
            "vec2" => Some(SemanticType::Vec2),
            "vec3" => Some(SemanticType::Vec3),
            "vec4" => Some(SemanticType::Vec4),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

/// A typed value held by a [`crate::uniform::Uniform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
}

impl UniformValue {
    /// Zero value of the given type.
    pub fn zero(ty: SemanticType) -> Self {
        Self::broadcast(ty, 0.0)
    }

    /// Fills every component of `ty` with `value`.
    pub fn broadcast(ty: SemanticType, value: f32) -> Self {
        match ty {
            SemanticType::Int => UniformValue::Int(value as i32),
            SemanticType::Float => UniformValue::Float(value),
            SemanticType::Vec2 => UniformValue::Vec2(Vec2::splat(value)),
            SemanticType::Vec3 => UniformValue::Vec3(Vec3::splat(value)),
            SemanticType::Vec4 => UniformValue::Vec4(Vec4::splat(value)),
        }
    }

    /// Builds a value of type `ty` from a component slice.
    ///
    /// A single component is broadcast; otherwise the slice length must equal the
    /// component count of `ty`.
    pub fn from_components(ty: SemanticType, components: &[f32]) -> Option<Self> {
        match components {
            [v] => Some(Self::broadcast(ty, *v)),
            _ if components.len() != ty.component_count() => None,
            [x, y] => Some(UniformValue::Vec2(Vec2::new(*x, *y))),
            [x, y, z] => Some(UniformValue::Vec3(Vec3::new(*x, *y, *z))),
            [x, y, z, w] => Some(UniformValue::Vec4(Vec4::new(*x, *y, *z, *w))),
            _ => None,
        }
    }

    /// The semantic type of this value.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            UniformValue::Int(_) => SemanticType::Int,
            UniformValue::Float(_) => SemanticType::Float,
            UniformValue::Vec2(_) => SemanticType::Vec2,
            UniformValue::Vec3(_) => SemanticType::Vec3,
            UniformValue::Vec4(_) => SemanticType::Vec4,
        }
    }

    /// Emits this value as a GLSL constant expression.
    pub fn to_glsl(&self) -> String {
        match self {
            UniformValue::Int(v) => int_literal(*v),
            UniformValue::Float(v) => float_literal(*v),
            UniformValue::Vec2(v) => vec_literal(&v.to_array()),
            UniformValue::Vec3(v) => vec_literal(&v.to_array()),
            UniformValue::Vec4(v) => vec_literal(&v.to_array()),
        }
    }
}

/// A value supplied by the caller for a texture parameter.
///
/// Scalars are broadcast to every component of vector parameters; vectors must match
/// the parameter's arity exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamInput {
    Scalar(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
}

impl ParamInput {
    /// Resolves this input against a parameter type, returning `None` on arity mismatch.
    pub fn resolve(self, ty: SemanticType) -> Option<UniformValue> {
        match (self, ty) {
            (ParamInput::Int(v), SemanticType::Int) => Some(UniformValue::Int(v)),
            (ParamInput::Int(v), _) => Some(UniformValue::broadcast(ty, v as f32)),
            (ParamInput::Scalar(v), _) => Some(UniformValue::broadcast(ty, v)),
            (ParamInput::Vec2(v), SemanticType::Vec2) => Some(UniformValue::Vec2(v)),
            (ParamInput::Vec3(v), SemanticType::Vec3) => Some(UniformValue::Vec3(v)),
            (ParamInput::Vec4(v), SemanticType::Vec4) => Some(UniformValue::Vec4(v)),
            _ => None,
        }
    }

    /// Short description used in type mismatch errors.
    pub fn describe(&self) -> &'static str {
        match self {
            ParamInput::Scalar(_) => "float",
            ParamInput::Int(_) => "int",
            ParamInput::Vec2(_) => "vec2",
            ParamInput::Vec3(_) => "vec3",
            ParamInput::Vec4(_) => "vec4",
        }
    }
}

impl From<f32> for ParamInput {
    fn from(value: f32) -> Self {
        ParamInput::Scalar(value)
    }
}

impl From<f64> for ParamInput {
    fn from(value: f64) -> Self {
        ParamInput::Scalar(value as f32)
    }
}

impl From<i32> for ParamInput {
    fn from(value: i32) -> Self {
        ParamInput::Int(value)
    }
}

impl From<Vec2> for ParamInput {
    fn from(value: Vec2) -> Self {
        ParamInput::Vec2(value)
    }
}

impl From<Vec3> for ParamInput {
    fn from(value: Vec3) -> Self {
        ParamInput::Vec3(value)
    }
}

impl From<Vec4> for ParamInput {
    fn from(value: Vec4) -> Self {
        ParamInput::Vec4(value)
    }
}

impl From<[f32; 2]> for ParamInput {
    fn from(value: [f32; 2]) -> Self {
        ParamInput::Vec2(Vec2::from_array(value))
    }
}

impl From<[f32; 3]> for ParamInput {
    fn from(value: [f32; 3]) -> Self {
        ParamInput::Vec3(Vec3::from_array(value))
    }
}

impl From<[f32; 4]> for ParamInput {
    fn from(value: [f32; 4]) -> Self {
        ParamInput::Vec4(Vec4::from_array(value))
    }
}

impl From<mint::Vector2<f32>> for ParamInput {
    fn from(value: mint::Vector2<f32>) -> Self {
        ParamInput::Vec2(value.into())
    }
}

impl From<mint::Vector3<f32>> for ParamInput {
    fn from(value: mint::Vector3<f32>) -> Self {
        ParamInput::Vec3(value.into())
    }
}

impl From<mint::Vector4<f32>> for ParamInput {
    fn from(value: mint::Vector4<f32>) -> Self {
        ParamInput::Vec4(value.into())
    }
}

impl From<UniformValue> for ParamInput {
    fn from(value: UniformValue) -> Self {
        match value {
            UniformValue::Int(v) => ParamInput::Int(v),
            UniformValue::Float(v) => ParamInput::Scalar(v),
            UniformValue::Vec2(v) => ParamInput::Vec2(v),
            UniformValue::Vec3(v) => ParamInput::Vec3(v),
            UniformValue::Vec4(v) => ParamInput::Vec4(v),
        }
    }
}
