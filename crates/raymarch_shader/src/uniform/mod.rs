//! Typed, dirty-tracked uniform variables.
//!
//! A [`Uniform`] pairs a GLSL name with a typed value and keeps track of whether the value
//! changed since it was last written to the GPU. Once bound to a compiled program it caches
//! its location so per-frame uploads are a lookup-free write.
pub mod program;
pub mod value;

use tracing::trace;

pub use program::{ShaderProgram, UniformLocation};
pub use value::{ParamInput, SemanticType, UniformValue};

use crate::error::{Error, Result};

/// A named, typed uniform variable with a dirty flag and a cached program location.
#[derive(Clone, Debug)]
pub struct Uniform {
    name: String,
    value: UniformValue,
    dirty: bool,
    location: Option<UniformLocation>,
}

impl Uniform {
    /// Creates a uniform holding `value`. New uniforms start dirty.
    pub fn new(name: impl Into<String>, value: UniformValue) -> Self {
        Self {
            name: name.into(),
            value,
            dirty: true,
            location: None,
        }
    }

    /// GLSL identifier of the uniform.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, uploaded or not.
    pub fn value(&self) -> UniformValue {
        self.value
    }

    /// Semantic type, fixed at creation.
    pub fn semantic_type(&self) -> SemanticType {
        self.value.semantic_type()
    }

    /// Location cached by the last [`Uniform::update_location`].
    pub fn location(&self) -> Option<UniformLocation> {
        self.location
    }

    /// Whether the value changed since the last upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces the next [`Uniform::upload`] to write the value.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the value, broadcasting scalars over vector types, and marks the uniform dirty.
    pub fn set(&mut self, input: impl Into<ParamInput>) -> Result<()> {
        let input = input.into();
        let ty = self.semantic_type();
        match input.resolve(ty) {
            Some(value) => {
                self.value = value;
                self.dirty = true;
                Ok(())
            }
            None => Err(Error::TypeMismatch {
                parameter: self.name.clone(),
                expected: ty,
                got: input.describe(),
            }),
        }
    }

    /// Fills every component with `value`.
    pub fn set_scalar(&mut self, value: f32) {
        self.value = UniformValue::broadcast(self.semantic_type(), value);
        self.dirty = true;
    }

    /// The expression that reads this uniform inside GLSL.
    pub fn emit(&self) -> &str {
        &self.name
    }

    /// The current value as a GLSL constant, for parameters that are inlined instead of declared.
    pub fn emit_literal(&self) -> String {
        self.value.to_glsl()
    }

    /// The `uniform` declaration line for this variable.
    pub fn emit_decl(&self) -> String {
        format!("uniform {} {};\n", self.semantic_type().glsl_name(), self.name)
    }

    /// Resolves and caches this uniform's location in `program`.
    ///
    /// Binding happens after every compile and a freshly compiled program holds no value for
    /// this uniform, so it is marked dirty even when the location number is unchanged.
    pub fn update_location(&mut self, program: &dyn ShaderProgram) {
        let location = program.uniform_location(&self.name);
        if location.is_none() {
            trace!("Uniform '{}' is not active in the program.", self.name);
        }
        self.location = location;
        self.dirty = true;
    }

    /// Writes the value to `program` if dirty and clears the flag.
    ///
    /// Returns `true` when a GPU write happened. A dirty uniform without a location is
    /// cleaned without writing.
    pub fn upload(&mut self, program: &mut dyn ShaderProgram) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        match self.location {
            Some(location) => {
                program.set_uniform(location, &self.value);
                true
            }
            None => false,
        }
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
        self.location = None;
        self.dirty = true;
    }
}

/// Builds a uniform of semantic type `ty` named `name` from a caller input.
///
/// Returns [`Error::TypeMismatch`] when a vector input does not match the arity of `ty`.
pub fn uniform_gen(
    ty: SemanticType,
    name: impl Into<String>,
    input: impl Into<ParamInput>,
) -> Result<Uniform> {
    let name = name.into();
    let input = input.into();
    match input.resolve(ty) {
        Some(value) => Ok(Uniform::new(name, value)),
        None => Err(Error::TypeMismatch {
            parameter: name,
            expected: ty,
            got: input.describe(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use glam::Vec3;

    use super::*;

    #[derive(Default)]
    struct MapProgram {
        locations: HashMap<String, i32>,
        writes: Vec<(UniformLocation, UniformValue)>,
    }

    impl ShaderProgram for MapProgram {
        fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
            self.locations.get(name).copied().map(UniformLocation)
        }

        fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue) {
            self.writes.push((location, *value));
        }
    }

    fn program_with(names: &[&str]) -> MapProgram {
        MapProgram {
            locations: names
                .iter()
                .enumerate()
                .map(|(i, n)| (n.to_string(), i as i32))
                .collect(),
            writes: Vec::new(),
        }
    }

    #[test]
    fn uniform_gen_dispatches_on_semantic_type() {
        let u = uniform_gen(SemanticType::Vec3, "color", 0.25).expect("scalar broadcast");
        assert_eq!(u.value(), UniformValue::Vec3(Vec3::splat(0.25)));
        assert!(u.is_dirty());

        let u = uniform_gen(SemanticType::Int, "mode", 2).expect("int");
        assert_eq!(u.value(), UniformValue::Int(2));

        let err = uniform_gen(SemanticType::Float, "size", [1.0, 2.0]).expect_err("arity");
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn set_marks_dirty_and_rejects_wrong_arity() {
        let mut u = Uniform::new("color", UniformValue::Vec3(Vec3::ZERO));
        let mut program = program_with(&["color"]);
        u.update_location(&program);
        u.upload(&mut program);
        assert!(!u.is_dirty());

        u.set(0.5).expect("broadcast");
        assert!(u.is_dirty());
        assert_eq!(u.value(), UniformValue::Vec3(Vec3::splat(0.5)));

        let err = u.set([1.0, 2.0]).expect_err("vec2 into vec3");
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: SemanticType::Vec3,
                got: "vec2",
                ..
            }
        ));
    }

    #[test]
    fn set_scalar_broadcasts() {
        let mut u = Uniform::new("offset", UniformValue::Vec2(glam::Vec2::ZERO));
        u.set_scalar(3.0);
        assert_eq!(u.value(), UniformValue::Vec2(glam::Vec2::splat(3.0)));
        assert!(u.is_dirty());
    }

    #[test]
    fn upload_writes_only_when_dirty() {
        let mut u = Uniform::new("size", UniformValue::Float(8.0));
        let mut program = program_with(&["size"]);
        u.update_location(&program);

        assert!(u.upload(&mut program));
        assert!(!u.upload(&mut program));
        assert_eq!(program.writes.len(), 1);
        assert_eq!(program.writes[0], (UniformLocation(0), UniformValue::Float(8.0)));
    }

    #[test]
    fn upload_without_location_cleans_without_writing() {
        let mut u = Uniform::new("unused", UniformValue::Float(1.0));
        let mut program = program_with(&[]);
        u.update_location(&program);

        assert!(!u.upload(&mut program));
        assert!(!u.is_dirty());
        assert!(program.writes.is_empty());
    }

    #[test]
    fn relocating_to_a_new_program_marks_dirty() {
        let mut u = Uniform::new("b", UniformValue::Float(1.0));
        let mut first = program_with(&["a", "b"]);
        u.update_location(&first);
        u.upload(&mut first);
        assert!(!u.is_dirty());

        let second = program_with(&["b"]);
        u.update_location(&second);
        assert_eq!(u.location(), Some(UniformLocation(0)));
        assert!(u.is_dirty());
    }

    #[test]
    fn rebinding_to_a_same_layout_program_marks_dirty() {
        let mut u = Uniform::new("a", UniformValue::Float(1.0));
        let mut first = program_with(&["a"]);
        u.update_location(&first);
        u.upload(&mut first);

        let mut second = program_with(&["a"]);
        u.update_location(&second);
        assert_eq!(u.location(), Some(UniformLocation(0)));
        assert!(u.is_dirty());
        assert!(u.upload(&mut second));
        assert_eq!(second.writes, vec![(UniformLocation(0), UniformValue::Float(1.0))]);
    }

    #[test]
    fn declarations_and_literals() {
        let u = Uniform::new("tex0_color1", UniformValue::Vec3(Vec3::ONE));
        assert_eq!(u.emit(), "tex0_color1");
        assert_eq!(u.emit_decl(), "uniform vec3 tex0_color1;\n");
        assert_eq!(u.emit_literal(), "vec3(1.0, 1.0, 1.0)");
    }
}
