use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::texture::TextureRegistry;

/// GLSL fragments and ray-march constants for one assembled fragment shader.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderRequest {
    /// Declarations spliced after the fixed uniforms.
    pub variables: String,
    /// SDF functions, emitted after `length8` and before `scene` is declared.
    pub geometries: String,
    /// Statements run at the top of `scene` before its return.
    pub preface: String,
    /// The `vec2` expression `scene` returns.
    pub scene: String,
    /// Must define `vec3 lighting( vec3 pos, vec3 nor, vec3 ro, vec3 rd, float materialId )`.
    pub lighting: String,
    /// Statements run in `main` right before the output is written.
    pub postprocessing: String,
    /// Maximum ray-march iterations.
    pub steps: u32,
    /// Hit threshold.
    pub min_distance: f32,
    /// Miss distance.
    pub max_distance: f32,
    /// Emits `const vec3 bg` when set. Otherwise `variables` must declare `bg`.
    pub background: Option<[f32; 3]>,
}

impl Default for ShaderRequest {
    fn default() -> Self {
        Self {
            variables: String::new(),
            geometries: String::new(),
            preface: String::new(),
            scene: String::new(),
            lighting: String::new(),
            postprocessing: String::new(),
            steps: 90,
            min_distance: 0.001,
            max_distance: 20.0,
            background: None,
        }
    }
}

impl ShaderRequest {
    /// Creates a request whose `scene` returns `scene`.
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            ..Default::default()
        }
    }

    pub fn with_variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = variables.into();
        self
    }

    pub fn with_geometries(mut self, geometries: impl Into<String>) -> Self {
        self.geometries = geometries.into();
        self
    }

    pub fn with_preface(mut self, preface: impl Into<String>) -> Self {
        self.preface = preface.into();
        self
    }

    pub fn with_lighting(mut self, lighting: impl Into<String>) -> Self {
        self.lighting = lighting.into();
        self
    }

    pub fn with_postprocessing(mut self, postprocessing: impl Into<String>) -> Self {
        self.postprocessing = postprocessing.into();
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Sets the colour of pixels whose ray misses.
    pub fn with_background(mut self, background: Vec3) -> Self {
        self.background = Some(background.to_array());
        self
    }

    /// Appends the registry's declarations to `variables` and its texture bodies and
    /// `getTexture` dispatch to `geometries`.
    pub fn with_textures(mut self, registry: &TextureRegistry) -> Self {
        append_block(&mut self.variables, &registry.emit_declarations());
        append_block(&mut self.geometries, &registry.emit_dispatch().to_glsl());
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.scene.trim().is_empty() {
            return Err(Error::InvalidConfig("scene expression must not be empty".into()));
        }
        if self.steps == 0 {
            return Err(Error::InvalidConfig("steps must be > 0".into()));
        }
        if self.steps > i32::MAX as u32 {
            return Err(Error::InvalidConfig("steps must fit in a GLSL int".into()));
        }
        if !self.min_distance.is_finite() || !self.max_distance.is_finite() {
            return Err(Error::InvalidConfig(
                "min_distance and max_distance must be finite".into(),
            ));
        }
        if self.min_distance <= 0.0 {
            return Err(Error::InvalidConfig("min_distance must be > 0".into()));
        }
        if self.max_distance <= self.min_distance {
            return Err(Error::InvalidConfig(
                "max_distance must be greater than min_distance".into(),
            ));
        }
        if let Some(bg) = self.background {
            if bg.iter().any(|c| !c.is_finite()) {
                return Err(Error::InvalidConfig("background must be finite".into()));
            }
        }

        Ok(())
    }
}

fn append_block(target: &mut String, block: &str) {
    if block.is_empty() {
        return;
    }
    if !target.is_empty() && !target.ends_with('\n') {
        target.push('\n');
    }
    target.push_str(block);
}
