#![forbid(unsafe_code)]
//! raymarch_shader: Fragment shader assembly for SDF ray marching with procedural textures.
//!
//! Modules:
//! - uniform: typed, dirty-tracked uniform variables and the compiled-program boundary
//! - catalog: texture types with their GLSL sources and parameter schemas
//! - texture: texture instances, the registry, and `getTexture` dispatch emission
//! - shader: request builder, assembler, source cache, and CPU reference helpers
//! - glsl: literal formatting shared by the emitters
pub mod catalog;
pub mod error;
pub mod glsl;
pub mod shader;
pub mod texture;
pub mod uniform;

/// Convenient re-exports for common types. Import with `use raymarch_shader::prelude::*;`.
pub mod prelude {
    pub use crate::catalog::{
        ParameterSchema, TextureCatalog, TextureSource, TextureType, TextureVariant,
    };
    pub use crate::error::{Error, Result};
    pub use crate::shader::reference::MarchSettings;
    pub use crate::shader::{CachedSource, ShaderAssembler, ShaderCache, ShaderRequest};
    pub use crate::texture::{
        DispatchSource, TextureId, TextureInstance, TextureOverrides, TextureRegistry,
    };
    pub use crate::uniform::{
        uniform_gen, ParamInput, SemanticType, ShaderProgram, Uniform, UniformLocation,
        UniformValue,
    };
}
