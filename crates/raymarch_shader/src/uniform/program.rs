//! The boundary to a compiled GPU program.
//!
//! Compiling GLSL and talking to the GPU context is left to the caller. Implement
//! [`ShaderProgram`] for whatever handle your graphics binding produces and pass it to
//! [`crate::texture::TextureRegistry::bind_locations`] and
//! [`crate::texture::TextureRegistry::upload`].
use crate::uniform::UniformValue;

/// Location of an active uniform inside one compiled program.
///
/// Locations are only meaningful for the program that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// A compiled program whose uniforms can be located and written.
pub trait ShaderProgram {
    /// Returns the location of the named uniform, or `None` when the program has no
    /// active uniform with that name (for example because the compiler stripped it).
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;

    /// Writes `value` to the uniform at `location`.
    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue);
}
