//! Live texture instances and the registry that emits their GLSL.
//!
//! - [`TextureRegistry`] owns instances in registration order and assigns their [`TextureId`]s.
//! - [`TextureInstance`] holds one [`crate::uniform::Uniform`] per schema parameter.
//! - [`DispatchSource`] carries the emitted bodies and `getTexture` switch.
pub mod dispatch;
pub mod instance;
pub mod registry;

pub use dispatch::{DispatchSource, DISPATCH_SIGNATURE};
pub use instance::{TextureId, TextureInstance, TextureOverrides, MATERIAL_PARAMETER};
pub use registry::TextureRegistry;
