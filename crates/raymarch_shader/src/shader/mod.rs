//! Fragment shader assembly.
//!
//! A [`ShaderRequest`] carries the caller's GLSL fragments and ray-march constants;
//! [`ShaderAssembler`] wraps them with the fixed ray-marching library into one source string.
//! [`ShaderCache`] keeps assembled sources until their request changes, and [`reference`]
//! mirrors the fixed helpers on the CPU.
pub mod assembler;
pub mod cache;
pub mod library;
pub mod reference;
pub mod request;

pub use assembler::ShaderAssembler;
pub use cache::{CachedSource, ShaderCache};
pub use request::ShaderRequest;
