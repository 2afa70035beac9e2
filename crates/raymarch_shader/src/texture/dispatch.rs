//! GLSL emitted by the registry: texture bodies and the `getTexture` dispatch switch.
use std::collections::HashSet;

use super::instance::TextureInstance;

/// Signature of the generated dispatch function.
pub const DISPATCH_SIGNATURE: &str = "vec3 getTexture( int id, vec3 pos, vec3 nor, vec2 uv )";

/// Texture GLSL ready to be spliced after the geometry fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchSource {
    /// Distinct texture bodies (helpers first), in first-seen registration order.
    pub bodies: String,
    /// The `getTexture` switch over registered instance ids.
    pub dispatch_function: String,
}

impl DispatchSource {
    /// Bodies followed by the dispatch function.
    pub fn to_glsl(&self) -> String {
        let mut out = String::with_capacity(self.bodies.len() + self.dispatch_function.len() + 1);
        out.push_str(&self.bodies);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&self.dispatch_function);
        out
    }
}

pub(crate) fn emit_bodies<'a>(instances: impl IntoIterator<Item = &'a TextureInstance>) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = String::new();
    for instance in instances {
        let source = instance.source();
        let chunks = source
            .helpers
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(source.glsl.as_str()));
        for chunk in chunks {
            if seen.insert(chunk) {
                out.push_str(chunk.trim_end());
                out.push_str("\n\n");
            }
        }
    }
    out
}

pub(crate) fn emit_switch<'a>(instances: impl IntoIterator<Item = &'a TextureInstance>) -> String {
    let mut out = String::new();
    out.push_str(DISPATCH_SIGNATURE);
    out.push_str(" {\n    switch ( id ) {\n");
    for (index, instance) in instances.into_iter().enumerate() {
        out.push_str(&format!("        case {}:\n", index));
        out.push_str(&format!("            return {};\n", instance.emit_call()));
    }
    out.push_str("        default:\n            return vec3(0.);\n    }\n}\n");
    out
}
