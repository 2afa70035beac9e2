use tracing::debug;

use super::library;
use super::request::ShaderRequest;
use crate::error::Result;
use crate::glsl::{float_literal, vec_literal};

/// Turns a [`ShaderRequest`] into complete GLSL ES 3.00 fragment shader source.
pub struct ShaderAssembler;

impl ShaderAssembler {
    /// Assembles without validating. Malformed fragments surface at compile time.
    pub fn assemble(request: &ShaderRequest) -> String {
        let mut out = String::with_capacity(
            8 * 1024
                + request.variables.len()
                + request.geometries.len()
                + request.lighting.len(),
        );

        out.push_str(library::PREAMBLE);
        if let Some(bg) = request.background {
            out.push_str(&format!("const vec3 bg = {};\n", vec_literal(&bg)));
        }
        push_fragment(&mut out, &request.variables);

        out.push_str(library::LENGTH8);
        out.push('\n');
        push_fragment(&mut out, &request.geometries);
        out.push_str(library::SCENE_FORWARD_DECLARATION);
        out.push('\n');

        out.push_str(&library::raytrace(request.steps));
        out.push('\n');
        out.push_str(library::NORMAL);
        out.push('\n');
        out.push_str(library::CAMERA);
        out.push('\n');
        out.push_str(library::OPERATIONS);
        out.push('\n');

        push_fragment(&mut out, &request.lighting);

        out.push_str(library::COLOR_FROM_INT);
        out.push('\n');

        out.push_str("vec2 scene(vec3 p) {\n");
        push_fragment(&mut out, &request.preface);
        out.push_str(&format!(
            "  return {};\n",
            request.scene.trim().trim_end_matches(';')
        ));
        out.push_str("}\n\n");

        out.push_str(library::OUTPUT_DECLARATION);
        out.push('\n');
        write_main(&mut out, request);

        debug!(
            "Assembled fragment shader ({} bytes, {} steps).",
            out.len(),
            request.steps
        );
        out
    }

    /// Validates `request` and assembles it.
    pub fn try_assemble(request: &ShaderRequest) -> Result<String> {
        request.validate()?;
        Ok(Self::assemble(request))
    }
}

fn write_main(out: &mut String, request: &ShaderRequest) {
    out.push_str(
        "void main() {
  vec2 pos = v_uv * 2.0 - 1.0;
  pos.x *= ( resolution.x / resolution.y );
  vec3 color = bg;
  vec3 ro = camera_pos;
  vec3 rd = camera( ro, camera_normal, pos, 2.0 );

",
    );
    out.push_str(&format!(
        "  vec2 t = raytrace( ro, rd, {}, {} );\n",
        float_literal(request.max_distance),
        float_literal(request.min_distance)
    ));
    out.push_str(
        "  if( t.x > -0.5 ) {
    vec3 pos = ro + rd * t.x;
    vec3 nor = getNormal( pos );

    color = lighting( pos, nor, ro, rd, t.y );
  }

",
    );
    push_fragment(out, &request.postprocessing);
    out.push_str("  col = vec4( color, 1.0 );\n}\n");
}

fn push_fragment(out: &mut String, fragment: &str) {
    if fragment.trim().is_empty() {
        return;
    }
    out.push_str(fragment);
    if !fragment.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::error::Error;
    use crate::texture::{TextureOverrides, TextureRegistry};

    const LIGHTING: &str =
        "vec3 lighting( vec3 pos, vec3 nor, vec3 ro, vec3 rd, float materialId ) { return nor; }";

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing `{needle}`"))
    }

    #[test]
    fn sections_follow_the_fixed_order() {
        let request = ShaderRequest::new("opUnion( sphere( p ), box( p ) )")
            .with_variables("uniform float radius;")
            .with_geometries("vec2 sphere( vec3 p ) { return vec2( length( p ) - radius, 1. ); }")
            .with_preface("p.y += 0.1;")
            .with_lighting(LIGHTING)
            .with_postprocessing("color = pow( color, vec3( 1. / 2.2 ) );")
            .with_background(Vec3::ZERO);
        let src = ShaderAssembler::assemble(&request);

        assert!(src.starts_with("#version 300 es\nprecision highp float;"));
        let order = [
            "in vec2 v_uv;",
            "struct Fresnel",
            "struct Light",
            "struct Material",
            "uniform vec3 camera_normal;",
            "const vec3 bg = vec3(0.0, 0.0, 0.0);",
            "uniform float radius;",
            "float length8(",
            "vec2 sphere(",
            "vec2 scene(vec3 p);",
            "vec2 raytrace(",
            "vec3 getNormal(",
            "vec3 camera(",
            "float smin(",
            "vec2  opU(",
            "vec2 opI(",
            "float softshadow(",
            "vec2 smin(",
            "vec2  opS(",
            "vec2 opSmoothUnion(",
            "vec3 lighting(",
            "vec3 colorFromInt(",
            "vec2 scene(vec3 p) {\np.y += 0.1;",
            "  return opUnion( sphere( p ), box( p ) );",
            "out vec4 col;",
            "void main()",
            "vec2 t = raytrace( ro, rd, 20.0, 0.001 );",
            "color = pow( color, vec3( 1. / 2.2 ) );",
            "col = vec4( color, 1.0 );",
        ];
        for pair in order.windows(2) {
            assert!(
                position(&src, pair[0]) < position(&src, pair[1]),
                "`{}` must precede `{}`",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let request = ShaderRequest::new("vec2( length( p ) - 1., 0. )").with_lighting(LIGHTING);
        assert_eq!(
            ShaderAssembler::assemble(&request),
            ShaderAssembler::assemble(&request.clone())
        );
    }

    #[test]
    fn tuning_constants_are_spliced() {
        let request = ShaderRequest::new("vec2( 1. )")
            .with_steps(128)
            .with_min_distance(0.0005)
            .with_max_distance(50.0);
        let src = ShaderAssembler::assemble(&request);
        assert!(src.contains("for( int i = 0; i < 128; i++ )"));
        assert!(src.contains("raytrace( ro, rd, 50.0, 0.0005 );"));
    }

    #[test]
    fn miss_leaves_background_colour() {
        let request = ShaderRequest::new("vec2( length( p ) - 1., 0. )")
            .with_lighting(LIGHTING)
            .with_background(Vec3::ZERO);
        let src = ShaderAssembler::assemble(&request);
        let main = &src[position(&src, "void main()")..];

        assert!(src.contains("const vec3 bg = vec3(0.0, 0.0, 0.0);"));
        assert!(main.contains("vec3 color = bg;"));
        // Initialized to `bg`, then only written behind the hit test.
        assert_eq!(main.matches("color = ").count(), 2);
        let guard = position(main, "if( t.x > -0.5 ) {");
        assert!(position(main, "color = lighting(") > guard);
        // Empty postprocessing leaves nothing between the branch and the output.
        assert!(main.contains("  }\n\n  col = vec4( color, 1.0 );\n}"));
    }

    #[test]
    fn without_background_bg_is_left_to_the_caller() {
        let request = ShaderRequest::new("vec2( 1. )")
            .with_variables("const vec3 bg = vec3( .1 );");
        let src = ShaderAssembler::assemble(&request);
        assert_eq!(src.matches("const vec3 bg").count(), 1);
    }

    #[test]
    fn registry_textures_land_before_scene_declaration() {
        let mut registry = TextureRegistry::default();
        registry.texture("checkers", &TextureOverrides::new().with("size", 5.0));
        registry.texture("noise", &TextureOverrides::new());
        let request = ShaderRequest::new("vec2( 1. )")
            .with_lighting(LIGHTING)
            .with_textures(&registry);
        let src = ShaderAssembler::assemble(&request);

        assert!(position(&src, "uniform float tex0_size;") < position(&src, "float length8("));
        assert!(position(&src, "float length8(") < position(&src, "vec3 checkers("));
        assert!(position(&src, "vec3 getTexture(") < position(&src, "vec2 scene(vec3 p);"));
    }

    #[test]
    fn try_assemble_validates_first() {
        let err = ShaderAssembler::try_assemble(&ShaderRequest::new("vec2( 1. )").with_steps(0))
            .expect_err("zero steps");
        matches!(err, Error::InvalidConfig(_))
            .then_some(())
            .expect("expected InvalidConfig");
    }
}
