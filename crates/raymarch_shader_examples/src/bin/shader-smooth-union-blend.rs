use glam::{Vec2, Vec3};
use raymarch_shader::glsl::float_literal;
use raymarch_shader::prelude::*;
use raymarch_shader::shader::reference::{
    color_from_int, shade_pixel, smooth_min_material, PixelInputs,
};
use raymarch_shader_examples::{init_tracing, write_shader};
use tracing::info;

const RED: u32 = 0xE0_40_30;
const BLUE: u32 = 0x30_60_E0;
const BLEND: f32 = 0.6;

const GEOMETRIES: &str = r#"vec2 sphere( vec3 p, float r, float material ) {
  return vec2( length( p ) - r, material );
}
"#;

const LIGHTING: &str = r#"vec3 lighting( vec3 pos, vec3 nor, vec3 ro, vec3 rd, float materialId ) {
  float diffuse = max( dot( nor, normalize( vec3( 1., 1., 2. ) ) ), 0. );
  return colorFromInt( materialId ) * ( .2 + .8 * diffuse );
}
"#;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let offset = "sin( time ) * 1.2";
    let request = ShaderRequest::new(format!(
        "opSmoothUnion( sphere( p - vec3( {offset}, 0., 0. ), 1., {}. ), \
         sphere( p + vec3( {offset}, 0., 0. ), 1., {}. ), {} )",
        RED,
        BLUE,
        float_literal(BLEND)
    ))
    .with_geometries(GEOMETRIES)
    .with_lighting(LIGHTING)
    .with_postprocessing("color = pow( color, vec3( 1. / 2.2 ) );")
    .with_background(Vec3::new(0.02, 0.02, 0.03));

    let source = ShaderAssembler::try_assemble(&request)?;
    write_shader("shader-smooth-union-blend.frag", &source)?;

    // Sweep a probe along the x axis between the two spheres.
    let scene = |p: Vec3| {
        let a = Vec2::new((p - Vec3::X * 1.2).length() - 1.0, RED as f32);
        let b = Vec2::new((p + Vec3::X * 1.2).length() - 1.0, BLUE as f32);
        smooth_min_material(a, b, BLEND)
    };
    for step in -4..=4 {
        let x = step as f32 * 0.5;
        let hit = scene(Vec3::new(x, 0.0, 0.0));
        info!(
            "x = {:>5.2}: distance {:>6.3}, colour {:?}",
            x,
            hit.x,
            color_from_int(hit.y).to_array()
        );
    }

    let settings = MarchSettings::from(&request);
    let lighting = |_: Vec3, nor: Vec3, _: Vec3, _: Vec3, material: f32| {
        let diffuse = nor.dot(Vec3::new(1.0, 1.0, 2.0).normalize()).max(0.0);
        color_from_int(material) * (0.2 + 0.8 * diffuse)
    };
    for (label, uv) in [("centre", Vec2::splat(0.5)), ("corner", Vec2::ZERO)] {
        let inputs = PixelInputs {
            uv,
            resolution: Vec2::new(800.0, 600.0),
            camera_pos: Vec3::new(0.0, 0.0, 5.0),
            camera_normal: Vec3::ZERO,
            background: Vec3::new(0.02, 0.02, 0.03),
        };
        let color = shade_pixel(&inputs, settings, scene, lighting);
        info!("{} pixel: {:?}", label, color.to_array());
    }

    Ok(())
}
