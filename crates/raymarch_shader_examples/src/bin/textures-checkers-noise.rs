use glam::Vec3;
use raymarch_shader::prelude::*;
use raymarch_shader_examples::{init_tracing, write_shader, RecordingProgram};
use tracing::info;

const GEOMETRIES: &str = r#"vec2 sphere( vec3 p, float r, float material ) {
  return vec2( length( p ) - r, material );
}

vec2 ground( vec3 p, float h, float material ) {
  return vec2( p.y + h, material );
}
"#;

/// Material ids double as texture ids.
const LIGHTING: &str = r#"vec3 lighting( vec3 pos, vec3 nor, vec3 ro, vec3 rd, float materialId ) {
  vec3 albedo = getTexture( int( materialId ), pos, nor, pos.xz );
  vec3 light = normalize( vec3( 2., 4., 3. ) );
  float diffuse = max( dot( nor, light ), 0. );
  float shadow = softshadow( pos, light, 0.02, 2.5, 8. );
  return albedo * ( 0.15 + 0.85 * diffuse * shadow );
}
"#;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Texture 0 is the floor, texture 1 the sphere.
    let mut textures = TextureRegistry::default();
    let floor = textures
        .texture("checkers", &TextureOverrides::new().with("size", 5.0))
        .ok_or_else(|| anyhow::anyhow!("checkers is missing from the catalog"))?;
    let ball = textures
        .texture("noise", &TextureOverrides::new())
        .ok_or_else(|| anyhow::anyhow!("noise is missing from the catalog"))?;

    let scene = format!(
        "opU( ground( p, 1., {}. ), sphere( p, 1., {}. ) )",
        floor, ball
    );
    let request = ShaderRequest::new(scene)
        .with_geometries(GEOMETRIES)
        .with_lighting(LIGHTING)
        .with_background(Vec3::new(0.05, 0.05, 0.08))
        .with_textures(&textures);

    let source = ShaderAssembler::try_assemble(&request)?;
    write_shader("textures-checkers-noise.frag", &source)?;

    // After compiling: bind once, then upload per frame.
    let mut program = RecordingProgram::compile(&source);
    textures.bind_locations(&program);
    let writes = textures.upload(&mut program);
    info!(
        "First upload wrote {} of {} program uniforms.",
        writes,
        program.uniform_count()
    );
    info!("Second upload wrote {}.", textures.upload(&mut program));

    if let Some(noise) = textures.get_mut(ball) {
        noise.set("time", 2.5)?;
    }
    textures.upload(&mut program);
    for (name, value) in program.take_writes().into_iter().skip(writes) {
        info!("After animating: {} = {}", name, value.to_glsl());
    }

    // Rebuilding starts ids over.
    textures.clear();
    let again = textures
        .texture("noise", &TextureOverrides::new())
        .ok_or_else(|| anyhow::anyhow!("noise is missing from the catalog"))?;
    info!(
        "After clear the noise texture is id {}:\n{}",
        again,
        textures.emit_dispatch().dispatch_function
    );

    Ok(())
}
