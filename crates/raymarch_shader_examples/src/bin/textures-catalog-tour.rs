use glam::Vec3;
use raymarch_shader::prelude::*;
use raymarch_shader_examples::{init_tracing, write_shader, RecordingProgram};
use tracing::{info, warn};

const SPACING: f32 = 2.5;

const GEOMETRIES: &str = r#"vec2 roundBox( vec3 p, vec3 b, float r, float material ) {
  vec3 q = abs( p ) - b;
  return vec2( length( max( q, 0. ) ) + min( max( q.x, max( q.y, q.z ) ), 0. ) - r, material );
}
"#;

const LIGHTING: &str = r#"vec3 lighting( vec3 pos, vec3 nor, vec3 ro, vec3 rd, float materialId ) {
  vec3 local = pos - vec3( materialId * 2.5, 0., 0. );
  vec3 albedo = getTexture( int( materialId ), local, nor, local.xy * .5 + .5 );
  float diffuse = max( dot( nor, normalize( vec3( .3, .8, .6 ) ) ), 0. );
  return albedo * ( .2 + .8 * diffuse );
}
"#;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut textures = TextureRegistry::default();
    let catalog = textures.catalog().clone();

    // One swatch per catalog entry, planar where that is the only variant.
    for kind in catalog.iter() {
        let Some(instance) = textures.instantiate(&kind.name, &TextureOverrides::new()) else {
            continue;
        };
        info!(
            "{:<9} {:>6} variant via {}() with {} parameters",
            kind.name,
            instance.variant().to_string(),
            instance.entry_function(),
            kind.parameters.len()
        );
        textures.register(instance);
    }

    // A second checkers swatch using the planar variant and its own colours.
    let planar = textures
        .try_instantiate(
            "checkers",
            &TextureOverrides::new()
                .with("color1", [0.9, 0.3, 0.2])
                .with("color2", 0.1),
        )?
        .with_variant(TextureVariant::Planar)?;
    textures.register(planar);

    // Truchet has no solid variant.
    if let Err(err) = textures
        .try_instantiate("truchet", &TextureOverrides::new())
        .and_then(|t| t.with_variant(TextureVariant::Solid))
    {
        warn!("{}", err);
    }

    let swatches: Vec<String> = textures
        .iter()
        .enumerate()
        .map(|(i, _)| {
            format!(
                "roundBox( p - vec3( {:.1}, 0., 0. ), vec3( .9 ), .1, {}. )",
                i as f32 * SPACING,
                i
            )
        })
        .collect();
    let scene = swatches
        .into_iter()
        .reduce(|acc, next| format!("opU( {acc}, {next} )"))
        .ok_or_else(|| anyhow::anyhow!("the catalog is empty"))?;

    let request = ShaderRequest::new(scene)
        .with_geometries(GEOMETRIES)
        .with_lighting(LIGHTING)
        .with_background(Vec3::splat(0.9))
        .with_max_distance(60.0)
        .with_textures(&textures);

    let source = ShaderAssembler::try_assemble(&request)?;
    write_shader("textures-catalog-tour.frag", &source)?;

    let mut program = RecordingProgram::compile(&source);
    textures.bind_locations(&program);
    info!(
        "{} textures, {} uniforms uploaded.",
        textures.len(),
        textures.upload(&mut program)
    );

    Ok(())
}
