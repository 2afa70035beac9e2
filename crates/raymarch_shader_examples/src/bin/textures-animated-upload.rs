use glam::Vec3;
use raymarch_shader::prelude::*;
use raymarch_shader_examples::{init_tracing, rand01, RecordingProgram};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const FRAMES: usize = 120;
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut textures = TextureRegistry::default();
    let noise = textures
        .texture("noise", &TextureOverrides::new().with("scale", 4.0))
        .ok_or_else(|| anyhow::anyhow!("noise is missing from the catalog"))?;
    let dots = textures
        .texture("dots", &TextureOverrides::new())
        .ok_or_else(|| anyhow::anyhow!("dots is missing from the catalog"))?;
    let voronoi = textures
        .texture("voronoi", &TextureOverrides::new().with("mode", 1.0))
        .ok_or_else(|| anyhow::anyhow!("voronoi is missing from the catalog"))?;

    let request = ShaderRequest::new("vec2( length( p ) - 1., 0. )")
        .with_lighting(
            "vec3 lighting( vec3 pos, vec3 nor, vec3 ro, vec3 rd, float materialId ) { \
             return getTexture( int( materialId ), pos, nor, pos.xy ); }",
        )
        .with_background(Vec3::ZERO)
        .with_textures(&textures);
    let mut program = RecordingProgram::compile(&ShaderAssembler::try_assemble(&request)?);
    textures.bind_locations(&program);

    let mut rng = StdRng::seed_from_u64(7);
    let mut total = textures.upload(&mut program);
    info!("Initial upload: {} writes.", total);

    for frame in 1..=FRAMES {
        let time = frame as f32 * FRAME_TIME;
        for id in [noise, voronoi] {
            if let Some(tex) = textures.get_mut(id) {
                tex.set("time", time)?;
            }
        }
        // The dots change colour twice a second.
        if frame % 30 == 0 {
            if let Some(tex) = textures.get_mut(dots) {
                let color = Vec3::new(rand01(&mut rng), rand01(&mut rng), rand01(&mut rng));
                tex.set("color", color)?;
            }
        }

        let writes = textures.upload(&mut program);
        total += writes;
        if frame % 30 == 0 {
            info!("Frame {:>3}: {} writes.", frame, writes);
        }
    }

    let recorded = program.take_writes().len();
    info!(
        "{} frames, {} writes in total ({} recorded).",
        FRAMES, total, recorded
    );

    Ok(())
}
