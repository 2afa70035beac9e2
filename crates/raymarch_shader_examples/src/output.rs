use std::fs;
use std::path::Path;

use anyhow::Context;
use rand::RngCore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Writes assembled GLSL next to the working directory.
pub fn write_shader(path: impl AsRef<Path>, source: &str) -> anyhow::Result<()> {
    let path = path.as_ref();
    fs::write(path, source).with_context(|| format!("writing {}", path.display()))?;
    info!(
        "Wrote {} ({} lines).",
        path.display(),
        source.lines().count()
    );
    Ok(())
}

/// Uniform float in `[0, 1]`. `u32::MAX` rounds up to exactly `1.0` in `f32`.
pub fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
