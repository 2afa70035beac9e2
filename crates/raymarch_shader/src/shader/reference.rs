//! CPU versions of the fixed GLSL helpers.
//!
//! These follow the emitted GLSL statement for statement so blend and hit/miss behaviour can be
//! checked without a GPU. `scene` callbacks return `(distance, material)` like the GLSL `scene`.
use glam::{Mat3, Vec2, Vec3};

use super::request::ShaderRequest;

/// Polynomial smooth minimum, `float smin( float, float, float )`.
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    lerp(b, a, h) - k * h * (1.0 - h)
}

/// `vec2 smin( vec2, vec2, float )`: smooth distance, with the material interpolated from
/// `a.y` towards `b.y` as `b` gets closer than `a` by up to `k`.
pub fn smooth_min_material(a: Vec2, b: Vec2, k: f32) -> Vec2 {
    let distance = smooth_min(a.x, b.x, k);
    let factor = ((a.x - b.x) / k).clamp(0.0, 1.0);
    Vec2::new(distance, lerp(a.y, b.y, factor))
}

/// `colorFromInt`: unpacks `0xRRGGBB` stored in a float.
pub fn color_from_int(color: f32) -> Vec3 {
    let color = color as i32;
    let r = (color >> 16).clamp(0, 255);
    let g = ((color & 0xFF00) >> 8).clamp(0, 255);
    let b = (color & 0xFF).clamp(0, 255);
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

/// Ray-march budget and thresholds, as passed to `raytrace`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchSettings {
    pub steps: u32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl From<&ShaderRequest> for MarchSettings {
    fn from(request: &ShaderRequest) -> Self {
        Self {
            steps: request.steps,
            min_distance: request.min_distance,
            max_distance: request.max_distance,
        }
    }
}

/// `raytrace`: `(distance, material)` of the first hit, `(-1, -1)` on a miss.
pub fn ray_march(
    origin: Vec3,
    dir: Vec3,
    settings: MarchSettings,
    scene: impl Fn(Vec3) -> Vec2,
) -> Vec2 {
    let mut latest = settings.min_distance * 2.0;
    let mut dist = 0.0;
    let mut material = -1.0;

    for _ in 0..settings.steps {
        if latest < settings.min_distance || dist > settings.max_distance {
            break;
        }
        let result = scene(origin + dir * dist);
        latest = result.x;
        material = result.y;
        dist += latest;
    }

    if dist < settings.max_distance {
        Vec2::new(dist, material)
    } else {
        Vec2::splat(-1.0)
    }
}

/// `getNormal`: tetrahedral central differences with `eps = 0.002`.
pub fn normal(pos: Vec3, scene: impl Fn(Vec3) -> Vec2) -> Vec3 {
    const EPS: f32 = 0.002;
    let taps = [
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
    ];
    taps.iter()
        .map(|v| *v * scene(pos + *v * EPS).x)
        .sum::<Vec3>()
        .normalize_or_zero()
}

/// `camera( origin, target, screen, lens )`: view ray through a screen position.
pub fn camera_ray(origin: Vec3, target: Vec3, screen: Vec2, lens_length: f32) -> Vec3 {
    let rr = Vec3::new(0.0, 1.0, 0.0);
    let ww = (target - origin).normalize_or_zero();
    let uu = ww.cross(rr).normalize_or_zero();
    let vv = uu.cross(ww).normalize_or_zero();
    (Mat3::from_cols(uu, vv, ww) * screen.extend(lens_length)).normalize_or_zero()
}

/// Fixed inputs of one `main` invocation.
#[derive(Clone, Copy, Debug)]
pub struct PixelInputs {
    /// `v_uv` in `[0, 1]`.
    pub uv: Vec2,
    pub resolution: Vec2,
    pub camera_pos: Vec3,
    pub camera_normal: Vec3,
    pub background: Vec3,
}

/// Mirrors `main` without postprocessing: the lit colour on a hit, the background otherwise.
pub fn shade_pixel(
    inputs: &PixelInputs,
    settings: MarchSettings,
    scene: impl Fn(Vec3) -> Vec2,
    lighting: impl Fn(Vec3, Vec3, Vec3, Vec3, f32) -> Vec3,
) -> Vec3 {
    let mut screen = inputs.uv * 2.0 - Vec2::ONE;
    screen.x *= inputs.resolution.x / inputs.resolution.y;
    let ro = inputs.camera_pos;
    let rd = camera_ray(ro, inputs.camera_normal, screen, 2.0);

    let t = ray_march(ro, rd, settings, &scene);
    if t.x > -0.5 {
        let pos = ro + rd * t.x;
        let nor = normal(pos, &scene);
        lighting(pos, nor, ro, rd, t.y)
    } else {
        inputs.background
    }
}

fn lerp(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(radius: f32, material: f32) -> impl Fn(Vec3) -> Vec2 {
        move |p: Vec3| Vec2::new(p.length() - radius, material)
    }

    fn defaults() -> MarchSettings {
        MarchSettings::from(&ShaderRequest::new("vec2( 1. )"))
    }

    #[test]
    fn smooth_min_matches_min_far_from_the_seam() {
        assert!((smooth_min(0.0, 5.0, 0.5) - 0.0).abs() < 1e-6);
        assert!((smooth_min(5.0, 0.0, 0.5) - 0.0).abs() < 1e-6);
        assert!(smooth_min(1.0, 1.0, 0.5) < 1.0);
    }

    #[test]
    fn material_saturates_to_the_closer_operand() {
        let a = Vec2::new(1.0, 3.0);
        assert_eq!(smooth_min_material(a, Vec2::new(1.2, 7.0), 0.5).y, 3.0);
        assert_eq!(smooth_min_material(a, Vec2::new(9.0, 7.0), 0.5).y, 3.0);
        assert_eq!(smooth_min_material(a, Vec2::new(0.5, 7.0), 0.5).y, 7.0);
        assert_eq!(smooth_min_material(a, Vec2::new(-4.0, 7.0), 0.5).y, 7.0);
        // Ties keep the first operand.
        assert_eq!(smooth_min_material(a, Vec2::new(1.0, 7.0), 0.5).y, 3.0);
    }

    #[test]
    fn material_is_interpolated_inside_the_blend_band() {
        let a = Vec2::new(1.0, 0.0);
        let half = smooth_min_material(a, Vec2::new(0.75, 10.0), 0.5);
        assert!((half.y - 5.0).abs() < 1e-5, "material {}", half.y);

        let fifth = smooth_min_material(a, Vec2::new(0.9, 10.0), 0.5);
        assert!((fifth.y - 2.0).abs() < 1e-4, "material {}", fifth.y);

        // Moving b closer never moves the material back towards a.
        let mut last = 0.0;
        for step in 0..=10 {
            let b = Vec2::new(1.0 - step as f32 * 0.05, 10.0);
            let m = smooth_min_material(a, b, 0.5).y;
            assert!(m >= last);
            last = m;
        }
        assert!((last - 10.0).abs() < 1e-4, "material {}", last);
    }

    #[test]
    fn color_from_int_unpacks_channels() {
        let c = color_from_int(0xFF8000 as f32);
        assert!((c - Vec3::new(1.0, 128.0 / 255.0, 0.0)).length() < 1e-6);
        assert_eq!(color_from_int(0.0), Vec3::ZERO);
    }

    #[test]
    fn ray_march_hits_a_sphere_in_front() {
        let t = ray_march(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, defaults(), sphere(1.0, 2.0));
        assert!((t.x - 4.0).abs() < 0.01, "distance {}", t.x);
        assert_eq!(t.y, 2.0);
    }

    #[test]
    fn ray_march_reports_misses() {
        let t = ray_march(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z, defaults(), sphere(1.0, 2.0));
        assert_eq!(t, Vec2::splat(-1.0));
    }

    #[test]
    fn sphere_normals_point_outwards() {
        let n = normal(Vec3::new(0.0, 1.0, 0.0), sphere(1.0, 0.0));
        assert!((n - Vec3::Y).length() < 1e-3);
    }

    #[test]
    fn missed_pixels_keep_the_background() {
        let inputs = PixelInputs {
            uv: Vec2::splat(0.5),
            resolution: Vec2::new(640.0, 480.0),
            camera_pos: Vec3::new(0.0, 0.0, 5.0),
            camera_normal: Vec3::new(0.0, 0.0, 10.0),
            background: Vec3::ZERO,
        };
        let lit = |_: Vec3, _: Vec3, _: Vec3, _: Vec3, _: f32| Vec3::ONE;

        let miss = shade_pixel(&inputs, defaults(), sphere(1.0, 0.0), lit);
        assert_eq!(miss, Vec3::ZERO);

        let facing = PixelInputs {
            camera_normal: Vec3::ZERO,
            ..inputs
        };
        let hit = shade_pixel(&facing, defaults(), sphere(1.0, 0.0), lit);
        assert_eq!(hit, Vec3::ONE);
    }
}
