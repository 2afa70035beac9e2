//! GLSL literal formatting shared by uniforms, the texture dispatch and the assembler.
use tracing::warn;

/// Formats a float as a GLSL ES float constant.
///
/// GLSL rejects integer-looking literals where a float is expected, so whole numbers keep a
/// trailing `.0`. Non-finite values have no literal form and are emitted as `0.0`.
pub fn float_literal(value: f32) -> String {
    if !value.is_finite() {
        warn!("Non-finite value {} emitted as 0.0.", value);
        return "0.0".to_string();
    }
    // Debug formatting always carries a fraction or an exponent.
    format!("{value:?}")
}

/// Formats an integer as a GLSL int constant.
pub fn int_literal(value: i32) -> String {
    value.to_string()
}

/// Formats a float vector constructor such as `vec3(1.0, 0.5, 0.0)`.
pub fn vec_literal(components: &[f32]) -> String {
    let args: Vec<String> = components.iter().map(|c| float_literal(*c)).collect();
    format!("vec{}({})", components.len(), args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_keep_fraction() {
        assert_eq!(float_literal(20.0), "20.0");
        assert_eq!(float_literal(-1.0), "-1.0");
        assert_eq!(float_literal(0.001), "0.001");
    }

    #[test]
    fn non_finite_floats_fall_back_to_zero() {
        assert_eq!(float_literal(f32::NAN), "0.0");
        assert_eq!(float_literal(f32::INFINITY), "0.0");
    }

    #[test]
    fn vectors_use_component_count_for_constructor() {
        assert_eq!(vec_literal(&[1.0, 0.5, 0.0]), "vec3(1.0, 0.5, 0.0)");
        assert_eq!(vec_literal(&[0.25, 2.0]), "vec2(0.25, 2.0)");
    }

    #[test]
    fn ints_have_no_fraction() {
        assert_eq!(int_literal(3), "3");
        assert_eq!(int_literal(-7), "-7");
    }
}
