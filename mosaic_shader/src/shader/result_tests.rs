use super::*;
use crate::gpu::mock_gpu::{MockGpu, MockTexture};
use crate::shader::{ShaderConst, ShaderDesc, ShaderVar};

fn builder(id: u8) -> ShaderBuilder {
    ShaderBuilder::new(ShaderParams { id, ..ShaderParams::default() })
}

// ============================================================================
// describe_steps
// ============================================================================

#[test]
fn test_describe_steps_tallies_in_order() {
    let steps: Vec<String> = ["decode", "deband", "decode", "scale", "decode"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(describe_steps(&steps), "decode x3, deband, scale");
    assert_eq!(describe_steps(&[]), "");
}

// ============================================================================
// finalize
// ============================================================================

#[test]
fn test_finalize_decode_tonemap_chain() {
    let mut sh = builder(1);
    sh.append(ShaderSig::None, ShaderSig::Color, "color = vec4(0.5);");
    sh.describe("decode");
    sh.append(ShaderSig::Color, ShaderSig::Color, "color.rgb = color.rgb / (1.0 + color.rgb);");
    sh.describe("tonemap");

    let res = sh.finalize().expect("valid shader must finalize");
    assert_eq!(res.input, ShaderSig::None);
    assert_eq!(res.output, ShaderSig::Color);
    assert_eq!(res.steps, vec!["decode".to_string(), "tonemap".to_string()]);
    assert_eq!(res.description, "decode, tonemap");
    assert!(!res.compute);
    assert_eq!(res.compute_group_size, [0, 0]);
    assert_eq!(res.name, "_main_01");
    assert!(res.glsl.starts_with("vec4 _main_01() {\n"));
    assert!(res.glsl.contains("vec4 color = vec4(0.0, 0.0, 0.0, 1.0);"));
    assert!(res.glsl.ends_with("return color;\n}\n"));
}

#[test]
fn test_finalize_is_idempotent() {
    let mut sh = builder(4);
    sh.append(ShaderSig::None, ShaderSig::Color, "color = vec4(1.0);");
    sh.bind_var(ShaderVar::float("gain", 2.0));
    sh.bind_desc(ShaderDesc::sampled_texture("lut", MockTexture::new(64, 1)));
    sh.describe("lut");

    let a = sh.finalize().unwrap();
    let b = sh.finalize().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_finalize_failed_returns_none() {
    let mut sh = builder(1);
    sh.declare_output_size(8, 8);
    sh.declare_output_size(16, 16);
    assert!(sh.finalize().is_none());
}

#[test]
fn test_finalize_empty_is_passthrough() {
    let res = builder(0).finalize().unwrap();
    assert_eq!(res.glsl, "void _main_00() {\n}\n");
    assert_eq!(res.input, ShaderSig::None);
    assert_eq!(res.output, ShaderSig::None);

    let mut sh = builder(0);
    sh.declare_input(ShaderSig::Color);
    let res = sh.finalize().unwrap();
    assert_eq!(res.glsl, "vec4 _main_00(vec4 color) {\nreturn color;\n}\n");
}

#[test]
fn test_finalize_unconsumed_sampler_returns_none() {
    let mut sh = builder(0);
    sh.declare_input(ShaderSig::Sampler);
    assert!(!sh.is_failed());
    assert!(sh.finalize().is_none());
}

#[test]
fn test_finalize_sampler_function_shape() {
    let mut sh = builder(0x10);
    sh.declare_input(ShaderSig::Sampler);
    sh.append(ShaderSig::Sampler, ShaderSig::Color, "color = texture(src_tex, tex_coord);");
    sh.append_prelude("const float PI = 3.14159265;");
    let res = sh.finalize().unwrap();
    assert!(res.glsl.starts_with("const float PI = 3.14159265;\nvec4 _main_10(sampler2D src_tex, vec2 tex_coord) {\n"));
    assert_eq!(res.input, ShaderSig::Sampler);
}

#[test]
fn test_finalize_compute_fields() {
    let mut sh = ShaderBuilder::new(ShaderParams {
        gpu: Some(MockGpu::with_compute().shared()),
        ..ShaderParams::default()
    });
    sh.try_compute(32, 8, false, 2048);
    let res = sh.finalize().unwrap();
    assert!(res.compute);
    assert_eq!(res.compute_group_size, [32, 8]);
    assert_eq!(res.compute_shmem, 2048);
}

#[test]
fn test_finalize_manifests_and_lookup() {
    let mut sh = ShaderBuilder::new(ShaderParams { dynamic_constants: true, ..ShaderParams::default() });
    sh.bind_const(ShaderConst::float("strength", 0.3));
    sh.bind_const(ShaderConst::int("radius", 4).compile_time());
    sh.declare_output_size(640, 480);
    let res = sh.finalize().unwrap();

    assert!(res.variable("strength").is_some());
    assert!(res.constant("strength").is_none());
    assert!(res.constant("radius").is_some());
    assert!(res.descriptor("radius").is_none());
    assert_eq!(res.output_size, Some((640, 480)));
    assert!(res.params.dynamic_constants);
}

#[test]
fn test_result_survives_builder_reset() {
    let mut sh = builder(1);
    sh.append(ShaderSig::None, ShaderSig::Color, "color = vec4(1.0);");
    sh.bind_var(ShaderVar::float("gain", 1.0));
    let res = sh.finalize().unwrap();

    sh.reset(ShaderParams::default());
    sh.bind_var(ShaderVar::float("other", 0.0));

    assert_eq!(res.variables.len(), 1);
    assert_eq!(res.variables[0].var.name, "gain");
    assert_ne!(sh.finalize().unwrap(), res);
}
