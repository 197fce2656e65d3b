use super::*;
use crate::gpu::mock_gpu::{MockBuffer, MockTexture};

// ============================================================================
// Vertex attributes
// ============================================================================

#[test]
fn test_vec2_rect_corner_order() {
    let va = ShaderVa::vec2_rect("pos", Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0));
    assert!(va.is_valid());
    assert_eq!(va.attr.format, VertexFormat::Vec2);

    let corner = |i: usize| -> Vec2 { bytemuck::pod_read_unaligned::<Vec2>(&va.data[i]) };
    assert_eq!(corner(0), Vec2::new(0.0, 0.0)); // top left
    assert_eq!(corner(1), Vec2::new(2.0, 0.0)); // top right
    assert_eq!(corner(2), Vec2::new(0.0, 1.0)); // bottom left
    assert_eq!(corner(3), Vec2::new(2.0, 1.0)); // bottom right
}

#[test]
fn test_va_with_short_corner_is_invalid() {
    let mut va = ShaderVa::vec2_rect("pos", Vec2::ZERO, Vec2::ONE);
    va.data[3].pop();
    assert!(!va.is_valid());
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_var_helpers_match_host_size() {
    assert!(ShaderVar::float("gain", 1.5).is_valid());
    assert!(ShaderVar::vec3("tint", Vec3::ONE).is_valid());
    assert!(ShaderVar::mat3("cmat", Mat3::IDENTITY).is_valid());
    assert!(ShaderVar::mat4("proj", Mat4::IDENTITY).is_valid());
    assert!(ShaderVar::uint("frame", 3).is_valid());
    assert_eq!(ShaderVar::mat3("cmat", Mat3::IDENTITY).data.len(), 36);
}

#[test]
fn test_var_with_wrong_data_size_is_invalid() {
    let var = ShaderVar::new(Var::vec4("v"), vec![0u8; 12]);
    assert!(!var.is_valid());
}

#[test]
fn test_var_dynamic_flag() {
    assert!(!ShaderVar::float("a", 0.0).dynamic);
    assert!(ShaderVar::float("a", 0.0).dynamic().dynamic);
}

// ============================================================================
// Descriptors
// ============================================================================

#[test]
fn test_uniform_buffer_fields_use_std140() {
    let mut desc = ShaderDesc::uniform_buffer("params", MockBuffer::new(256));
    desc.push_buffer_var(Var::float("strength")).unwrap();
    let weights = desc.push_buffer_var(Var::float("weights").array(4)).unwrap();
    assert_eq!(weights.offset, 16);
    assert_eq!(weights.stride, 16);
    assert_eq!(desc.buffer_size(), 80);
    assert!(desc.is_valid());
}

#[test]
fn test_storage_buffer_fields_use_std430() {
    let mut desc = ShaderDesc::storage_buffer("hist", MockBuffer::new(256), DescAccess::ReadWrite)
        .with_memory(MemoryQualifiers::COHERENT);
    desc.push_buffer_var(Var::uint("count")).unwrap();
    let bins = desc.push_buffer_var(Var::uint("bins").array(16)).unwrap();
    assert_eq!(bins.offset, 4);
    assert_eq!(bins.stride, 4);
    assert_eq!(desc.buffer_size(), 68);
    assert!(desc.memory.contains(MemoryQualifiers::COHERENT));
    assert!(!desc.memory.contains(MemoryQualifiers::VOLATILE));
}

#[test]
fn test_texture_rejects_buffer_vars() {
    let mut desc = ShaderDesc::sampled_texture("src", MockTexture::new(64, 64));
    let result = desc.push_buffer_var(Var::float("x"));
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(desc.buffer_vars.is_empty());
}

#[test]
fn test_duplicate_buffer_field_rejected() {
    let mut desc = ShaderDesc::uniform_buffer("params", MockBuffer::new(64));
    desc.push_buffer_var(Var::float("x")).unwrap();
    assert!(matches!(desc.push_buffer_var(Var::float("x")), Err(Error::InvalidLayout(_))));
}

#[test]
fn test_buffer_field_past_address_space_rejected() {
    let mut desc = ShaderDesc::uniform_buffer("params", MockBuffer::new(64));
    desc.buffer_vars.push(BufferVar {
        var: Var::float("tail"),
        layout: VarLayout { offset: usize::MAX - 8, stride: 4, size: 4 },
    });

    assert!(matches!(desc.push_buffer_var(Var::vec4("v")), Err(Error::InvalidLayout(_))));
    assert!(matches!(desc.push_buffer_var(Var::float("f")), Err(Error::InvalidLayout(_))));
    assert_eq!(desc.buffer_vars.len(), 1);
}

#[test]
fn test_memory_qualifiers_only_on_storage_descriptors() {
    let tex = MockTexture::new(16, 16);
    assert!(ShaderDesc::storage_image("dst", tex.clone(), DescAccess::WriteOnly)
        .with_memory(MemoryQualifiers::COHERENT)
        .is_valid());
    assert!(ShaderDesc::storage_buffer("hist", MockBuffer::new(64), DescAccess::ReadWrite)
        .with_memory(MemoryQualifiers::VOLATILE)
        .is_valid());

    assert!(!ShaderDesc::sampled_texture("src", tex)
        .with_memory(MemoryQualifiers::COHERENT)
        .is_valid());
    assert!(!ShaderDesc::uniform_buffer("params", MockBuffer::new(64))
        .with_memory(MemoryQualifiers::VOLATILE)
        .is_valid());
}

#[test]
fn test_desc_binding_compares_by_identity() {
    let tex = MockTexture::new(16, 16);
    let a = ShaderDesc::sampled_texture("src", tex.clone());
    let b = ShaderDesc::sampled_texture("src", tex);
    let c = ShaderDesc::sampled_texture("src", MockTexture::new(16, 16));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_mismatched_binding_kind_is_invalid() {
    let mut desc = ShaderDesc::sampled_texture("src", MockTexture::new(16, 16));
    desc.desc.desc_type = DescType::BufUniform;
    assert!(!desc.is_valid());
}

// ============================================================================
// Constants
// ============================================================================

#[test]
fn test_const_helpers() {
    let c = ShaderConst::int("taps", 8);
    assert!(c.is_valid());
    assert!(!c.compile_time);
    assert!(c.clone().compile_time().compile_time);
}

#[test]
fn test_const_to_dynamic_var() {
    let var = ShaderConst::float("gamma", 2.2).to_dynamic_var();
    assert_eq!(var.var, Var::float("gamma"));
    assert_eq!(var.data, 2.2f32.to_ne_bytes().to_vec());
    assert!(var.dynamic);
    assert!(var.is_valid());
}
