use nebula_core::{CameraBlock, ParamBlock, PARTICLES_WGSL, POST_WGSL};
use std::collections::HashMap;
use std::mem::size_of;

fn parse(source: &str, label: &str) -> naga::Module {
    naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("Failed to parse {label}:\n{}", e.emit_to_string(source)))
}

fn validate(source: &str, label: &str) -> naga::Module {
    let module = parse(source, label);
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!("Failed to validate {label}:\n{e:?}");
    }
    module
}

struct WgslLayout {
    size: u32,
    offsets: HashMap<String, u32>,
}

fn struct_layout(module: &naga::Module, name: &str) -> WgslLayout {
    let (_, ty) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("struct {name} not found"));
    match &ty.inner {
        naga::TypeInner::Struct { members, span } => WgslLayout {
            size: *span,
            offsets: members
                .iter()
                .filter_map(|m| m.name.clone().map(|n| (n, m.offset)))
                .collect(),
        },
        _ => panic!("{name} is not a struct"),
    }
}

#[test]
fn particle_program_validates() {
    let module = validate(PARTICLES_WGSL, "particles.wgsl");
    let entries: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(entries.contains(&"vs_main"));
    assert!(entries.contains(&"fs_main"));
}

#[test]
fn post_program_validates() {
    let module = validate(POST_WGSL, "post.wgsl");
    let entries: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    for name in [
        "vs_fullscreen",
        "fs_bright",
        "fs_blur_h",
        "fs_blur_v",
        "fs_composite",
        "fs_afterimage",
        "fs_present",
    ] {
        assert!(entries.contains(&name), "missing entry point {name}");
    }
}

#[test]
fn params_layout_matches_param_block() {
    let module = parse(PARTICLES_WGSL, "particles.wgsl");
    let layout = struct_layout(&module, "Params");
    assert_eq!(layout.size as usize, size_of::<ParamBlock>());
    assert_eq!(
        layout.offsets["ramp"] as usize,
        std::mem::offset_of!(ParamBlock, ramp)
    );
    assert_eq!(
        layout.offsets["pointer"] as usize,
        std::mem::offset_of!(ParamBlock, pointer)
    );
    assert_eq!(
        layout.offsets["pointer_shape"] as usize,
        std::mem::offset_of!(ParamBlock, pointer_shape)
    );
}

#[test]
fn camera_layout_matches_camera_block() {
    let module = parse(PARTICLES_WGSL, "particles.wgsl");
    let layout = struct_layout(&module, "Camera");
    assert_eq!(layout.size as usize, size_of::<CameraBlock>());
    assert_eq!(
        layout.offsets["viewport"] as usize,
        std::mem::offset_of!(CameraBlock, viewport)
    );
}

#[test]
fn post_uniforms_are_two_rows() {
    let module = parse(POST_WGSL, "post.wgsl");
    assert_eq!(struct_layout(&module, "PostUniforms").size, 32);
}
