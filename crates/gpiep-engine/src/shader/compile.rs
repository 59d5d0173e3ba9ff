use std::collections::BTreeMap;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{ProgramError, ShaderError, ShaderStage};

/// A single validated shader stage.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    stage: ShaderStage,
    label: String,
    source: String,
    entry_point: String,
    module: naga::Module,
}

impl CompiledStage {
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[inline]
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn entry(&self) -> Option<&naga::EntryPoint> {
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.name == self.entry_point)
    }
}

/// Bind group slot of a named resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformBinding {
    pub group: u32,
    pub binding: u32,
}

/// A vertex + fragment pair whose stage interface has been checked.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    label: String,
    vertex: CompiledStage,
    fragment: CompiledStage,
    uniforms: BTreeMap<String, UniformBinding>,
}

/// GPU shader modules for both stages of a [`LinkedProgram`].
pub struct ProgramModules {
    pub vertex: wgpu::ShaderModule,
    pub vertex_entry: String,
    pub fragment: wgpu::ShaderModule,
    pub fragment_entry: String,
}

impl LinkedProgram {
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    #[inline]
    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    /// Looks up a bound resource (uniform, texture or sampler) by name.
    pub fn uniform_binding(&self, name: &str) -> Option<UniformBinding> {
        self.uniforms.get(name).copied()
    }

    /// Creates one `wgpu::ShaderModule` per stage.
    ///
    /// Both sources already passed validation, so device-side creation does
    /// not raise validation errors.
    pub fn create_modules(&self, device: &wgpu::Device) -> ProgramModules {
        let create = |stage: &CompiledStage| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(stage.label()),
                source: wgpu::ShaderSource::Wgsl(stage.source.as_str().into()),
            })
        };

        ProgramModules {
            vertex: create(&self.vertex),
            vertex_entry: self.vertex.entry_point.clone(),
            fragment: create(&self.fragment),
            fragment_entry: self.fragment.entry_point.clone(),
        }
    }
}

/// Parses and validates one WGSL stage.
///
/// The module must declare an entry point for `stage`; the first one found is used.
pub fn compile(
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ShaderError::compile(stage, label, e.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| ShaderError::compile(stage, label, e.emit_to_string(source)))?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga())
        .map(|ep| ep.name.clone())
        .ok_or_else(|| {
            ShaderError::compile(stage, label, format!("no @{stage} entry point in module"))
        })?;

    Ok(CompiledStage {
        stage,
        label: label.to_string(),
        source: source.to_string(),
        entry_point,
        module,
    })
}

/// Checks that `vertex` feeds every input `fragment` reads and merges their bindings.
pub fn link(
    label: &str,
    vertex: CompiledStage,
    fragment: CompiledStage,
) -> Result<LinkedProgram, ShaderError> {
    if vertex.stage != ShaderStage::Vertex {
        return Err(ShaderError::link(label, format!("`{}` is not a vertex stage", vertex.label)));
    }
    if fragment.stage != ShaderStage::Fragment {
        return Err(ShaderError::link(
            label,
            format!("`{}` is not a fragment stage", fragment.label),
        ));
    }

    let (Some(vs_entry), Some(fs_entry)) = (vertex.entry(), fragment.entry()) else {
        return Err(ShaderError::link(label, "entry point disappeared after compilation"));
    };

    let mut outputs = Vec::new();
    if let Some(result) = &vs_entry.function.result {
        collect_locations(&vertex.module, result.ty, result.binding.as_ref(), &mut outputs);
    }

    let mut inputs = Vec::new();
    for arg in &fs_entry.function.arguments {
        collect_locations(&fragment.module, arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    let missing: Vec<String> = inputs
        .iter()
        .filter(|loc| !outputs.contains(loc))
        .map(|loc| format!("@location({loc})"))
        .collect();
    if !missing.is_empty() {
        return Err(ShaderError::link(
            label,
            format!(
                "fragment inputs {} are not written by the vertex stage",
                missing.join(", ")
            ),
        ));
    }

    let mut uniforms: BTreeMap<String, UniformBinding> = BTreeMap::new();
    for stage in [&vertex, &fragment] {
        for (name, slot) in bound_globals(&stage.module) {
            match uniforms.get(&name) {
                Some(existing) if *existing != slot => {
                    return Err(ShaderError::link(
                        label,
                        format!(
                            "`{name}` is bound at @group({}) @binding({}) and @group({}) @binding({})",
                            existing.group, existing.binding, slot.group, slot.binding
                        ),
                    ));
                }
                _ => {
                    uniforms.insert(name, slot);
                }
            }
        }
    }

    Ok(LinkedProgram {
        label: label.to_string(),
        vertex,
        fragment,
        uniforms,
    })
}

/// Compiles both stages, then links them if both compiled.
///
/// Each stage is always compiled, so a program with two broken stages reports
/// both diagnostics.
pub fn compile_program(
    label: &str,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<LinkedProgram, ProgramError> {
    let vertex = compile(ShaderStage::Vertex, &format!("{label} vertex"), vertex_source);
    let fragment = compile(ShaderStage::Fragment, &format!("{label} fragment"), fragment_source);

    match (vertex, fragment) {
        (Ok(vertex), Ok(fragment)) => link(label, vertex, fragment).map_err(ProgramError::from),
        (vertex, fragment) => Err(ProgramError {
            errors: [vertex.err(), fragment.err()].into_iter().flatten().collect(),
        }),
    }
}

fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(*location),
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn bound_globals(module: &naga::Module) -> impl Iterator<Item = (String, UniformBinding)> + '_ {
    module.global_variables.iter().filter_map(|(_, var)| {
        let name = var.name.clone()?;
        let rb = var.binding.as_ref()?;
        Some((name, UniformBinding { group: rb.group, binding: rb.binding }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{ShaderErrorKind, INFO_LOG_CAPACITY};

    const VS: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@group(0) @binding(0) var<uniform> transform: mat4x4<f32>;

@vertex
fn vs_main(model: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = transform * vec4<f32>(model.position, 1.0);
    out.color = model.color;
    return out;
}
"#;

    const FS: &str = r#"
struct FragmentInput {
    @location(0) color: vec3<f32>,
};

@fragment
fn fs_main(frag: FragmentInput) -> @location(0) vec4<f32> {
    return vec4<f32>(frag.color, 1.0);
}
"#;

    const FS_NEEDS_UV: &str = r#"
@fragment
fn fs_main(@location(3) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#;

    #[test]
    fn valid_pair_links() {
        let program = compile_program("cube", VS, FS).expect("valid program");
        assert_eq!(program.vertex().entry_point(), "vs_main");
        assert_eq!(program.fragment().entry_point(), "fs_main");
    }

    #[test]
    fn transform_uniform_is_reflected() {
        let program = compile_program("cube", VS, FS).expect("valid program");
        assert_eq!(
            program.uniform_binding("transform"),
            Some(UniformBinding { group: 0, binding: 0 })
        );
        assert_eq!(program.uniform_binding("missing"), None);
    }

    #[test]
    fn syntax_error_reports_diagnostic() {
        let err = compile(ShaderStage::Vertex, "broken", "fn vs_main( {").unwrap_err();
        assert_eq!(err.kind, ShaderErrorKind::Compile(ShaderStage::Vertex));
        assert!(!err.log.is_empty());
        assert!(err.log.len() <= INFO_LOG_CAPACITY);
    }

    #[test]
    fn type_error_reports_diagnostic() {
        let src = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    let x: f32 = vec2<f32>(1.0, 2.0);
    return vec4<f32>(x);
}
"#;
        let err = compile(ShaderStage::Fragment, "typo", src).unwrap_err();
        assert_eq!(err.kind, ShaderErrorKind::Compile(ShaderStage::Fragment));
        assert!(!err.log.is_empty());
    }

    #[test]
    fn missing_entry_point_is_a_compile_error() {
        let err = compile(ShaderStage::Fragment, "vs only", VS).unwrap_err();
        assert!(err.log.contains("fragment"));
    }

    #[test]
    fn unmatched_fragment_input_fails_link() {
        let err = compile_program("mismatch", VS, FS_NEEDS_UV).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].kind, ShaderErrorKind::Link);
        assert!(err.errors[0].log.contains("@location(3)"));
    }

    #[test]
    fn both_broken_stages_are_reported() {
        let err = compile_program("p", "fn vs( {", "fn fs( {").unwrap_err();
        let kinds: Vec<_> = err.errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ShaderErrorKind::Compile(ShaderStage::Vertex),
                ShaderErrorKind::Compile(ShaderStage::Fragment),
            ]
        );
        assert!(err.errors.iter().all(|e| !e.log.is_empty()));
    }

    #[test]
    fn broken_fragment_alone_skips_link() {
        let err = compile_program("p", VS, "fn fs( {").unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].kind, ShaderErrorKind::Compile(ShaderStage::Fragment));
    }

    #[test]
    fn swapped_stages_fail_link() {
        let vs = compile(ShaderStage::Vertex, "vs", VS).expect("vs");
        let fs = compile(ShaderStage::Fragment, "fs", FS).expect("fs");
        let err = link("swapped", fs, vs).unwrap_err();
        assert_eq!(err.kind, ShaderErrorKind::Link);
    }
}
