/// ShaderResult - immutable snapshot produced by `ShaderBuilder::finalize`
///
/// A result describes one complete callable GLSL function plus everything
/// a backend needs to compile and bind it. It owns copies of all manifests,
/// so mutating or resetting the builder afterwards never corrupts it; it
/// simply stops describing the builder's current state.

use super::binding::{ShaderConst, ShaderDesc, ShaderVa, ShaderVar};
use super::builder::ShaderBuilder;
use super::params::ShaderParams;
use super::signature::ShaderSig;

const SOURCE: &str = "mosaic::ShaderBuilder";

/// Finalized shader fragment
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderResult {
    /// Copy of the parameters the builder was created with
    pub params: ShaderParams,

    /// Friendly names of the operations performed, in order
    pub steps: Vec<String>,
    /// Steps tallied and comma separated, e.g. `"debanding, scaling x2"`
    pub description: String,

    /// Prelude followed by the function definition
    pub glsl: String,
    /// Name of the generated function
    pub name: String,
    /// What the function takes
    pub input: ShaderSig,
    /// What the function returns
    pub output: ShaderSig,

    /// Must be dispatched as a compute shader
    pub compute: bool,
    /// Work group size (both 0 unless `compute`)
    pub compute_group_size: [u32; 2],
    /// Shared memory required per work group (0 unless `compute`)
    pub compute_shmem: usize,

    /// Required output size, if any
    pub output_size: Option<(u32, u32)>,

    pub vertex_attribs: Vec<ShaderVa>,
    pub variables: Vec<ShaderVar>,
    pub descriptors: Vec<ShaderDesc>,
    pub constants: Vec<ShaderConst>,
}

/// Tally step labels in first-appearance order: `"a x2, b"`
pub(crate) fn describe_steps(steps: &[String]) -> String {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for step in steps {
        match tally.iter_mut().find(|(label, _)| *label == step.as_str()) {
            Some((_, count)) => *count += 1,
            None => tally.push((step.as_str(), 1)),
        }
    }
    tally
        .iter()
        .map(|(label, count)| {
            if *count > 1 { format!("{} x{}", label, count) } else { label.to_string() }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ShaderBuilder {
    /// Name of the generated function, namespaced by the builder id
    pub fn function_name(&self) -> String {
        format!("_main_{:02x}", self.params.id)
    }

    /// Freeze the accumulated state into a `ShaderResult`
    ///
    /// Pure: the builder is not modified and repeated calls on an unchanged
    /// builder return equal results. Returns `None` if the builder failed or
    /// if its current signature cannot be returned from a function (a
    /// sampler input with no code consuming it). An empty builder yields a
    /// passthrough function.
    pub fn finalize(&self) -> Option<ShaderResult> {
        if let Some(reason) = &self.failure {
            crate::engine_debug!(SOURCE, "[{:02x}] not finalizing failed shader ({})", self.params.id, reason);
            return None;
        }
        if !self.output.is_valid_output() {
            crate::engine_debug!(
                SOURCE,
                "[{:02x}] not finalizing: {} input is never consumed",
                self.params.id,
                self.output
            );
            return None;
        }

        let name = self.function_name();
        let glsl = self.generate_glsl(&name);
        let compute = self.compute;

        Some(ShaderResult {
            params: self.params.clone(),
            steps: self.steps.clone(),
            description: describe_steps(&self.steps),
            glsl,
            name,
            input: self.input,
            output: self.output,
            compute: compute.is_some(),
            compute_group_size: compute.map(|c| c.group_size).unwrap_or([0, 0]),
            compute_shmem: compute.map(|c| c.shmem).unwrap_or(0),
            output_size: self.output_size,
            vertex_attribs: self.vertex_attribs.clone(),
            variables: self.variables.clone(),
            descriptors: self.descriptors.clone(),
            constants: self.constants.clone(),
        })
    }

    fn generate_glsl(&self, name: &str) -> String {
        let mut glsl = String::new();
        for block in &self.prelude {
            glsl.push_str(block);
            glsl.push('\n');
        }

        glsl.push_str(&format!(
            "{} {}({}) {{\n",
            self.output.glsl_return_type(),
            name,
            self.input.glsl_params()
        ));
        // `color` is a parameter for color input; declare it otherwise
        if self.output == ShaderSig::Color && self.input != ShaderSig::Color {
            glsl.push_str("vec4 color = vec4(0.0, 0.0, 0.0, 1.0);\n");
        }
        for block in &self.body {
            glsl.push_str(block);
            if !block.ends_with('\n') {
                glsl.push('\n');
            }
        }
        if self.output == ShaderSig::Color {
            glsl.push_str("return color;\n");
        }
        glsl.push_str("}\n");
        glsl
    }
}

impl ShaderResult {
    /// Number of step labels
    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&ShaderVar> {
        self.variables.iter().find(|v| v.var.name == name)
    }

    /// Look up a descriptor by name
    pub fn descriptor(&self, name: &str) -> Option<&ShaderDesc> {
        self.descriptors.iter().find(|d| d.desc.name == name)
    }

    /// Look up a constant by name
    pub fn constant(&self, name: &str) -> Option<&ShaderConst> {
        self.constants.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
