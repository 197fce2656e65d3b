/// ShaderBuilder - mutable, single-owner accumulator of shader fragments
///
/// Rendering passes append code blocks and declare the resources those
/// blocks need. Every mutation is a state transition that either succeeds or
/// poisons the builder: once failed, the builder stays failed (until reset),
/// every further mutation is a no-op and `finalize` returns `None`. A chain
/// of passes can therefore run to completion and the caller checks
/// `is_failed()` once at the end.
///
/// Thread-safety: a builder must be confined to one owner at a time.
/// Distinct builders share nothing and may be used from different threads.

use std::fmt;
use rustc_hash::FxHashSet;
use crate::gpu::GlslVersion;
use super::binding::{ShaderConst, ShaderDesc, ShaderVa, ShaderVar};
use super::ident::Ident;
use super::params::ShaderParams;
use super::signature::ShaderSig;

const SOURCE: &str = "mosaic::ShaderBuilder";

// ===== FAILURE REASONS =====

/// Why a builder entered the failed state (first violation only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// A fragment required an input the builder does not currently produce
    SignatureMismatch { expected: ShaderSig, found: ShaderSig },
    /// A fragment tried to produce an input-only signature
    InvalidOutputSignature(ShaderSig),
    /// The input signature was declared after code was appended
    InputAfterCode,
    /// A different output size was already declared
    OutputSizeConflict { current: (u32, u32), requested: (u32, u32) },
    /// A vertex attribute / variable / descriptor / constant name is taken
    DuplicateName(String),
    /// A binding whose data does not match its declaration
    InvalidBinding(String),
    /// Compute mode requested without compute support
    ComputeUnsupported,
    /// Work group size is zero or exceeds the device limits
    InvalidComputeGroup { requested: [u32; 2] },
    /// Two fixed, different work group sizes were requested
    ComputeGroupMismatch { current: [u32; 2], requested: [u32; 2] },
    /// Shared memory requirement exceeds the device limit
    SharedMemoryExceeded { requested: usize, limit: usize },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::SignatureMismatch { expected, found } => {
                write!(f, "signature mismatch: fragment expects {} but shader produces {}", expected, found)
            }
            FailureReason::InvalidOutputSignature(sig) => {
                write!(f, "{} is not a valid output signature", sig)
            }
            FailureReason::InputAfterCode => write!(f, "input signature declared after code was appended"),
            FailureReason::OutputSizeConflict { current, requested } => write!(
                f,
                "output size {}x{} conflicts with already declared {}x{}",
                requested.0, requested.1, current.0, current.1
            ),
            FailureReason::DuplicateName(name) => write!(f, "duplicate binding name '{}'", name),
            FailureReason::InvalidBinding(name) => write!(f, "binding '{}' does not match its declaration", name),
            FailureReason::ComputeUnsupported => write!(f, "compute shaders are not supported"),
            FailureReason::InvalidComputeGroup { requested } => {
                write!(f, "invalid work group size {}x{}", requested[0], requested[1])
            }
            FailureReason::ComputeGroupMismatch { current, requested } => write!(
                f,
                "work group size {}x{} conflicts with {}x{}",
                requested[0], requested[1], current[0], current[1]
            ),
            FailureReason::SharedMemoryExceeded { requested, limit } => {
                write!(f, "shared memory {} bytes exceeds limit of {} bytes", requested, limit)
            }
        }
    }
}

// ===== COMPUTE STATE =====

/// Accumulated compute requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ComputeRequest {
    pub(crate) group_size: [u32; 2],
    /// The group size may still be replaced by a later fixed request
    pub(crate) flexible: bool,
    pub(crate) shmem: usize,
}

// ===== SHADER BUILDER =====

/// Mutable shader under construction
pub struct ShaderBuilder {
    pub(crate) params: ShaderParams,
    pub(crate) glsl: GlslVersion,
    pub(crate) failure: Option<FailureReason>,
    pub(crate) input: ShaderSig,
    pub(crate) output: ShaderSig,
    pub(crate) output_size: Option<(u32, u32)>,
    pub(crate) prelude: Vec<String>,
    pub(crate) body: Vec<String>,
    pub(crate) vertex_attribs: Vec<ShaderVa>,
    pub(crate) variables: Vec<ShaderVar>,
    pub(crate) descriptors: Vec<ShaderDesc>,
    pub(crate) constants: Vec<ShaderConst>,
    pub(crate) steps: Vec<String>,
    pub(crate) compute: Option<ComputeRequest>,
    /// Every name bound or generated so far
    names: FxHashSet<String>,
    fresh_counter: u32,
}

impl ShaderBuilder {
    /// Create a new, blank builder
    pub fn new(params: ShaderParams) -> Self {
        let glsl = params.effective_glsl();
        Self {
            params,
            glsl,
            failure: None,
            input: ShaderSig::None,
            output: ShaderSig::None,
            output_size: None,
            prelude: Vec::new(),
            body: Vec::new(),
            vertex_attribs: Vec::new(),
            variables: Vec::new(),
            descriptors: Vec::new(),
            constants: Vec::new(),
            steps: Vec::new(),
            compute: None,
            names: FxHashSet::default(),
            fresh_counter: 0,
        }
    }

    /// Return to a blank slate without releasing internal memory
    ///
    /// Clears the failed state. Results finalized earlier are unaffected
    /// (they own their data) but no longer describe this builder.
    pub fn reset(&mut self, params: ShaderParams) {
        self.glsl = params.effective_glsl();
        self.params = params;
        self.failure = None;
        self.input = ShaderSig::None;
        self.output = ShaderSig::None;
        self.output_size = None;
        self.prelude.clear();
        self.body.clear();
        self.vertex_attribs.clear();
        self.variables.clear();
        self.descriptors.clear();
        self.constants.clear();
        self.steps.clear();
        self.compute = None;
        self.names.clear();
        self.fresh_counter = 0;
    }

    // ===== QUERIES =====

    pub fn params(&self) -> &ShaderParams {
        &self.params
    }

    /// Identifier used to namespace generated symbols
    pub fn id(&self) -> u8 {
        self.params.id
    }

    /// Frame index for temporal effects
    pub fn index(&self) -> u8 {
        self.params.index
    }

    /// Temporal effects are enabled (nonzero frame index)
    pub fn is_temporal(&self) -> bool {
        self.params.index != 0
    }

    /// Effective capability descriptor
    pub fn glsl(&self) -> &GlslVersion {
        &self.glsl
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// First invariant violation, if any
    pub fn failure(&self) -> Option<&FailureReason> {
        self.failure.as_ref()
    }

    /// The shader must be dispatched as a compute shader
    pub fn is_compute(&self) -> bool {
        self.compute.is_some()
    }

    /// Required output size, if any. `None` means any size works.
    pub fn output_size(&self) -> Option<(u32, u32)> {
        self.output_size
    }

    /// Signature the function takes
    pub fn input_signature(&self) -> ShaderSig {
        self.input
    }

    /// Signature the accumulated code currently produces
    pub fn signature(&self) -> ShaderSig {
        self.output
    }

    /// No code has been appended yet
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    // ===== MUTATION API =====

    /// Declare the signature the generated function takes
    ///
    /// Only legal before any code was appended; the current signature
    /// becomes `sig` so the first fragment must require it.
    pub fn declare_input(&mut self, sig: ShaderSig) {
        if self.is_failed() {
            return;
        }
        if !self.body.is_empty() {
            self.fail(FailureReason::InputAfterCode);
            return;
        }
        self.input = sig;
        self.output = sig;
    }

    /// Append a code block that consumes `input` and produces `output`
    ///
    /// Fails (discarding the block) if `input` differs from the current
    /// signature, or if `output` is input-only.
    pub fn append(&mut self, input: ShaderSig, output: ShaderSig, code: impl Into<String>) {
        if self.is_failed() {
            return;
        }
        if input != self.output {
            self.fail(FailureReason::SignatureMismatch { expected: input, found: self.output });
            return;
        }
        if !output.is_valid_output() {
            self.fail(FailureReason::InvalidOutputSignature(output));
            return;
        }
        let code = code.into();
        crate::engine_trace!(SOURCE, "[{:02x}] append {} -> {} ({} bytes)", self.params.id, input, output, code.len());
        self.body.push(code);
        self.output = output;
    }

    /// Append global-scope GLSL (helper functions, shared arrays...)
    pub fn append_prelude(&mut self, code: impl Into<String>) {
        if self.is_failed() {
            return;
        }
        self.prelude.push(code.into());
    }

    /// Require a specific output size
    ///
    /// Redeclaring the same size is a no-op; any different size fails.
    pub fn declare_output_size(&mut self, width: u32, height: u32) {
        if self.is_failed() {
            return;
        }
        match self.output_size {
            Some(current) if current != (width, height) => {
                self.fail(FailureReason::OutputSizeConflict { current, requested: (width, height) });
            }
            _ => self.output_size = Some((width, height)),
        }
    }

    /// Generate an identifier unique within this builder
    ///
    /// The result embeds the builder id, keeping it distinct from identifiers
    /// generated by other builders of the same program. A failed builder
    /// hands out the next candidate without claiming it.
    pub fn fresh(&mut self, name: &str) -> Ident {
        if self.is_failed() {
            return Ident::new(name, self.fresh_counter, self.params.id);
        }
        loop {
            let ident = Ident::new(name, self.fresh_counter, self.params.id);
            self.fresh_counter += 1;
            if self.names.insert(ident.as_str().to_string()) {
                return ident;
            }
        }
    }

    /// Bind a vertex attribute
    pub fn bind_vertex_attrib(&mut self, va: ShaderVa) {
        if self.is_failed() || !self.claim_name(&va.attr.name, va.is_valid()) {
            return;
        }
        self.vertex_attribs.push(va);
    }

    /// Bind a variable
    pub fn bind_var(&mut self, var: ShaderVar) {
        if self.is_failed() || !self.claim_name(&var.var.name, var.is_valid()) {
            return;
        }
        self.variables.push(var);
    }

    /// Bind a descriptor (texture or buffer)
    pub fn bind_desc(&mut self, desc: ShaderDesc) {
        if self.is_failed() || !self.claim_name(&desc.desc.name, desc.is_valid()) {
            return;
        }
        self.descriptors.push(desc);
    }

    /// Bind a constant
    ///
    /// With `dynamic_constants` set, the constant lands in the variable
    /// manifest as a dynamic variable, unless it is `compile_time`.
    pub fn bind_const(&mut self, constant: ShaderConst) {
        if self.is_failed() || !self.claim_name(&constant.name, constant.is_valid()) {
            return;
        }
        if self.params.dynamic_constants && !constant.compile_time {
            self.variables.push(constant.to_dynamic_var());
        } else {
            self.constants.push(constant);
        }
    }

    /// Switch to compute mode with a `bw` x `bh` work group
    ///
    /// A `flexible` group size yields to any later fixed request; two fixed
    /// requests must agree. Shared memory is the largest amount requested.
    pub fn try_compute(&mut self, bw: u32, bh: u32, flexible: bool, shmem: usize) {
        if self.is_failed() {
            return;
        }
        if !self.glsl.compute {
            self.fail(FailureReason::ComputeUnsupported);
            return;
        }
        if bw == 0 || bh == 0 || !self.glsl.fits_group(bw, bh) {
            self.fail(FailureReason::InvalidComputeGroup { requested: [bw, bh] });
            return;
        }

        let requested = [bw, bh];
        let next = match self.compute {
            None => ComputeRequest { group_size: requested, flexible, shmem },
            Some(current) => {
                let (group_size, flexible) = if current.flexible {
                    if flexible { (current.group_size, true) } else { (requested, false) }
                } else if flexible || current.group_size == requested {
                    (current.group_size, false)
                } else {
                    self.fail(FailureReason::ComputeGroupMismatch {
                        current: current.group_size,
                        requested,
                    });
                    return;
                };
                ComputeRequest { group_size, flexible, shmem: current.shmem.max(shmem) }
            }
        };

        let limit = self.glsl.max_shmem_size;
        if limit != 0 && next.shmem > limit {
            self.fail(FailureReason::SharedMemoryExceeded { requested: next.shmem, limit });
            return;
        }
        self.compute = Some(next);
    }

    /// Record a human-readable label for what a pass did. Never fails.
    pub fn describe(&mut self, label: impl Into<String>) {
        self.steps.push(label.into());
    }

    // ===== INTERNAL =====

    /// Reserve a binding name; fails the builder on duplicates or invalid data
    fn claim_name(&mut self, name: &str, valid: bool) -> bool {
        if !valid {
            self.fail(FailureReason::InvalidBinding(name.to_string()));
            return false;
        }
        if !self.names.insert(name.to_string()) {
            self.fail(FailureReason::DuplicateName(name.to_string()));
            return false;
        }
        true
    }

    /// Enter the failed state (absorbing: only the first reason is kept)
    fn fail(&mut self, reason: FailureReason) {
        if self.failure.is_none() {
            crate::engine_error!(SOURCE, "[{:02x}] shader failed: {}", self.params.id, reason);
            self.failure = Some(reason);
        }
    }
}

impl fmt::Debug for ShaderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderBuilder")
            .field("id", &self.params.id)
            .field("failure", &self.failure)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
