/// Shader calling signatures

use std::fmt;

/// Calling convention of a generated shader function
///
/// Determines what the function takes and returns, and therefore which
/// fragments may legally be chained after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderSig {
    /// No input / void output
    #[default]
    None,
    /// A `vec4` color, normalized so that 1.0 is the reference white
    Color,
    /// A `(sampler2D src_tex, vec2 tex_coord)` pair. Only valid as an input
    Sampler,
}

impl ShaderSig {
    /// Whether a finalized function may return this signature
    pub fn is_valid_output(&self) -> bool {
        !matches!(self, ShaderSig::Sampler)
    }

    /// GLSL return type of a function producing this signature
    pub(crate) fn glsl_return_type(&self) -> &'static str {
        match self {
            ShaderSig::Color => "vec4",
            _ => "void",
        }
    }

    /// GLSL parameter list of a function consuming this signature
    pub(crate) fn glsl_params(&self) -> &'static str {
        match self {
            ShaderSig::None => "",
            ShaderSig::Color => "vec4 color",
            ShaderSig::Sampler => "sampler2D src_tex, vec2 tex_coord",
        }
    }
}

impl fmt::Display for ShaderSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderSig::None => write!(f, "none"),
            ShaderSig::Color => write!(f, "color"),
            ShaderSig::Sampler => write!(f, "sampler"),
        }
    }
}
