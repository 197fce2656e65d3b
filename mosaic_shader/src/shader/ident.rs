/// Generated GLSL identifiers

use std::fmt;

/// A GLSL identifier produced by `ShaderBuilder::fresh`
///
/// Identifiers embed the builder's `id`, so fragments from builders with
/// distinct ids never collide once composed into one program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    pub(crate) fn new(name: &str, counter: u32, id: u8) -> Self {
        Self(format!("_{}_{}_{:02x}", name, counter, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Ident> for String {
    fn from(ident: Ident) -> String {
        ident.0
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
