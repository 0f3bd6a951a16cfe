//! Canonical name transform.
//!
//! Steps, always in this order:
//! 1. `-` becomes `_`
//! 2. spaces become `_` (optional)
//! 3. diacritics are removed (`đ`/`Đ` map to `d`/`D` first; they have no
//!    decomposition), via canonical decomposition with combining marks dropped
//! 4. letters are uppercased
//!
//! The function is total and idempotent.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Options for [`transform_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub replace_spaces: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self { replace_spaces: true }
    }
}

/// Transform `name` into its canonical form.
pub fn transform(name: &str, replace_spaces: bool) -> String {
    transform_with(name, TransformOptions { replace_spaces })
}

pub fn transform_with(name: &str, opts: TransformOptions) -> String {
    let mut s = name.replace('-', "_");
    if opts.replace_spaces {
        s = s.replace(' ', "_");
    }
    strip_diacritics(&s).to_uppercase()
}

/// Remove combining marks after canonical decomposition.
pub fn strip_diacritics(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .nfd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}

/// True when `name` is already a fixed point of the transform.
pub fn is_canonical(name: &str, replace_spaces: bool) -> bool {
    transform(name, replace_spaces) == name
}
