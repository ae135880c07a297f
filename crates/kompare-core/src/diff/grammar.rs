//! Micro-parser for the `map[key]: left != right` diff-string grammar.
//!
//! The renderer reads diff strings only through this module. Bump
//! [`GRAMMAR_VERSION`] when the accepted shape changes.

/// Version of the accepted diff-string grammar.
pub const GRAMMAR_VERSION: u32 = 1;

const MAP_PREFIX: &str = "map[";
const SEPARATOR: &str = "!= ";

/// A diff string split into its key and the two compared sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffTriple<'a> {
    pub key: &'a str,
    pub left: &'a str,
    pub right: &'a str,
}

impl DiffTriple<'_> {
    /// True when either side spans several lines.
    pub fn is_multiline(&self) -> bool {
        self.left.contains('\n') || self.right.contains('\n')
    }
}

/// Split `map[key]: rest` into `(key, rest)`.
///
/// The key runs from the prefix to the first `]`, which must be immediately
/// followed by `:`. `rest` is everything after the colon, without one leading
/// space.
pub fn split_map_key(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix(MAP_PREFIX)?;
    let close = body.find(']')?;
    let after = body[close + 1..].strip_prefix(':')?;
    let value = after.strip_prefix(' ').unwrap_or(after);
    Some((&body[..close], value))
}

/// Split `left != right` at the first separator, trimming both sides.
pub fn split_sides(value: &str) -> Option<(&str, &str)> {
    let (left, right) = value.split_once(SEPARATOR)?;
    Some((left.trim(), right.trim()))
}

/// Parse a full diff string; `None` when it does not follow the grammar.
pub fn parse(input: &str) -> Option<DiffTriple<'_>> {
    let (key, value) = split_map_key(input)?;
    let (left, right) = split_sides(value)?;
    Some(DiffTriple { key, left, right })
}
