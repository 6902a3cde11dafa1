//! Template types for typed variable injection.
//!
//! Placeholders are `__NAME__` tokens (uppercase letters and single
//! underscores). Rendering is one pass over the template: inserted values
//! are never scanned again, so a value that itself contains placeholder
//! text comes out verbatim.

use std::borrow::Cow;
use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    /// Value for placeholder `name` (without the surrounding `__`).
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        fill(self.content, vars)
    }
}

const MARK: &str = "__";

/// Substitute every known placeholder in `content` exactly once.
fn fill(content: &str, vars: &impl TemplateVars) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find(MARK) {
        out.push_str(&rest[..start]);
        let after = &rest[start + MARK.len()..];

        let value = after.find(MARK).and_then(|end| {
            let name = &after[..end];
            is_placeholder_name(name)
                .then(|| vars.lookup(name))
                .flatten()
                .map(|value| (value, end))
        });

        match value {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &after[end + MARK.len()..];
            }
            None => {
                // Not a placeholder: keep one underscore and rescan the template
                out.push('_');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && !name.ends_with('_')
        && name.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Vars(&'static str, &'static str);

    impl TemplateVars for Vars {
        fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "FIRST" => Some(Cow::Borrowed(self.0)),
                "SECOND_ONE" => Some(Cow::Borrowed(self.1)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_fill_known_placeholders() {
        let out = fill("a __FIRST__ b __SECOND_ONE__ c", &Vars("1", "2"));
        assert_eq!(out, "a 1 b 2 c");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("__FIRST__|__SECOND_ONE__", &Vars("__SECOND_ONE__", "__FIRST__"));
        assert_eq!(out, "__SECOND_ONE__|__FIRST__");
    }

    #[test]
    fn test_fill_keeps_unknown_and_stray_underscores() {
        let vars = Vars("x", "y");
        assert_eq!(fill("__UNKNOWN__ __FIRST__", &vars), "__UNKNOWN__ x");
        assert_eq!(fill("a__b __ ___FIRST__", &vars), "a__b __ _x");
        assert_eq!(fill("trailing __", &vars), "trailing __");
    }
}
