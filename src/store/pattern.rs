//! Key Pattern Module
//!
//! Compiles Redis `KEYS` glob patterns into matchers for the in-memory store
//! and for key-part filtering above the store.

use glob::Pattern;

use crate::error::{CacheError, Result};

/// Compiles a Redis-style glob into a [`Pattern`].
///
/// Redis allows `**`, `[^...]` and `\` escapes, none of which the `glob` crate
/// accepts as-is, so the pattern is rewritten before compiling.
pub fn compile_glob(pattern: &str) -> Result<Pattern> {
    Pattern::new(&translate(pattern))
        .map_err(|e| CacheError::InvalidArgument(format!("bad pattern '{}': {}", pattern, e)))
}

/// Rewrites Redis glob syntax into `glob` crate syntax.
///
/// - runs of `*` collapse to one `*`
/// - `[^` becomes `[!`
/// - `\x` becomes `[x]` for metacharacters and plain `x` otherwise
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        if in_class {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                ']' => {
                    in_class = false;
                    out.push(']');
                }
                _ => out.push(c),
            }
            continue;
        }

        match c {
            '*' => {
                out.push('*');
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
            }
            '[' => {
                in_class = true;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('!');
                }
            }
            '\\' => match chars.next() {
                Some(meta @ ('*' | '?' | '[' | ']')) => {
                    out.push('[');
                    out.push(meta);
                    out.push(']');
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, key: &str) -> bool {
        compile_glob(pattern).unwrap().matches(key)
    }

    #[test]
    fn test_double_star_collapses() {
        assert_eq!(translate("u**"), "u*");
        assert_eq!(translate("**"), "*");
        assert!(matches("**", "cache:session-cache:u1"));
        assert!(matches("cache:session-cache:u**", "cache:session-cache:u1"));
        assert!(matches("cache:*:**", "cache:statistics:daily"));
    }

    #[test]
    fn test_negated_class() {
        assert_eq!(translate("[^a]bc"), "[!a]bc");
        assert!(matches("[^a]bc", "xbc"));
        assert!(!matches("[^a]bc", "abc"));
    }

    #[test]
    fn test_escapes() {
        assert_eq!(translate(r"a\*"), "a[*]");
        assert!(matches(r"a\*", "a*"));
        assert!(!matches(r"a\*", "ab"));
        assert!(matches(r"a\?b", "a?b"));
        assert!(!matches(r"a\?b", "axb"));
        assert!(matches(r"user\:1", "user:1"));
        assert!(matches(r"h\[x\]", "h[x]"));
    }

    #[test]
    fn test_plain_redis_syntax_unchanged() {
        assert_eq!(translate("user:?:[a-c]*"), "user:?:[a-c]*");
        assert!(matches("user:?:[a-c]*", "user:1:b42"));
        assert!(matches("user:*", "user:a:b"));
    }

    #[test]
    fn test_unclosed_class_rejected() {
        assert!(matches!(
            compile_glob("app:["),
            Err(CacheError::InvalidArgument(_))
        ));
    }
}
