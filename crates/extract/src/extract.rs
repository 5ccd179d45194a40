//! Brace-balanced extraction of struct definitions from C headers.

use crate::consts::typedef_pattern;
use crate::error::{ErrorKind, Result};
use memchr::{memchr2, memmem};
use tracing::instrument;

/// Locates the definition of `structure` in a header.
///
/// The definition starts at the first `typedef struct <structure>` that is
/// immediately followed by a newline, and ends at the `}` closing the first
/// top-level brace block after it. The trailing `;` (and any typedef alias
/// before it) is not included.
///
/// Only braces are inspected; the body is never tokenized, so braces inside
/// comments or string literals count like any other. `}` characters that
/// appear before the first `{` are ignored.
///
/// Returns `Ok(None)` when the pattern doesn't appear in the header.
///
/// # Errors
///
/// Returns [`MalformedHeaderStruct`](ErrorKind::MalformedHeaderStruct) if the
/// header ends before the block's braces balance.
///
/// # Examples
///
/// ```rust
/// use ihist_extract::find_struct;
///
/// let header = "typedef struct Foo\n{\n    int a;\n} Foo;\n";
/// assert_eq!(find_struct(header, "Foo").unwrap(), Some("typedef struct Foo\n{\n    int a;\n}"));
/// assert_eq!(find_struct(header, "Bar").unwrap(), None);
/// ```
pub fn find_struct<'a>(header: &'a str, structure: &str) -> Result<Option<&'a str>> {
    let pattern = typedef_pattern(structure);
    let bytes = header.as_bytes();
    let Some(start) = memmem::find(bytes, pattern.as_bytes()) else {
        return Ok(None);
    };
    let mut position = start + pattern.len();
    let mut depth: usize = 0;
    let mut opened = false;
    while let Some(offset) = memchr2(b'{', b'}', &bytes[position..]) {
        let index = position + offset;
        position = index + 1;
        if bytes[index] == b'{' {
            depth += 1;
            opened = true;
            continue;
        }
        if !opened {
            // Stray closing brace before the block even started.
            continue;
        }
        depth -= 1;
        if depth == 0 {
            // Both braces are ASCII, so `position` is always a char boundary.
            return Ok(Some(&header[start..position]));
        }
    }
    exn::bail!(ErrorKind::MalformedHeaderStruct {
        structure: structure.to_string(),
        offset: start,
    })
}

/// Extracts the definition of `structure` from a header, never failing.
///
/// Returns an empty string when the struct isn't defined in the header. A
/// definition whose braces never balance is treated the same way, after
/// logging a warning: one truncated header shouldn't sink a whole corpus.
#[instrument(level = "trace", skip(header), fields(header_size = header.len()))]
pub fn extract<'a>(header: &'a str, structure: &str) -> &'a str {
    match find_struct(header, structure) {
        Ok(found) => found.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(structure, error = ?err, "Struct definition is unbalanced; treating as absent");
            ""
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "\
#include <stdint.h>

typedef struct Il2CppType
{
    void* data;
    unsigned int bits;
} Il2CppType;

typedef struct Il2CppClass
{
    const Il2CppImage* image;
    union
    {
        uint32_t a;
        uint32_t b;
    };
    struct { int x; } nested;
} Il2CppClass;
";

    #[test]
    fn test_extracts_simple_struct() {
        assert_eq!(
            extract(HEADER, "Il2CppType"),
            "typedef struct Il2CppType\n{\n    void* data;\n    unsigned int bits;\n}"
        );
    }

    #[test]
    fn test_extracts_through_nested_blocks() {
        let text = extract(HEADER, "Il2CppClass");
        assert!(text.starts_with("typedef struct Il2CppClass\n{"));
        assert!(text.ends_with("struct { int x; } nested;\n}"));
        assert!(!text.contains("} Il2CppClass;"));
    }

    #[test]
    fn test_nested_braces_on_one_line() {
        let header = "typedef struct Foo\n{ int a; { int b; } } ;";
        assert_eq!(extract(header, "Foo"), "typedef struct Foo\n{ int a; { int b; } }");
    }

    #[rstest]
    // Pattern must be followed by a newline.
    #[case("typedef struct Foo { int a; } Foo;")]
    #[case("typedef struct FooBar\n{ int a; }")]
    #[case("typedef struct Foo;\n")]
    #[case("struct Foo\n{ int a; }")]
    #[case("")]
    fn test_absent_struct(#[case] header: &str) {
        assert_eq!(find_struct(header, "Foo").unwrap(), None);
        assert_eq!(extract(header, "Foo"), "");
    }

    #[test]
    fn test_prefix_of_other_name_is_not_a_match() {
        // `Il2CppAssembly` must not match `Il2CppAssemblyName`.
        let header = "typedef struct Il2CppAssemblyName\n{ int a; }\ntypedef struct Il2CppAssembly\n{ int b; }";
        assert_eq!(extract(header, "Il2CppAssembly"), "typedef struct Il2CppAssembly\n{ int b; }");
        assert_eq!(extract(header, "Il2CppAssemblyName"), "typedef struct Il2CppAssemblyName\n{ int a; }");
    }

    #[test]
    fn test_first_definition_wins() {
        let header = "typedef struct Foo\n{ int first; }\ntypedef struct Foo\n{ int second; }";
        assert_eq!(extract(header, "Foo"), "typedef struct Foo\n{ int first; }");
    }

    #[rstest]
    #[case("typedef struct Foo\n} } // odd\n{ int a; } Foo;", "typedef struct Foo\n} } // odd\n{ int a; }")]
    #[case("typedef struct Foo\n} { int a; } Foo;", "typedef struct Foo\n} { int a; }")]
    fn test_stray_closing_braces_before_block(#[case] header: &str, #[case] expected: &str) {
        // Closing braces only count once the block has opened.
        assert_eq!(find_struct(header, "Foo").unwrap(), Some(expected));
    }

    #[rstest]
    #[case("typedef struct Foo\n{ int a; ")]
    #[case("typedef struct Foo\n{ int a; { int b; }")]
    #[case("typedef struct Foo\n")]
    #[case("typedef struct Foo\n} }")]
    fn test_unbalanced_struct(#[case] header: &str) {
        let err = find_struct(header, "Foo").unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedHeaderStruct { structure: "Foo".to_string(), offset: 0 });
        // The infallible variant treats it as absent.
        assert_eq!(extract(header, "Foo"), "");
    }

    #[test]
    fn test_offset_of_unbalanced_struct() {
        let header = "// header\ntypedef struct Foo\n{";
        let err = find_struct(header, "Foo").unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedHeaderStruct { offset: 10, .. }));
    }

    #[test]
    fn test_extract_is_idempotent() {
        for name in ["Il2CppType", "Il2CppClass", "MethodInfo"] {
            assert_eq!(extract(HEADER, name), extract(HEADER, name));
        }
    }

    #[test]
    fn test_non_ascii_content() {
        let header = "// ünïcödé\ntypedef struct Foo\n{ char* name; /* «é» */ }";
        assert_eq!(extract(header, "Foo"), "typedef struct Foo\n{ char* name; /* «é» */ }");
    }
}
