/// Designator assigned to version tokens that carry no letter at all, such
/// as `2019.4.0`. Sorts after the common Unity stream letters (`a`, `b`,
/// `f`) and before patch releases (`p`).
pub const DEFAULT_DESIGNATOR: char = 'o';

/// Numeric versions need at least a major and a minor component.
pub(crate) const MIN_VERSION_COMPONENTS: usize = 2;

/// The literal that opens every struct definition we know how to extract.
pub(crate) fn typedef_pattern(structure: &str) -> String {
    format!("typedef struct {structure}\n")
}
