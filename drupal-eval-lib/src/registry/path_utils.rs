/// Makes a string usable as a single file name component.
///
/// Traversal sequences and characters that are special on common filesystems
/// are replaced with `_`.
#[must_use]
pub fn sanitize_path_component(s: &str) -> String {
    // ".." goes first so a lone "." in names like "8.x" survives
    s.replace("..", "__")
        .replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}
