//! Module path normalization.
//!
//! Paths coming from the front end may use either separator. Everything here
//! works on `/`-separated strings so that registry keys and import specifiers
//! are identical on every host platform.

/// Source extensions stripped from module specifiers, longest first.
const KNOWN_EXTENSIONS: [&str; 12] = [
    ".d.mts", ".d.cts", ".d.ts", ".mts", ".cts", ".tsx", ".ts", ".mjs", ".cjs", ".jsx", ".js",
    ".json",
];

/// Replace `\` separators with `/`.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove a known source extension from the end of `path`.
pub fn strip_source_extension(path: &str) -> &str {
    KNOWN_EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}

/// Resolve `.` and `..` segments and collapse repeated separators.
///
/// A leading `/` is preserved. `..` segments that would climb above the root
/// of a relative path are kept so the result stays meaningful.
pub fn normalize_path(path: &str) -> String {
    let path = normalize_slashes(path);
    let is_absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if is_absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if is_absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// The directory part of a `/`-separated file path (`""` for a bare name).
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Build the relative import specifier that reaches `to_file` from `from_dir`.
///
/// The result has its source extension stripped, always uses `/`, and always
/// starts with `./` or `../`:
///
/// ```
/// use tsmeta_common::paths::relative_specifier;
///
/// assert_eq!(relative_specifier("/src/cats", "/src/cats/cat.entity.ts"), "./cat.entity");
/// assert_eq!(relative_specifier("/src/cats/dto", "/src/shared/base.ts"), "../../shared/base");
/// ```
pub fn relative_specifier(from_dir: &str, to_file: &str) -> String {
    let from = normalize_path(from_dir);
    let to = normalize_path(strip_source_extension(&normalize_slashes(to_file)));

    let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_segments
        .iter()
        .zip(to_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_segments.len() {
        parts.push("..");
    }
    parts.extend_from_slice(&to_segments[common..]);

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}

#[cfg(test)]
#[path = "../tests/paths_tests.rs"]
mod tests;
