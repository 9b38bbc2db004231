//! PATH rewriting for a new Java bin directory

/// Substrings marking a PATH entry as belonging to some Java installation.
///
/// Matching is a plain case-sensitive `contains`, so unrelated directories
/// such as `/opt/myjdktools` are removed too.
pub const JAVA_MARKERS: [&str; 3] = ["java", "jdk", "jre"];

/// Does this PATH entry look like a Java directory?
#[must_use]
pub fn is_java_segment(segment: &str) -> bool {
    JAVA_MARKERS.iter().any(|marker| segment.contains(marker))
}

/// Case folding used for every path comparison (PATH entries, install roots).
///
/// Full Unicode lowercasing, matching how Windows compares paths closer than
/// ASCII-only folding does.
#[must_use]
pub fn fold_case(path: &str) -> String {
    path.to_lowercase()
}

/// Rebuild `current` so that `bin_dir` is the first and only Java entry.
///
/// Empty segments (e.g. from a trailing separator) are kept in place.
#[must_use]
pub fn rebuild_path(current: &str, bin_dir: &str, separator: char) -> String {
    if current.is_empty() {
        return bin_dir.to_string();
    }

    let folded_bin = fold_case(bin_dir);
    let kept = current
        .split(separator)
        .filter(|segment| !is_java_segment(segment) && fold_case(segment) != folded_bin);

    std::iter::once(bin_dir)
        .chain(kept)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// PATH entries that currently look like Java directories
#[must_use]
pub fn java_segments(current: &str, separator: char) -> Vec<&str> {
    current
        .split(separator)
        .filter(|segment| is_java_segment(segment))
        .collect()
}
