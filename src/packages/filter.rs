/// Case-insensitive substring search over the listed packages.
///
/// Returns an order-preserving subsequence of `all`; an empty query returns
/// everything.
pub fn filter_packages(all: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    all.iter()
        .filter(|pkg| pkg.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
