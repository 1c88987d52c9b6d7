//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `merge_clinic <version> (<date> <commit>)` for `--version`.
pub fn version_line() -> String {
    format!(
        "merge_clinic {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
