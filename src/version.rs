// Version information for the Fabstir Label Translator

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-label-translation-2026-10-16";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2026-10-16";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "label-detection",
    "en-pt-translation",
    "per-label-translation",
    "joined-translation",
    "sanitized-errors",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Label Translator {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
