/// Trims and lowercases an email. Absent or blank input yields an empty string.
pub fn normalize_email(value: Option<&str>) -> String {
    value
        .map(|raw| raw.trim().to_lowercase())
        .unwrap_or_default()
}
