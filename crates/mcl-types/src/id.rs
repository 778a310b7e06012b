use chrono::Utc;

/// Generate a record identifier following the observed convention:
/// a fixed uppercase prefix followed by the current epoch milliseconds.
///
/// Identifiers are caller-supplied throughout the system; the store never
/// generates them and enforces no uniqueness beyond last-write-wins. This
/// helper exists so every caller produces collision-resistant IDs the
/// same way.
pub fn fresh_record_id(prefix: &str) -> String {
    format!("{prefix}{}", Utc::now().timestamp_millis())
}
