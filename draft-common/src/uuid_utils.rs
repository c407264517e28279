//! UUID utilities
//!
//! Concept identifiers travel as URIs whose last path segment is the concept
//! UUID, e.g. `http://www.ft.com/thing/b224ad07-c818-3ad6-94af-a4d351dbb619`.

use uuid::Uuid;

/// Prefix of the fully qualified concept ("thing") URI
pub const THING_URI_PREFIX: &str = "http://www.ft.com/thing/";

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

/// Extract the UUID segment from a concept URI
///
/// Returns the path segment following the last `/`. An id without any `/`,
/// or one ending in `/`, yields an empty string. The segment is not checked
/// to be a well-formed UUID.
pub fn extract_uuid(concept_id: &str) -> &str {
    match concept_id.rfind('/') {
        Some(idx) => &concept_id[idx + 1..],
        None => "",
    }
}

/// Build the fully qualified thing URI for a concept UUID
pub fn thing_uri(uuid: &str) -> String {
    format!("{}{}", THING_URI_PREFIX, uuid)
}
