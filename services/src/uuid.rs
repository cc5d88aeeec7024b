use uuid::Uuid;

/// Deterministic UUIDv5 from an arbitrary string id.
///
/// Vector stores that only accept numeric or UUID point ids get a stable key
/// for provider ids such as `tt1375666`; the same input always maps to the
/// same point, so re-storing a movie overwrites it.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_same_uuid() {
        assert_eq!(stable_uuid("tt1375666"), stable_uuid("tt1375666"));
        assert_ne!(stable_uuid("tt1375666"), stable_uuid("tt0816692"));
        assert_eq!(stable_uuid("tt1375666").get_version_num(), 5);
    }
}
