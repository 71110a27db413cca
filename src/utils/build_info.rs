//! Commit hash and build date stamped in by `build.rs`, shown by `--version`
//! and in the footer.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamps_are_short_hash_and_iso_date() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
        assert!(BUILD_DATE == "unknown" || BUILD_DATE.len() == 10);
    }
}
