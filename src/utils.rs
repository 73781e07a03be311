use uuid::Uuid;

/// Boards are stored lower-cased so `/api/threads/General` and
/// `/api/threads/general` address the same board.
pub fn normalize_board(raw: &str) -> String {
    raw.to_lowercase()
}

/// Parses a caller-supplied identifier, stripping any embedded whitespace
/// first. Returns `None` for anything that is not a well-formed UUID, so
/// malformed ids never reach the database driver.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    Uuid::parse_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_board_lower_cases() {
        assert_eq!(normalize_board("FCCBoard"), "fccboard");
        assert_eq!(normalize_board("general"), "general");
    }

    #[test]
    fn parse_id_accepts_valid_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Some(id));
    }

    #[test]
    fn parse_id_strips_whitespace() {
        let id = Uuid::new_v4();
        let padded = format!("  {}\n", id);
        assert_eq!(parse_id(&padded), Some(id));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert_eq!(parse_id("not-a-uuid"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("12345"), None);
    }
}
