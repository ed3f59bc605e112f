/// Marker that tags a stash entry as created by this application rather
/// than directly by a user.
///
/// The full message format, `!!GitHub_Desktop<{branch}@{sha}>`, is a
/// compatibility contract: writers must emit exactly this pattern and
/// readers must accept exactly this pattern.
pub const STASH_ENTRY_MARKER: &str = "!!GitHub_Desktop";

const MARKER_OPEN: &str = "!!GitHub_Desktop<";

/// Fields recovered from an application stash message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashMessage {
    pub branch_name: String,
    pub tip_sha: String,
}

/// Build the marker message for a stash entry.
///
/// `branch_name` and `tip_sha` must not contain `<`, `>` or `@`; both are
/// controlled inputs (a branch name and a commit hash), so this is a
/// documented constraint rather than a validated one.
pub fn format_stash_message(branch_name: &str, tip_sha: &str) -> String {
    format!("{STASH_ENTRY_MARKER}<{branch_name}@{tip_sha}>")
}

/// Decode an application stash message, or return `None` for a foreign one.
///
/// The stash primitive stores the subject as `On <branch>: <message>`, so
/// the marker is matched as the terminal span of the input: a bare marker
/// string round-trips, a primitive-prefixed subject decodes, and anything
/// without a well-formed marker at the end is foreign.
pub fn parse_stash_message(message: &str) -> Option<StashMessage> {
    let start = message.rfind(MARKER_OPEN)?;
    let body = message[start + MARKER_OPEN.len()..].strip_suffix('>')?;
    if body.contains('<') || body.contains('>') {
        return None;
    }

    let (branch_name, tip_sha) = body.rsplit_once('@')?;
    if branch_name.is_empty() || tip_sha.is_empty() {
        return None;
    }

    Some(StashMessage {
        branch_name: branch_name.to_string(),
        tip_sha: tip_sha.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matches_compatibility_contract() {
        let message =
            format_stash_message("master", "bc45b3b97993eed2c3d7872a0b766b3e29a12e4b");

        assert_eq!(
            message,
            "!!GitHub_Desktop<master@bc45b3b97993eed2c3d7872a0b766b3e29a12e4b>"
        );
    }

    #[test]
    fn test_round_trip() {
        let message = format_stash_message("feature/login", "a1b2c3d4");
        let parsed = parse_stash_message(&message).unwrap();

        assert_eq!(parsed.branch_name, "feature/login");
        assert_eq!(parsed.tip_sha, "a1b2c3d4");
    }

    #[test]
    fn test_parse_primitive_prefixed_subject() {
        let parsed =
            parse_stash_message("On master: !!GitHub_Desktop<master@a1b2c3d4>").unwrap();

        assert_eq!(parsed.branch_name, "master");
        assert_eq!(parsed.tip_sha, "a1b2c3d4");
    }

    #[test]
    fn test_parse_rejects_foreign_messages() {
        for message in [
            "",
            "WIP on master: 1234567 last commit",
            "On master: saved for later",
            "Should get filtered",
            "!!GitHub_Desktop",
            "!!GitHub_Desktop<master>",
            "!!GitHub_Desktop<@abc>",
            "!!GitHub_Desktop<master@>",
            "!!GitHub_Desktop<master@abc",
            "!!github_desktop<master@abc>",
        ] {
            assert!(
                parse_stash_message(message).is_none(),
                "expected {message:?} to be foreign"
            );
        }
    }

    #[test]
    fn test_parse_rejects_trailing_text_after_marker() {
        assert!(parse_stash_message("!!GitHub_Desktop<master@abc> and more").is_none());
        assert!(parse_stash_message("!!GitHub_Desktop<master@abc>>").is_none());
    }
}
