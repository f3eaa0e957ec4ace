/// Branch names that never get a `branch:` annotation in the date field.
const UNANNOTATED_BRANCHES: [&[u8]; 2] = [b"default", b"master"];

/// Build the changelog text mercurial's `changelog.add` would construct for
/// one revision. Manifest is always the empty-manifest sentinel, since this
/// is a metadata-only bundle.
pub fn changelog_text(
    author: &[u8],
    author_time: i64,
    author_timezone: i32,
    branch: &[u8],
    message: &[u8],
) -> Vec<u8> {
    let manifest_hex = [b'0'; 40];
    let date_field = date_field(author_time, author_timezone, branch);

    let mut text = Vec::with_capacity(
        manifest_hex.len() + 1 + author.len() + 1 + date_field.len() + 2 + message.len(),
    );
    text.extend_from_slice(&manifest_hex);
    text.push(b'\n');
    text.extend_from_slice(author);
    text.push(b'\n');
    text.extend_from_slice(&date_field);
    text.push(b'\n');
    text.push(b'\n');
    text.extend_from_slice(message);
    text
}

fn date_field(author_time: i64, author_timezone: i32, branch: &[u8]) -> Vec<u8> {
    // `-author_timezone`: arithmetic negation, not a string sign flip, so
    // timezone 0 renders as "0" rather than "-0".
    let mut field = format!("{} {}", author_time, -(author_timezone as i64)).into_bytes();
    if !UNANNOTATED_BRANCHES.contains(&branch) {
        field.extend_from_slice(b" branch:");
        field.extend_from_slice(branch);
    }
    field
}

/// `"[{short}] {message}"` where `short` is the first 8 hex characters of
/// the revision id.
pub fn decorate_message(rev_hex: &[u8], message: &[u8]) -> Vec<u8> {
    let short = &rev_hex[..rev_hex.len().min(8)];
    let mut out = Vec::with_capacity(short.len() + 3 + message.len());
    out.push(b'[');
    out.extend_from_slice(short);
    out.extend_from_slice(b"] ");
    out.extend_from_slice(message);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timezone_has_no_leading_minus() {
        let text = changelog_text(b"alice", 100, 0, b"default", b"msg");
        let text = String::from_utf8(text).unwrap();
        assert!(text.contains("100 0\n"));
    }

    #[test]
    fn default_and_master_get_no_branch_annotation() {
        for branch in [b"default".as_slice(), b"master".as_slice()] {
            let text = changelog_text(b"alice", 100, 0, branch, b"msg");
            assert!(!String::from_utf8(text).unwrap().contains("branch:"));
        }
    }

    #[test]
    fn other_branches_get_annotated() {
        let text = changelog_text(b"alice", 100, 0, b"feature", b"msg");
        let text = String::from_utf8(text).unwrap();
        assert!(text.contains("branch:feature"));
    }

    #[test]
    fn timezone_is_arithmetically_negated() {
        let text = changelog_text(b"alice", 100, 3600, b"default", b"msg");
        assert!(String::from_utf8(text).unwrap().contains("100 -3600\n"));

        let text = changelog_text(b"alice", 100, -3600, b"default", b"msg");
        assert!(String::from_utf8(text).unwrap().contains("100 3600\n"));
    }
}
