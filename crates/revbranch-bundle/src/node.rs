use sha1::{Digest, Sha1};

pub const NULL_NODE: [u8; 20] = [0u8; 20];

/// Derive a revision's mercurial node id from its changelog text and its
/// (already-resolved) parent nodes.
///
/// Mirrors mercurial's revlog hash: the parents are sorted before hashing so
/// swapping p1/p2 never changes the result.
pub fn hash_revision(changelog_text: &[u8], p1: &[u8; 20], p2: &[u8; 20]) -> [u8; 20] {
    let (a, b) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
    let mut hasher = Sha1::new();
    hasher.update(a);
    hasher.update(b);
    hasher.update(changelog_text);
    hasher.finalize().into()
}
