use std::collections::HashMap;
use std::hash::Hash;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::changelog::{changelog_text, decorate_message};
use crate::chunk::{write_chunk, write_end_chunk};
use crate::node::{hash_revision, NULL_NODE};
use crate::Error;

/// The metadata a commit reader supplies for one revision, enough to
/// reconstruct its mercurial changelog text.
pub struct CommitMeta<Rev> {
    pub author: Vec<u8>,
    pub author_time: i64,
    pub author_timezone: i32,
    pub parents: Vec<Rev>,
    pub message: Vec<u8>,
}

/// Write an `HG10UN` bundle containing only changelog entries, one per
/// revision in `revs`, labelled by `rev_branch`.
///
/// `revs` must be topologically sorted (parents before children) and
/// `commit_reader` must resolve every revision named in `revs` or in another
/// revision's `parents`.
pub fn write_bundle<W, Rev, F>(
    sink: &mut W,
    revs: &[Rev],
    rev_branch: &HashMap<Rev, Vec<u8>>,
    mut commit_reader: F,
) -> Result<(), Error>
where
    W: Write,
    Rev: Eq + Hash + Clone + AsRef<[u8]>,
    F: FnMut(&Rev) -> Result<CommitMeta<Rev>, Error>,
{
    sink.write_all(b"HG10UN")?;

    let mut git_hg: HashMap<Rev, [u8; 20]> = HashMap::new();
    let mut last_changelog_len = 0usize;

    for rev in revs {
        let commit = commit_reader(rev)?;
        let branch = rev_branch
            .get(rev)
            .ok_or_else(|| Error::InvalidRevisionId(rev.as_ref().to_vec()))?;

        let message = decorate_message(rev.as_ref(), &commit.message);
        let text = changelog_text(
            &commit.author,
            commit.author_time,
            commit.author_timezone,
            branch,
            &message,
        );

        let p1 = parent_node(&commit.parents, 0, &git_hg)?;
        let p2 = parent_node(&commit.parents, 1, &git_hg)?;
        let node = hash_revision(&text, &p1, &p2);

        let mut data = Vec::with_capacity(80 + text.len());
        data.extend_from_slice(&node);
        data.extend_from_slice(&p1);
        data.extend_from_slice(&p2);
        data.extend_from_slice(&node); // linknode: changelog revisions link to themselves
        write_revdata(&mut data, last_changelog_len, &text)?;

        write_chunk(sink, &data)?;

        git_hg.insert(rev.clone(), node);
        last_changelog_len = text.len();
    }

    for _ in 0..3 {
        // ends the changelog group, the empty manifest group, and the empty filelist group
        write_end_chunk(sink)?;
    }

    Ok(())
}

fn parent_node<Rev: Eq + Hash + Clone + AsRef<[u8]>>(
    parents: &[Rev],
    index: usize,
    git_hg: &HashMap<Rev, [u8; 20]>,
) -> Result<[u8; 20], Error> {
    match parents.get(index) {
        None => Ok(NULL_NODE),
        Some(p) => git_hg
            .get(p)
            .copied()
            .ok_or_else(|| Error::InvalidRevisionId(p.as_ref().to_vec())),
    }
}

fn write_revdata(out: &mut Vec<u8>, last_changelog_len: usize, changelog: &[u8]) -> Result<(), Error> {
    out.write_i32::<BigEndian>(0)?;
    out.write_i32::<BigEndian>(last_changelog_len as i32)?;
    out.write_i32::<BigEndian>(changelog.len() as i32)?;
    out.extend_from_slice(changelog);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn meta(parents: Vec<&'static str>, msg: &str) -> CommitMeta<String> {
        CommitMeta {
            author: b"author".to_vec(),
            author_time: 1000,
            author_timezone: 0,
            parents: parents.into_iter().map(String::from).collect(),
            message: msg.as_bytes().to_vec(),
        }
    }

    #[test]
    fn writes_header_and_trailer() {
        let revs = vec!["aa".repeat(20)];
        let rev_branch = hashmap! { revs[0].clone() => b"default".to_vec() };
        let mut out = Vec::new();
        write_bundle(&mut out, &revs, &rev_branch, |_| Ok(meta(vec![], "hi"))).unwrap();

        assert_eq!(&out[..6], b"HG10UN");
        assert_eq!(&out[out.len() - 12..], &[0u8; 12]);
    }

    #[test]
    fn chunk_length_matches_formula() {
        let rev = "bb".repeat(20);
        let revs = vec![rev.clone()];
        let rev_branch = hashmap! { rev.clone() => b"default".to_vec() };
        let mut out = Vec::new();
        write_bundle(&mut out, &revs, &rev_branch, |_| Ok(meta(vec![], "msg"))).unwrap();

        let changelog_len = {
            let message = decorate_message(rev.as_bytes(), b"msg");
            changelog_text(b"author", 1000, 0, b"default", &message).len()
        };
        // length field (4) + node/p1/p2/linknode (4*20) + revdata header (12) + text
        let expected_chunk_len = 4 + 4 * 20 + 12 + changelog_len;
        let declared = i32::from_be_bytes(out[6..10].try_into().unwrap()) as usize;
        assert_eq!(declared, expected_chunk_len);
    }

    #[test]
    fn parentless_revision_hashes_against_null_node() {
        let rev = "cc".repeat(20);
        let revs = vec![rev.clone()];
        let rev_branch = hashmap! { rev.clone() => b"default".to_vec() };
        let mut out = Vec::new();
        write_bundle(&mut out, &revs, &rev_branch, |_| Ok(meta(vec![], "msg"))).unwrap();

        let node_in_bundle = &out[10..30];
        let p1_in_bundle = &out[30..50];
        let p2_in_bundle = &out[50..70];
        assert_eq!(p1_in_bundle, &[0u8; 20]);
        assert_eq!(p2_in_bundle, &[0u8; 20]);
        assert_ne!(node_in_bundle, &[0u8; 20]);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let rev = "dd".repeat(20);
        let revs = vec![rev.clone()];
        let rev_branch = hashmap! { rev.clone() => b"default".to_vec() };
        let mut out = Vec::new();
        let result = write_bundle(&mut out, &revs, &rev_branch, |_| {
            Ok(meta(vec!["ee".repeat(20).leak()], "msg"))
        });
        assert!(result.is_err());
    }
}
