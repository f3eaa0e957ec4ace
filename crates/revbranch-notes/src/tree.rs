use std::collections::HashMap;

use git2::{Repository, Tree};

use crate::{Error, MODE_BLOB, MODE_TREE, REV_HEX_LEN};

/// Walk a notes tree, collecting `rev hex id -> branch name` entries.
///
/// Mirrors how `git notes` itself lays out a notes tree: each path is built
/// up from directory components so that a 40-hex-char revision id is spread
/// across nested fan-out directories, and we reassemble it as we recurse.
pub fn parse_notes_tree(repo: &Repository, tree: &Tree, prefix: &str) -> Result<HashMap<Vec<u8>, Vec<u8>>, Error> {
    let mut rev_note = HashMap::new();
    for entry in tree.iter() {
        let name = entry
            .name()
            .ok_or_else(|| Error::MalformedNotes("non-UTF8 path component".to_string()))?;
        let mode = entry.filemode();

        if mode == MODE_TREE {
            let subtree = entry.to_object(repo)?.peel_to_tree()?;
            let nested = parse_notes_tree(repo, &subtree, &format!("{prefix}{name}"))?;
            rev_note.extend(nested);
        } else if mode == MODE_BLOB {
            let rev = format!("{prefix}{name}");
            if rev.len() != REV_HEX_LEN {
                return Err(Error::MalformedNotes(format!("unexpected path {rev:?}")));
            }
            let blob = entry.to_object(repo)?.peel_to_blob()?;
            rev_note.insert(rev.into_bytes(), blob.content().to_vec());
        } else {
            return Err(Error::MalformedNotes(format!("unexpected mode {mode:o}")));
        }
    }
    Ok(rev_note)
}
