use std::collections::HashMap;
use std::process::Command;

use git2::{Oid, Repository, Signature};

use crate::tree::parse_notes_tree;
use crate::{Error, MODE_BLOB};

/// Read the revision-to-branch map stored under `notes_ref`.
///
/// Returns an empty map if the ref doesn't exist yet, matching the original
/// behaviour of treating an absent notes tree as "nothing recorded".
pub fn read_rev_branches(repo: &Repository, notes_ref: &str) -> Result<HashMap<Vec<u8>, Vec<u8>>, Error> {
    let reference = match repo.find_reference(notes_ref) {
        Ok(r) => r,
        Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };

    let obj = reference.peel(git2::ObjectType::Any)?;
    let tree = match obj.kind() {
        Some(git2::ObjectType::Commit) => obj.peel_to_commit()?.tree()?,
        Some(git2::ObjectType::Tree) => obj.peel_to_tree()?,
        other => {
            return Err(Error::MalformedNotes(format!(
                "{notes_ref} should be either a commit or a tree, found {other:?}"
            )))
        }
    };

    parse_notes_tree(repo, &tree, "")
}

/// Merge `rev_branch` into the notes tree at `notes_ref`.
///
/// Builds a flat hex-keyed tree and a throwaway commit pointing at it, then
/// asks `git notes merge --strategy theirs` to fold it into the existing
/// notes, so concurrent writers never stomp on each other's entries.
pub fn write_rev_branches(
    repo: &Repository,
    notes_ref_name: &str,
    rev_branch: &HashMap<Vec<u8>, Vec<u8>>,
) -> Result<(), Error> {
    let mut blobs: HashMap<&[u8], Oid> = HashMap::new();
    let mut builder = repo.treebuilder(None)?;

    for (rev, branch) in rev_branch {
        let blob_id = match blobs.get(branch.as_slice()) {
            Some(id) => *id,
            None => {
                let id = repo.blob(branch)?;
                blobs.insert(branch.as_slice(), id);
                id
            }
        };
        let path = std::str::from_utf8(rev)
            .map_err(|_| Error::InvalidRevisionId(rev.clone()))?;
        builder.insert(path, blob_id, MODE_BLOB)?;
    }
    let tree_id = builder.write()?;

    let signature = Signature::now("revbranch", "revbranch")?;
    let tree = repo.find_tree(tree_id)?;
    let commit_id = repo.commit(
        None,
        &signature,
        &signature,
        "Temporary commit by revbranch",
        &tree,
        &[],
    )?;

    let tmp_ref = "refs/notes/tmp-revbranch";
    repo.reference(tmp_ref, commit_id, true, "revbranch temporary notes commit")?;

    let ref_name = notes_ref_name
        .strip_prefix("refs/notes/")
        .unwrap_or(notes_ref_name);
    let workdir = repo
        .workdir()
        .unwrap_or_else(|| repo.path());
    let status = Command::new("git")
        .arg("-C")
        .arg(workdir)
        .args(["notes", "--ref", ref_name, "merge", "--strategy", "theirs", tmp_ref])
        .status()
        .map_err(|e| Error::MalformedNotes(format!("failed to run git notes merge: {e}")))?;
    if !status.success() {
        return Err(Error::MalformedNotes(format!(
            "git notes merge exited with {status}"
        )));
    }

    if let Ok(mut reference) = repo.find_reference(tmp_ref) {
        if reference.target() == Some(commit_id) {
            reference.delete()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn init_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn missing_ref_reads_as_empty() {
        let (_dir, repo) = init_repo();
        let result = read_rev_branches(&repo, "refs/notes/revbranch").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_dir, repo) = init_repo();
        let rev = "c".repeat(40).into_bytes();
        let rev_branch = hashmap! { rev.clone() => b"main".to_vec() };

        write_rev_branches(&repo, "refs/notes/revbranch", &rev_branch).unwrap();
        let read_back = read_rev_branches(&repo, "refs/notes/revbranch").unwrap();

        assert_eq!(read_back.get(&rev).unwrap(), b"main");
    }
}
