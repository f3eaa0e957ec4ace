use git2::Repository;
use revbranch_bundle::CommitMeta;

use crate::Error;

/// Read the fields a [`CommitMeta`] needs out of a commit named by its hex id.
pub fn read_commit_meta(repo: &Repository, rev: &str) -> Result<CommitMeta<String>, Error> {
    let oid = git2::Oid::from_str(rev)?;
    let commit = repo.find_commit(oid)?;
    let author = commit.author();

    let mut identity = author.name().unwrap_or("").as_bytes().to_vec();
    if let Some(email) = author.email() {
        identity.extend_from_slice(b" <");
        identity.extend_from_slice(email.as_bytes());
        identity.push(b'>');
    }

    Ok(CommitMeta {
        author: identity,
        author_time: author.when().seconds(),
        author_timezone: author.when().offset_minutes() * 60,
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        message: commit.message_bytes().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_author_and_message() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let sig = git2::Signature::now("Ada Lovelace", "ada@example.com").unwrap();
        let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let commit_id = repo.commit(None, &sig, &sig, "did a thing", &tree, &[]).unwrap();

        let meta = read_commit_meta(&repo, &commit_id.to_string()).unwrap();
        assert_eq!(meta.message, b"did a thing");
        assert!(meta.author.starts_with(b"Ada Lovelace"));
        assert!(meta.parents.is_empty());
    }
}
