use std::collections::{HashMap, HashSet};

use git2::Repository;
use revbranch_core::{BranchRevs, RevParents};

use crate::Error;

/// Collect every local/remote branch tip and the full ancestry reachable
/// from those tips.
///
/// Revision ids are the commit's hex object id. Branch names are raw bytes
/// so non-UTF8 ref components don't get lossily rewritten.
pub fn read_git_revisions(repo: &Repository) -> Result<(RevParents<String>, BranchRevs<String, Vec<u8>>), Error> {
    let mut branch_revs: BranchRevs<String, Vec<u8>> = HashMap::new();

    for reference in repo.references()? {
        let reference = reference?;
        let Some(name) = reference.name() else {
            continue;
        };
        let branch = if let Some(rest) = name.strip_prefix("refs/heads/") {
            rest.to_string()
        } else if let Some(rest) = name.strip_prefix("refs/remotes/") {
            match rest.split_once('/') {
                Some((_remote, branch)) => branch.to_string(),
                None => continue,
            }
        } else {
            continue;
        };

        let Ok(commit) = reference.peel_to_commit() else {
            continue;
        };
        branch_revs
            .entry(branch.into_bytes())
            .or_default()
            .insert(commit.id().to_string());
    }

    let mut rev_parents: RevParents<String> = HashMap::new();
    let mut todo: Vec<String> = branch_revs.values().flatten().cloned().collect();
    let mut seen: HashSet<String> = todo.iter().cloned().collect();

    while let Some(rev) = todo.pop() {
        let oid = git2::Oid::from_str(&rev)?;
        let commit = repo.find_commit(oid)?;
        let parents: Vec<String> = commit.parent_ids().map(|id| id.to_string()).collect();
        for parent in &parents {
            if seen.insert(parent.clone()) {
                todo.push(parent.clone());
            }
        }
        rev_parents.insert(rev, parents);
    }

    Ok((rev_parents, branch_revs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_on(repo: &Repository, parents: &[&git2::Commit], message: &str) -> git2::Oid {
        let sig = git2::Signature::now("tester", "tester@example.com").unwrap();
        let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(None, &sig, &sig, message, &tree, parents).unwrap()
    }

    #[test]
    fn collects_branch_tips_and_ancestry() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let root_id = commit_on(&repo, &[], "root");
        let root = repo.find_commit(root_id).unwrap();
        let child_id = commit_on(&repo, &[&root], "child");
        let child = repo.find_commit(child_id).unwrap();

        repo.branch("main", &child, true).unwrap();

        let (rev_parents, branch_revs) = read_git_revisions(&repo).unwrap();

        assert_eq!(rev_parents.get(&child_id.to_string()).unwrap(), &vec![root_id.to_string()]);
        assert_eq!(rev_parents.get(&root_id.to_string()).unwrap(), &Vec::<String>::new());
        assert_eq!(
            branch_revs.get(b"main".as_slice()).unwrap(),
            &HashSet::from([child_id.to_string()])
        );
    }

    #[test]
    fn remote_branch_name_drops_remote_component() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let root_id = commit_on(&repo, &[], "root");

        repo.reference("refs/remotes/origin/feature/x", root_id, true, "test")
            .unwrap();

        let (_, branch_revs) = read_git_revisions(&repo).unwrap();
        assert!(branch_revs.contains_key(b"feature/x".as_slice()));
    }
}
