use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A revision's parents, primary parent first. A root revision maps to `[]`.
pub type RevParents<Rev> = HashMap<Rev, Vec<Rev>>;

/// A revision's primary parent, or `None` for a root.
pub type RevParent<Rev> = HashMap<Rev, Option<Rev>>;

/// A revision's children, derived by inverting [`RevParent`].
pub type RevChildren<Rev> = HashMap<Rev, HashSet<Rev>>;

/// A branch name's tip revisions. A branch may point at several revisions
/// at once (e.g. a local copy and its matching remote).
pub type BranchRevs<Rev, Branch> = HashMap<Branch, HashSet<Rev>>;

/// The authoritative revision-to-branch labeling.
pub type RevBranch<Rev, Branch> = HashMap<Rev, Branch>;

/// Either the inverted [`BranchRevs`] (branch pointers per revision) or a
/// report of ambiguous alternatives per revision.
pub type RevBranches<Rev, Branch> = HashMap<Rev, HashSet<Branch>>;

/// Project [`RevParents`] down to just the primary (first) parent.
pub fn primary_parents<Rev>(rev_parents: &RevParents<Rev>) -> RevParent<Rev>
where
    Rev: Eq + Hash + Clone,
{
    rev_parents
        .iter()
        .map(|(rev, parents)| (rev.clone(), parents.first().cloned()))
        .collect()
}

/// Invert a [`BranchRevs`] map into a per-revision set of branch pointers.
pub fn invert_branch_revs<Rev, Branch>(branch_revs: &BranchRevs<Rev, Branch>) -> RevBranches<Rev, Branch>
where
    Rev: Eq + Hash + Clone,
    Branch: Eq + Hash + Clone,
{
    let mut rev_branches: RevBranches<Rev, Branch> = HashMap::new();
    for (branch, revs) in branch_revs {
        for rev in revs {
            rev_branches
                .entry(rev.clone())
                .or_default()
                .insert(branch.clone());
        }
    }
    rev_branches
}

/// Invert [`RevParent`] into a per-revision set of children, also returning
/// the roots (revisions with no parent) in encounter order.
pub fn invert_rev_parent<Rev>(rev_parent: &RevParent<Rev>) -> (RevChildren<Rev>, Vec<Rev>)
where
    Rev: Eq + Hash + Clone,
{
    let mut rev_children: RevChildren<Rev> = HashMap::new();
    let mut roots = Vec::new();
    for (rev, parent) in rev_parent {
        match parent {
            Some(p) => {
                rev_children.entry(p.clone()).or_default().insert(rev.clone());
            }
            None => roots.push(rev.clone()),
        }
    }
    (rev_children, roots)
}

/// The common master branch names used to resolve an unlabeled root when no
/// explicit assignment is given: a root is resolved automatically only if
/// exactly one of these names appears on its descendants.
pub fn default_common_master_branch_names() -> HashSet<Vec<u8>> {
    [b"master".to_vec(), b"main".to_vec(), b"default".to_vec(), b"primary".to_vec(), b"root".to_vec()]
        .into_iter()
        .collect()
}
