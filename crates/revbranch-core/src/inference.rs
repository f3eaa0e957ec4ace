use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::model::{
    invert_branch_revs, invert_rev_parent, BranchRevs, RevBranch, RevBranches, RevChildren,
    RevParent,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The top-level traversal for a labeled root didn't return exactly
    /// `{root_branch}`. Indicates a logic bug or a violated input invariant.
    InferenceInconsistency,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InferenceInconsistency => write!(f, "inference post-condition violated"),
        }
    }
}

impl std::error::Error for Error {}

/// Assign branch names to revisions that don't yet have one, and report
/// what the caller still needs to resolve by hand.
///
/// `rev_parent` maps a revision to its primary parent (`None` for a root).
/// `rev_branch0` is the caller's prior knowledge; `branch_revs` maps a
/// branch name to its tip revisions. `common_master_branch_names` is used
/// only to auto-resolve unlabeled roots.
///
/// Returns `(new_rev_branch, unnamed_revs, ambig_revs)`: labels inference
/// could determine, revisions the user must label by hand, and revisions
/// where multiple candidate labels converge.
pub fn fill_unknown_branches<Rev, Branch>(
    rev_parent: &RevParent<Rev>,
    rev_branch0: &RevBranch<Rev, Branch>,
    branch_revs: &BranchRevs<Rev, Branch>,
    common_master_branch_names: &HashSet<Branch>,
) -> Result<(RevBranch<Rev, Branch>, HashSet<Rev>, RevBranches<Rev, Branch>), Error>
where
    Rev: Eq + Hash + Clone,
    Branch: Eq + Hash + Clone,
{
    let (rev_children, roots) = invert_rev_parent(rev_parent);
    let rev_branches = invert_branch_revs(branch_revs);

    let mut new_rev_branch: RevBranch<Rev, Branch> = HashMap::new();
    let mut unnamed_revs: HashSet<Rev> = HashSet::new();
    let mut ambig_revs: RevBranches<Rev, Branch> = HashMap::new();

    for root in roots {
        let root_branch = match rev_branch0.get(&root) {
            Some(b) => b.clone(),
            None => {
                let masters =
                    all_master_branches(&root, &rev_children, &rev_branches, common_master_branch_names);
                if masters.len() != 1 {
                    unnamed_revs.insert(root);
                    continue;
                }
                let branch = masters.into_iter().next().unwrap();
                new_rev_branch.insert(root.clone(), branch.clone());
                branch
            }
        };

        let result = traverse(
            root.clone(),
            root_branch.clone(),
            &rev_children,
            rev_branch0,
            &rev_branches,
            &mut new_rev_branch,
            &mut unnamed_revs,
            &mut ambig_revs,
        );
        let mut expected = HashSet::new();
        expected.insert(root_branch);
        if result != expected {
            return Err(Error::InferenceInconsistency);
        }
    }

    Ok((new_rev_branch, unnamed_revs, ambig_revs))
}

/// All branches in `common_master_branch_names` pointing at any descendant
/// of `rev` (inclusive). Iterative to avoid recursion depth limits.
fn all_master_branches<Rev, Branch>(
    rev: &Rev,
    rev_children: &RevChildren<Rev>,
    rev_branches: &RevBranches<Rev, Branch>,
    common_master_branch_names: &HashSet<Branch>,
) -> HashSet<Branch>
where
    Rev: Eq + Hash + Clone,
    Branch: Eq + Hash + Clone,
{
    let mut todo = vec![rev.clone()];
    let mut masters = HashSet::new();
    while let Some(rev) = todo.pop() {
        if let Some(branches) = rev_branches.get(&rev) {
            for b in branches {
                if common_master_branch_names.contains(b) {
                    masters.insert(b.clone());
                }
            }
        }
        if let Some(children) = rev_children.get(&rev) {
            todo.extend(children.iter().cloned());
        }
    }
    masters
}

/// One stack frame of the (non-recursive) descent below a labeled root.
///
/// Mirrors the generator-based recursion in the source design: `children`
/// is fixed at creation time and walked one at a time, resuming with each
/// child's returned possible-branches set before moving to the next.
struct Frame<Rev, Branch> {
    rev: Rev,
    /// `Some(b)` if `rev` already has a known label; children are then
    /// visited with `root_branch := b` and this frame always returns `{b}`.
    known_branch: Option<Branch>,
    /// The `root_branch` children of this frame should inherit.
    child_root_branch: Branch,
    children: Vec<Rev>,
    next_child: usize,
    /// Accumulated `(child, possible_branches)` pairs, only consulted when
    /// `known_branch` is `None`.
    child_results: Vec<(Rev, HashSet<Branch>)>,
}

fn push_frame<Rev, Branch>(
    stack: &mut Vec<Frame<Rev, Branch>>,
    rev: Rev,
    inherited_root_branch: Branch,
    rev_children: &RevChildren<Rev>,
    rev_branch0: &RevBranch<Rev, Branch>,
) where
    Rev: Eq + Hash + Clone,
    Branch: Eq + Hash + Clone,
{
    let known_branch = rev_branch0.get(&rev).cloned();
    let child_root_branch = known_branch.clone().unwrap_or(inherited_root_branch);
    let children = rev_children
        .get(&rev)
        .map(|cs| cs.iter().cloned().collect())
        .unwrap_or_default();
    stack.push(Frame {
        rev,
        known_branch,
        child_root_branch,
        children,
        next_child: 0,
        child_results: Vec::new(),
    });
}

/// Walk the subtree rooted at `root`, filling `new_rev_branch`,
/// `unnamed_revs` and `ambig_revs` as it goes, and returning the
/// possible-branches set for `root` itself.
#[allow(clippy::too_many_arguments)]
fn traverse<Rev, Branch>(
    root: Rev,
    root_branch: Branch,
    rev_children: &RevChildren<Rev>,
    rev_branch0: &RevBranch<Rev, Branch>,
    rev_branches: &RevBranches<Rev, Branch>,
    new_rev_branch: &mut RevBranch<Rev, Branch>,
    unnamed_revs: &mut HashSet<Rev>,
    ambig_revs: &mut RevBranches<Rev, Branch>,
) -> HashSet<Branch>
where
    Rev: Eq + Hash + Clone,
    Branch: Eq + Hash + Clone,
{
    let mut stack: Vec<Frame<Rev, Branch>> = Vec::new();
    push_frame(&mut stack, root, root_branch, rev_children, rev_branch0);
    let mut pending_return: Option<HashSet<Branch>> = None;

    loop {
        if let Some(ret) = pending_return.take() {
            let frame = stack.last_mut().unwrap();
            let child_rev = frame.children[frame.next_child - 1].clone();
            if frame.known_branch.is_some() {
                if ret.len() > 1 {
                    ambig_revs.insert(child_rev, ret);
                }
            } else {
                frame.child_results.push((child_rev, ret));
            }
        }

        let frame = stack.last_mut().unwrap();
        if frame.next_child < frame.children.len() {
            let child = frame.children[frame.next_child].clone();
            frame.next_child += 1;
            let child_root_branch = frame.child_root_branch.clone();
            push_frame(&mut stack, child, child_root_branch, rev_children, rev_branch0);
            continue;
        }

        let frame = stack.pop().unwrap();
        let ret = finish_frame(frame, rev_branches, new_rev_branch, unnamed_revs, ambig_revs);
        match stack.is_empty() {
            true => return ret,
            false => pending_return = Some(ret),
        }
    }
}

fn finish_frame<Rev, Branch>(
    frame: Frame<Rev, Branch>,
    rev_branches: &RevBranches<Rev, Branch>,
    new_rev_branch: &mut RevBranch<Rev, Branch>,
    unnamed_revs: &mut HashSet<Rev>,
    ambig_revs: &mut RevBranches<Rev, Branch>,
) -> HashSet<Branch>
where
    Rev: Eq + Hash + Clone,
    Branch: Eq + Hash + Clone,
{
    if let Some(my_branch) = frame.known_branch {
        let mut result = HashSet::new();
        result.insert(my_branch);
        return result;
    }

    let root_branch = frame.child_root_branch;
    let mut possible_branches_sets: Vec<HashSet<Branch>> =
        frame.child_results.iter().map(|(_, s)| s.clone()).collect();
    if let Some(pointers) = rev_branches.get(&frame.rev) {
        for branch in pointers {
            let mut singleton = HashSet::new();
            singleton.insert(branch.clone());
            possible_branches_sets.push(singleton);
        }
    }

    if possible_branches_sets.is_empty() {
        unnamed_revs.insert(frame.rev);
        return HashSet::new();
    }

    let root_singleton: HashSet<Branch> = std::iter::once(root_branch.clone()).collect();
    if possible_branches_sets.contains(&root_singleton) {
        new_rev_branch.insert(frame.rev, root_branch.clone());
        for (child, set) in &frame.child_results {
            if set.len() > 1 {
                ambig_revs.insert(child.clone(), set.clone());
            }
        }
        return root_singleton;
    }

    if possible_branches_sets.iter().any(|s| s.is_empty()) {
        return HashSet::new();
    }

    let union: HashSet<Branch> = possible_branches_sets.into_iter().flatten().collect();
    if union.len() == 1 {
        new_rev_branch.insert(frame.rev, union.iter().next().cloned().unwrap());
    }
    union
}
