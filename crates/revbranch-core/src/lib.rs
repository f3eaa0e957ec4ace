pub mod inference;
pub mod model;

pub use inference::{fill_unknown_branches, Error};
pub use model::{
    default_common_master_branch_names, invert_branch_revs, invert_rev_parent, primary_parents,
    BranchRevs, RevBranch, RevBranches, RevChildren, RevParent, RevParents,
};
