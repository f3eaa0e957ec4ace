use std::collections::{HashMap, HashSet};
use std::path::Path;

use git2::Repository;
use revbranch_core::{default_common_master_branch_names, fill_unknown_branches, primary_parents};
use revbranch_notes::{read_rev_branches, write_rev_branches};

use crate::error::Error;

pub const DEFAULT_NOTES_REF: &str = "refs/notes/revbranch";

pub fn run_infer(repo_path: &Path, notes_ref: &str, common_master: &[String]) -> Result<(), Error> {
    let repo = Repository::open(repo_path)?;

    let (rev_parents, branch_revs) = revbranch_git::read_git_revisions(&repo)?;
    let rev_parent = primary_parents(&rev_parents);

    let rev_branch0 = decode_rev_branch(read_rev_branches(&repo, notes_ref)?)?;

    let common_master_branch_names: HashSet<Vec<u8>> = if common_master.is_empty() {
        default_common_master_branch_names()
    } else {
        common_master.iter().map(|b| b.as_bytes().to_vec()).collect()
    };

    let (new_rev_branch, unnamed_revs, ambig_revs) =
        fill_unknown_branches(&rev_parent, &rev_branch0, &branch_revs, &common_master_branch_names)?;

    log::info!("assigned {} new branch label(s)", new_rev_branch.len());
    for rev in &unnamed_revs {
        println!("unnamed: {}", rev);
    }
    for (rev, branches) in &ambig_revs {
        let names: Vec<String> = branches
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect();
        println!("ambiguous: {} could be one of [{}]", rev, names.join(", "));
    }

    if !new_rev_branch.is_empty() {
        write_rev_branches(&repo, notes_ref, &encode_rev_branch(&new_rev_branch))?;
    }

    Ok(())
}

fn decode_rev_branch(raw: HashMap<Vec<u8>, Vec<u8>>) -> Result<HashMap<String, Vec<u8>>, Error> {
    raw.into_iter()
        .map(|(rev, branch)| {
            String::from_utf8(rev)
                .map(|rev| (rev, branch))
                .map_err(|e| revbranch_notes::Error::MalformedNotes(format!("non-UTF8 revision id: {e}")).into())
        })
        .collect()
}

fn encode_rev_branch(rev_branch: &HashMap<String, Vec<u8>>) -> HashMap<Vec<u8>, Vec<u8>> {
    rev_branch
        .iter()
        .map(|(rev, branch)| (rev.clone().into_bytes(), branch.clone()))
        .collect()
}
