use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use git2::Repository;
use revbranch_bundle::write_bundle;
use revbranch_graph::topo_sort;
use revbranch_notes::read_rev_branches;

use crate::error::Error;

pub fn run_bundle(repo_path: &Path, output: &Path, notes_ref: &str) -> Result<(), Error> {
    let repo = Repository::open(repo_path)?;

    let rev_branch_raw = read_rev_branches(&repo, notes_ref)?;
    let rev_branch: HashMap<String, Vec<u8>> = rev_branch_raw
        .into_iter()
        .filter_map(|(rev, branch)| String::from_utf8(rev).ok().map(|rev| (rev, branch)))
        .collect();

    let (rev_parents, _branch_revs) = revbranch_git::read_git_revisions(&repo)?;
    let order = topo_sort(&rev_parents).map_err(|e| Error::TopoSort(e.to_string()))?;

    let revs: Vec<String> = order.into_iter().filter(|rev| rev_branch.contains_key(rev)).collect();
    log::info!("writing bundle with {} of {} known revisions", revs.len(), rev_parents.len());

    let sink = BufWriter::new(File::create(output)?);
    let mut sink = sink;
    write_bundle(&mut sink, &revs, &rev_branch, |rev| {
        revbranch_git::read_commit_meta(&repo, rev)
            .map_err(|_| revbranch_bundle::Error::InvalidRevisionId(rev.as_bytes().to_vec()))
    })?;

    Ok(())
}
