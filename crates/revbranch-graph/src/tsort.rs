use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Sort nodes of a DAG so that each node comes after all of its parents.
///
/// `node_parents` must be closed: every parent referenced by a value must
/// also appear as a key. This is not verified; a parent that isn't a key is
/// simply skipped, as an orphan reference is a malformed input by contract.
///
/// Uses an explicit work stack rather than native recursion, since the
/// graphs this sorts over may be far deeper than any reasonable call stack.
pub fn topo_sort<K>(node_parents: &HashMap<K, Vec<K>>) -> Result<Vec<K>, Error<K>>
where
    K: Eq + Hash + Clone,
{
    let mut result: Vec<K> = Vec::with_capacity(node_parents.len());
    let mut in_result: HashSet<K> = HashSet::with_capacity(node_parents.len());
    // (node, index of the next parent to check)
    let mut stack: Vec<(K, usize)> = Vec::new();
    let mut in_stack: HashSet<K> = HashSet::new();

    for key in node_parents.keys() {
        if in_result.contains(key) {
            continue;
        }
        stack.push((key.clone(), 0));
        in_stack.insert(key.clone());

        while let Some((node, mut i)) = stack.pop() {
            let parents = node_parents
                .get(&node)
                .expect("node_parents is closed over its own keys");
            let mut descended = false;
            while i < parents.len() {
                let parent = &parents[i];
                if in_result.contains(parent) {
                    i += 1;
                    continue;
                }
                if in_stack.contains(parent) {
                    return Err(Error::CycleDetected(parent.clone()));
                }
                stack.push((node.clone(), i + 1));
                stack.push((parent.clone(), 0));
                in_stack.insert(parent.clone());
                descended = true;
                break;
            }
            if !descended && i >= parents.len() {
                result.push(node.clone());
                in_result.insert(node.clone());
                in_stack.remove(&node);
            }
        }
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<K> {
    CycleDetected(K),
}

impl<K: std::fmt::Debug> std::fmt::Display for Error<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CycleDetected(node) => write!(f, "cycle detected containing {:?}", node),
        }
    }
}

impl<K: std::fmt::Debug> std::error::Error for Error<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use std::collections::HashMap;

    fn verify_order<K: Eq + Hash + Clone + std::fmt::Debug>(
        sorted: &[K],
        node_parents: &HashMap<K, Vec<K>>,
    ) {
        let mut seen = HashSet::new();
        assert_eq!(sorted.len(), node_parents.len());
        for node in sorted {
            for parent in &node_parents[node] {
                assert!(
                    seen.contains(parent),
                    "{:?} sorted before its parent {:?}",
                    node,
                    parent
                );
            }
            seen.insert(node.clone());
        }
    }

    #[test]
    fn test_cycle_is_rejected() {
        let graph = maplit::hashmap! {
            1 => vec![2],
            2 => vec![3],
            3 => vec![1],
            4 => vec![],
        };
        assert!(matches!(topo_sort(&graph), Err(Error::CycleDetected(_))));
    }

    #[test]
    fn test_simple_dag() {
        let graph = maplit::hashmap! {
            1 => vec![],
            2 => vec![1],
            3 => vec![1],
            4 => vec![2],
            5 => vec![3],
        };
        let sorted = topo_sort(&graph).unwrap();
        verify_order(&sorted, &graph);
    }

    #[test]
    fn test_merge_dag() {
        let graph = maplit::hashmap! {
            1 => vec![],
            2 => vec![1],
            3 => vec![1],
            4 => vec![2, 3],
            5 => vec![3, 6],
            6 => vec![4],
        };
        let sorted = topo_sort(&graph).unwrap();
        verify_order(&sorted, &graph);
    }

    #[test]
    fn test_independent_of_edge_order() {
        let dag: Vec<(i32, Vec<i32>)> = vec![(1, vec![]), (2, vec![1]), (3, vec![1]), (4, vec![2])];
        for perm in dag.iter().cloned().permutations(dag.len()) {
            let graph: HashMap<i32, Vec<i32>> = perm.into_iter().collect();
            let sorted = topo_sort(&graph).unwrap();
            verify_order(&sorted, &graph);
        }
    }
}
