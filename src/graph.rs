//! Dependency ordering for layout inheritance.
//!
//! Every layout names at most one parent. [`topo_sort`] turns that relation
//! into a processing order in which each parent comes before all of its
//! children, and reports cycles instead of producing a partial order.

use crate::error::{Result, SiteError};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Order `parent_of`'s keys so that every node follows its declared parent.
///
/// Ready nodes are processed from a stack. Roots and children are pushed in
/// reverse name order, so among siblings that become ready together the
/// lexicographically smallest is emitted first. Callers should depend only
/// on parent-before-child.
///
/// # Errors
///
/// - [`SiteError::UnknownLayoutReference`] if a parent is not itself a key
/// - [`SiteError::CircularDependency`] if the relation contains a cycle; the
///   error lists every node that could not be ordered
pub fn topo_sort(parent_of: &BTreeMap<String, Option<String>>) -> Result<Vec<String>> {
    // parent -> children that declare it
    let mut children: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    // node -> number of unsatisfied parent edges
    let mut pending: HashMap<&str, usize> = HashMap::new();
    let mut ready: Vec<&str> = Vec::new();

    for (node, parent) in parent_of {
        match parent {
            Some(parent) => {
                if !parent_of.contains_key(parent) {
                    return Err(SiteError::UnknownLayoutReference {
                        layout: parent.clone(),
                        referenced_by: node.clone(),
                    });
                }
                children
                    .entry(parent.as_str())
                    .or_default()
                    .insert(node.as_str());
                *pending.entry(node.as_str()).or_default() += 1;
            }
            None => ready.push(node.as_str()),
        }
    }

    ready.reverse();
    let mut sorted = Vec::with_capacity(parent_of.len());

    while let Some(current) = ready.pop() {
        sorted.push(current.to_string());

        let Some(dependents) = children.remove(current) else {
            continue;
        };
        for dependent in dependents.into_iter().rev() {
            let remaining = pending.entry(dependent).or_default();
            *remaining -= 1;
            if *remaining == 0 {
                pending.remove(dependent);
                ready.push(dependent);
            }
        }
    }

    if !pending.is_empty() {
        let mut nodes: Vec<String> = pending.keys().map(|n| n.to_string()).collect();
        nodes.sort();
        return Err(SiteError::CircularDependency { nodes });
    }

    Ok(sorted)
}
