//! Dependency resolution for bundle job tasks.
//!
//! The bundle summary reports a job's tasks as a flat list where each task
//! names the tasks it depends on. `resolve` turns that list into a linear
//! execution order that respects every dependency edge.

use std::collections::HashSet;

use thiserror::Error;

/// A task and its dependency keys, in bundle-summary order.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    pub key: String,
    pub depends_on: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// The tasks left over once no further progress can be made. Either
    /// they form a cycle or they depend on a key not in the task list.
    #[error("tasks {remaining:?} have cyclic or unknown dependencies")]
    UnresolvableDependency { remaining: Vec<String> },
}

/// Orders tasks so that every task appears after all of its dependencies.
///
/// Layered Kahn-style iteration: each round admits the tasks whose entire
/// dependency set has already been placed, appending them in input order.
/// Ties within a round are broken by the summary's task order, which makes
/// the result deterministic for a given input.
///
/// A round that admits nothing while tasks remain means the graph contains
/// a cycle or an unknown dependency key; that is a terminal error rather
/// than an infinite loop.
pub fn resolve(tasks: &[TaskNode]) -> Result<Vec<String>, GraphError> {
    let mut ordered: Vec<String> = Vec::with_capacity(tasks.len());
    let mut placed: HashSet<&str> = HashSet::with_capacity(tasks.len());

    while ordered.len() < tasks.len() {
        let ready: Vec<&TaskNode> = tasks
            .iter()
            .filter(|t| !placed.contains(t.key.as_str()))
            .filter(|t| t.depends_on.iter().all(|d| placed.contains(d.as_str())))
            .collect();

        if ready.is_empty() {
            let remaining = tasks
                .iter()
                .filter(|t| !placed.contains(t.key.as_str()))
                .map(|t| t.key.clone())
                .collect();
            return Err(GraphError::UnresolvableDependency { remaining });
        }

        for task in ready {
            placed.insert(task.key.as_str());
            ordered.push(task.key.clone());
        }
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(key: &str, depends_on: &[&str]) -> TaskNode {
        TaskNode {
            key: key.to_string(),
            depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input_is_empty_order() {
        assert_eq!(resolve(&[]), Ok(vec![]));
    }

    #[test]
    fn test_single_task_without_dependencies() {
        let tasks = vec![node("only", &[])];
        assert_eq!(resolve(&tasks), Ok(vec!["only".to_string()]));
    }

    #[test]
    fn test_chain_resolves_in_dependency_order() {
        let tasks = vec![
            node("c", &["b"]),
            node("b", &["a"]),
            node("a", &[]),
        ];
        assert_eq!(
            resolve(&tasks),
            Ok(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_diamond_respects_all_edges() {
        let tasks = vec![
            node("a", &[]),
            node("b", &["a"]),
            node("c", &["a", "b"]),
        ];
        assert_eq!(
            resolve(&tasks),
            Ok(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_result_is_permutation_respecting_dependencies() {
        let tasks = vec![
            node("load", &["transform"]),
            node("extract", &[]),
            node("transform", &["extract"]),
            node("report", &["load", "extract"]),
        ];
        let order = resolve(&tasks).unwrap();

        assert_eq!(order.len(), tasks.len());
        for task in &tasks {
            let pos = order.iter().position(|k| k == &task.key).unwrap();
            for dep in &task.depends_on {
                let dep_pos = order.iter().position(|k| k == dep).unwrap();
                assert!(dep_pos < pos, "{} must come before {}", dep, task.key);
            }
        }
    }

    #[test]
    fn test_ties_broken_by_input_order() {
        let tasks = vec![
            node("zeta", &[]),
            node("alpha", &[]),
            node("mid", &["zeta", "alpha"]),
        ];
        // zeta and alpha become ready in the same round; input order wins.
        assert_eq!(
            resolve(&tasks),
            Ok(vec![
                "zeta".to_string(),
                "alpha".to_string(),
                "mid".to_string()
            ])
        );
    }

    #[test]
    fn test_deterministic_across_calls() {
        let tasks = vec![
            node("d", &["b", "c"]),
            node("b", &["a"]),
            node("c", &["a"]),
            node("a", &[]),
        ];
        let first = resolve(&tasks).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve(&tasks).unwrap(), first);
        }
    }

    #[test]
    fn test_two_node_cycle_fails() {
        let tasks = vec![node("a", &["b"]), node("b", &["a"])];
        let err = resolve(&tasks).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnresolvableDependency {
                remaining: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_cycle_behind_valid_prefix_fails() {
        let tasks = vec![
            node("ok", &[]),
            node("x", &["ok", "y"]),
            node("y", &["x"]),
        ];
        let err = resolve(&tasks).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnresolvableDependency {
                remaining: vec!["x".to_string(), "y".to_string()],
            }
        );
    }

    #[test]
    fn test_unknown_dependency_fails() {
        let tasks = vec![node("a", &["ghost"])];
        let err = resolve(&tasks).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnresolvableDependency {
                remaining: vec!["a".to_string()],
            }
        );
    }

    #[test]
    fn test_self_dependency_fails() {
        let tasks = vec![node("a", &["a"])];
        assert!(resolve(&tasks).is_err());
    }
}
