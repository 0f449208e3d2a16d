//! Shell completion for comma-separated task lists.
//!
//! While the user types a `--tasks` value, the shell hands us the partial
//! word and we propose the next valid task from the stored order. A task
//! earlier in the order than one already typed is never proposed: the
//! stored order is an execution order, and runs do not go backward.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CompleteError {
    #[error("no task list available; run 'bricks current' first")]
    NoTaskOrder,

    #[error("task '{0}' is not in the stored task list; run 'bricks current' to refresh it")]
    UnknownTask(String),
}

/// Proposes completions for `partial`, a comma-separated task list with the
/// final token still being typed.
///
/// Each suggestion is the already-typed head plus the proposed task, so it
/// can replace the whole word in the shell. Candidates start at the
/// position of the last already-used task in `stored_order` and exclude
/// tasks that were already used.
pub fn complete(
    stored_order: Option<&[String]>,
    partial: &str,
) -> Result<Vec<String>, CompleteError> {
    let order = stored_order.ok_or(CompleteError::NoTaskOrder)?;

    // Split on the last comma: head is confirmed, tail is in progress.
    let (head, tail) = match partial.rfind(',') {
        Some(idx) => (&partial[..idx], &partial[idx + 1..]),
        None => ("", partial),
    };
    let prefix = if partial.contains(',') {
        format!("{head},")
    } else {
        String::new()
    };

    let used: Vec<&str> = head
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let last_idx = match used.last() {
        Some(last) => order
            .iter()
            .position(|t| t == last)
            .ok_or_else(|| CompleteError::UnknownTask(last.to_string()))?,
        None => 0,
    };

    let suggestions = order[last_idx..]
        .iter()
        .filter(|t| t.starts_with(tail))
        .filter(|t| !used.contains(&t.as_str()))
        .map(|t| format!("{prefix}{t}"))
        .collect();

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Vec<String> {
        vec![
            "extract".to_string(),
            "transform".to_string(),
            "load".to_string(),
        ]
    }

    #[test]
    fn test_no_stored_order_is_an_error() {
        let err = complete(None, "ex").unwrap_err();
        assert_eq!(err, CompleteError::NoTaskOrder);
    }

    #[test]
    fn test_empty_input_proposes_everything() {
        let order = order();
        let suggestions = complete(Some(&order), "").unwrap();
        assert_eq!(suggestions, vec!["extract", "transform", "load"]);
    }

    #[test]
    fn test_prefix_match_on_first_token() {
        let order = order();
        let suggestions = complete(Some(&order), "tr").unwrap();
        assert_eq!(suggestions, vec!["transform"]);
    }

    #[test]
    fn test_second_token_keeps_typed_head() {
        let order = order();
        let suggestions = complete(Some(&order), "extract,tr").unwrap();
        assert_eq!(suggestions, vec!["extract,transform"]);
    }

    #[test]
    fn test_candidates_never_go_backward() {
        let order = order();
        let suggestions = complete(Some(&order), "load,").unwrap();
        // Nothing is ordered after load, so nothing can follow it.
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_candidates_start_at_last_used_task() {
        let order = order();
        let suggestions = complete(Some(&order), "transform,").unwrap();
        // extract sits before transform in the order and is excluded.
        assert_eq!(suggestions, vec!["transform,load"]);
    }

    #[test]
    fn test_used_tasks_are_not_proposed_again() {
        let order = order();
        let suggestions = complete(Some(&order), "extract,").unwrap();
        assert_eq!(suggestions, vec!["extract,transform", "extract,load"]);
    }

    #[test]
    fn test_head_tokens_are_trimmed_for_lookup() {
        let order = order();
        // The head keeps its typed spacing in the suggestion, but its tokens
        // are trimmed before being looked up in the stored order.
        let suggestions = complete(Some(&order), " extract ,tr").unwrap();
        assert_eq!(suggestions, vec![" extract ,transform"]);
    }

    #[test]
    fn test_unknown_used_task_is_an_error() {
        let order = order();
        let err = complete(Some(&order), "bogus,").unwrap_err();
        assert_eq!(err, CompleteError::UnknownTask("bogus".to_string()));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let order = order();
        let suggestions = complete(Some(&order), "zzz").unwrap();
        assert!(suggestions.is_empty());
    }
}
