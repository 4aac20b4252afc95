//! Completion statistics over a task collection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::task::{normalize_tag, Task};

/// Aggregate counts, optionally restricted to one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// The tag these numbers are restricted to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    pub total_completed_minutes: u64,
    /// Only present for unfiltered stats. Buckets keep first-seen tag order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_tag: Option<IndexMap<String, TagStats>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStats {
    pub total: u64,
    pub completed: u64,
    pub completed_minutes: u64,
}

impl TagStats {
    fn record(&mut self, task: &Task) {
        self.total += 1;
        if task.completed {
            self.completed += 1;
            self.completed_minutes += u64::from(task.duration_minutes);
        }
    }
}

/// Compute stats over `tasks`.
///
/// With `filter_tag`, only tasks carrying that tag are counted and no
/// breakdown is produced. Without it, every task contributes to one bucket
/// per tag it carries.
pub fn compute<'a, I>(tasks: I, filter_tag: Option<&str>) -> TaskStats
where
    I: IntoIterator<Item = &'a Task>,
{
    let filter = filter_tag.map(normalize_tag);
    let mut stats = TaskStats {
        tag: filter.clone(),
        ..TaskStats::default()
    };
    let mut by_tag: IndexMap<String, TagStats> = IndexMap::new();

    for task in tasks {
        if let Some(tag) = filter.as_deref() {
            if !task.has_tag(tag) {
                continue;
            }
        }

        stats.total += 1;
        if task.completed {
            stats.completed += 1;
            stats.total_completed_minutes += u64::from(task.duration_minutes);
        } else {
            stats.pending += 1;
        }

        if filter.is_none() {
            for tag in &task.tags {
                by_tag.entry(tag.clone()).or_default().record(task);
            }
        }
    }

    if filter.is_none() {
        stats.by_tag = Some(by_tag);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: u64, duration_minutes: u32, tags: &[&str], completed: bool) -> Task {
        Task {
            id,
            name: format!("task {id}"),
            duration_minutes,
            completed,
            created_at: Utc::now(),
            completed_at: completed.then(Utc::now),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn empty_collection() {
        let stats = compute(&Vec::<Task>::new(), None);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.by_tag, Some(IndexMap::new()));
    }

    #[test]
    fn tag_breakdown_counts_each_tag() {
        let tasks = vec![task(1, 10, &["a"], false), task(2, 20, &["a", "b"], true)];
        let stats = compute(&tasks, None);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_completed_minutes, 20);

        let by_tag = stats.by_tag.unwrap();
        assert_eq!(
            by_tag["a"],
            TagStats { total: 2, completed: 1, completed_minutes: 20 }
        );
        assert_eq!(
            by_tag["b"],
            TagStats { total: 1, completed: 1, completed_minutes: 20 }
        );
        let order: Vec<&str> = by_tag.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn filtered_stats_have_no_breakdown() {
        let tasks = vec![
            task(1, 10, &["work"], true),
            task(2, 15, &["home"], true),
            task(3, 30, &["work"], false),
        ];
        let stats = compute(&tasks, Some("WORK"));
        assert_eq!(stats.tag.as_deref(), Some("work"));
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_completed_minutes, 10);
        assert!(stats.by_tag.is_none());
    }

    #[test]
    fn untagged_tasks_count_in_totals_only() {
        let tasks = vec![task(1, 10, &[], true)];
        let stats = compute(&tasks, None);
        assert_eq!(stats.total_completed_minutes, 10);
        assert!(stats.by_tag.unwrap().is_empty());
    }
}
