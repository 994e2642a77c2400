use std::collections::BTreeMap;

use flowcast_core::{utc_day, DateRange, HierarchyLevel, IssueSnapshot};

/// Epic → children index.
///
/// The map owns child keys only; children point back at their epic through
/// `parent_key`, resolved here by lookup.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    children: BTreeMap<String, Vec<String>>,
    levels: BTreeMap<String, HierarchyLevel>,
}

impl Hierarchy {
    pub fn build(issues: &[IssueSnapshot]) -> Self {
        let mut out = Self::default();
        for issue in issues {
            out.levels.insert(issue.key.clone(), issue.hierarchy_level);
            if issue.hierarchy_level == HierarchyLevel::Epic {
                out.children.entry(issue.key.clone()).or_default();
            }
        }
        for issue in issues {
            if let Some(parent) = &issue.parent_key {
                out.children
                    .entry(parent.clone())
                    .or_default()
                    .push(issue.key.clone());
            }
        }
        out
    }

    /// Keys of every known epic, sorted.
    pub fn epics(&self) -> Vec<&str> {
        self.children.keys().map(String::as_str).collect()
    }

    pub fn children_of(&self, epic_key: &str) -> &[String] {
        self.children
            .get(epic_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn level_of(&self, key: &str) -> Option<HierarchyLevel> {
        self.levels.get(key).copied()
    }

    /// Snapshots of `epic_key`'s children, in input order.
    pub fn child_issues<'a>(
        &self,
        epic_key: &str,
        issues: &'a [IssueSnapshot],
    ) -> Vec<&'a IssueSnapshot> {
        let keys = self.children_of(epic_key);
        issues
            .iter()
            .filter(|i| keys.contains(&i.key))
            .collect()
    }
}

/// Issues at one structural tier.
pub fn filter_by_level(issues: &[IssueSnapshot], level: HierarchyLevel) -> Vec<IssueSnapshot> {
    issues
        .iter()
        .filter(|i| i.hierarchy_level == level)
        .cloned()
        .collect()
}

/// Issues whose completion day falls inside `range`.
pub fn filter_completed_in(issues: &[IssueSnapshot], range: &DateRange) -> Vec<IssueSnapshot> {
    issues
        .iter()
        .filter(|i| i.completed_at.is_some_and(|c| range.contains(utc_day(c))))
        .cloned()
        .collect()
}
