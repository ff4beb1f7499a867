//! Task filtering.
//!
//! A [`TaskFilter`] is a conjunction: every field that is set must match.
//! Text fields and the label list count as unset when empty, so clearing an
//! input box in the presentation layer drops the constraint.

use crate::types::{LabelId, Task, TicketStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conjunctive predicate over task fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the assignee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Accept tasks carrying any of these labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LabelId>>,
    /// Case-insensitive substring of the client name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_status: Option<TicketStatus>,
}

impl TaskFilter {
    /// The empty filter, accepting every task
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_from(mut self, date_from: DateTime<Utc>) -> Self {
        self.date_from = Some(date_from);
        self
    }

    pub fn with_date_to(mut self, date_to: DateTime<Utc>) -> Self {
        self.date_to = Some(date_to);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LabelId>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn with_ticket_status(mut self, ticket_status: TicketStatus) -> Self {
        self.ticket_status = Some(ticket_status);
        self
    }

    /// True when no field constrains anything
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && active_text(&self.assignee).is_none()
            && active_labels(&self.labels).is_none()
            && active_text(&self.client_name).is_none()
            && self.ticket_status.is_none()
    }

    /// Evaluate the filter against one task
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(from) = self.date_from {
            if task.created_at < from {
                return false;
            }
        }

        if let Some(to) = self.date_to {
            if task.created_at > to {
                return false;
            }
        }

        if let Some(needle) = active_text(&self.assignee) {
            if !contains_ignore_case(task.assignee.as_deref(), needle) {
                return false;
            }
        }

        if let Some(wanted) = active_labels(&self.labels) {
            if !task.labels.iter().any(|l| wanted.contains(&l.id)) {
                return false;
            }
        }

        if let Some(needle) = active_text(&self.client_name) {
            if !contains_ignore_case(task.client_name.as_deref(), needle) {
                return false;
            }
        }

        if let Some(status) = self.ticket_status {
            if task.ticket_status != Some(status) {
                return false;
            }
        }

        true
    }

    /// Keep the tasks this filter accepts
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}

fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn active_labels(value: &Option<Vec<LabelId>>) -> Option<&[LabelId]> {
    value.as_deref().filter(|l| !l.is_empty())
}

/// An absent haystack never matches a set needle
fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LabelCatalog;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = TaskFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&Task::new("anything")));
        assert!(filter.matches(&Task::new("assigned").with_assignee("Ann")));
    }

    #[test]
    fn test_assignee_filter() {
        let filter = TaskFilter::new().with_assignee("ann");
        assert!(!filter.matches(&Task::new("unassigned")));
        assert!(filter.matches(&Task::new("a").with_assignee("Ann Lee")));
        assert!(filter.matches(&Task::new("b").with_assignee("JOANNA")));
        assert!(!filter.matches(&Task::new("c").with_assignee("Bob")));
    }

    #[test]
    fn test_client_name_filter() {
        let filter = TaskFilter::new().with_client_name("ACME");
        assert!(filter.matches(&Task::new("a").with_client_name("acme corp")));
        assert!(!filter.matches(&Task::new("b")));
        assert!(!filter.matches(&Task::new("c").with_client_name("Initech")));
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let filter = TaskFilter::new()
            .with_assignee("")
            .with_client_name("")
            .with_labels(Vec::<LabelId>::new());
        assert!(filter.is_empty());
        assert!(filter.matches(&Task::new("unassigned")));
    }

    #[test]
    fn test_date_range() {
        let task = Task::new("mid").with_created_at(at(10));

        assert!(TaskFilter::new().with_date_from(at(10)).matches(&task));
        assert!(TaskFilter::new().with_date_to(at(10)).matches(&task));
        assert!(!TaskFilter::new().with_date_from(at(11)).matches(&task));
        assert!(!TaskFilter::new()
            .with_date_to(at(10) - Duration::seconds(1))
            .matches(&task));
        assert!(TaskFilter::new()
            .with_date_from(at(1))
            .with_date_to(at(20))
            .matches(&task));
    }

    #[test]
    fn test_labels_any_of() {
        let catalog = LabelCatalog::default();
        let bug = catalog.get("1").cloned().unwrap();
        let design = catalog.get("5").cloned().unwrap();
        let task = Task::new("t").with_labels(vec![bug, design]);

        assert!(TaskFilter::new().with_labels(["5", "2"]).matches(&task));
        assert!(!TaskFilter::new().with_labels(["2", "3"]).matches(&task));
        assert!(!TaskFilter::new().with_labels(["1"]).matches(&Task::new("bare")));
    }

    #[test]
    fn test_ticket_status_exact() {
        let task = Task::new("t").with_ticket_status(TicketStatus::PendingTech);
        assert!(TaskFilter::new()
            .with_ticket_status(TicketStatus::PendingTech)
            .matches(&task));
        assert!(!TaskFilter::new()
            .with_ticket_status(TicketStatus::Done)
            .matches(&task));
        assert!(!TaskFilter::new()
            .with_ticket_status(TicketStatus::Done)
            .matches(&Task::new("none")));
    }

    #[test]
    fn test_conjunction() {
        let task = Task::new("t")
            .with_assignee("Ann Lee")
            .with_client_name("Acme");
        assert!(TaskFilter::new()
            .with_assignee("ann")
            .with_client_name("acme")
            .matches(&task));
        assert!(!TaskFilter::new()
            .with_assignee("ann")
            .with_client_name("initech")
            .matches(&task));
    }

    #[test]
    fn test_apply() {
        let tasks = [
            Task::new("a").with_assignee("Ann"),
            Task::new("b"),
            Task::new("c").with_assignee("Annette"),
        ];
        let kept = TaskFilter::new().with_assignee("ann").apply(tasks.iter());
        let titles: Vec<_> = kept.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }
}
