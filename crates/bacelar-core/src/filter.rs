//! Filter state snapshots and the quick-filter resolver.
//!
//! `FilterState` is owned by the view layer; everything here operates on
//! immutable snapshots and returns a new snapshot. Empty string means
//! "field not set", matching the backend's query contract.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sentinel for the days-until-due bucket meaning "before today", as
/// opposed to any fixed forward window.
pub const OVERDUE_BUCKET: &str = "overdue";

const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    /// Kind of procedural act; query key `type`.
    pub kind: String,
    pub responsible_id: String,
    pub classification: String,
    pub status: String,
    pub due_date_from: String,
    pub due_date_to: String,
    pub days_until_due: String,
    pub process_number: String,
    pub parties: String,
}

impl FilterState {
    /// Non-empty fields as query pairs for the backend's list endpoint.
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        let fields: [(&'static str, &str); 10] = [
            ("q", &self.search),
            ("type", &self.kind),
            ("responsible_id", &self.responsible_id),
            ("classification", &self.classification),
            ("status", &self.status),
            ("due_date_from", &self.due_date_from),
            ("due_date_to", &self.due_date_to),
            ("days_until_due", &self.days_until_due),
            ("process_number", &self.process_number),
            ("parties", &self.parties),
        ];
        fields
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .collect()
    }

    /// New snapshot with the patch's set keys overwritten and every other
    /// field preserved.
    pub fn apply(&self, patch: &FilterPatch) -> FilterState {
        let mut next = self.clone();
        if let Some(v) = &patch.classification {
            next.classification = v.clone();
        }
        if let Some(v) = &patch.due_date_from {
            next.due_date_from = v.clone();
        }
        if let Some(v) = &patch.due_date_to {
            next.due_date_to = v.clone();
        }
        if let Some(v) = &patch.days_until_due {
            next.days_until_due = v.clone();
        }
        next
    }

    pub fn cleared() -> FilterState {
        FilterState::default()
    }
}

/// Partial filter update produced by a quick filter; only set keys are
/// merged into the caller's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub classification: Option<String>,
    pub due_date_from: Option<String>,
    pub due_date_to: Option<String>,
    pub days_until_due: Option<String>,
}

/// Named shortcut that expands to a concrete filter patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    Today,
    ThisWeek,
    Next15Days,
    Critical,
    Fatal,
    Overdue,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 6] = [
        QuickFilter::Today,
        QuickFilter::ThisWeek,
        QuickFilter::Next15Days,
        QuickFilter::Critical,
        QuickFilter::Fatal,
        QuickFilter::Overdue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuickFilter::Today => "today",
            QuickFilter::ThisWeek => "thisWeek",
            QuickFilter::Next15Days => "next15Days",
            QuickFilter::Critical => "critical",
            QuickFilter::Fatal => "fatal",
            QuickFilter::Overdue => "overdue",
        }
    }

    pub fn parse(s: &str) -> Option<QuickFilter> {
        QuickFilter::ALL.into_iter().find(|q| q.name() == s)
    }

    /// Expand into a filter patch relative to `today`.
    ///
    /// Date filters always produce `from <= to`; the classification
    /// filters leave date bounds alone; overdue uses the bucket sentinel
    /// rather than a date range.
    pub fn resolve(self, today: NaiveDate) -> FilterPatch {
        let fmt = |d: NaiveDate| d.format(DATE_FMT).to_string();
        match self {
            QuickFilter::Today => FilterPatch {
                due_date_from: Some(fmt(today)),
                due_date_to: Some(fmt(today)),
                ..Default::default()
            },
            QuickFilter::ThisWeek => FilterPatch {
                due_date_from: Some(fmt(today)),
                due_date_to: Some(fmt(today + Duration::days(7))),
                ..Default::default()
            },
            QuickFilter::Next15Days => FilterPatch {
                due_date_from: Some(fmt(today)),
                due_date_to: Some(fmt(today + Duration::days(15))),
                ..Default::default()
            },
            QuickFilter::Critical => FilterPatch {
                classification: Some("critico".into()),
                ..Default::default()
            },
            QuickFilter::Fatal => FilterPatch {
                classification: Some("fatal".into()),
                ..Default::default()
            },
            QuickFilter::Overdue => FilterPatch {
                days_until_due: Some(OVERDUE_BUCKET.into()),
                ..Default::default()
            },
        }
    }
}
