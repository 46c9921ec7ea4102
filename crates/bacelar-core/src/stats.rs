//! Aggregate counts for the dashboard cards and the "most urgent" list.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Classification, Deadline, DeadlineStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    /// Pending deadlines tagged critical.
    pub critical: usize,
    /// Pending deadlines tagged fatal.
    pub fatal: usize,
    /// Pending deadlines due within the next seven days.
    pub due_next_7_days: usize,
    /// Pending deadlines already past due.
    pub overdue: usize,
}

impl DashboardStats {
    pub fn compute(deadlines: &[Deadline], now: DateTime<Utc>) -> DashboardStats {
        let horizon = now + Duration::days(7);
        let mut stats = DashboardStats {
            total: deadlines.len(),
            ..Default::default()
        };
        for d in deadlines {
            match d.status {
                DeadlineStatus::Completed => stats.completed += 1,
                DeadlineStatus::Pending => {
                    stats.pending += 1;
                    match d.classification {
                        Classification::Critical => stats.critical += 1,
                        Classification::Fatal => stats.fatal += 1,
                        Classification::Normal => {}
                    }
                    if d.due_date < now {
                        stats.overdue += 1;
                    } else if d.due_date <= horizon {
                        stats.due_next_7_days += 1;
                    }
                }
                DeadlineStatus::Cancelled => {}
            }
        }
        stats
    }
}

/// Pending critical/fatal deadlines, soonest first, truncated to `limit`.
pub fn most_urgent(deadlines: &[Deadline], limit: usize) -> Vec<Deadline> {
    let mut urgent: Vec<Deadline> = deadlines
        .iter()
        .filter(|d| {
            d.status == DeadlineStatus::Pending
                && matches!(
                    d.classification,
                    Classification::Critical | Classification::Fatal
                )
        })
        .cloned()
        .collect();
    urgent.sort_by_key(|d| d.due_date);
    urgent.truncate(limit);
    urgent
}
