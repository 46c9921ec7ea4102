//! Render-time urgency classification.
//!
//! A deadline's urgency is recomputed on every render from its due date,
//! lifecycle status, and stored classification. It is never persisted:
//! "today" changes between renders, so a cached level would go stale.
//!
//! Bucket boundaries (pending deadlines, by days until due):
//!
//! - `< 0`  → overdue, priority 5
//! - `= 0`  → fatal, priority 4 (also any deadline tagged fatal)
//! - `≤ 3`  → critical, priority 3 (also any deadline tagged critical)
//! - `≤ 7`  → warning, priority 2
//! - `≤ 15` → upcoming, priority 1
//! - else   → normal, priority 0
//!
//! Completed and cancelled deadlines are terminal at priority 0 regardless
//! of date. Rules are evaluated in order; the first match wins.

use chrono::{DateTime, TimeZone};

use crate::model::{Classification, Deadline, DeadlineStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyLevel {
    Completed,
    Cancelled,
    Overdue,
    Fatal,
    Critical,
    Warning,
    Upcoming,
    Normal,
}

impl UrgencyLevel {
    pub fn name(self) -> &'static str {
        match self {
            UrgencyLevel::Completed => "completed",
            UrgencyLevel::Cancelled => "cancelled",
            UrgencyLevel::Overdue => "overdue",
            UrgencyLevel::Fatal => "fatal",
            UrgencyLevel::Critical => "critical",
            UrgencyLevel::Warning => "warning",
            UrgencyLevel::Upcoming => "upcoming",
            UrgencyLevel::Normal => "normal",
        }
    }
}

/// Variant-agnostic urgency descriptor. Rendering (badge, dot, bar, card)
/// happens in the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urgency {
    pub level: UrgencyLevel,
    pub label: String,
    /// Rank key, 0..=5, monotonically non-decreasing with urgency.
    pub priority: u8,
    pub icon: &'static str,
    /// Pulse hint for the most pressing buckets.
    pub animate: bool,
}

/// Whole days between the reference instant and the due date.
///
/// The due instant is brought into the reference's timezone before both
/// are truncated to midnight, so a deadline due at 23:59 of the user's
/// calendar day still counts as 0 wherever they are.
pub fn days_until_due<Tz: TimeZone>(deadline: &Deadline, now: &DateTime<Tz>) -> i64 {
    let due = deadline.due_date.with_timezone(&now.timezone()).date_naive();
    (due - now.date_naive()).num_days()
}

fn day_count(n: i64) -> String {
    if n == 1 {
        "1 dia".to_string()
    } else {
        format!("{n} dias")
    }
}

/// Classify a deadline against a reference instant.
///
/// Pure and deterministic: `now` is injected, never read from a clock.
/// Exactly one level is returned.
pub fn classify<Tz: TimeZone>(deadline: &Deadline, now: &DateTime<Tz>) -> Urgency {
    match deadline.status {
        DeadlineStatus::Completed => {
            return Urgency {
                level: UrgencyLevel::Completed,
                label: "Concluído".into(),
                priority: 0,
                icon: "✓",
                animate: false,
            };
        }
        DeadlineStatus::Cancelled => {
            return Urgency {
                level: UrgencyLevel::Cancelled,
                label: "Cancelado".into(),
                priority: 0,
                icon: "✕",
                animate: false,
            };
        }
        DeadlineStatus::Pending => {}
    }

    let days = days_until_due(deadline, now);

    if days < 0 {
        return Urgency {
            level: UrgencyLevel::Overdue,
            label: format!("Vencido há {}", day_count(days.abs())),
            priority: 5,
            icon: "⚠",
            animate: true,
        };
    }

    // Due-today is always fatal, even when tagged normal: the date
    // intentionally overrides the editorial classification.
    if deadline.classification == Classification::Fatal || days == 0 {
        return Urgency {
            level: UrgencyLevel::Fatal,
            label: if days == 0 {
                "Vence Hoje!".into()
            } else {
                "Fatal".into()
            },
            priority: 4,
            icon: "🔥",
            animate: true,
        };
    }

    if deadline.classification == Classification::Critical || days <= 3 {
        return Urgency {
            level: UrgencyLevel::Critical,
            label: if days <= 3 { day_count(days) } else { "Crítico".into() },
            priority: 3,
            icon: "⚡",
            animate: days <= 1,
        };
    }

    if days <= 7 {
        return Urgency {
            level: UrgencyLevel::Warning,
            label: day_count(days),
            priority: 2,
            icon: "⏰",
            animate: false,
        };
    }

    if days <= 15 {
        return Urgency {
            level: UrgencyLevel::Upcoming,
            label: day_count(days),
            priority: 1,
            icon: "📅",
            animate: false,
        };
    }

    Urgency {
        level: UrgencyLevel::Normal,
        label: day_count(days),
        priority: 0,
        icon: "📋",
        animate: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn deadline_due(due: &str, status: DeadlineStatus, classification: Classification) -> Deadline {
        Deadline {
            id: "d1".into(),
            task_description: "Protocolar recurso".into(),
            due_date: due.parse().unwrap(),
            process_number: None,
            kind: None,
            parties: None,
            status,
            classification,
            responsible_user_id: None,
            history: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
    }

    #[test]
    fn completed_is_terminal_regardless_of_date() {
        let d = deadline_due(
            "2020-01-01T00:00:00Z",
            DeadlineStatus::Completed,
            Classification::Fatal,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Completed);
        assert_eq!(u.priority, 0);
        assert!(!u.animate);
    }

    #[test]
    fn cancelled_is_terminal_regardless_of_date() {
        let d = deadline_due(
            "2020-01-01T00:00:00Z",
            DeadlineStatus::Cancelled,
            Classification::Critical,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Cancelled);
        assert_eq!(u.priority, 0);
    }

    #[test]
    fn overdue_label_carries_day_count() {
        // Due 10 days ago.
        let d = deadline_due(
            "2026-08-14T08:00:00Z",
            DeadlineStatus::Pending,
            Classification::Normal,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Overdue);
        assert_eq!(u.priority, 5);
        assert_eq!(u.label, "Vencido há 10 dias");
        assert!(u.animate);
    }

    #[test]
    fn overdue_one_day_singular() {
        let d = deadline_due(
            "2026-08-23T08:00:00Z",
            DeadlineStatus::Pending,
            Classification::Normal,
        );
        assert_eq!(classify(&d, &now()).label, "Vencido há 1 dia");
    }

    #[test]
    fn due_today_late_evening_is_still_fatal() {
        // 23:59 on the due day; midnight truncation makes this day zero.
        let d = deadline_due(
            "2026-08-24T23:59:00Z",
            DeadlineStatus::Pending,
            Classification::Normal,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Fatal);
        assert_eq!(u.priority, 4);
        assert_eq!(u.label, "Vence Hoje!");
        assert!(u.animate);
    }

    #[test]
    fn due_today_in_western_timezone_is_fatal() {
        // 2026-08-25T02:59Z is 23:59 of the 24th at UTC-3; truncation must
        // happen in the observer's frame, not UTC's.
        let d = deadline_due(
            "2026-08-25T02:59:00Z",
            DeadlineStatus::Pending,
            Classification::Normal,
        );
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let local_now = brt.with_ymd_and_hms(2026, 8, 24, 20, 0, 0).unwrap();
        assert_eq!(days_until_due(&d, &local_now), 0);
        let u = classify(&d, &local_now);
        assert_eq!(u.level, UrgencyLevel::Fatal);
        assert_eq!(u.label, "Vence Hoje!");
    }

    #[test]
    fn fatal_classification_overrides_distant_date() {
        let d = deadline_due(
            "2026-12-24T08:00:00Z",
            DeadlineStatus::Pending,
            Classification::Fatal,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Fatal);
        assert_eq!(u.label, "Fatal");
    }

    #[test]
    fn critical_classification_with_distant_date() {
        let d = deadline_due(
            "2026-12-24T08:00:00Z",
            DeadlineStatus::Pending,
            Classification::Critical,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Critical);
        assert_eq!(u.label, "Crítico");
        assert!(!u.animate);
    }

    #[test]
    fn three_days_out_is_critical_and_static() {
        let d = deadline_due(
            "2026-08-27T08:00:00Z",
            DeadlineStatus::Pending,
            Classification::Normal,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Critical);
        assert_eq!(u.label, "3 dias");
        assert!(!u.animate);
    }

    #[test]
    fn one_day_out_is_critical_and_animated() {
        let d = deadline_due(
            "2026-08-25T08:00:00Z",
            DeadlineStatus::Pending,
            Classification::Normal,
        );
        let u = classify(&d, &now());
        assert_eq!(u.level, UrgencyLevel::Critical);
        assert_eq!(u.label, "1 dia");
        assert!(u.animate);
    }

    #[test]
    fn priority_strictly_increases_toward_due_date() {
        // One pending deadline per bucket: >15, ≤15, ≤7, ≤3, =0, <0.
        let offsets = [20i64, 15, 7, 3, 0, -1];
        let priorities: Vec<u8> = offsets
            .iter()
            .map(|off| {
                let due = now().date_naive() + chrono::Duration::days(*off);
                let d = deadline_due(
                    &format!("{due}T12:00:00Z"),
                    DeadlineStatus::Pending,
                    Classification::Normal,
                );
                classify(&d, &now()).priority
            })
            .collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn classify_is_pure() {
        let d = deadline_due(
            "2026-08-30T08:00:00Z",
            DeadlineStatus::Pending,
            Classification::Normal,
        );
        assert_eq!(classify(&d, &now()), classify(&d, &now()));
        // Moving the reference date changes only the bucket, not the
        // terminal handling of completed deadlines.
        let done = deadline_due(
            "2026-08-30T08:00:00Z",
            DeadlineStatus::Completed,
            Classification::Normal,
        );
        let later = Utc.with_ymd_and_hms(2027, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(classify(&done, &now()).level, UrgencyLevel::Completed);
        assert_eq!(classify(&done, &later).level, UrgencyLevel::Completed);
    }
}
