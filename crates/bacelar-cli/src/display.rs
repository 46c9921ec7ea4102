//! Terminal rendering of deadlines: list table, vertical detail card, and
//! the urgency indicator variants.
//!
//! The classifier emits variant-agnostic data; each variant here is a pure
//! formatter over it.

use bacelar_core::model::{Deadline, User, responsible_name};
use bacelar_core::stats::DashboardStats;
use bacelar_core::urgency::{Urgency, classify};
use chrono::{DateTime, FixedOffset, Utc};

// ── Detail card section groupings ──

const IDENTITY: &[(&str, fn(&Deadline) -> String)] = &[
    ("Tarefa", |d| d.task_description.clone()),
    ("Processo", |d| opt(&d.process_number)),
    ("Tipo", |d| opt(&d.kind)),
    ("Partes", |d| opt(&d.parties)),
];

const LIFECYCLE: &[(&str, fn(&Deadline) -> String)] = &[
    ("Vencimento", |d| br_date(d.due_date)),
    ("Status", |d| d.status.label().to_string()),
    ("Classificação", |d| d.classification.label().to_string()),
];

const TIMESTAMPS: &[(&str, fn(&Deadline) -> String)] = &[
    ("Criado em", |d| br_date(d.created_at)),
    ("Atualizado em", |d| {
        d.updated_at.map(br_date).unwrap_or_else(|| "—".into())
    }),
];

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".into())
}

fn br_date(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// How an urgency indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Badge,
    Dot,
    Bar,
    Card,
}

/// Render an urgency descriptor in the requested variant.
pub fn render_urgency(urgency: &Urgency, variant: Variant) -> String {
    let pulse = if urgency.animate { " !" } else { "" };
    match variant {
        Variant::Badge => format!("[{} {}{}]", urgency.icon, urgency.label, pulse),
        Variant::Dot => format!("● {}{}", urgency.label, pulse),
        Variant::Bar => {
            let filled = "▰".repeat(urgency.priority as usize);
            let empty = "▱".repeat(5 - urgency.priority as usize);
            format!("{filled}{empty} {}", urgency.label)
        }
        Variant::Card => format!(
            "{} {}\n{}",
            urgency.icon,
            urgency.level.name().to_uppercase(),
            urgency.label
        ),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// One table row per deadline: due date, process, kind, responsible,
/// urgency badge, status.
pub fn render_table(deadlines: &[Deadline], users: &[User], now: DateTime<FixedOffset>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:<28} {:<18} {:<16} {:<24} {}\n",
        "VENCIMENTO", "PROCESSO", "TIPO", "RESPONSÁVEL", "URGÊNCIA", "STATUS"
    ));
    for d in deadlines {
        let urgency = classify(d, &now);
        out.push_str(&format!(
            "{:<12} {:<28} {:<18} {:<16} {:<24} {}\n",
            br_date(d.due_date),
            truncate(&opt(&d.process_number), 27),
            truncate(&opt(&d.kind), 17),
            truncate(responsible_name(users, d.responsible_user_id.as_deref()), 15),
            render_urgency(&urgency, Variant::Badge),
            d.status.label(),
        ));
    }
    out
}

/// Vertical card for a single deadline, with its urgency and history.
pub fn render_card(deadline: &Deadline, users: &[User], now: DateTime<FixedOffset>) -> String {
    let mut out = String::new();
    let urgency = classify(deadline, &now);
    out.push_str(&render_urgency(&urgency, Variant::Card));
    out.push('\n');

    for (title, fields) in [
        ("Identificação", IDENTITY),
        ("Prazo", LIFECYCLE),
        ("Registro", TIMESTAMPS),
    ] {
        out.push_str(&format!("\n── {title} ──\n"));
        for (label, get) in fields {
            out.push_str(&format!("{label:<16} {}\n", get(deadline)));
        }
    }

    out.push_str(&format!(
        "{:<16} {}\n",
        "Responsável",
        responsible_name(users, deadline.responsible_user_id.as_deref())
    ));

    if !deadline.history.is_empty() {
        out.push_str("\n── Histórico ──\n");
        for item in &deadline.history {
            out.push_str(&format!(
                "{} {} — {}\n",
                br_date(item.created_at),
                item.acting_user.name,
                item.action_description
            ));
        }
    }
    out
}

pub fn render_stats(stats: &DashboardStats) -> String {
    [
        ("Total de prazos", stats.total),
        ("Pendentes", stats.pending),
        ("Concluídos", stats.completed),
        ("Críticos", stats.critical),
        ("Fatais", stats.fatal),
        ("Próximos 7 dias", stats.due_next_7_days),
        ("Vencidos", stats.overdue),
    ]
    .iter()
    .map(|(label, value)| format!("{label:<18} {value}"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bacelar_core::model::{Classification, DeadlineStatus};
    use chrono::TimeZone;

    fn deadline() -> Deadline {
        Deadline {
            id: "d1".into(),
            task_description: "Protocolar contestação".into(),
            due_date: Utc.with_ymd_and_hms(2026, 8, 24, 23, 59, 0).unwrap(),
            process_number: Some("1234567-89.2023.8.26.0001".into()),
            kind: Some("Contestação".into()),
            parties: None,
            status: DeadlineStatus::Pending,
            classification: Classification::Normal,
            responsible_user_id: None,
            history: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 24, 12, 0, 0)
            .unwrap()
    }

    #[test]
    fn badge_carries_icon_and_label() {
        let urgency = classify(&deadline(), &now());
        let badge = render_urgency(&urgency, Variant::Badge);
        assert_eq!(badge, "[🔥 Vence Hoje! !]");
    }

    #[test]
    fn bar_fills_by_priority() {
        let urgency = classify(&deadline(), &now());
        let bar = render_urgency(&urgency, Variant::Bar);
        assert!(bar.starts_with("▰▰▰▰▱"));
    }

    #[test]
    fn card_shows_level_name() {
        let urgency = classify(&deadline(), &now());
        let card = render_urgency(&urgency, Variant::Card);
        assert!(card.contains("FATAL"));
        assert!(card.contains("Vence Hoje!"));
    }

    #[test]
    fn table_has_header_and_rows() {
        let out = render_table(&[deadline()], &[], now());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("VENCIMENTO"));
        assert!(lines[1].contains("24/08/2026"));
        assert!(lines[1].contains("Não atribuído"));
    }

    #[test]
    fn detail_card_groups_sections() {
        let out = render_card(&deadline(), &[], now());
        assert!(out.contains("── Identificação ──"));
        assert!(out.contains("── Prazo ──"));
        assert!(out.contains("Contestação"));
        assert!(out.contains("Atualizado em"));
    }

    #[test]
    fn stats_lists_all_buckets() {
        let stats = DashboardStats {
            total: 4,
            pending: 2,
            ..Default::default()
        };
        let out = render_stats(&stats);
        assert!(out.contains("Total de prazos"));
        assert!(out.contains("Vencidos"));
    }
}
