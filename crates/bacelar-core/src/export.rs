//! Pure data-to-text export of the deadline collection. No file I/O here;
//! the caller decides where the text goes.

use chrono::{DateTime, Utc};

use crate::model::{Deadline, User, responsible_name};

const CSV_HEADERS: [&str; 9] = [
    "Processo",
    "Descrição",
    "Tipo",
    "Data de Vencimento",
    "Classificação",
    "Status",
    "Partes",
    "Responsável",
    "Criado em",
];

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn br_date(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// Render the collection as CSV with pt-BR headers and dd/mm/yyyy dates.
/// Exporting only a selection is the caller filtering the slice first.
pub fn to_csv(deadlines: &[Deadline], users: &[User]) -> String {
    let mut lines = Vec::with_capacity(deadlines.len() + 1);
    lines.push(
        CSV_HEADERS
            .iter()
            .map(|h| csv_quote(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for d in deadlines {
        let fields = [
            d.process_number.as_deref().unwrap_or_default().to_string(),
            d.task_description.clone(),
            d.kind.as_deref().unwrap_or_default().to_string(),
            br_date(d.due_date),
            d.classification.wire_value().to_string(),
            d.status.wire_value().to_string(),
            d.parties.as_deref().unwrap_or_default().to_string(),
            responsible_name(users, d.responsible_user_id.as_deref()).to_string(),
            br_date(d.created_at),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| csv_quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Suggested file name for an export taken at `now`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("prazos_{}.csv", now.format("%Y-%m-%d"))
}

/// Title block for the printable report.
pub fn report_header(now: DateTime<Utc>, count: usize) -> String {
    format!(
        "Relatório de Prazos\nGerado em {} às {}\nTotal de prazos: {count}",
        now.format("%d/%m/%Y"),
        now.format("%H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, DeadlineStatus, Profile};
    use chrono::TimeZone;

    fn deadline() -> Deadline {
        Deadline {
            id: "d1".into(),
            task_description: "Apresentar \"razões finais\"".into(),
            due_date: Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap(),
            process_number: Some("1234567-89.2023.8.26.0001".into()),
            kind: Some("Alegações Finais".into()),
            parties: Some("Silva, Souza e outros".into()),
            status: DeadlineStatus::Pending,
            classification: Classification::Critical,
            responsible_user_id: Some("u2".into()),
            history: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn users() -> Vec<User> {
        vec![User {
            id: "u2".into(),
            name: "Bia".into(),
            email: "bia@bacelar.adv.br".into(),
            profile: Profile::Lawyer,
            phone: None,
        }]
    }

    #[test]
    fn csv_has_header_and_one_row_per_deadline() {
        let csv = to_csv(&[deadline()], &users());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\"Processo\",\"Descrição\""));
    }

    #[test]
    fn csv_doubles_embedded_quotes_and_keeps_commas_quoted() {
        let csv = to_csv(&[deadline()], &users());
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Apresentar \"\"razões finais\"\"\""));
        assert!(row.contains("\"Silva, Souza e outros\""));
    }

    #[test]
    fn csv_formats_dates_br_style() {
        let csv = to_csv(&[deadline()], &users());
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"01/09/2026\""));
        assert!(row.contains("\"01/08/2026\""));
    }

    #[test]
    fn csv_resolves_responsible_name() {
        let csv = to_csv(&[deadline()], &users());
        assert!(csv.contains("\"Bia\""));
        let csv = to_csv(&[deadline()], &[]);
        assert!(csv.contains("\"Usuário não encontrado\""));
    }

    #[test]
    fn export_file_name_uses_iso_date() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 23, 0, 0).unwrap();
        assert_eq!(export_file_name(now), "prazos_2026-08-24.csv");
    }

    #[test]
    fn report_header_carries_count() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 14, 30, 0).unwrap();
        let header = report_header(now, 7);
        assert!(header.contains("Total de prazos: 7"));
        assert!(header.contains("24/08/2026"));
    }
}
