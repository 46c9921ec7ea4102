mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bacelar_api::{ApiClient, BulkOperation, Session, run_bulk};
use bacelar_core::export::{export_file_name, report_header, to_csv};
use bacelar_core::filter::{FilterState, QuickFilter};
use bacelar_core::model::DeadlineStatus;
use bacelar_core::pipeline::{Selection, SortDirection, SortField, SortState, project};
use bacelar_core::stats::{DashboardStats, most_urgent};
use bacelar_core::urgency::classify;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bacelar", version, about = "Controle de prazos do escritório")]
struct Cli {
    /// Base URL of the backend.
    #[arg(long, env = "BACELAR_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Where the login session is stored.
    #[arg(long, env = "BACELAR_SESSION_FILE", default_value = ".bacelar-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    DueDate,
    Task,
    Process,
    Kind,
    Status,
    Classification,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> SortField {
        match arg {
            SortArg::DueDate => SortField::DueDate,
            SortArg::Task => SortField::TaskDescription,
            SortArg::Process => SortField::ProcessNumber,
            SortArg::Kind => SortField::Kind,
            SortArg::Status => SortField::Status,
            SortArg::Classification => SortField::Classification,
        }
    }
}

#[derive(clap::Args, Default)]
struct FilterArgs {
    /// Free-text search over description and process number.
    #[arg(long)]
    search: Option<String>,
    /// Kind of procedural act ("Recurso", "Contestação", ...).
    #[arg(long)]
    kind: Option<String>,
    #[arg(long)]
    responsible: Option<String>,
    #[arg(long)]
    classification: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    due_from: Option<String>,
    #[arg(long)]
    due_to: Option<String>,
    #[arg(long)]
    process: Option<String>,
    #[arg(long)]
    parties: Option<String>,
    /// Named shortcut: today, thisWeek, next15Days, critical, fatal, overdue.
    #[arg(long)]
    quick: Option<String>,
}

impl FilterArgs {
    fn resolve(&self) -> anyhow::Result<FilterState> {
        let state = FilterState {
            search: self.search.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            responsible_id: self.responsible.clone().unwrap_or_default(),
            classification: self.classification.clone().unwrap_or_default(),
            status: self.status.clone().unwrap_or_default(),
            due_date_from: self.due_from.clone().unwrap_or_default(),
            due_date_to: self.due_to.clone().unwrap_or_default(),
            process_number: self.process.clone().unwrap_or_default(),
            parties: self.parties.clone().unwrap_or_default(),
            ..Default::default()
        };
        match &self.quick {
            None => Ok(state),
            Some(name) => {
                let quick = QuickFilter::parse(name)
                    .with_context(|| format!("filtro rápido desconhecido: {name}"))?;
                Ok(state.apply(&quick.resolve(Local::now().date_naive())))
            }
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session.
    Logout,
    /// List deadlines with filters, sorting, and pagination.
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value = "due-date")]
        sort: SortArg,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Show one deadline in full, with its history.
    Show { id: String },
    /// Dashboard counters and the most urgent deadlines.
    Stats,
    /// Export the filtered collection as CSV.
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Write to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write to a dated file in the current directory.
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },
    /// Mark deadlines as completed.
    Done { ids: Vec<String> },
    /// Mark deadlines as pending again.
    Reopen { ids: Vec<String> },
    /// Reassign deadlines to a user.
    Assign {
        #[arg(long)]
        user: String,
        ids: Vec<String>,
    },
    /// Delete deadlines.
    Rm { ids: Vec<String> },
}

fn authed_client(api_url: &str, session_file: &Path) -> anyhow::Result<ApiClient> {
    let session = Session::load(session_file)?
        .context("nenhuma sessão ativa; rode `bacelar login` primeiro")?;
    Ok(ApiClient::with_session(api_url.to_string(), &session))
}

async fn run_bulk_command(
    cli: &Cli,
    ids: &[String],
    op: BulkOperation,
) -> anyhow::Result<()> {
    if ids.is_empty() {
        bail!("informe ao menos um id");
    }
    let client = authed_client(&cli.api_url, &cli.session_file)?;
    let mut selection = Selection::new();
    for id in ids {
        selection.toggle(id);
    }
    let outcome = run_bulk(&client, ids, &op, &mut selection).await;
    println!("{} prazo(s) atualizado(s)", outcome.succeeded.len());
    if !outcome.all_succeeded() {
        for (id, err) in &outcome.failures {
            eprintln!("falhou {id}: {err}");
        }
        bail!(
            "{} de {} falharam; repita apenas os ids listados",
            outcome.failures.len(),
            ids.len()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::debug!("bacelar v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    match &cli.command {
        Command::Login { email, password } => {
            let client = ApiClient::new(cli.api_url.clone());
            let token = client.login(email, password).await?;
            let authed = ApiClient::with_token(cli.api_url.clone(), token.clone());
            let user = authed.me().await?;
            println!("Bem-vindo, {}", user.name);
            Session { token, user }.save(&cli.session_file)?;
        }

        Command::Logout => {
            Session::clear(&cli.session_file)?;
            println!("Sessão encerrada");
        }

        Command::List {
            filters,
            sort,
            desc,
            page,
            page_size,
        } => {
            let client = authed_client(&cli.api_url, &cli.session_file)?;
            let state = filters.resolve()?;
            let deadlines = client.list(&state).await?;
            let users = client.list_users().await?;
            let sort = SortState {
                field: (*sort).into(),
                direction: if *desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            };
            let projection = project(&deadlines, sort, *page, *page_size);
            print!(
                "{}",
                display::render_table(
                    &projection.page_items,
                    &users,
                    Local::now().fixed_offset()
                )
            );
            println!(
                "página {page} de {} · {} prazo(s)",
                projection.total_pages, projection.total_count
            );
        }

        Command::Show { id } => {
            let client = authed_client(&cli.api_url, &cli.session_file)?;
            let deadline = client.get(id).await?;
            let users = client.list_users().await?;
            print!(
                "{}",
                display::render_card(&deadline, &users, Local::now().fixed_offset())
            );
        }

        Command::Stats => {
            let client = authed_client(&cli.api_url, &cli.session_file)?;
            let deadlines = client.list(&FilterState::default()).await?;
            let stats = DashboardStats::compute(&deadlines, Utc::now());
            println!("{}\n", report_header(Utc::now(), deadlines.len()));
            println!("{}", display::render_stats(&stats));
            let urgent = most_urgent(&deadlines, 5);
            if !urgent.is_empty() {
                println!("\nMais urgentes:");
                let now = Local::now().fixed_offset();
                for d in &urgent {
                    let urgency = classify(d, &now);
                    println!(
                        "  {} {} — {}",
                        display::render_urgency(&urgency, display::Variant::Dot),
                        d.due_date.format("%d/%m/%Y"),
                        d.task_description
                    );
                }
            }
        }

        Command::Export {
            filters,
            output,
            save,
        } => {
            let client = authed_client(&cli.api_url, &cli.session_file)?;
            let state = filters.resolve()?;
            let deadlines = client.list(&state).await?;
            let users = client.list_users().await?;
            let csv = to_csv(&deadlines, &users);
            let target = output
                .clone()
                .or_else(|| save.then(|| PathBuf::from(export_file_name(Utc::now()))));
            match target {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("{} prazo(s) exportado(s) para {}", deadlines.len(), path.display());
                }
                None => println!("{csv}"),
            }
        }

        Command::Done { ids } => {
            run_bulk_command(&cli, ids, BulkOperation::SetStatus(DeadlineStatus::Completed))
                .await?
        }
        Command::Reopen { ids } => {
            run_bulk_command(&cli, ids, BulkOperation::SetStatus(DeadlineStatus::Pending))
                .await?
        }
        Command::Assign { user, ids } => {
            run_bulk_command(&cli, ids, BulkOperation::SetResponsible(user.clone())).await?
        }
        Command::Rm { ids } => run_bulk_command(&cli, ids, BulkOperation::Delete).await?,
    }

    Ok(())
}
