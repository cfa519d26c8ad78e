#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::NaiveTime;
use clap::Parser;
use shift_optimizer::{
    io::{self, InputError, Response},
    model::{parse_hhmm, Request, ShiftTimes},
    Optimizer, Outcome,
};
use std::path::PathBuf;
use tracing::error;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Optimiseur de shifts : lit une requête JSON, écrit un résultat JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs sur stderr (feature `logging`)
    #[arg(long)]
    log: bool,

    /// Requête JSON (stdin par défaut)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Fichier de sortie, écrit atomiquement (stdout par défaut)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Export CSV des shifts en cas de succès ; un échec d'export fait
    /// échouer toute l'exécution (réponse d'erreur, code 1)
    #[cfg(feature = "csv")]
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Heure de début des shifts (HH:MM)
    #[arg(long, default_value = "09:00", value_parser = parse_hhmm)]
    start_time: NaiveTime,

    /// Heure de fin des shifts (HH:MM)
    #[arg(long, default_value = "17:00", value_parser = parse_hhmm)]
    end_time: NaiveTime,

    /// Pondère l'objectif par le champ `priority` du personnel
    #[arg(long)]
    priority_weights: bool,

    /// Sortie JSON indentée
    #[arg(long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let (response, code) = run(&cli);
    if let Err(err) = emit(&cli, &response) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
    std::process::exit(code);
}

/// Code 0 pour toute réponse produite (y compris infaisable), 1 sinon.
fn run(cli: &Cli) -> (Response, i32) {
    let request = match load_request(cli) {
        Ok(r) => r,
        Err(err) => {
            error!(%err, "rejecting request");
            return (Response::input_error(&err), 1);
        }
    };

    let mut optimizer = Optimizer::new().with_shift_times(ShiftTimes {
        start: cli.start_time,
        end: cli.end_time,
    });
    if cli.priority_weights {
        optimizer = optimizer.with_priority_weights();
    }

    match optimizer.optimize(&request) {
        Ok(outcome) => {
            if let Err(err) = export(cli, &outcome) {
                error!(error = %format!("{err:#}"), "csv export failed");
                return (Response::unexpected(&err), 1);
            }
            (Response::from_outcome(outcome), 0)
        }
        Err(err) => {
            error!(%err, "optimization failed");
            (Response::unexpected(&err), 1)
        }
    }
}

fn load_request(cli: &Cli) -> Result<Request, InputError> {
    match &cli.input {
        Some(path) => io::read_request_from_path(path),
        None => io::read_request(std::io::stdin().lock()),
    }
}

#[cfg(feature = "csv")]
fn export(cli: &Cli, outcome: &Outcome) -> Result<()> {
    if let (Some(path), true) = (&cli.csv, outcome.is_success()) {
        io::export_shifts_csv(path, outcome.shifts())?;
    }
    Ok(())
}

#[cfg(not(feature = "csv"))]
fn export(_cli: &Cli, _outcome: &Outcome) -> Result<()> {
    Ok(())
}

fn emit(cli: &Cli, response: &Response) -> Result<()> {
    match &cli.output {
        Some(path) => io::write_response_to_path(path, response, cli.pretty),
        None => io::write_response(std::io::stdout().lock(), response, cli.pretty),
    }
}
