use crate::model::{Request, Shift};
use crate::optimizer::Outcome;
use crate::solver::SolveStatus;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),
}

/// Lit une requête JSON (un seul document).
pub fn read_request<R: Read>(reader: R) -> Result<Request, InputError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_request_from_path<P: AsRef<Path>>(path: P) -> Result<Request, InputError> {
    let file = File::open(path)?;
    read_request(BufReader::new(file))
}

/// Document JSON de sortie, succès comme échec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifts: Option<Vec<Shift>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SolveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,
}

impl Response {
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success {
                shifts,
                status,
                objective_value,
            } => Self {
                success: true,
                error: None,
                shifts: Some(shifts),
                status: Some(status),
                objective_value: Some(objective_value),
            },
            Outcome::Failure { error, status } => Self::failure(error, status),
        }
    }

    pub fn input_error(err: &InputError) -> Self {
        Self::failure(err.to_string(), None)
    }

    pub fn unexpected<E: fmt::Display + ?Sized>(err: &E) -> Self {
        Self::failure(format!("an error occurred: {err}"), None)
    }

    fn failure(error: String, status: Option<SolveStatus>) -> Self {
        Self {
            success: false,
            error: Some(error),
            shifts: None,
            status,
            objective_value: None,
        }
    }
}

/// Écrit la réponse suivie d'un saut de ligne.
pub fn write_response<W: Write>(mut w: W, response: &Response, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut w, response)?;
    } else {
        serde_json::to_writer(&mut w, response)?;
    }
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Écriture atomique (fichier temporaire puis renommage).
pub fn write_response_to_path<P: AsRef<Path>>(
    path: P,
    response: &Response,
    pretty: bool,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    write_response(&mut tmp, response, pretty)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

/// Export CSV des shifts: header `staff_id,date,start_time,end_time`
#[cfg(feature = "csv")]
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, shifts: &[Shift]) -> anyhow::Result<()> {
    let mut w = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["staff_id", "date", "start_time", "end_time"])?;
    for s in shifts {
        let staff_id = s.staff_id.to_string();
        let start = s.start_time.format("%H:%M").to_string();
        let end = s.end_time.format("%H:%M").to_string();
        w.write_record([
            staff_id.as_str(),
            s.date.as_str(),
            start.as_str(),
            end.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShiftTimes, StaffId, WorkDate};

    #[test]
    fn malformed_json_is_an_input_error() {
        let err = read_request("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
        let resp = Response::input_error(&err);
        assert!(!resp.success);
        assert!(resp.error.unwrap().starts_with("invalid JSON input:"));
        assert_eq!(resp.status, None);
    }

    #[test]
    fn staff_without_id_is_rejected() {
        let err = read_request(r#"{"staff": [{"name": "A"}]}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn failure_response_keeps_status() {
        let resp = Response::from_outcome(Outcome::Failure {
            error: "nope".into(),
            status: Some(SolveStatus::Infeasible),
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"nope","status":"Infeasible"}"#);
    }

    #[test]
    fn success_response_field_order() {
        let resp = Response::from_outcome(Outcome::Success {
            shifts: vec![Shift::new(
                StaffId::Number(1),
                WorkDate::new("2024-01-01"),
                ShiftTimes::default(),
            )],
            status: SolveStatus::Optimal,
            objective_value: 1.0,
        });
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"shifts":[{"staff_id":1,"date":"2024-01-01","start_time":"09:00","end_time":"17:00"}],"status":"Optimal","objective_value":1.0}"#
        );
    }

    #[test]
    fn atomic_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let resp = Response::unexpected("disk on fire");
        write_response_to_path(&path, &resp, true).unwrap();
        let back: Response = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(back, resp);
        assert_eq!(back.error.as_deref(), Some("an error occurred: disk on fire"));
    }
}
