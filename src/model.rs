use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifiant de membre du personnel : chaîne ou entier, renvoyé tel quel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaffId {
    Number(i64),
    Text(String),
}

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self::Text(s.as_ref().to_owned())
    }
}

impl From<i64> for StaffId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for StaffId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Membre du personnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    /// Préférence déclarée ; ignorée sauf pondération par priorité explicite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

impl StaffMember {
    pub fn new<I: Into<StaffId>>(id: I) -> Self {
        Self {
            id: id.into(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Date de travail : jeton opaque, aucune sémantique calendaire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDate(String);

impl WorkDate {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkDate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for WorkDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bornes d'effectif par jour. Aucun contrôle `min <= max` : une borne
/// inversée donne simplement un modèle infaisable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default = "default_min_staff")]
    pub min_staff_per_day: u32,
    #[serde(default = "default_max_staff")]
    pub max_staff_per_day: u32,
}

fn default_min_staff() -> u32 {
    2
}

fn default_max_staff() -> u32 {
    5
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_staff_per_day: default_min_staff(),
            max_staff_per_day: default_max_staff(),
        }
    }
}

impl Constraints {
    pub fn new(min_staff_per_day: u32, max_staff_per_day: u32) -> Self {
        Self {
            min_staff_per_day,
            max_staff_per_day,
        }
    }
}

/// Horaires appliqués à chaque shift émis (09:00–17:00 par défaut).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTimes {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl Default for ShiftTimes {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Créneau affecté à une personne pour une date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub staff_id: StaffId,
    pub date: WorkDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl Shift {
    pub fn new(staff_id: StaffId, date: WorkDate, times: ShiftTimes) -> Self {
        Self {
            staff_id,
            date,
            start_time: times.start,
            end_time: times.end,
        }
    }
}

/// Requête complète : toutes les clés sont optionnelles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub dates: Vec<WorkDate>,
    #[serde(default)]
    pub constraints: Constraints,
}

/// Parse un horaire `HH:MM`.
pub fn parse_hhmm(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(raw.trim(), hhmm::FORMAT)
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }
}
