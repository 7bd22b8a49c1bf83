use std::{collections::VecDeque, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use hitlog_app::log;
use hitlog_domain as domain;
use ::log::warn;

use crate::{BackendError, KeyValueStore};

pub const STORAGE_KEY: &str = "high_intensity_training_by_joost_v1";
pub const BACKUP_MEDIA_TYPE: &str = "application/json";

const KEY_LOG: &str = "log";

/// Persists the store as a single JSON document in a key-value backend.
pub struct LocalStorage<S> {
    backend: S,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Replaces the stored document by the given store.
    pub fn save(&self, store: &domain::Store) -> Result<(), BackendError> {
        let json = serde_json::to_string(&Store::from(store))
            .map_err(|err| BackendError::Other(err.to_string()))?;
        self.backend.set_item(STORAGE_KEY, &json)
    }
}

impl<S: KeyValueStore> domain::StoreRepository for LocalStorage<S> {
    fn read_store(&self) -> Result<domain::Store, domain::ReadError> {
        match self.backend.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => Ok(parse_or_default(&raw)),
            Ok(None) => Ok(domain::Store::default()),
            Err(err) => Err(domain::StorageError::Other(err.into()).into()),
        }
    }

    fn write_store(&self, store: &domain::Store) -> Result<(), domain::UpdateError> {
        self.save(store)
            .map_err(|err| domain::StorageError::Other(err.into()).into())
    }
}

impl<S: KeyValueStore> domain::BackupRepository for LocalStorage<S> {
    fn export_backup(&self, store: &domain::Store) -> Result<domain::Backup, domain::ReadError> {
        export_backup(store, Utc::now().date_naive())
    }

    fn parse_backup(&self, raw: &str) -> Result<domain::Store, domain::ImportError> {
        parse_store(raw).map_err(|err| domain::ImportError::InvalidBackup(err.to_string()))
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> log::Repository for LocalStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self.backend.get_item(KEY_LOG) {
            Ok(Some(raw)) => {
                serde_json::from_str(&raw).map_err(|err| log::Error::Unknown(err.to_string()))
            }
            Ok(None) => Ok(VecDeque::new()),
            Err(err) => Err(log::Error::Unknown(err.to_string())),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries().unwrap_or_default();
        log::push_entry(&mut entries, entry);
        let json =
            serde_json::to_string(&entries).map_err(|err| log::Error::Unknown(err.to_string()))?;
        self.backend
            .set_item(KEY_LOG, &json)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

/// Serializes a store into a pretty-printed backup named after the given date.
pub fn export_backup(
    store: &domain::Store,
    date: NaiveDate,
) -> Result<domain::Backup, domain::ReadError> {
    Ok(domain::Backup {
        file_name: backup_file_name(date),
        media_type: BACKUP_MEDIA_TYPE,
        content: serde_json::to_string_pretty(&Store::from(store))
            .map_err(|err| domain::ReadError::Other(err.into()))?,
    })
}

#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("hit_joost_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Parses a stored document or backup.
///
/// Only a document that is not a JSON object with a list of workouts is an error.
/// Workouts that cannot be converted are skipped and an unknown unit falls back to
/// the default, so one odd record never costs the rest of the history.
pub fn parse_store(raw: &str) -> Result<domain::Store, StoreError> {
    let document = serde_json::from_str::<Document>(raw)?;
    let workouts = document
        .workouts
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match parse_workout(value) {
            Ok(workout) => Some(workout),
            Err(err) => {
                warn!("skipping workout {}: {err}", idx + 1);
                None
            }
        })
        .collect();
    let unit = match serde_json::from_value::<Option<Settings>>(document.settings) {
        Ok(settings) => match settings.and_then(|s| s.unit) {
            Some(unit) => parse_unit(&unit).unwrap_or_else(|err| {
                warn!("ignoring unit setting: {err}");
                domain::Unit::default()
            }),
            None => domain::Unit::default(),
        },
        Err(err) => {
            warn!("ignoring settings: {err}");
            domain::Unit::default()
        }
    };
    Ok(domain::Store {
        workouts,
        settings: domain::Settings { unit },
    })
}

fn parse_workout(value: serde_json::Value) -> Result<domain::Workout, StoreError> {
    domain::Workout::try_from(serde_json::from_value::<Workout>(value)?)
}

fn parse_or_default(raw: &str) -> domain::Store {
    parse_store(raw).unwrap_or_else(|err| {
        warn!("ignoring malformed stored data: {err}");
        domain::Store::default()
    })
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownDay(#[from] domain::CatalogError),
    #[error("Unknown unit \"{0}\"")]
    UnknownUnit(String),
    #[error("Invalid date \"{0}\"")]
    InvalidDate(String),
}

fn parse_unit(unit: &str) -> Result<domain::Unit, StoreError> {
    domain::Unit::from_str(unit).map_err(|_| StoreError::UnknownUnit(unit.to_string()))
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct Store {
    pub workouts: Vec<Workout>,
    pub settings: Option<Settings>,
}

impl From<&domain::Store> for Store {
    fn from(value: &domain::Store) -> Self {
        Self {
            workouts: value.workouts.iter().map(Workout::from).collect(),
            settings: Some(Settings {
                unit: Some(value.settings.unit.to_string()),
            }),
        }
    }
}

/// The stored document as far as it must be valid to be read at all.
#[derive(serde::Deserialize)]
struct Document {
    #[serde(default)]
    workouts: Vec<serde_json::Value>,
    #[serde(default)]
    settings: serde_json::Value,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: String,
    pub day_key: String,
    #[serde(default)]
    pub day_name: String,
    #[serde(default)]
    pub unit_at_entry: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: value.id.to_string(),
            created_at: Some(value.created_at),
            date: value.date.to_string(),
            day_key: value.day_key.to_string(),
            day_name: value.day_name.clone(),
            unit_at_entry: Some(value.unit_at_entry.to_string()),
            sets: value.sets.iter().map(SetEntry::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = StoreError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        let date = match (NaiveDate::from_str(value.date.trim()), value.created_at) {
            (Ok(date), _) => date,
            (Err(_), Some(created_at)) => {
                warn!(
                    "workout {} has invalid date \"{}\", using its creation date",
                    value.id, value.date
                );
                created_at.date_naive()
            }
            (Err(_), None) => return Err(StoreError::InvalidDate(value.date)),
        };
        Ok(Self {
            id: value.id.into(),
            created_at: value.created_at.unwrap_or_default(),
            date,
            day_key: domain::DayKey::from_str(&value.day_key)?,
            day_name: value.day_name,
            unit_at_entry: match value.unit_at_entry {
                Some(unit) => parse_unit(&unit)?,
                None => domain::Unit::default(),
            },
            sets: value.sets.into_iter().map(domain::SetEntry::from).collect(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    pub name: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub note_text: String,
    #[serde(default)]
    pub entered_weight: String,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

impl From<&domain::SetEntry> for SetEntry {
    fn from(value: &domain::SetEntry) -> Self {
        Self {
            name: value.name.clone(),
            note: value.note.clone(),
            done: value.done,
            reps: value.reps.clone(),
            note_text: value.note_text.clone(),
            entered_weight: value.entered_weight.clone(),
            weight_kg: value.weight_kg,
        }
    }
}

impl From<SetEntry> for domain::SetEntry {
    fn from(value: SetEntry) -> Self {
        Self {
            name: value.name,
            note: value.note,
            done: value.done,
            reps: value.reps,
            note_text: value.note_text,
            entered_weight: value.entered_weight,
            weight_kg: value.weight_kg,
        }
    }
}
