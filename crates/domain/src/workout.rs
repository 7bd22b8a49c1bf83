use chrono::{DateTime, Local, NaiveDate, Utc};
use derive_more::{AsRef, Deref, Display};

use crate::{DayKey, Unit, from_canonical, round_display, to_canonical};

/// Opaque identifier of a workout, unique within a store.
#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub day_key: DayKey,
    pub day_name: String,
    pub unit_at_entry: Unit,
    pub sets: Vec<SetEntry>,
}

impl Workout {
    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.done).count()
    }

    #[cfg(test)]
    pub(crate) fn example(id: &str, date: &str) -> Self {
        use std::str::FromStr;

        Self {
            id: id.into(),
            created_at: DateTime::<Utc>::default(),
            date: NaiveDate::from_str(date).unwrap(),
            day_key: DayKey::Day4,
            day_name: DayKey::Day4.plan().name.to_string(),
            unit_at_entry: Unit::Kg,
            sets: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetEntry {
    pub name: String,
    pub note: String,
    pub done: bool,
    pub reps: String,
    pub note_text: String,
    pub entered_weight: String,
    pub weight_kg: Option<f64>,
}

impl SetEntry {
    #[must_use]
    pub fn display_weight(&self, unit: Unit) -> Option<f64> {
        self.weight_kg.map(|kg| round_display(from_canonical(unit, kg)))
    }

    /// Weight and reps as shown in the history, e.g. `100 kg × 8`.
    #[must_use]
    pub fn display_summary(&self, unit: Unit) -> String {
        let weight = match self.display_weight(unit) {
            Some(weight) => format!("{weight} {unit}"),
            None => "—".to_string(),
        };
        if self.reps.is_empty() {
            weight
        } else {
            format!("{weight} × {}", self.reps)
        }
    }
}

/// One editable row of the workout form.
#[derive(Debug, Clone, PartialEq)]
pub struct SetInput {
    name: &'static str,
    note: &'static str,
    pub weight: String,
    pub reps: String,
    pub done: bool,
    pub note_text: String,
}

impl SetInput {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn note(&self) -> &'static str {
        self.note
    }
}

/// Input state for recording a workout of one training day.
///
/// The rows are created from the day plan and cannot be added or removed, so a
/// built workout always has one set per planned exercise in plan order.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub day: DayKey,
    pub date: NaiveDate,
    pub unit: Unit,
    rows: Vec<SetInput>,
}

impl WorkoutForm {
    #[must_use]
    pub fn new(day: DayKey, date: NaiveDate, unit: Unit) -> Self {
        Self {
            day,
            date,
            unit,
            rows: day
                .plan()
                .exercises
                .iter()
                .map(|e| SetInput {
                    name: e.name,
                    note: e.note,
                    weight: String::new(),
                    reps: String::new(),
                    done: false,
                    note_text: String::new(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn today(day: DayKey, unit: Unit) -> Self {
        Self::new(day, Local::now().date_naive(), unit)
    }

    #[must_use]
    pub fn rows(&self) -> &[SetInput] {
        &self.rows
    }

    pub fn row_mut(&mut self, idx: usize) -> Option<&mut SetInput> {
        self.rows.get_mut(idx)
    }

    pub fn toggle_done(&mut self, idx: usize) {
        if let Some(row) = self.rows.get_mut(idx) {
            row.done = !row.done;
        }
    }

    #[must_use]
    pub fn build(&self, id: WorkoutID, created_at: DateTime<Utc>) -> Workout {
        build_workout(id, created_at, self)
    }
}

/// Creates the workout record for a filled form.
///
/// Entered weights are converted to kilograms using the unit of the form. A row
/// without an entered weight gets no weight at all.
#[must_use]
pub fn build_workout(id: WorkoutID, created_at: DateTime<Utc>, form: &WorkoutForm) -> Workout {
    Workout {
        id,
        created_at,
        date: form.date,
        day_key: form.day,
        day_name: form.day.plan().name.to_string(),
        unit_at_entry: form.unit,
        sets: form
            .rows
            .iter()
            .map(|row| SetEntry {
                name: row.name.to_string(),
                note: row.note.to_string(),
                done: row.done,
                reps: row.reps.clone(),
                note_text: row.note_text.clone(),
                entered_weight: row.weight.clone(),
                weight_kg: if row.weight.is_empty() {
                    None
                } else {
                    Some(to_canonical(form.unit, row.weight.as_str()))
                },
            })
            .collect(),
    }
}

#[must_use]
pub fn format_date_eu(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
