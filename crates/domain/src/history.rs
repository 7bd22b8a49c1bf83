use chrono::NaiveDate;

use crate::{Store, Unit, Workout, WorkoutID};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub weight: f64,
}

/// All workouts, most recent date first.
///
/// The order of workouts on the same date is not defined.
#[must_use]
pub fn list_workouts(store: &Store) -> Vec<&Workout> {
    let mut workouts = store.workouts.iter().collect::<Vec<_>>();
    workouts.sort_by(|a, b| b.date.cmp(&a.date));
    workouts
}

/// The store without the workout with the given id.
#[must_use]
pub fn delete_workout(mut store: Store, id: &WorkoutID) -> Store {
    store.workouts.retain(|w| w.id != *id);
    store
}

/// Weight progression of an exercise in chronological order.
///
/// Only the first set of a workout that matches the exercise and has a weight is
/// taken into account. Weights are converted into `unit` and rounded to two decimals.
#[must_use]
pub fn series_for_exercise(store: &Store, exercise: &str, unit: Unit) -> Vec<DataPoint> {
    let mut series = store
        .workouts
        .iter()
        .filter_map(|w| {
            w.sets
                .iter()
                .find(|s| s.name == exercise && s.weight_kg.is_some())
                .and_then(|s| s.display_weight(unit))
                .map(|weight| DataPoint {
                    date: w.date,
                    weight,
                })
        })
        .collect::<Vec<_>>();
    series.sort_by_key(|p| p.date);
    series
}

#[must_use]
pub fn best_weight(series: &[DataPoint]) -> Option<f64> {
    series.iter().map(|p| p.weight).reduce(f64::max)
}
