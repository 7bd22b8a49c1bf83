#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
mod error;
pub mod history;
pub mod service;
mod store;
pub mod unit;
mod workout;

pub use catalog::{CatalogError, DayKey, DayPlan, ExercisePlanEntry, exercise_names, plan, plans};
pub use error::{ImportError, ReadError, StorageError, UpdateError};
pub use history::{DataPoint, best_weight, delete_workout, list_workouts, series_for_exercise};
pub use service::Service;
pub use store::{Backup, BackupRepository, Settings, Store, StoreRepository};
pub use unit::{KG_PER_LB, LB_PER_KG, Unit, WeightInput, from_canonical, round_display, to_canonical};
pub use workout::{
    SetEntry, SetInput, Workout, WorkoutForm, WorkoutID, build_workout, format_date_eu,
};
