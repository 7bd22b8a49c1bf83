//! Command-line interface of hitlog.

use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hitlog_domain::{DayKey, Unit};
use log::LevelFilter;

/// High Intensity Training by Joost: log workouts and follow your progress.
#[derive(Parser, Debug)]
#[command(name = "hitlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the stored workouts
    #[arg(long, env = "HITLOG_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace), takes precedence over --verbose
    #[arg(long, env = "HITLOG_LOG_LEVEL", global = true)]
    pub log_level: Option<LevelFilter>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Show the training days and their exercises
    Days,

    /// List all exercises of the training plan
    Exercises,

    /// Record a workout
    New {
        /// Training day (day1, day2, day3, day4)
        day: DayKey,

        /// Date of the workout (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Weight of the exercise at position N in the current unit
        #[arg(long = "weight", value_name = "N=WEIGHT")]
        weights: Vec<FieldValue>,

        /// Repetitions of the exercise at position N
        #[arg(long = "reps", value_name = "N=REPS")]
        reps: Vec<FieldValue>,

        /// Mark the exercise at position N as done
        #[arg(long = "done", value_name = "N")]
        done: Vec<usize>,

        /// Note for the exercise at position N
        #[arg(long = "note", value_name = "N=TEXT")]
        notes: Vec<FieldValue>,
    },

    /// Show all workouts, most recent first
    History,

    /// Delete a workout
    Delete {
        /// Id of the workout
        id: String,
    },

    /// Show the weight progression of an exercise
    Progress {
        /// Name of the exercise
        exercise: String,
    },

    /// Set the unit (kg, lbs) or toggle it if none is given
    Unit { unit: Option<Unit> },

    /// Write a backup of all data
    Export {
        /// Target file, defaults to hit_joost_backup_<date>.json in the current directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data by a backup
    Import {
        /// Backup file
        path: PathBuf,
    },

    /// Remove all workouts, keeping the unit
    Clear {
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },

    /// Show the most recent log entries
    Log,
}

/// A value for the exercise at a 1-based position of the training day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub position: usize,
    pub value: String,
}

impl FromStr for FieldValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (position, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected N=VALUE, got \"{s}\""))?;
        let position = position
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| format!("invalid exercise position \"{position}\""))?;
        Ok(Self {
            position,
            value: value.to_string(),
        })
    }
}
