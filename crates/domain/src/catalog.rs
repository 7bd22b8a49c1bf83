use std::{collections::BTreeSet, str::FromStr};

use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

#[derive(AsRefStr, Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayKey {
    #[strum(serialize = "day1")]
    Day1,
    #[strum(serialize = "day2")]
    Day2,
    #[strum(serialize = "day3")]
    Day3,
    #[strum(serialize = "day4")]
    Day4,
}

impl DayKey {
    #[must_use]
    pub fn plan(self) -> &'static DayPlan {
        plan(self)
    }
}

impl FromStr for DayKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::iter()
            .find(|day| day.as_ref() == s.trim())
            .ok_or_else(|| CatalogError::UnknownDay(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown training day \"{0}\"")]
    UnknownDay(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExercisePlanEntry {
    pub name: &'static str,
    pub note: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DayPlan {
    pub key: DayKey,
    pub name: &'static str,
    pub exercises: &'static [ExercisePlanEntry],
}

#[must_use]
pub fn plan(day: DayKey) -> &'static DayPlan {
    match day {
        DayKey::Day1 => &PLANS[0],
        DayKey::Day2 => &PLANS[1],
        DayKey::Day3 => &PLANS[2],
        DayKey::Day4 => &PLANS[3],
    }
}

#[must_use]
pub fn plans() -> &'static [DayPlan] {
    &PLANS
}

/// All distinct exercise names of the catalog in alphabetical order.
#[must_use]
pub fn exercise_names() -> Vec<&'static str> {
    PLANS
        .iter()
        .flat_map(|p| p.exercises.iter().map(|e| e.name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

const fn entry(name: &'static str, note: &'static str) -> ExercisePlanEntry {
    ExercisePlanEntry { name, note }
}

static PLANS: [DayPlan; 4] = [
    DayPlan {
        key: DayKey::Day1,
        name: "Dag 1 – Legs + Calves + Abs",
        exercises: &[
            entry("Squat", "1 werkset 6–10"),
            entry("Leg Press (machine)", "1 werkset 8–12 + 1–2 dropsets"),
            entry("Romanian Deadlift", "1 werkset 6–10"),
            entry("Leg Curl (machine)", "1 werkset 8–12 + dropset"),
            entry("Standing Calf Raise (machine)", "1 werkset 10–15 + 2 dropsets"),
            entry("Hanging Leg Raises", "1 set tot falen (10–20)"),
            entry("Ab Wheel Rollout", "1 set 8–12"),
        ],
    },
    DayPlan {
        key: DayKey::Day2,
        name: "Dag 2 – Upper Body",
        exercises: &[
            entry("Bench Press", "1 werkset 6–10"),
            entry("Pull-Up / Lat Pulldown", "1 werkset 6–10"),
            entry("Incline Chest Press (machine)", "1 werkset 8–12 + dropset"),
            entry("Seated Row (machine)", "1 werkset 8–12 + dropset"),
            entry("Machine Chest Fly", "1 werkset 8–12 + dropset"),
            entry("Barbell Curl", "1 werkset 6–10"),
            entry("Rope Pushdown (cable)", "1 werkset 8–12 + dropset"),
        ],
    },
    DayPlan {
        key: DayKey::Day3,
        name: "Dag 3 – Shoulders + Calves + Cardio",
        exercises: &[
            entry("Overhead Press", "1 werkset 6–10"),
            entry("Lateral Raise (dumbbell/machine)", "1 werkset 10–12 + dropset"),
            entry("Rear Delt Fly (machine)", "1 werkset 10–12 + dropset"),
            entry("Upright Row", "1 werkset 6–10"),
            entry("Seated Calf Raise (machine)", "1 werkset 12–15 + dropset"),
            entry("Ab Coaster", "3 sets tot falen"),
            entry("Hanging Leg Raises", "2 sets tot falen"),
            entry("Steady State Cardio", "30–40 min zone 2"),
        ],
    },
    DayPlan {
        key: DayKey::Day4,
        name: "Dag 4 – Cardio / Active Recovery",
        exercises: &[
            entry("Steady State Cardio", "45–60 min zone 2"),
            entry("Core stabiliteit (side planks, pallof press)", "optioneel"),
        ],
    },
];
