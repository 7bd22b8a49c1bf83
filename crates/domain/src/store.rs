use crate::{ImportError, ReadError, Unit, UpdateError, Workout, WorkoutID};

/// Persists the whole store as one value.
pub trait StoreRepository {
    fn read_store(&self) -> Result<Store, ReadError>;
    fn write_store(&self, store: &Store) -> Result<(), UpdateError>;
}

/// Converts between a store and its portable backup representation.
pub trait BackupRepository {
    fn export_backup(&self, store: &Store) -> Result<Backup, ReadError>;
    fn parse_backup(&self, raw: &str) -> Result<Store, ImportError>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Store {
    pub workouts: Vec<Workout>,
    pub settings: Settings,
}

impl Store {
    #[must_use]
    pub fn with_workout(mut self, workout: Workout) -> Self {
        self.workouts.push(workout);
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.settings.unit = unit;
        self
    }

    /// An empty store that keeps the unit preference.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            workouts: vec![],
            settings: self.settings.clone(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &WorkoutID) -> bool {
        self.workouts.iter().any(|w| w.id == *id)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
    pub unit: Unit,
}

/// A serialized store ready to be written to a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Backup {
    pub file_name: String,
    pub media_type: &'static str,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_store() {
        let store = Store::default();
        assert!(store.workouts.is_empty());
        assert_eq!(store.settings.unit, Unit::Kg);
    }

    #[test]
    fn test_cleared_keeps_unit() {
        let store = Store::default()
            .with_workout(Workout::example("1", "2024-01-01"))
            .with_unit(Unit::Lbs);
        assert_eq!(store.workouts.len(), 1);

        let cleared = store.cleared();

        assert!(cleared.workouts.is_empty());
        assert_eq!(cleared.settings.unit, Unit::Lbs);
    }

    #[test]
    fn test_contains() {
        let store = Store::default().with_workout(Workout::example("7", "2024-01-01"));
        assert!(store.contains(&WorkoutID::from("7")));
        assert!(!store.contains(&WorkoutID::from("8")));
    }
}
