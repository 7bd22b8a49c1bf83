use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::{
    Backup, BackupRepository, DataPoint, DayKey, ImportError, ReadError, Store, StoreRepository,
    Unit, UpdateError, Workout, WorkoutForm, WorkoutID, best_weight, delete_workout,
    list_workouts, series_for_exercise,
};

/// The application state and the repository it is persisted to.
///
/// The store is read once when the service is created. Every change produces a new
/// store which replaces the current one only after it has been written successfully.
pub struct Service<R> {
    repository: R,
    store: Store,
}

macro_rules! log_on_error {
    ($result: expr, $action: literal, $entity: literal) => {{
        let result = $result;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: StoreRepository> Service<R> {
    pub fn load(repository: R) -> Self {
        let store = match log_on_error!(repository.read_store(), "read", "store") {
            Ok(store) => store,
            Err(_) => {
                warn!("starting with empty store");
                Store::default()
            }
        };
        debug!("loaded {} workouts", store.workouts.len());
        Self { repository, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn unit(&self) -> Unit {
        self.store.settings.unit
    }

    pub fn workouts(&self) -> Vec<&Workout> {
        list_workouts(&self.store)
    }

    pub fn new_workout_form(&self, day: DayKey) -> WorkoutForm {
        WorkoutForm::today(day, self.unit())
    }

    pub fn create_workout(&mut self, form: &WorkoutForm) -> Result<Workout, UpdateError> {
        self.create_workout_at(form, Utc::now())
    }

    pub fn create_workout_at(
        &mut self,
        form: &WorkoutForm,
        now: DateTime<Utc>,
    ) -> Result<Workout, UpdateError> {
        let workout = form.build(self.next_id(now), now);
        self.replace(self.store.clone().with_workout(workout.clone()))?;
        info!("saved workout {} ({})", workout.id, workout.day_name);
        Ok(workout)
    }

    pub fn delete_workout(&mut self, id: &WorkoutID) -> Result<(), UpdateError> {
        if !self.store.contains(id) {
            debug!("workout {id} does not exist");
            return Ok(());
        }
        self.replace(delete_workout(self.store.clone(), id))?;
        info!("deleted workout {id}");
        Ok(())
    }

    pub fn series_for_exercise(&self, exercise: &str) -> Vec<DataPoint> {
        series_for_exercise(&self.store, exercise, self.unit())
    }

    pub fn best_weight(&self, exercise: &str) -> Option<f64> {
        best_weight(&self.series_for_exercise(exercise))
    }

    pub fn set_unit(&mut self, unit: Unit) -> Result<(), UpdateError> {
        self.replace(self.store.clone().with_unit(unit))?;
        info!("unit set to {unit}");
        Ok(())
    }

    pub fn toggle_unit(&mut self) -> Result<Unit, UpdateError> {
        let unit = self.unit().toggled();
        self.set_unit(unit)?;
        Ok(unit)
    }

    pub fn clear_all(&mut self) -> Result<(), UpdateError> {
        self.replace(self.store.cleared())?;
        info!("removed all workouts");
        Ok(())
    }

    fn next_id(&self, now: DateTime<Utc>) -> WorkoutID {
        let mut millis = now.timestamp_millis();
        loop {
            let id = WorkoutID::from_millis(millis);
            if !self.store.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }

    fn replace(&mut self, store: Store) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.write_store(&store),
            "write",
            "store"
        )?;
        self.store = store;
        Ok(())
    }
}

impl<R: StoreRepository + BackupRepository> Service<R> {
    pub fn export_backup(&self) -> Result<Backup, ReadError> {
        log_on_error!(
            self.repository.export_backup(&self.store),
            "export",
            "backup"
        )
    }

    /// Replaces the whole store by the content of a backup.
    ///
    /// Nothing changes if the backup cannot be parsed or written.
    pub fn import_backup(&mut self, raw: &str) -> Result<(), ImportError> {
        let store = match self.repository.parse_backup(raw) {
            Ok(store) => store,
            Err(err) => {
                warn!("failed to import backup: {err}");
                return Err(err);
            }
        };
        let workouts = store.workouts.len();
        self.replace(store)?;
        info!("imported {workouts} workouts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, str::FromStr};

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageError;

    #[derive(Default)]
    struct Repository {
        stored: RefCell<Option<Store>>,
        writes: RefCell<usize>,
        broken: bool,
    }

    impl Repository {
        fn with(store: Store) -> Self {
            Self {
                stored: RefCell::new(Some(store)),
                ..Self::default()
            }
        }

        fn broken(store: Store) -> Self {
            Self {
                broken: true,
                ..Self::with(store)
            }
        }
    }

    impl StoreRepository for Repository {
        fn read_store(&self) -> Result<Store, ReadError> {
            if self.broken {
                return Err(StorageError::Other("no such directory".into()).into());
            }
            Ok(self.stored.borrow().clone().unwrap_or_default())
        }

        fn write_store(&self, store: &Store) -> Result<(), UpdateError> {
            if self.broken {
                return Err(StorageError::Other("disk full".into()).into());
            }
            *self.writes.borrow_mut() += 1;
            *self.stored.borrow_mut() = Some(store.clone());
            Ok(())
        }
    }

    impl BackupRepository for Repository {
        fn export_backup(&self, store: &Store) -> Result<Backup, ReadError> {
            Ok(Backup {
                file_name: "backup.json".to_string(),
                media_type: "application/json",
                content: format!("{} workouts", store.workouts.len()),
            })
        }

        fn parse_backup(&self, raw: &str) -> Result<Store, ImportError> {
            if raw == "lbs" {
                Ok(Store::default()
                    .with_workout(Workout::example("9", "2023-12-31"))
                    .with_unit(Unit::Lbs))
            } else {
                Err(ImportError::InvalidBackup(raw.to_string()))
            }
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(1_717_200_000_000).unwrap()
    }

    fn form(day: DayKey, date: &str, weight: &str) -> WorkoutForm {
        let mut form = WorkoutForm::new(day, NaiveDate::from_str(date).unwrap(), Unit::Kg);
        form.row_mut(0).unwrap().weight = weight.to_string();
        form
    }

    #[test]
    fn test_load_empty_repository() {
        let service = Service::load(Repository::default());
        assert_eq!(service.store(), &Store::default());
        assert_eq!(service.unit(), Unit::Kg);
    }

    #[test]
    fn test_load_unreadable_repository() {
        let service = Service::load(Repository::broken(
            Store::default().with_workout(Workout::example("1", "2024-01-01")),
        ));
        assert_eq!(service.store(), &Store::default());
    }

    #[test]
    fn test_create_workout() {
        let mut service = Service::load(Repository::default());

        let workout = service
            .create_workout_at(&form(DayKey::Day1, "2024-06-01", "100"), now())
            .unwrap();

        assert_eq!(workout.id, WorkoutID::from("1717200000000"));
        assert_eq!(workout.sets.len(), 7);
        assert_eq!(service.store().workouts, vec![workout.clone()]);
        assert_eq!(
            service.repository().stored.borrow().as_ref().unwrap().workouts,
            vec![workout]
        );
    }

    #[test]
    fn test_create_workout_ids_are_unique() {
        let mut service = Service::load(Repository::default());

        let first = service
            .create_workout_at(&form(DayKey::Day1, "2024-06-01", "100"), now())
            .unwrap();
        let second = service
            .create_workout_at(&form(DayKey::Day2, "2024-06-01", "60"), now())
            .unwrap();

        assert_eq!(first.id, WorkoutID::from("1717200000000"));
        assert_eq!(second.id, WorkoutID::from("1717200000001"));
    }

    #[test]
    fn test_create_workout_write_failure_keeps_store() {
        let mut service = Service::load(Repository::default());
        service
            .create_workout_at(&form(DayKey::Day1, "2024-01-01", "100"), now())
            .unwrap();
        let before = service.store().clone();
        let mut service = Service {
            repository: Repository::broken(before.clone()),
            store: before.clone(),
        };

        assert!(
            service
                .create_workout(&form(DayKey::Day1, "2024-01-02", "105"))
                .is_err()
        );
        assert_eq!(service.store(), &before);
    }

    #[test]
    fn test_workouts_most_recent_first() {
        let mut service = Service::load(Repository::default());
        service
            .create_workout_at(&form(DayKey::Day1, "2024-01-01", "100"), now())
            .unwrap();
        service
            .create_workout_at(&form(DayKey::Day1, "2024-06-01", "110"), now())
            .unwrap();

        assert_eq!(
            service
                .workouts()
                .iter()
                .map(|w| w.date.to_string())
                .collect::<Vec<_>>(),
            vec!["2024-06-01", "2024-01-01"]
        );
    }

    #[test]
    fn test_delete_workout() {
        let mut service = Service::load(Repository::with(
            Store::default()
                .with_workout(Workout::example("1", "2024-01-01"))
                .with_workout(Workout::example("2", "2024-01-02")),
        ));

        service.delete_workout(&"1".into()).unwrap();

        assert_eq!(
            service.store().workouts,
            vec![Workout::example("2", "2024-01-02")]
        );
        assert_eq!(*service.repository().writes.borrow(), 1);
    }

    #[test]
    fn test_delete_unknown_workout() {
        let store = Store::default().with_workout(Workout::example("1", "2024-01-01"));
        let mut service = Service::load(Repository::with(store.clone()));

        service.delete_workout(&"2".into()).unwrap();

        assert_eq!(service.store(), &store);
        assert_eq!(*service.repository().writes.borrow(), 0);
    }

    #[test]
    fn test_series_follows_unit() {
        let mut service = Service::load(Repository::default());
        service
            .create_workout_at(&form(DayKey::Day1, "2024-02-01", "110"), now())
            .unwrap();
        service
            .create_workout_at(&form(DayKey::Day1, "2024-01-01", "100"), now())
            .unwrap();

        assert_eq!(
            service
                .series_for_exercise("Squat")
                .iter()
                .map(|p| p.weight)
                .collect::<Vec<_>>(),
            vec![100.0, 110.0]
        );
        assert_eq!(service.best_weight("Squat"), Some(110.0));

        assert_eq!(service.toggle_unit().unwrap(), Unit::Lbs);

        assert_eq!(
            service
                .series_for_exercise("Squat")
                .iter()
                .map(|p| p.weight)
                .collect::<Vec<_>>(),
            vec![220.46, 242.51]
        );
        assert_eq!(service.best_weight("Squat"), Some(242.51));
        assert_eq!(service.best_weight("Bench Press"), None);
    }

    #[test]
    fn test_set_unit_is_persisted() {
        let mut service = Service::load(Repository::default());

        service.set_unit(Unit::Lbs).unwrap();

        assert_eq!(service.unit(), Unit::Lbs);
        assert_eq!(
            service
                .repository()
                .stored
                .borrow()
                .as_ref()
                .unwrap()
                .settings
                .unit,
            Unit::Lbs
        );
        assert_eq!(service.new_workout_form(DayKey::Day2).unit, Unit::Lbs);
    }

    #[test]
    fn test_clear_all_keeps_unit() {
        let mut service = Service::load(Repository::with(
            Store::default()
                .with_workout(Workout::example("1", "2024-01-01"))
                .with_unit(Unit::Lbs),
        ));

        service.clear_all().unwrap();

        assert!(service.store().workouts.is_empty());
        assert_eq!(service.unit(), Unit::Lbs);
    }

    #[test]
    fn test_export_backup() {
        let service = Service::load(Repository::with(
            Store::default().with_workout(Workout::example("1", "2024-01-01")),
        ));
        assert_eq!(service.export_backup().unwrap().content, "1 workouts");
    }

    #[test]
    fn test_import_backup() {
        let mut service = Service::load(Repository::default());

        service.import_backup("lbs").unwrap();

        assert_eq!(service.unit(), Unit::Lbs);
        assert_eq!(
            service.store().workouts,
            vec![Workout::example("9", "2023-12-31")]
        );
        assert_eq!(*service.repository().writes.borrow(), 1);
    }

    #[test]
    fn test_import_invalid_backup_keeps_store() {
        let store = Store::default().with_workout(Workout::example("1", "2024-01-01"));
        let mut service = Service::load(Repository::with(store.clone()));

        assert!(matches!(
            service.import_backup("{"),
            Err(ImportError::InvalidBackup(_))
        ));
        assert_eq!(service.store(), &store);
        assert_eq!(*service.repository().writes.borrow(), 0);
    }
}
