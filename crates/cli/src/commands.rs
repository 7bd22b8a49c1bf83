//! Execution of the subcommands against a service.

use std::{fs, io::Write, path::Path};

use anyhow::{Context, anyhow, bail};
use hitlog_app::log::Repository as LogRepository;
use hitlog_domain::{
    BackupRepository, DayKey, Service, StoreRepository, Unit, Workout, WorkoutForm, WorkoutID,
    exercise_names, format_date_eu, plans,
};

use crate::cli::{Commands, FieldValue};

pub fn run<R, W>(command: Commands, service: &mut Service<R>, out: &mut W) -> anyhow::Result<()>
where
    R: StoreRepository + BackupRepository + LogRepository,
    W: Write,
{
    match command {
        Commands::Days => days(out),
        Commands::Exercises => exercises(out),
        Commands::New {
            day,
            date,
            weights,
            reps,
            done,
            notes,
        } => {
            let mut form = service.new_workout_form(day);
            if let Some(date) = date {
                form.date = date;
            }
            fill_form(&mut form, &weights, &reps, &done, &notes)?;
            let workout = service.create_workout(&form)?;
            writeln!(
                out,
                "Saved {} on {} ({}/{} done) as {}",
                workout.day_name,
                format_date_eu(workout.date),
                workout.completed_sets(),
                workout.sets.len(),
                workout.id
            )?;
            Ok(())
        }
        Commands::History => history(service, out),
        Commands::Delete { id } => {
            let id = WorkoutID::from(id);
            if service.store().contains(&id) {
                service.delete_workout(&id)?;
                writeln!(out, "Deleted workout {id}")?;
            } else {
                writeln!(out, "No workout with id {id}")?;
            }
            Ok(())
        }
        Commands::Progress { exercise } => progress(service, &exercise, out),
        Commands::Unit { unit } => {
            let unit = match unit {
                Some(unit) => {
                    service.set_unit(unit)?;
                    unit
                }
                None => service.toggle_unit()?,
            };
            writeln!(out, "Unit: {unit}")?;
            Ok(())
        }
        Commands::Export { output } => {
            let backup = service.export_backup()?;
            let path = output.unwrap_or_else(|| backup.file_name.clone().into());
            fs::write(&path, &backup.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(
                out,
                "Exported {} workouts to {}",
                service.store().workouts.len(),
                path.display()
            )?;
            Ok(())
        }
        Commands::Import { path } => import(service, &path, out),
        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to remove all workouts, confirm with --yes");
            }
            service.clear_all()?;
            writeln!(out, "Removed all workouts")?;
            Ok(())
        }
        Commands::Log => {
            let entries = service
                .repository()
                .read_entries()
                .map_err(|err| anyhow!("failed to read log: {err}"))?;
            for entry in entries {
                writeln!(out, "{} {:<5} {}", entry.time, entry.level, entry.message)?;
            }
            Ok(())
        }
    }
}

fn days(out: &mut impl Write) -> anyhow::Result<()> {
    for plan in plans() {
        writeln!(out, "{}  {}", plan.key, plan.name)?;
        for (i, exercise) in plan.exercises.iter().enumerate() {
            writeln!(out, "  {}. {} ({})", i + 1, exercise.name, exercise.note)?;
        }
    }
    Ok(())
}

fn exercises(out: &mut impl Write) -> anyhow::Result<()> {
    for name in exercise_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn fill_form(
    form: &mut WorkoutForm,
    weights: &[FieldValue],
    reps: &[FieldValue],
    done: &[usize],
    notes: &[FieldValue],
) -> anyhow::Result<()> {
    let day = form.day;
    for field in weights {
        row(form, day, field.position)?.weight.clone_from(&field.value);
    }
    for field in reps {
        row(form, day, field.position)?.reps.clone_from(&field.value);
    }
    for field in notes {
        row(form, day, field.position)?.note_text.clone_from(&field.value);
    }
    for position in done {
        row(form, day, *position)?.done = true;
    }
    Ok(())
}

fn row(
    form: &mut WorkoutForm,
    day: DayKey,
    position: usize,
) -> anyhow::Result<&mut hitlog_domain::SetInput> {
    let exercises = day.plan().exercises.len();
    position
        .checked_sub(1)
        .and_then(|idx| form.row_mut(idx))
        .ok_or_else(|| anyhow!("{day} has {exercises} exercises, got position {position}"))
}

fn history<R: StoreRepository>(service: &Service<R>, out: &mut impl Write) -> anyhow::Result<()> {
    let workouts = service.workouts();
    if workouts.is_empty() {
        writeln!(out, "No workouts yet")?;
        return Ok(());
    }
    let unit = service.unit();
    for workout in workouts {
        write_workout(workout, unit, out)?;
    }
    Ok(())
}

fn write_workout(workout: &Workout, unit: Unit, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}  {}  [{}]",
        format_date_eu(workout.date),
        workout.day_name,
        workout.id
    )?;
    for set in &workout.sets {
        let mark = if set.done { "x" } else { " " };
        write!(out, "  [{mark}] {}: {}", set.name, set.display_summary(unit))?;
        if set.note_text.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, " ({})", set.note_text)?;
        }
    }
    Ok(())
}

fn progress<R: StoreRepository>(
    service: &Service<R>,
    exercise: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let unit = service.unit();
    let series = service.series_for_exercise(exercise);
    let Some(best) = hitlog_domain::best_weight(&series) else {
        writeln!(out, "No data for {exercise}")?;
        return Ok(());
    };
    for point in &series {
        writeln!(out, "{}  {} {unit}", format_date_eu(point.date), point.weight)?;
    }
    writeln!(out, "Best: {best} {unit}")?;
    Ok(())
}

fn import<R: StoreRepository + BackupRepository>(
    service: &mut Service<R>,
    path: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    service.import_backup(&raw)?;
    writeln!(
        out,
        "Imported {} workouts, unit: {}",
        service.store().workouts.len(),
        service.unit()
    )?;
    Ok(())
}
