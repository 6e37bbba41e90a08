// ABOUTME: Pure conversions between persisted rows and domain values
// ABOUTME: Inverse-paired per entity; day-precision timestamps narrow to calendar dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! Row/domain mapping.
//!
//! Every mapper is total over well-formed rows and loses nothing on the
//! round trip, with one intended exception: columns documented as
//! day-precision store UTC start of day, so `*_to_row(*_from_row(r))`
//! is date-equal rather than millisecond-equal for them. Conversions
//! go through UTC so the calendar date is independent of the host time
//! zone. The sole fallible mapper is [`route_session_from_row`], whose
//! coordinates column holds JSON.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::database::{
    ActivityRow, BmiRow, ExerciseRow, ExerciseSetRow, RouteSessionRow, RoutineDetail,
    RoutineExerciseDetail, RoutineExerciseRow, RoutineRow, StepRow, UserRow, WeightEntryRow,
    WorkoutDetail, WorkoutExerciseDetail, WorkoutExerciseRow, WorkoutRow,
};
use crate::models::{
    ActivityRecord, BmiRecord, Coordinate, Exercise, ExerciseSet, RouteSession, RoutineExercise,
    StepRecord, User, WeightEntry, Workout, WorkoutExercise, WorkoutRoutine,
};

/// Epoch milliseconds of a calendar day at UTC start of day
#[must_use]
pub fn date_to_epoch_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// The UTC calendar day containing an epoch-millisecond instant
#[must_use]
pub fn epoch_millis_to_date(millis: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .date_naive()
}

/// Epoch milliseconds of an instant
#[must_use]
pub fn instant_to_epoch_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// The instant at an epoch-millisecond offset
#[must_use]
pub fn epoch_millis_to_instant(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}

/// Convert an inclusive day range to the inclusive millisecond range
/// covering those whole days
#[must_use]
pub fn day_range_millis(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let start_millis = date_to_epoch_millis(start);
    let end_millis = date_to_epoch_millis(end + chrono::Duration::days(1)) - 1;
    (start_millis, end_millis)
}

#[must_use]
pub fn user_from_row(row: UserRow) -> User {
    User {
        id: row.id,
        auth_uid: row.auth_uid,
        name: row.name,
        age: row.age,
        height_cm: row.height_cm,
        weight_kg: row.weight_kg,
        gender: row.gender,
        fitness_goal: row.fitness_goal,
        created_at: epoch_millis_to_instant(row.created_at),
        updated_at: epoch_millis_to_instant(row.updated_at),
    }
}

#[must_use]
pub fn user_to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id,
        auth_uid: user.auth_uid.clone(),
        name: user.name.clone(),
        age: user.age,
        height_cm: user.height_cm,
        weight_kg: user.weight_kg,
        gender: user.gender.clone(),
        fitness_goal: user.fitness_goal.clone(),
        created_at: instant_to_epoch_millis(user.created_at),
        updated_at: instant_to_epoch_millis(user.updated_at),
    }
}

#[must_use]
pub fn weight_entry_from_row(row: WeightEntryRow) -> WeightEntry {
    WeightEntry {
        id: row.id,
        user_id: row.user_id,
        weight_kg: row.weight_kg,
        date: epoch_millis_to_date(row.date),
        note: row.note,
    }
}

#[must_use]
pub fn weight_entry_to_row(entry: &WeightEntry) -> WeightEntryRow {
    WeightEntryRow {
        id: entry.id,
        user_id: entry.user_id,
        weight_kg: entry.weight_kg,
        date: date_to_epoch_millis(entry.date),
        note: entry.note.clone(),
    }
}

#[must_use]
pub fn exercise_from_row(row: ExerciseRow) -> Exercise {
    Exercise {
        id: row.id,
        name: row.name,
        description: row.description,
        muscle_group: row.muscle_group,
        is_custom: row.is_custom,
        created_by: row.created_by,
        created_at: epoch_millis_to_instant(row.created_at),
    }
}

#[must_use]
pub fn exercise_to_row(exercise: &Exercise) -> ExerciseRow {
    ExerciseRow {
        id: exercise.id,
        name: exercise.name.clone(),
        description: exercise.description.clone(),
        muscle_group: exercise.muscle_group.clone(),
        is_custom: exercise.is_custom,
        created_by: exercise.created_by,
        created_at: instant_to_epoch_millis(exercise.created_at),
    }
}

/// A flat workout row without its exercise tree
#[must_use]
pub fn workout_from_row(row: WorkoutRow) -> Workout {
    Workout {
        id: row.id,
        user_id: row.user_id,
        name: row.name,
        description: row.description,
        duration_min: row.duration_min,
        calories: row.calories,
        date: epoch_millis_to_date(row.date),
        start_time: epoch_millis_to_instant(row.start_time),
        end_time: row.end_time.map(epoch_millis_to_instant),
        is_completed: row.is_completed,
        exercises: Vec::new(),
    }
}

#[must_use]
pub fn workout_to_row(workout: &Workout) -> WorkoutRow {
    WorkoutRow {
        id: workout.id,
        user_id: workout.user_id,
        name: workout.name.clone(),
        description: workout.description.clone(),
        duration_min: workout.duration_min,
        calories: workout.calories,
        date: date_to_epoch_millis(workout.date),
        start_time: instant_to_epoch_millis(workout.start_time),
        end_time: workout.end_time.map(instant_to_epoch_millis),
        is_completed: workout.is_completed,
    }
}

#[must_use]
pub fn workout_exercise_from_detail(detail: WorkoutExerciseDetail) -> WorkoutExercise {
    WorkoutExercise {
        id: detail.link.id,
        workout_id: detail.link.workout_id,
        exercise: exercise_from_row(detail.exercise),
        order_index: detail.link.order_index,
        target_sets: detail.link.target_sets,
        target_reps: detail.link.target_reps,
        target_duration_secs: detail.link.target_duration_secs,
        rest_between_sets_secs: detail.link.rest_between_sets_secs,
        sets: detail.sets.into_iter().map(set_from_row).collect(),
    }
}

/// Split a workout exercise into its link row and set rows
#[must_use]
pub fn workout_exercise_to_rows(
    exercise: &WorkoutExercise,
) -> (WorkoutExerciseRow, Vec<ExerciseSetRow>) {
    let link = WorkoutExerciseRow {
        id: exercise.id,
        workout_id: exercise.workout_id,
        exercise_id: exercise.exercise.id,
        order_index: exercise.order_index,
        target_sets: exercise.target_sets,
        target_reps: exercise.target_reps,
        target_duration_secs: exercise.target_duration_secs,
        rest_between_sets_secs: exercise.rest_between_sets_secs,
    };
    let sets = exercise.sets.iter().map(set_to_row).collect();
    (link, sets)
}

#[must_use]
pub fn workout_from_detail(detail: WorkoutDetail) -> Workout {
    let mut workout = workout_from_row(detail.workout);
    workout.exercises = detail
        .exercises
        .into_iter()
        .map(workout_exercise_from_detail)
        .collect();
    workout
}

#[must_use]
pub fn workout_to_detail(workout: &Workout) -> WorkoutDetail {
    WorkoutDetail {
        workout: workout_to_row(workout),
        exercises: workout
            .exercises
            .iter()
            .map(|exercise| {
                let (link, sets) = workout_exercise_to_rows(exercise);
                WorkoutExerciseDetail {
                    link,
                    exercise: exercise_to_row(&exercise.exercise),
                    sets,
                }
            })
            .collect(),
    }
}

#[must_use]
pub fn set_from_row(row: ExerciseSetRow) -> ExerciseSet {
    ExerciseSet {
        id: row.id,
        workout_exercise_id: row.workout_exercise_id,
        set_number: row.set_number,
        reps: row.reps,
        weight_kg: row.weight_kg,
        duration_secs: row.duration_secs,
        completed: row.completed,
        recorded_at: epoch_millis_to_instant(row.recorded_at),
    }
}

#[must_use]
pub fn set_to_row(set: &ExerciseSet) -> ExerciseSetRow {
    ExerciseSetRow {
        id: set.id,
        workout_exercise_id: set.workout_exercise_id,
        set_number: set.set_number,
        reps: set.reps,
        weight_kg: set.weight_kg,
        duration_secs: set.duration_secs,
        completed: set.completed,
        recorded_at: instant_to_epoch_millis(set.recorded_at),
    }
}

/// A flat routine row without its exercise list
#[must_use]
pub fn routine_from_row(row: RoutineRow) -> WorkoutRoutine {
    WorkoutRoutine {
        id: row.id,
        user_id: row.user_id,
        name: row.name,
        description: row.description,
        frequency_per_week: row.frequency_per_week,
        created_at: epoch_millis_to_instant(row.created_at),
        exercises: Vec::new(),
    }
}

#[must_use]
pub fn routine_to_row(routine: &WorkoutRoutine) -> RoutineRow {
    RoutineRow {
        id: routine.id,
        user_id: routine.user_id,
        name: routine.name.clone(),
        description: routine.description.clone(),
        frequency_per_week: routine.frequency_per_week,
        created_at: instant_to_epoch_millis(routine.created_at),
    }
}

#[must_use]
pub fn routine_exercise_from_detail(detail: RoutineExerciseDetail) -> RoutineExercise {
    RoutineExercise {
        id: detail.link.id,
        routine_id: detail.link.routine_id,
        exercise: exercise_from_row(detail.exercise),
        order_index: detail.link.order_index,
        target_sets: detail.link.target_sets,
        target_reps: detail.link.target_reps,
        target_duration_secs: detail.link.target_duration_secs,
        rest_between_sets_secs: detail.link.rest_between_sets_secs,
    }
}

#[must_use]
pub fn routine_exercise_to_row(exercise: &RoutineExercise) -> RoutineExerciseRow {
    RoutineExerciseRow {
        id: exercise.id,
        routine_id: exercise.routine_id,
        exercise_id: exercise.exercise.id,
        order_index: exercise.order_index,
        target_sets: exercise.target_sets,
        target_reps: exercise.target_reps,
        target_duration_secs: exercise.target_duration_secs,
        rest_between_sets_secs: exercise.rest_between_sets_secs,
    }
}

#[must_use]
pub fn routine_from_detail(detail: RoutineDetail) -> WorkoutRoutine {
    let mut routine = routine_from_row(detail.routine);
    routine.exercises = detail
        .exercises
        .into_iter()
        .map(routine_exercise_from_detail)
        .collect();
    routine
}

#[must_use]
pub fn routine_to_detail(routine: &WorkoutRoutine) -> RoutineDetail {
    RoutineDetail {
        routine: routine_to_row(routine),
        exercises: routine
            .exercises
            .iter()
            .map(|exercise| RoutineExerciseDetail {
                link: routine_exercise_to_row(exercise),
                exercise: exercise_to_row(&exercise.exercise),
            })
            .collect(),
    }
}

#[must_use]
pub fn step_record_from_row(row: StepRow) -> StepRecord {
    StepRecord {
        id: row.id,
        user_id: row.user_id,
        day: epoch_millis_to_date(row.day),
        count: row.count,
    }
}

#[must_use]
pub fn step_record_to_row(record: &StepRecord) -> StepRow {
    StepRow {
        id: record.id,
        user_id: record.user_id,
        day: date_to_epoch_millis(record.day),
        count: record.count,
    }
}

#[must_use]
pub fn bmi_record_from_row(row: BmiRow) -> BmiRecord {
    BmiRecord {
        id: row.id,
        user_id: row.user_id,
        weight_kg: row.weight_kg,
        height_m: row.height_m,
        bmi: row.bmi,
        recorded_at: epoch_millis_to_instant(row.recorded_at),
    }
}

#[must_use]
pub fn bmi_record_to_row(record: &BmiRecord) -> BmiRow {
    BmiRow {
        id: record.id,
        user_id: record.user_id,
        weight_kg: record.weight_kg,
        height_m: record.height_m,
        bmi: record.bmi,
        recorded_at: instant_to_epoch_millis(record.recorded_at),
    }
}

#[must_use]
pub fn activity_from_row(row: ActivityRow) -> ActivityRecord {
    ActivityRecord {
        id: row.id,
        user_id: row.user_id,
        name: row.name,
        start_time: epoch_millis_to_instant(row.start_time),
        end_time: epoch_millis_to_instant(row.end_time),
    }
}

#[must_use]
pub fn activity_to_row(record: &ActivityRecord) -> ActivityRow {
    ActivityRow {
        id: record.id,
        user_id: record.user_id,
        name: record.name.clone(),
        start_time: instant_to_epoch_millis(record.start_time),
        end_time: instant_to_epoch_millis(record.end_time),
    }
}

/// Decode a route session row, parsing the JSON coordinates column
///
/// # Errors
///
/// Returns an error if the coordinates column is not valid JSON
pub fn route_session_from_row(row: RouteSessionRow) -> Result<RouteSession, serde_json::Error> {
    let coordinates: Vec<Coordinate> = serde_json::from_str(&row.coordinates)?;
    Ok(RouteSession {
        id: row.id,
        user_id: row.user_id,
        start_time: epoch_millis_to_instant(row.start_time),
        end_time: epoch_millis_to_instant(row.end_time),
        coordinates,
    })
}

/// Encode a route session, serializing coordinates to JSON.
/// Serializing a plain coordinate list cannot fail.
#[must_use]
pub fn route_session_to_row(session: &RouteSession) -> RouteSessionRow {
    RouteSessionRow {
        id: session.id,
        user_id: session.user_id,
        start_time: instant_to_epoch_millis(session.start_time),
        end_time: instant_to_epoch_millis(session.end_time),
        coordinates: serde_json::to_string(&session.coordinates).unwrap_or_else(|_| "[]".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn user_round_trips_exactly() {
        let row = UserRow {
            id: 7,
            auth_uid: Some("uid-123".into()),
            name: "Dana".into(),
            age: 31,
            height_cm: 172.0,
            weight_kg: 64.5,
            gender: "Female".into(),
            fitness_goal: "Gain Muscle".into(),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_500,
        };

        assert_eq!(user_to_row(&user_from_row(row.clone())), row);
    }

    #[test]
    fn weight_entry_round_trip_preserves_calendar_date() {
        // A persisted timestamp in the middle of the day narrows to the
        // day bucket; the calendar date itself must survive.
        let midday = Utc
            .with_ymd_and_hms(2025, 3, 9, 13, 45, 0)
            .unwrap()
            .timestamp_millis();
        let row = WeightEntryRow {
            id: 1,
            user_id: 2,
            weight_kg: 80.0,
            date: midday,
            note: None,
        };

        let entry = weight_entry_from_row(row);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());

        let back = weight_entry_to_row(&entry);
        assert_eq!(epoch_millis_to_date(back.date), entry.date);
    }

    #[test]
    fn date_millis_round_trip_is_exact_at_start_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(epoch_millis_to_date(date_to_epoch_millis(date)), date);
    }

    #[test]
    fn day_range_is_inclusive_of_the_whole_end_day() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let (start_millis, end_millis) = day_range_millis(start, end);

        assert_eq!(epoch_millis_to_date(start_millis), start);
        assert_eq!(epoch_millis_to_date(end_millis), end);
        // One millisecond later is the next day
        assert_eq!(
            epoch_millis_to_date(end_millis + 1),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
        );
    }

    #[test]
    fn system_exercise_maps_to_no_creator() {
        let row = ExerciseRow {
            id: 3,
            name: "Squat".into(),
            description: "Barbell back squat".into(),
            muscle_group: "Legs".into(),
            is_custom: false,
            created_by: None,
            created_at: 0,
        };

        let exercise = exercise_from_row(row);
        assert!(exercise.created_by.is_none());
        assert!(!exercise.is_custom);
    }

    #[test]
    fn route_session_coordinates_survive_json() {
        let session = RouteSession {
            id: 0,
            user_id: 4,
            start_time: epoch_millis_to_instant(1_000),
            end_time: epoch_millis_to_instant(2_000),
            coordinates: vec![
                Coordinate {
                    latitude: 35.6895,
                    longitude: 139.6917,
                },
                Coordinate {
                    latitude: 35.6896,
                    longitude: 139.6918,
                },
            ],
        };

        let row = route_session_to_row(&session);
        let back = route_session_from_row(row).expect("valid JSON");
        assert_eq!(back, session);
    }
}
