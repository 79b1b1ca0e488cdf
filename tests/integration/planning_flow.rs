use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Timelike};
use studyplan_core::models::routine::{RoutineConfig, TimeBlock};
use studyplan_core::models::settings::PlannerSettings;
use studyplan_core::models::task::{
    ContentType, DifficultyLevel, TaskCreateInput, TaskRecord, TaskStatus,
};
use studyplan_core::services::planning_service::PlanningService;
use studyplan_core::services::schedule_utils;
use studyplan_core::services::task_service::TaskService;

fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(0).expect("offset");
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time");
    offset
        .from_local_datetime(&naive)
        .single()
        .expect("valid datetime")
}

fn routine_with_monday_classes() -> RoutineConfig {
    RoutineConfig {
        sleep_start: "23:00".to_string(),
        sleep_end: "07:00".to_string(),
        unavailable_blocks: vec![TimeBlock {
            day: 1,
            start: "09:00".to_string(),
            end: "14:00".to_string(),
            label: "Clases".to_string(),
        }],
        custom_tags: Vec::new(),
    }
}

fn task(
    id: &str,
    estimated_minutes: i64,
    due_at: Option<String>,
    difficulty: DifficultyLevel,
) -> TaskRecord {
    TaskRecord {
        id: id.to_string(),
        title: format!("Task {id}"),
        subject: "Math".to_string(),
        status: TaskStatus::Todo,
        content_type: ContentType::Exercises,
        content_amount: 8.0,
        difficulty,
        due_at,
        grade_impact: 50.0,
        personal_importance: 3.0,
        estimated_minutes,
        created_at: "2026-03-01T00:00:00+00:00".to_string(),
        updated_at: "2026-03-01T00:00:00+00:00".to_string(),
    }
}

fn session_bounds(plan: &studyplan_core::models::planning::StudyPlan) -> Vec<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    plan.sessions
        .iter()
        .map(|session| {
            (
                schedule_utils::parse_datetime(&session.start_at).expect("session start"),
                schedule_utils::parse_datetime(&session.end_at).expect("session end"),
            )
        })
        .collect()
}

#[test]
fn two_day_deadline_scenario_fills_the_estimate_around_commitments() {
    // Monday 2026-03-09, 08:00; sleep 23:00-07:00; classes Monday 09:00-14:00.
    let now = dt(2026, 3, 9, 8, 0);
    let due = now + Duration::days(2);
    let tasks = vec![task(
        "exam-prep",
        120,
        Some(schedule_utils::format_datetime(due)),
        DifficultyLevel::Medium,
    )];

    let service = PlanningService::default();
    let plan = service.generate_plan(&tasks, &routine_with_monday_classes(), now);

    let allocated: i64 = plan.sessions.iter().map(|s| s.duration_minutes).sum();
    assert_eq!(allocated, 120);
    assert!(plan.unscheduled.is_empty());

    let class_start = dt(2026, 3, 9, 9, 0);
    let class_end = dt(2026, 3, 9, 14, 0);
    let deadline = schedule_utils::end_of_day(due + Duration::days(1));

    for (start, end) in session_bounds(&plan) {
        assert!(end <= deadline, "session past deadline: {start} - {end}");
        // never inside the Monday class block
        assert!(
            end <= class_start || start >= class_end,
            "session overlaps classes: {start} - {end}"
        );
        // never inside the sleep window: the waking day runs 07:00-23:00
        assert!(start.time().hour() >= 7, "session before wake: {start}");
        assert!(
            end.time().hour() < 23 || (end.time().hour() == 23 && end.time().minute() == 0),
            "session after bedtime: {end}"
        );
    }
}

#[test]
fn identical_inputs_yield_identical_schedules() {
    let now = dt(2026, 3, 9, 8, 0);
    let tasks = vec![
        task(
            "a",
            120,
            Some(schedule_utils::format_datetime(now + Duration::days(2))),
            DifficultyLevel::Medium,
        ),
        task(
            "b",
            300,
            Some(schedule_utils::format_datetime(now + Duration::days(5))),
            DifficultyLevel::Hard,
        ),
        task("c", 90, None, DifficultyLevel::Easy),
    ];
    let routine = routine_with_monday_classes();
    let service = PlanningService::default();

    let first = service.generate_plan(&tasks, &routine, now);
    let second = service.generate_plan(&tasks, &routine, now);

    let key = |plan: &studyplan_core::models::planning::StudyPlan| -> Vec<(String, String, String, i64)> {
        plan.sessions
            .iter()
            .map(|s| {
                (
                    s.task_id.clone(),
                    s.start_at.clone(),
                    s.end_at.clone(),
                    s.duration_minutes,
                )
            })
            .collect()
    };
    assert_eq!(key(&first), key(&second));
    assert_eq!(first.unscheduled, second.unscheduled);
}

#[test]
fn sessions_never_overlap_each_other() {
    let now = dt(2026, 3, 9, 8, 0);
    let tasks = vec![
        task(
            "a",
            240,
            Some(schedule_utils::format_datetime(now + Duration::days(1))),
            DifficultyLevel::Hard,
        ),
        task(
            "b",
            180,
            Some(schedule_utils::format_datetime(now + Duration::days(2))),
            DifficultyLevel::Medium,
        ),
        task(
            "c",
            150,
            Some(schedule_utils::format_datetime(now + Duration::days(3))),
            DifficultyLevel::Easy,
        ),
    ];
    let plan = PlanningService::default().generate_plan(&tasks, &routine_with_monday_classes(), now);
    assert!(!plan.sessions.is_empty());

    let bounds = session_bounds(&plan);
    for (i, a) in bounds.iter().enumerate() {
        for b in bounds.iter().skip(i + 1) {
            assert!(
                a.1 <= b.0 || b.1 <= a.0,
                "sessions overlap: {:?} vs {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn allocation_conserves_each_estimate_when_time_is_plentiful() {
    let now = dt(2026, 3, 9, 8, 0);
    let tasks = vec![
        task(
            "a",
            200,
            Some(schedule_utils::format_datetime(now + Duration::days(6))),
            DifficultyLevel::Medium,
        ),
        task(
            "b",
            340,
            Some(schedule_utils::format_datetime(now + Duration::days(6))),
            DifficultyLevel::Hard,
        ),
    ];
    let plan = PlanningService::default().generate_plan(&tasks, &routine_with_monday_classes(), now);

    for wanted in &tasks {
        let allocated: i64 = plan
            .sessions
            .iter()
            .filter(|s| s.task_id == wanted.id)
            .map(|s| s.duration_minutes)
            .sum();
        assert_eq!(allocated, wanted.estimated_minutes, "task {}", wanted.id);
    }
    assert!(plan.unscheduled.is_empty());
}

#[test]
fn a_large_task_fragments_across_days_in_chronological_order() {
    let now = dt(2026, 3, 9, 8, 0);
    // A single free hour per day forces day-by-day fragmentation.
    let routine = RoutineConfig {
        sleep_start: "23:00".to_string(),
        sleep_end: "07:00".to_string(),
        unavailable_blocks: (0..7u8)
            .map(|day| TimeBlock {
                day,
                start: "07:00".to_string(),
                end: "22:00".to_string(),
                label: "Trabajo".to_string(),
            })
            .collect(),
        custom_tags: Vec::new(),
    };
    let tasks = vec![task(
        "thesis",
        240,
        Some(schedule_utils::format_datetime(now + Duration::days(6))),
        DifficultyLevel::Extreme,
    )];

    let plan = PlanningService::default().generate_plan(&tasks, &routine, now);
    // 60-minute evening slots: 22:00-23:00 each day
    assert_eq!(plan.sessions.len(), 4);
    let bounds = session_bounds(&plan);
    for pair in bounds.windows(2) {
        assert!(pair[0].1 <= pair[1].0);
        assert!(pair[1].0.date_naive() > pair[0].0.date_naive());
    }
    assert!(plan.unscheduled.is_empty());
}

#[test]
fn tasks_created_through_intake_flow_into_a_plan() {
    let now = dt(2026, 3, 9, 8, 0);
    let settings = PlannerSettings::default();
    let task_service = TaskService::new(settings.clone());
    let planning_service = PlanningService::new(settings);

    let record = task_service
        .create_task(
            TaskCreateInput {
                title: "Hacer ejercicios de cálculo".to_string(),
                subject: Some("Cálculo".to_string()),
                status: None,
                content_type: ContentType::Exercises,
                content_amount: 10.0,
                difficulty: DifficultyLevel::Hard,
                due_at: Some(schedule_utils::format_datetime(now + Duration::days(2))),
                grade_impact: Some(40.0),
                personal_importance: Some(4.0),
            },
            now,
        )
        .expect("create task");
    assert_eq!(record.estimated_minutes, 248);

    let plan = planning_service.generate_plan(
        std::slice::from_ref(&record),
        &routine_with_monday_classes(),
        now,
    );
    let allocated: i64 = plan.sessions.iter().map(|s| s.duration_minutes).sum();
    assert_eq!(allocated, 248);
    for session in &plan.sessions {
        assert_eq!(session.task_id, record.id);
        assert_eq!(session.subject, "Cálculo");
    }
}

#[test]
fn plans_group_by_day_for_display() {
    let now = dt(2026, 3, 9, 8, 0);
    let tasks = vec![task(
        "a",
        600,
        Some(schedule_utils::format_datetime(now + Duration::days(4))),
        DifficultyLevel::Medium,
    )];
    let plan = PlanningService::default().generate_plan(&tasks, &routine_with_monday_classes(), now);

    let by_day = plan.sessions_by_day();
    let grouped: usize = by_day.values().map(|sessions| sessions.len()).sum();
    assert_eq!(grouped, plan.sessions.len());
    let mut dates: Vec<_> = by_day.keys().copied().collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    dates.dedup();
    assert_eq!(dates.len(), by_day.len());
}
