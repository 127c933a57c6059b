//! Schedule generation and update orchestration.
//!
//! Ties the pure passes together at the persistence boundary:
//! parse the boundary dates, plan, replace the project's rows
//! atomically, then derive alerts in a second pass against the
//! persisted ids. Alert persistence is deliberately non-fatal — a
//! schedule without reminders is still a correct schedule.

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::alerts::build_alerts;
use crate::calendar::{self, span_end, DateParseError};
use crate::catalog::PhaseCatalog;
use crate::conflict::{detect_conflicts, Conflict};
use crate::curing::{resolve_curing_windows, CuringWindow};
use crate::models::{ManualTask, ManualTaskError, ManualTaskInput, ScheduleItem};
use crate::scheduler::{rechain_following, SchedulePlanner};
use crate::storage::{AlertStore, ScheduleStore, ScheduleUpdate, StorageError};

/// Failures surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A boundary date string was not ISO `yyyy-MM-dd`.
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
    /// A manual task submission was rejected.
    #[error(transparent)]
    InvalidTask(#[from] ManualTaskError),
    /// The schedule store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The referenced row is not part of the project's schedule.
    #[error("schedule row {0} not found in project")]
    UnknownStep(i64),
}

/// Input for a schedule generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Project to (re)generate.
    pub project_id: String,
    /// First day of construction, ISO `yyyy-MM-dd`.
    pub target_start: String,
    /// Phase the project is currently at, if already underway.
    pub current_stage: Option<String>,
    /// Alert suppression threshold. `None` = the current local date.
    pub today: Option<NaiveDate>,
}

impl GenerateRequest {
    /// Creates a request for a project and target start date.
    pub fn new(project_id: impl Into<String>, target_start: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            target_start: target_start.into(),
            current_stage: None,
            today: None,
        }
    }

    /// Sets the current stage (skips preparation, slices construction).
    pub fn with_current_stage(mut self, stage: impl Into<String>) -> Self {
        self.current_stage = Some(stage.into());
        self
    }

    /// Pins "today" for deterministic alert suppression.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

/// Input for moving one schedule row.
#[derive(Debug, Clone)]
pub struct MoveStepRequest {
    /// Owning project.
    pub project_id: String,
    /// Persisted row to move.
    pub schedule_id: i64,
    /// New start date, ISO `yyyy-MM-dd`.
    pub new_start: String,
    /// Pin the row so later re-chaining leaves it in place.
    pub pin: bool,
    /// Alert suppression threshold. `None` = the current local date.
    pub today: Option<NaiveDate>,
}

impl MoveStepRequest {
    /// Creates a move request.
    pub fn new(
        project_id: impl Into<String>,
        schedule_id: i64,
        new_start: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            schedule_id,
            new_start: new_start.into(),
            pin: true,
            today: None,
        }
    }

    /// Leaves the row unpinned after the move.
    pub fn without_pin(mut self) -> Self {
        self.pin = false;
        self
    }

    /// Pins "today" for deterministic alert suppression.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

/// What a generation run produced.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Persisted rows, in schedule order, with their generated ids.
    pub items: Vec<ScheduleItem>,
    /// Alerts persisted by the best-effort second pass.
    pub alerts_created: usize,
}

/// Orchestrates planning against the storage boundary.
#[derive(Debug, Clone)]
pub struct ScheduleEngine<'a> {
    catalog: &'a PhaseCatalog,
}

impl<'a> ScheduleEngine<'a> {
    /// Creates an engine over a catalog.
    pub fn new(catalog: &'a PhaseCatalog) -> Self {
        Self { catalog }
    }

    /// Generates and persists a project's schedule, then derives
    /// lead-time alerts from the persisted rows.
    ///
    /// The row replacement is all-or-nothing: on storage failure the
    /// previously stored schedule is untouched and the error is
    /// returned. Alert failures are logged and swallowed.
    pub fn generate<S: ScheduleStore, A: AlertStore>(
        &self,
        schedules: &mut S,
        alerts: &mut A,
        request: &GenerateRequest,
    ) -> Result<GenerationSummary, EngineError> {
        let target_start = calendar::parse_date(&request.target_start)?;
        let planner = SchedulePlanner::new(self.catalog);
        let planned = planner.plan(
            &request.project_id,
            target_start,
            request.current_stage.as_deref(),
        );

        let items = schedules.replace_schedules(&request.project_id, planned)?;
        tracing::debug!(
            project = %request.project_id,
            rows = items.len(),
            "schedule generated"
        );

        let today = request.today.unwrap_or_else(|| Local::now().date_naive());
        let alerts_created = match alerts.insert_alerts(build_alerts(&items, today)) {
            Ok(inserted) => inserted.len(),
            Err(e) => {
                tracing::warn!(
                    project = %request.project_id,
                    error = %e,
                    "alert persistence failed; schedule generated without alerts"
                );
                0
            }
        };

        Ok(GenerationSummary {
            items,
            alerts_created,
        })
    }

    /// Moves one row to a new start date and re-chains everything
    /// after it.
    ///
    /// Changed rows are persisted individually; alerts are rebuilt for
    /// the changed rows only, and a candidate identical to an alert
    /// already stored (same row, kind, due date) is skipped — so a
    /// dismissed alert only reappears when the row's dates actually
    /// moved. Returns the project's rows after the move.
    pub fn move_step<S: ScheduleStore, A: AlertStore>(
        &self,
        schedules: &mut S,
        alerts: &mut A,
        request: &MoveStepRequest,
    ) -> Result<Vec<ScheduleItem>, EngineError> {
        let new_start = calendar::parse_date(&request.new_start)?;
        let mut items = schedules.list_schedules(&request.project_id)?;
        let index = items
            .iter()
            .position(|i| i.id == Some(request.schedule_id))
            .ok_or(EngineError::UnknownStep(request.schedule_id))?;

        items[index].start_date = new_start;
        items[index].end_date = span_end(new_start, items[index].display_days());
        items[index].is_manual_date = request.pin;

        let mut changed = rechain_following(&mut items, index);
        changed.insert(0, index);

        for &i in &changed {
            let row = &items[i];
            let id = row.id.ok_or(EngineError::UnknownStep(request.schedule_id))?;
            schedules.update_schedule(
                id,
                ScheduleUpdate {
                    start_date: Some(row.start_date),
                    end_date: Some(row.end_date),
                    is_manual_date: (i == index).then_some(request.pin),
                    ..Default::default()
                },
            )?;
        }

        let today = request.today.unwrap_or_else(|| Local::now().date_naive());
        self.refresh_alerts(alerts, &request.project_id, &items, &changed, today);

        Ok(items)
    }

    /// Validates, materializes, and persists a user task as a pinned
    /// schedule row.
    pub fn add_manual_task<S: ScheduleStore>(
        &self,
        schedules: &mut S,
        project_id: &str,
        input: ManualTaskInput,
    ) -> Result<ScheduleItem, EngineError> {
        let task = input.parse()?;
        let row = task.materialize(self.catalog, project_id);
        let mut inserted = schedules.insert_schedules(project_id, vec![row])?;
        inserted
            .pop()
            .ok_or_else(|| StorageError::Backend("insert returned no rows".into()).into())
    }

    /// Day-level trade conflicts over the project's rows plus any
    /// not-yet-persisted manual tasks.
    pub fn project_conflicts<S: ScheduleStore>(
        &self,
        schedules: &S,
        project_id: &str,
        manual_tasks: &[ManualTask],
    ) -> Result<Vec<Conflict>, EngineError> {
        let items = schedules.list_schedules(project_id)?;
        Ok(detect_conflicts(&items, manual_tasks))
    }

    /// Advisory curing windows for the project's current dates.
    pub fn curing_windows<S: ScheduleStore>(
        &self,
        schedules: &S,
        project_id: &str,
    ) -> Result<Vec<CuringWindow>, EngineError> {
        let items = schedules.list_schedules(project_id)?;
        Ok(resolve_curing_windows(self.catalog, &items))
    }

    /// Best-effort alert refresh for rows whose dates changed.
    fn refresh_alerts<A: AlertStore>(
        &self,
        alerts: &mut A,
        project_id: &str,
        items: &[ScheduleItem],
        changed: &[usize],
        today: NaiveDate,
    ) {
        let existing = match alerts.list_alerts(project_id) {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(project = %project_id, error = %e, "alert refresh skipped");
                return;
            }
        };
        let known: std::collections::HashSet<_> =
            existing.iter().map(|a| a.identity()).collect();

        let changed_rows: Vec<ScheduleItem> =
            changed.iter().map(|&i| items[i].clone()).collect();
        let candidates: Vec<_> = build_alerts(&changed_rows, today)
            .into_iter()
            .filter(|a| !known.contains(&a.identity()))
            .collect();
        if candidates.is_empty() {
            return;
        }
        if let Err(e) = alerts.insert_alerts(candidates) {
            tracing::warn!(project = %project_id, error = %e, "alert refresh failed");
        }
    }
}
