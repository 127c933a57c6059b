//! Storage collaborator contracts.
//!
//! The engine computes schedules in full and hands the result to a
//! store; it never observes persistence mid-computation. These traits
//! are the seam: the surrounding application brings its own backend,
//! and [`MemoryStore`] is the reference implementation the tests run
//! against.
//!
//! Regeneration is delete-all-then-insert-all: [`ScheduleStore::replace_schedules`]
//! must be all-or-nothing so a failed generation leaves the previous
//! schedule untouched.

use thiserror::Error;

use crate::models::{ScheduleAlert, ScheduleItem, ScheduleStatus};

/// Failures reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No row with the given id.
    #[error("row {0} not found")]
    NotFound(i64),
    /// The backend refused or lost the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Partial update for a schedule row.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub status: Option<ScheduleStatus>,
    pub actual_days: Option<u32>,
    pub is_manual_date: Option<bool>,
}

/// Persistence contract for schedule rows.
pub trait ScheduleStore {
    /// Bulk-inserts rows for a project and returns them with their
    /// generated ids, in input order.
    fn insert_schedules(
        &mut self,
        project_id: &str,
        items: Vec<ScheduleItem>,
    ) -> Result<Vec<ScheduleItem>, StorageError>;

    /// Returns a project's rows in schedule order.
    fn list_schedules(&self, project_id: &str) -> Result<Vec<ScheduleItem>, StorageError>;

    /// Applies a partial update to one row.
    fn update_schedule(&mut self, id: i64, update: ScheduleUpdate)
        -> Result<ScheduleItem, StorageError>;

    /// Deletes one row.
    fn delete_schedule(&mut self, id: i64) -> Result<(), StorageError>;

    /// Replaces a project's rows wholesale.
    ///
    /// Must be all-or-nothing: on error the previously stored rows are
    /// still there. Alerts referencing the removed rows go with them
    /// (cascade), since an alert without its row is meaningless.
    /// Returns the new rows with generated ids.
    fn replace_schedules(
        &mut self,
        project_id: &str,
        items: Vec<ScheduleItem>,
    ) -> Result<Vec<ScheduleItem>, StorageError>;
}

/// Persistence contract for alerts.
pub trait AlertStore {
    /// Bulk-inserts alerts and returns them with generated ids.
    fn insert_alerts(
        &mut self,
        alerts: Vec<ScheduleAlert>,
    ) -> Result<Vec<ScheduleAlert>, StorageError>;

    /// Returns a project's alerts.
    fn list_alerts(&self, project_id: &str) -> Result<Vec<ScheduleAlert>, StorageError>;

    /// Marks an alert dismissed.
    fn dismiss_alert(&mut self, id: i64) -> Result<(), StorageError>;
}

/// In-memory store used by tests and small deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    schedules: Vec<ScheduleItem>,
    alerts: Vec<ScheduleAlert>,
    next_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl ScheduleStore for MemoryStore {
    fn insert_schedules(
        &mut self,
        project_id: &str,
        items: Vec<ScheduleItem>,
    ) -> Result<Vec<ScheduleItem>, StorageError> {
        let mut inserted = Vec::with_capacity(items.len());
        for mut item in items {
            item.id = Some(self.next_id());
            item.project_id = project_id.to_string();
            inserted.push(item.clone());
            self.schedules.push(item);
        }
        Ok(inserted)
    }

    fn list_schedules(&self, project_id: &str) -> Result<Vec<ScheduleItem>, StorageError> {
        Ok(self
            .schedules
            .iter()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect())
    }

    fn update_schedule(
        &mut self,
        id: i64,
        update: ScheduleUpdate,
    ) -> Result<ScheduleItem, StorageError> {
        let item = self
            .schedules
            .iter_mut()
            .find(|i| i.id == Some(id))
            .ok_or(StorageError::NotFound(id))?;
        if let Some(d) = update.start_date {
            item.start_date = d;
        }
        if let Some(d) = update.end_date {
            item.end_date = d;
        }
        if let Some(s) = update.status {
            item.status = s;
        }
        if let Some(d) = update.actual_days {
            item.actual_days = Some(d);
        }
        if let Some(p) = update.is_manual_date {
            item.is_manual_date = p;
        }
        Ok(item.clone())
    }

    fn delete_schedule(&mut self, id: i64) -> Result<(), StorageError> {
        let before = self.schedules.len();
        self.schedules.retain(|i| i.id != Some(id));
        if self.schedules.len() == before {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }

    fn replace_schedules(
        &mut self,
        project_id: &str,
        items: Vec<ScheduleItem>,
    ) -> Result<Vec<ScheduleItem>, StorageError> {
        // Stage the new rows first so the swap is all-or-nothing.
        let mut staged = Vec::with_capacity(items.len());
        for mut item in items {
            item.id = Some(self.next_id());
            item.project_id = project_id.to_string();
            staged.push(item);
        }
        let removed: Vec<i64> = self
            .schedules
            .iter()
            .filter(|i| i.project_id == project_id)
            .filter_map(|i| i.id)
            .collect();
        self.schedules.retain(|i| i.project_id != project_id);
        self.alerts.retain(|a| !removed.contains(&a.schedule_id));
        self.schedules.extend(staged.iter().cloned());
        Ok(staged)
    }
}

impl AlertStore for MemoryStore {
    fn insert_alerts(
        &mut self,
        alerts: Vec<ScheduleAlert>,
    ) -> Result<Vec<ScheduleAlert>, StorageError> {
        let mut inserted = Vec::with_capacity(alerts.len());
        for mut alert in alerts {
            alert.id = Some(self.next_id());
            inserted.push(alert.clone());
            self.alerts.push(alert);
        }
        Ok(inserted)
    }

    fn list_alerts(&self, project_id: &str) -> Result<Vec<ScheduleAlert>, StorageError> {
        Ok(self
            .alerts
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect())
    }

    fn dismiss_alert(&mut self, id: i64) -> Result<(), StorageError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == Some(id))
            .ok_or(StorageError::NotFound(id))?;
        alert.is_dismissed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;
    use crate::catalog::PhaseCatalog;
    use crate::models::AlertType;
    use crate::scheduler::SchedulePlanner;

    fn rows(project_id: &str) -> Vec<ScheduleItem> {
        let catalog = PhaseCatalog::standard();
        SchedulePlanner::new(&catalog).plan(
            project_id,
            parse_date("2025-06-02").unwrap(),
            None,
        )
    }

    #[test]
    fn test_insert_assigns_ids_in_order() {
        let mut store = MemoryStore::new();
        let inserted = store.insert_schedules("p1", rows("p1")).unwrap();
        let ids: Vec<_> = inserted.iter().map(|i| i.id.unwrap()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(inserted.len(), store.list_schedules("p1").unwrap().len());
    }

    #[test]
    fn test_list_filters_by_project() {
        let mut store = MemoryStore::new();
        store.insert_schedules("p1", rows("p1")).unwrap();
        store.insert_schedules("p2", rows("p2")).unwrap();
        assert!(store
            .list_schedules("p1")
            .unwrap()
            .iter()
            .all(|i| i.project_id == "p1"));
        assert!(store.list_schedules("p3").unwrap().is_empty());
    }

    #[test]
    fn test_update_patches_only_given_fields() {
        let mut store = MemoryStore::new();
        let inserted = store.insert_schedules("p1", rows("p1")).unwrap();
        let id = inserted[0].id.unwrap();
        let new_start = parse_date("2025-06-16").unwrap();

        let updated = store
            .update_schedule(
                id,
                ScheduleUpdate {
                    start_date: Some(new_start),
                    status: Some(ScheduleStatus::InProgress),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.start_date, new_start);
        assert_eq!(updated.status, ScheduleStatus::InProgress);
        assert_eq!(updated.end_date, inserted[0].end_date);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = MemoryStore::new();
        let err = store
            .update_schedule(99, ScheduleUpdate::default())
            .unwrap_err();
        assert_eq!(err, StorageError::NotFound(99));
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        let inserted = store.insert_schedules("p1", rows("p1")).unwrap();
        let id = inserted[0].id.unwrap();
        store.delete_schedule(id).unwrap();
        assert_eq!(
            store.list_schedules("p1").unwrap().len(),
            inserted.len() - 1
        );
        assert_eq!(store.delete_schedule(id), Err(StorageError::NotFound(id)));
    }

    #[test]
    fn test_replace_swaps_only_target_project() {
        let mut store = MemoryStore::new();
        store.insert_schedules("p1", rows("p1")).unwrap();
        store.insert_schedules("p2", rows("p2")).unwrap();
        let before_p2 = store.list_schedules("p2").unwrap();

        let replaced = store.replace_schedules("p1", rows("p1")).unwrap();
        assert!(replaced.iter().all(|i| i.id.is_some()));
        let after_p1 = store.list_schedules("p1").unwrap();
        assert_eq!(after_p1.len(), replaced.len());
        // New generation gets new ids.
        assert!(after_p1.iter().all(|i| i.id > before_p2.last().unwrap().id));
        assert_eq!(store.list_schedules("p2").unwrap().len(), before_p2.len());
    }

    #[test]
    fn test_replace_cascades_alerts_of_removed_rows() {
        let mut store = MemoryStore::new();
        let inserted = store.insert_schedules("p1", rows("p1")).unwrap();
        let row_id = inserted[0].id.unwrap();
        let d = parse_date("2025-05-01").unwrap();
        store
            .insert_alerts(vec![ScheduleAlert::supplier_call("p1", row_id, d, "appeler")])
            .unwrap();

        store.replace_schedules("p1", rows("p1")).unwrap();
        assert!(store.list_alerts("p1").unwrap().is_empty());
    }

    #[test]
    fn test_alert_round_trip_and_dismissal() {
        let mut store = MemoryStore::new();
        let d = parse_date("2025-05-01").unwrap();
        let inserted = store
            .insert_alerts(vec![ScheduleAlert::supplier_call("p1", 1, d, "appeler")])
            .unwrap();
        let id = inserted[0].id.unwrap();

        store.dismiss_alert(id).unwrap();
        let listed = store.list_alerts("p1").unwrap();
        assert!(listed[0].is_dismissed);
        assert_eq!(listed[0].alert_type, AlertType::SupplierCall);
        assert_eq!(store.dismiss_alert(999), Err(StorageError::NotFound(999)));
    }
}
