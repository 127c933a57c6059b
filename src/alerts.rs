//! Lead-time alert generation.
//!
//! Walks persisted schedule rows and derives "call the supplier" and
//! "start fabrication" reminders by subtracting the row's lead days
//! (calendar days) from its start date. Reminders already in the past
//! are silently dropped — no backlog of stale notifications.
//!
//! Alerts reference the row's storage id, so this is strictly a second
//! pass after the rows exist.

use chrono::{Duration, NaiveDate};

use crate::models::{ScheduleAlert, ScheduleItem};

/// Derives the alert set for a list of persisted rows.
///
/// Rows without a storage id are skipped (nothing to reference yet);
/// rows without lead days produce nothing. `today` is the suppression
/// threshold: a reminder dated before it is dropped.
pub fn build_alerts(items: &[ScheduleItem], today: NaiveDate) -> Vec<ScheduleAlert> {
    let mut alerts = Vec::new();
    for item in items {
        let Some(schedule_id) = item.id else {
            tracing::debug!(step = %item.step_id, "skipping alert for unpersisted row");
            continue;
        };

        if let Some(lead) = item.supplier_schedule_lead_days.filter(|&d| d > 0) {
            let call_date = item.start_date - Duration::days(i64::from(lead));
            if call_date >= today {
                alerts.push(ScheduleAlert::supplier_call(
                    &item.project_id,
                    schedule_id,
                    call_date,
                    format!(
                        "Appeler le fournisseur pour « {} » ({} jours de préavis)",
                        item.step_name, lead
                    ),
                ));
            }
        }

        if let Some(lead) = item.fabrication_lead_days.filter(|&d| d > 0) {
            let fab_date = item.start_date - Duration::days(i64::from(lead));
            if fab_date >= today {
                alerts.push(ScheduleAlert::fabrication_start(
                    &item.project_id,
                    schedule_id,
                    fab_date,
                    format!(
                        "Lancer la fabrication pour « {} » ({} jours de préavis)",
                        item.step_name, lead
                    ),
                ));
            }
        }
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{format_date, parse_date};
    use crate::models::{AlertType, ScheduleStatus};

    fn item(id: Option<i64>, start: &str, supplier: Option<u32>, fab: Option<u32>) -> ScheduleItem {
        ScheduleItem {
            id,
            project_id: "p1".into(),
            step_id: "menuiseries-ext".into(),
            step_name: "Menuiseries extérieures".into(),
            trade_type: "menuiserie".into(),
            trade_color: "#ef6c00".into(),
            estimated_days: 5,
            actual_days: None,
            start_date: parse_date(start).unwrap(),
            end_date: parse_date(start).unwrap(),
            status: ScheduleStatus::Scheduled,
            supplier_schedule_lead_days: supplier,
            fabrication_lead_days: fab,
            measurement_required: false,
            measurement_after_step_id: None,
            measurement_notes: None,
            is_manual_date: false,
        }
    }

    fn today() -> NaiveDate {
        parse_date("2025-06-01").unwrap()
    }

    #[test]
    fn test_supplier_and_fabrication_alerts() {
        let rows = vec![item(Some(3), "2025-08-01", Some(30), Some(45))];
        let alerts = build_alerts(&rows, today());

        assert_eq!(alerts.len(), 2);
        let supplier = alerts
            .iter()
            .find(|a| a.alert_type == AlertType::SupplierCall)
            .unwrap();
        // Calendar-day subtraction: 2025-08-01 minus 30 days.
        assert_eq!(format_date(supplier.alert_date), "2025-07-02");
        assert_eq!(supplier.schedule_id, 3);
        assert!(supplier.message.contains("Menuiseries extérieures"));

        let fabrication = alerts
            .iter()
            .find(|a| a.alert_type == AlertType::FabricationStart)
            .unwrap();
        assert_eq!(format_date(fabrication.alert_date), "2025-06-17");
    }

    #[test]
    fn test_past_alert_dates_are_dropped() {
        // Start 2025-06-10 with 30 days of lead → call date 2025-05-11,
        // before today: suppressed.
        let rows = vec![item(Some(3), "2025-06-10", Some(30), None)];
        assert!(build_alerts(&rows, today()).is_empty());
    }

    #[test]
    fn test_alert_due_today_is_kept() {
        let rows = vec![item(Some(3), "2025-07-01", Some(30), None)];
        let alerts = build_alerts(&rows, today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(format_date(alerts[0].alert_date), "2025-06-01");
    }

    #[test]
    fn test_rows_without_leads_or_id_produce_nothing() {
        let rows = vec![
            item(Some(1), "2025-08-01", None, None),
            item(Some(2), "2025-08-01", Some(0), Some(0)),
            item(None, "2025-08-01", Some(30), Some(45)),
        ];
        assert!(build_alerts(&rows, today()).is_empty());
    }

    #[test]
    fn test_alert_date_may_fall_on_a_weekend() {
        // Lead subtraction is calendar-day: landing on a Saturday is fine.
        let rows = vec![item(Some(1), "2025-07-07", Some(2), None)];
        let alerts = build_alerts(&rows, today());
        assert_eq!(format_date(alerts[0].alert_date), "2025-07-05");
    }
}
