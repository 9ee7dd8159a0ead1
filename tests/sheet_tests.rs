use jobsheet::core::recalc::RecalcContext;
use jobsheet::core::sheet::SheetLogic;
use jobsheet::models::rate_type::RateType;
use jobsheet::models::timesheet_entry::TimesheetEntry;
use serde_json::json;

#[test]
fn test_blank_row_template() {
    let row = TimesheetEntry::blank("s-anna", "2025-03-04");

    assert!(!row.is_persisted());
    assert!(row.identity.as_str().starts_with("temp-"));
    assert_eq!(row.rate, RateType::Ord);
    assert!(row.billable);
    assert!(!row.is_ready_to_save());
}

#[test]
fn test_ready_needs_job_and_positive_hours() {
    let mut row = TimesheetEntry::blank("s-anna", "2025-03-04");
    row.hours = 2.0;
    assert!(!row.is_ready_to_save());

    row.job_id = "j-1".into();
    assert!(row.is_ready_to_save());

    row.hours = 0.0;
    assert!(!row.is_ready_to_save());
}

#[test]
fn test_duplicates_ignore_identity() {
    let mut a = TimesheetEntry::blank("s-anna", "2025-03-04");
    a.job_id = "j-1".into();
    a.hours = 3.0;
    a.description = "Laser cutting".into();

    let mut b = TimesheetEntry::blank("s-anna", "2025-03-04");
    b.job_id = "j-1".into();
    b.hours = 3.0;
    b.description = "Laser cutting ".into();

    assert!(a.is_duplicate_of(&b));
    assert_eq!(b.find_duplicate(std::slice::from_ref(&a)).map(|d| &d.identity), Some(&a.identity));
    assert!(a.find_duplicate(std::slice::from_ref(&a)).is_none(), "a row never duplicates itself");

    b.rate = RateType::TimeAndHalf;
    assert!(!a.is_duplicate_of(&b));
}

#[test]
fn test_sheet_flags_duplicates_and_totals() {
    let rows = vec![
        json!({ "id": "te-1", "jobId": "j-1", "staffId": "s", "date": "2025-03-04",
                "hours": 2, "wageRate": 30, "chargeOutRate": 100 }),
        json!({ "tempId": "temp-2", "jobId": "j-1", "staffId": "s", "date": "2025-03-04",
                "hours": 2, "wageRate": 30, "chargeOutRate": 100 }),
        json!({ "tempId": "temp-3", "staffId": "s", "date": "2025-03-04", "hours": 1, "wageRate": 30 }),
    ];

    let sheet = SheetLogic::recalculate_all(&rows, &RecalcContext::detached());

    assert!(sheet[0].ready);
    assert_eq!(sheet[1].duplicate_of.as_deref(), Some("te-1"));
    assert!(!sheet[1].ready);
    assert!(!sheet[2].ready, "no job");
    assert!(sheet[2].duplicate_of.is_none());

    let totals = SheetLogic::totals(&sheet);
    assert_eq!(totals.hours, 5.0);
    assert_eq!(totals.wage, 150.0);
    assert_eq!(totals.bill, 400.0);
}
