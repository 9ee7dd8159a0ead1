use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

mod common;
use common::{init_db, js, setup_test_db, temp_file, temp_out, test_config};

const JOB_DETAIL: &str = r#"{
    "id": "4f7c",
    "name": "Stainless canopy",
    "job_number": 95123,
    "client_name": "Acme Foods",
    "status": "in_progress"
}"#;

const ROWS: &str = r#"[
    { "id": "te-1", "jobId": "4f7c", "jobNumber": 95123, "staffId": "s-anna",
      "date": "2025-03-04", "hours": 2, "rate": "1.5", "chargeOutRate": 0, "billable": true },
    { "tempId": "temp-2", "job_id": "4f7c", "job_number": 95123, "staff_id": "s-nobody",
      "date": "2025-03-04", "quantity": 3, "wageRate": 20, "rate": "2.0", "unit_rev": 50,
      "meta": { "rate_multiplier": 1 } }
]"#;

#[test]
fn test_init_creates_schema() {
    let db = setup_test_db("cli_init");
    let cfg = test_config("cli_init", &db);

    js().args(["--db", &db, "--config", &cfg, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied: 20250301_0001_create_jobs"))
        .stdout(contains("initialization completed"));

    // second run has nothing left to apply
    js().args(["--db", &db, "--config", &cfg, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("already up to date"));
}

#[test]
fn test_job_show_second_read_is_cache_hit() {
    let db = setup_test_db("cli_job_show");
    let cfg = test_config("cli_job_show", &db);
    init_db(&db, &cfg);
    let detail = temp_file("cli_job_show_detail", "json", JOB_DETAIL);

    js().args(["--db", &db, "--config", &cfg, "job", "add", "4f7c", "--file", &detail])
        .assert()
        .success()
        .stdout(contains("Job 4f7c stored"));

    js().args(["--db", &db, "--config", &cfg, "job", "show", "4f7c", "4f7c"])
        .assert()
        .success()
        .stdout(contains("Job 4f7c (loaded)"))
        .stdout(contains("Job 4f7c (cache hit)"))
        .stdout(contains("Stainless canopy"))
        .stdout(contains("Cache: 1 entries, 1 valid, 0 expired (ttl 5m)"));
}

#[test]
fn test_job_show_unknown_job_fails() {
    let db = setup_test_db("cli_job_missing");
    let cfg = test_config("cli_job_missing", &db);
    init_db(&db, &cfg);

    js().args(["--db", &db, "--config", &cfg, "job", "show", "nope"])
        .assert()
        .failure()
        .stderr(contains("Job not found: nope"));
}

#[test]
fn test_job_patch_merges_fields() {
    let db = setup_test_db("cli_job_patch");
    let cfg = test_config("cli_job_patch", &db);
    init_db(&db, &cfg);
    let detail = temp_file("cli_job_patch_detail", "json", JOB_DETAIL);
    let patch = temp_file("cli_job_patch_partial", "json", r#"{ "status": "completed" }"#);

    js().args(["--db", &db, "--config", &cfg, "job", "add", "4f7c", "--file", &detail])
        .assert()
        .success();

    js().args(["--db", &db, "--config", &cfg, "job", "patch", "4f7c", "--file", &patch])
        .assert()
        .success()
        .stdout(contains("Cached copy updated in place"));

    js().args(["--db", &db, "--config", &cfg, "job", "show", "4f7c"])
        .assert()
        .success()
        .stdout(contains("completed"))
        .stdout(contains("in_progress").not());

    js().args(["--db", &db, "--config", &cfg, "job", "list"])
        .assert()
        .success()
        .stdout(contains("4f7c"));
}

#[test]
fn test_recalc_json_output() {
    let db = setup_test_db("cli_recalc_json");
    let cfg = test_config("cli_recalc_json", &db);
    init_db(&db, &cfg);
    let rows = temp_file("cli_recalc_json_rows", "json", ROWS);

    let output = js()
        .args(["--db", &db, "--config", &cfg, "recalc", &rows, "--format", "json"])
        .output()
        .expect("run recalc");
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let rows = parsed.as_array().expect("array");
    assert_eq!(rows.len(), 2);

    // staff rate from config: Anna 32.0 * 2h * 1.5
    assert_eq!(rows[0]["wage"], 96.0);
    assert_eq!(rows[0]["bill"], 0.0);
    assert_eq!(rows[0]["xeroPayItemId"], "pi-15");
    assert_eq!(rows[0]["meta"]["rate_multiplier"], 1.5);

    assert_eq!(rows[1]["hours"], 3.0);
    assert_eq!(rows[1]["wage"], 120.0);
    assert_eq!(rows[1]["bill"], 150.0);
    assert_eq!(rows[1]["rateMultiplier"], 2.0);
    assert_eq!(rows[1]["meta"]["rate_multiplier"], 2.0);
    assert_eq!(rows[1]["tempId"], "temp-2");
}

#[test]
fn test_recalc_table_uses_current_staff_fallback() {
    let db = setup_test_db("cli_recalc_table");
    let cfg = test_config("cli_recalc_table", &db);
    init_db(&db, &cfg);
    let rows = temp_file(
        "cli_recalc_table_rows",
        "json",
        r#"[{ "jobId": "j-1", "jobNumber": 95001, "date": "2025-03-04", "hours": 2 }]"#,
    );

    // current_staff is Ben at 28.50
    js().args(["--db", &db, "--config", &cfg, "recalc", &rows])
        .assert()
        .success()
        .stdout(contains("57.00"))
        .stdout(contains("ready"))
        .stdout(contains("Totals:"));

    js().args(["--db", &db, "--config", &cfg, "recalc", &rows, "--staff", "s-anna"])
        .assert()
        .success()
        .stdout(contains("64.00"));
}

#[test]
fn test_recalc_csv_to_file_and_audit_log() {
    let db = setup_test_db("cli_recalc_csv");
    let cfg = test_config("cli_recalc_csv", &db);
    init_db(&db, &cfg);
    let rows = temp_file("cli_recalc_csv_rows", "json", ROWS);
    let out = temp_out("cli_recalc_csv", "csv");

    js().args(["--db", &db, "--config", &cfg, "recalc", &rows, "--format", "csv", "--out", &out])
        .assert()
        .success()
        .stdout(contains("csv export completed"));

    let csv = std::fs::read_to_string(&out).expect("csv written");
    assert!(csv.starts_with("id,date,staff_id,job_number"));
    assert!(csv.contains("te-1"));
    assert_eq!(csv.lines().count(), 3);

    js().args(["--db", &db, "--config", &cfg, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("recalc"))
        .stdout(contains("2 rows recalculated"));
}

#[test]
fn test_recalc_rejects_non_array_input() {
    let db = setup_test_db("cli_recalc_bad");
    let cfg = test_config("cli_recalc_bad", &db);
    let rows = temp_file("cli_recalc_bad_rows", "json", "42");

    js().args(["--db", &db, "--config", &cfg, "recalc", &rows])
        .assert()
        .failure()
        .stderr(contains("must contain a JSON array of rows"));
}

#[test]
fn test_config_check_reports_missing_keys() {
    let db = setup_test_db("cli_config_check");
    let partial = temp_file(
        "cli_config_check",
        "conf",
        &format!("database: \"{}\"\ncache_ttl_ms: 60000\n", db.replace('\\', "\\\\")),
    );

    js().args(["--config", &partial, "config", "--check"])
        .assert()
        .success()
        .stderr(contains("Missing key: pay_items"))
        .stderr(contains("Missing key: staff"))
        .stderr(contains("Missing key: default_rate"))
        .stdout(contains("Cache TTL").and(contains("1m")))
        .stdout(contains("Default rate: Ord"));

    let full = test_config("cli_config_full", &db);
    js().args(["--config", &full, "config", "--check", "--print"])
        .assert()
        .success()
        .stdout(contains("is complete"))
        .stdout(contains("s-anna"));
}

#[test]
fn test_invalid_config_is_reported() {
    let cfg = temp_file(
        "cli_config_invalid",
        "conf",
        "database: \"x.sqlite\"\ncache_ttl_ms: 0\n",
    );

    js().args(["--config", &cfg, "config", "--print"])
        .assert()
        .failure()
        .stderr(contains("cache_ttl_ms must be positive"));
}

#[test]
fn test_recalc_uses_configured_default_rate() {
    let db = setup_test_db("cli_default_rate");
    let base = std::fs::read_to_string(test_config("cli_default_rate_base", &db)).expect("config");
    let cfg = temp_file(
        "cli_default_rate",
        "conf",
        &base.replace("default_rate: \"Ord\"", "default_rate: \"1.5\""),
    );
    init_db(&db, &cfg);
    let rows = temp_file(
        "cli_default_rate_rows",
        "json",
        r#"[{ "id": "te-1", "jobId": "j-1", "hours": 2, "wageRate": 20 },
            { "id": "te-2", "jobId": "j-1", "hours": 2, "wageRate": 20, "rate": "Ord" }]"#,
    );

    let output = js()
        .args(["--db", &db, "--config", &cfg, "recalc", &rows, "--format", "json"])
        .output()
        .expect("run recalc");
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(parsed[0]["rate"], "1.5");
    assert_eq!(parsed[0]["wage"], 60.0);
    assert_eq!(parsed[0]["xeroPayItemId"], "pi-15");
    // an explicit label still wins
    assert_eq!(parsed[1]["rate"], "Ord");
    assert_eq!(parsed[1]["wage"], 40.0);
}

#[test]
fn test_unknown_default_rate_is_rejected() {
    let cfg = temp_file(
        "cli_default_rate_invalid",
        "conf",
        "database: \"x.sqlite\"\ndefault_rate: \"Weekend\"\n",
    );

    js().args(["--config", &cfg, "config", "--print"])
        .assert()
        .failure()
        .stderr(contains("default_rate 'Weekend'"));
}
