use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{TimeZone, Utc};

use ticketlog_core::{ActivityShape, Document};
use ticketlog_generate::{GenerationEngine, RandomFieldProvider, TimeWindow, write_document};
use ticketlog_load::{
    LoadError, LoadOptions, RawDocument, TableWriter, load_document, load_file, parse_document,
};

const SAMPLE: &str = r#"{
    "metadata": {"start_at": "30-11-2021 09:30:01 +0000", "end_at": "01-12-2021 09:30:00 +0000", "activities_count": 2},
    "activities_data": [
        {"performed_at": "30-11-2021 21:30:00 +0000", "ticket_id": 675211, "performer_type": "user", "performer_id": 104,
         "activity": {"note": {"id": 480652, "type": 2}}},
        {"performed_at": "01-12-2021 09:30:00 +0000", "ticket_id": 675212, "performer_type": "admin", "performer_id": 104,
         "activity": {"shipping_address": "N/A", "shipment_date": "01 Dec, 2021", "category": "Phone",
                      "contacted_customer": true, "issue_type": "Fault", "source": 2, "status": "Open",
                      "priority": 3, "group": "repair", "agent_id": 145001, "requester": 268001, "product": "mobile"}}
    ]
}"#;

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("ticketlog_load_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn generated(number: i64, seed: u64) -> Document {
    let end = Utc.with_ymd_and_hms(2021, 12, 1, 9, 30, 0).unwrap();
    let window = TimeWindow::ending_at(end, 86_399).expect("window");
    let mut fields = RandomFieldProvider::seeded(seed);
    GenerationEngine::default()
        .run_with(number, window, &mut fields)
        .expect("generate document")
}

fn as_raw(document: &Document) -> RawDocument {
    let json = serde_json::to_string(document).expect("serialize document");
    parse_document(&json).expect("parse document")
}

async fn count(writer: &mut TableWriter, table: &str) -> Result<i64> {
    let sql = format!("SELECT count(*) FROM {table}");
    Ok(sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(writer.connection())
        .await?)
}

#[tokio::test]
async fn loads_note_and_task_rows() -> Result<()> {
    let mut writer = TableWriter::in_memory().await?;
    let report = load_document(&mut writer, parse_document(SAMPLE)?, &LoadOptions::default()).await?;

    assert_eq!(report.tickets, 2);
    assert_eq!(report.written.tickets, 2);
    assert_eq!(report.written.notes, 1);
    assert_eq!(report.written.tasks, 1);
    assert_eq!(report.last_task_id, 50_001);

    let note: (i64, i64, i64) =
        sqlx::query_as("SELECT note_id, note_type, ticket_id FROM Note")
            .fetch_one(writer.connection())
            .await?;
    assert_eq!(note, (480_652, 2, 675_211));

    let task: (i64, String, bool, i64, String) = sqlx::query_as(
        "SELECT task_id, task_group, contacted_customer, ticket_id, status FROM Task",
    )
    .fetch_one(writer.connection())
    .await?;
    assert_eq!(task, (50_001, "repair".to_string(), true, 675_212, "Open".to_string()));

    let tickets: Vec<(i64, String, Option<i64>, Option<i64>)> = sqlx::query_as(
        "SELECT ticket_id, time_ticket_created, note_id, task_id FROM Tickets ORDER BY ticket_id",
    )
    .fetch_all(writer.connection())
    .await?;
    assert_eq!(
        tickets,
        vec![
            (675_211, "30-11-2021 09:30:01 +0000".to_string(), Some(480_652), None),
            (675_212, "30-11-2021 09:30:01 +0000".to_string(), None, Some(50_001)),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn performer_keeps_first_type() -> Result<()> {
    let mut writer = TableWriter::in_memory().await?;
    let report = load_document(&mut writer, parse_document(SAMPLE)?, &LoadOptions::default()).await?;

    assert_eq!(report.written.performers, 1);
    assert_eq!(report.written.performers_ignored, 1);

    let performers: Vec<(i64, String)> =
        sqlx::query_as("SELECT performer_id, performer_type FROM Performer")
            .fetch_all(writer.connection())
            .await?;
    assert_eq!(performers, vec![(104, "user".to_string())]);
    Ok(())
}

#[tokio::test]
async fn generated_document_round_trips_shapes() -> Result<()> {
    let document = generated(400, 77);
    let mut expected_notes = 0_i64;
    let mut expected_tasks = 0_i64;
    let mut expected_both = 0_i64;
    for ticket in &document.activities_data {
        let shape = ticket.activity.shape();
        assert_ne!(shape, ActivityShape::Empty);
        expected_notes += i64::from(shape.has_note());
        expected_tasks += i64::from(shape.has_task());
        expected_both += i64::from(shape == ActivityShape::NoteAndTask);
    }

    let mut writer = TableWriter::in_memory().await?;
    let report = load_document(&mut writer, as_raw(&document), &LoadOptions::default()).await?;
    assert_eq!(report.tickets, 400);
    assert_eq!(report.shapes.get(&ActivityShape::Empty), None);

    assert_eq!(count(&mut writer, "Tickets").await?, 400);
    assert_eq!(count(&mut writer, "Note").await?, expected_notes);
    assert_eq!(count(&mut writer, "Task").await?, expected_tasks);

    let with_both: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM Tickets WHERE note_id IS NOT NULL AND task_id IS NOT NULL",
    )
    .fetch_one(writer.connection())
    .await?;
    assert_eq!(with_both, expected_both);
    assert_eq!(
        report.shapes.get(&ActivityShape::NoteAndTask).copied(),
        Some(expected_both as u64)
    );

    let task_ids: Vec<i64> =
        sqlx::query_scalar("SELECT task_id FROM Tickets WHERE task_id IS NOT NULL ORDER BY ticket_id")
            .fetch_all(writer.connection())
            .await?;
    let expected: Vec<i64> = (50_001..50_001 + expected_tasks).collect();
    assert_eq!(task_ids, expected);
    assert_eq!(report.last_task_id, 50_000 + expected_tasks);
    Ok(())
}

#[tokio::test]
async fn task_id_base_is_configurable() -> Result<()> {
    let mut writer = TableWriter::in_memory().await?;
    let options = LoadOptions { task_id_base: 9 };
    load_document(&mut writer, parse_document(SAMPLE)?, &options).await?;

    let task_id: i64 = sqlx::query_scalar("SELECT task_id FROM Task")
        .fetch_one(writer.connection())
        .await?;
    assert_eq!(task_id, 10);
    Ok(())
}

#[tokio::test]
async fn existing_table_is_a_conflict() -> Result<()> {
    let mut writer = TableWriter::in_memory().await?;
    sqlx::query("CREATE TABLE tickets (ticket_id integer)")
        .execute(writer.connection())
        .await?;

    let err = load_document(&mut writer, parse_document(SAMPLE)?, &LoadOptions::default())
        .await
        .expect_err("conflict");
    match err {
        LoadError::TargetConflict { tables, .. } => assert_eq!(tables, vec!["tickets".to_string()]),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(count(&mut writer, "tickets").await?, 0);
    let names: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(writer.connection())
            .await?;
    assert_eq!(names, vec!["tickets".to_string()]);
    Ok(())
}

#[tokio::test]
async fn failed_batch_leaves_tables_empty() -> Result<()> {
    let duplicated = SAMPLE.replace("675212", "675211");
    let mut writer = TableWriter::in_memory().await?;
    let err = load_document(&mut writer, parse_document(&duplicated)?, &LoadOptions::default())
        .await
        .expect_err("duplicate ticket id");
    assert!(matches!(err, LoadError::StorageFailure(_)), "{err}");

    for table in ["Tickets", "Performer", "Note", "Task"] {
        assert_eq!(count(&mut writer, table).await?, 0, "{table}");
    }
    Ok(())
}

#[tokio::test]
async fn load_file_writes_store_from_generated_file() -> Result<()> {
    let dir = temp_out_dir("file");
    let input = dir.join("activities.json");
    let output = dir.join("activities.db");
    write_document(&input, &generated(25, 3))?;

    let report = load_file(&input, &output, &LoadOptions::default()).await?;
    assert_eq!(report.written.tickets, 25);
    assert!(output.is_file());

    let err = load_file(&input, &output, &LoadOptions::default())
        .await
        .expect_err("second load into the same store");
    assert!(matches!(err, LoadError::TargetConflict { .. }), "{err}");

    let mut writer = TableWriter::open(&output).await?;
    assert_eq!(count(&mut writer, "Tickets").await?, 25);
    writer.close().await?;
    Ok(())
}

#[tokio::test]
async fn missing_input_is_reported() {
    let dir = temp_out_dir("missing");
    let output = dir.join("activities.db");
    let err = load_file(&dir.join("absent.json"), &output, &LoadOptions::default())
        .await
        .expect_err("missing input");
    assert!(matches!(err, LoadError::MissingInput(_)), "{err}");
    assert!(!output.exists());
}

#[tokio::test]
async fn shape_mismatch_touches_nothing() -> Result<()> {
    let dir = temp_out_dir("mismatch");
    let input = dir.join("activities.json");
    let output = dir.join("activities.db");
    fs::write(&input, SAMPLE.replace(r#""priority": 3,"#, ""))?;

    let err = load_file(&input, &output, &LoadOptions::default())
        .await
        .expect_err("partial task");
    match err {
        LoadError::ShapeMismatch { ticket_id, .. } => assert_eq!(ticket_id, 675_212),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
    Ok(())
}
