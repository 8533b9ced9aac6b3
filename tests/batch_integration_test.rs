//! Integration tests for a full batch run
//!
//! Each test writes a template and a workbook into a scratch directory and
//! runs the batch controller against a recording message store.

mod common;

use common::{write_workbook, RecordingStore};
use mailmerge::adapters::mailstore::{MessageStore, MimeMessageStore};
use mailmerge::config::MergeRequest;
use mailmerge::core::batch::{BatchController, BatchOptions, BatchState};
use mailmerge::domain::MergeError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &[&str] = &["NAME", "COMPANY_NAME", "EMAIL_TO", "EMAIL_CC"];

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(template: &str, rows: &[&[&str]]) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("template.html"), template).unwrap();

        let mut cells: Vec<&[&str]> = vec![HEADER];
        cells.extend_from_slice(rows);
        write_workbook(&dir.path().join("brokers.xlsx"), &cells);

        Self { dir }
    }

    fn destination(&self) -> PathBuf {
        self.dir.path().join("drafts")
    }

    fn request(&self) -> MergeRequest {
        MergeRequest::new(
            self.dir.path().join("template.html"),
            self.dir.path().join("brokers.xlsx"),
            self.destination(),
        )
    }

    fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.destination())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

#[tokio::test]
async fn test_generates_one_draft_per_row() {
    let fixture = Fixture::new(
        "<p>Dear [NAME]</p><p>Ref: [WAYBILL]</p>",
        &[
            &["Alice", "Acme", "a@x.com,b@y.com", ""],
            &["Bob", "Globex", "bob@globex.com", "ops@globex.com"],
        ],
    );
    let store = Arc::new(RecordingStore::new());

    let summary = BatchController::new(fixture.request(), store.clone(), BatchOptions::default())
        .start()
        .outcome()
        .await
        .unwrap();

    assert_eq!(summary.total_rows, 2);
    assert_eq!(summary.drafts_written, 2);
    assert!(summary.is_successful());
    assert!(!summary.dry_run);

    let saved = store.saved();
    assert_eq!(saved.len(), 2);

    let (alice_path, alice) = &saved[0];
    assert_eq!(
        file_name(alice_path),
        "BROKER TURN OVER FOR Acme, Waybill No.msg"
    );
    assert_eq!(alice.subject(), "BROKER TURN OVER FOR Acme, Waybil");
    assert_eq!(alice.body(), "<p>Dear Alice</p><p>Ref: [WAYBILL]</p>");
    assert_eq!(alice.to(), ["a@x.com", "b@y.com"]);
    assert_eq!(alice.to_field(), "a@x.com;b@y.com");
    assert!(alice.cc().is_empty());

    let (_, bob) = &saved[1];
    assert_eq!(bob.body(), "<p>Dear Bob</p><p>Ref: [WAYBILL]</p>");
    assert_eq!(bob.cc_field(), "ops@globex.com");

    assert_eq!(
        fixture.files(),
        [
            "BROKER TURN OVER FOR Acme, Waybill No.msg",
            "BROKER TURN OVER FOR Globex, Waybill No.msg",
        ]
    );
}

#[tokio::test]
async fn test_missing_required_column_fails_first_row() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("template.html"), "Dear [NAME]").unwrap();
    write_workbook(
        &dir.path().join("brokers.xlsx"),
        &[
            &["NAME", "COMPANY_NAME", "EMAIL_CC"],
            &["Alice", "Acme", ""],
            &["Bob", "Globex", ""],
        ],
    );
    let request = MergeRequest::new(
        dir.path().join("template.html"),
        dir.path().join("brokers.xlsx"),
        dir.path().join("drafts"),
    );
    let store = Arc::new(RecordingStore::new());

    let handle = BatchController::new(request, store.clone(), BatchOptions::default()).start();
    let progress = handle.progress();
    let err = handle.outcome().await.unwrap_err();

    match err {
        MergeError::RowMissingRequiredField { row, field } => {
            assert_eq!(row, 1);
            assert_eq!(field, "EMAIL_TO");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(store.saved().is_empty());
    assert_eq!(progress.borrow().state, BatchState::Failed);
    assert_eq!(progress.borrow().percent, 0);
}

#[tokio::test]
async fn test_failure_keeps_earlier_drafts() {
    let fixture = Fixture::new(
        "Dear [NAME]",
        &[
            &["Alice", "Acme", "a@x.com", ""],
            &["Bob", "Globex", "b@x.com", ""],
            &["Carol", "Initech", "c@x.com", ""],
        ],
    );
    let store = Arc::new(RecordingStore::failing_on(2));

    let handle = BatchController::new(fixture.request(), store.clone(), BatchOptions::default())
        .start();
    let progress = handle.progress();
    let err = handle.outcome().await.unwrap_err();

    assert!(matches!(err, MergeError::DraftPersistError { .. }));
    assert_eq!(
        fixture.files(),
        ["BROKER TURN OVER FOR Acme, Waybill No.msg"]
    );

    let snapshot = *progress.borrow();
    assert_eq!(snapshot.state, BatchState::Failed);
    assert_eq!(snapshot.rows_written, 1);
    assert_eq!(snapshot.percent, 33);
}

#[tokio::test]
async fn test_progress_is_monotonic_and_reaches_100() {
    let rows: Vec<Vec<String>> = (0..7)
        .map(|i| {
            vec![
                format!("Person {i}"),
                format!("Company {i}"),
                format!("p{i}@x.com"),
                String::new(),
            ]
        })
        .collect();
    let row_refs: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(String::as_str).collect())
        .collect();
    let row_slices: Vec<&[&str]> = row_refs.iter().map(Vec::as_slice).collect();
    let fixture = Fixture::new("Dear [NAME]", &row_slices);

    let handle = BatchController::new(
        fixture.request(),
        Arc::new(RecordingStore::new()),
        BatchOptions::default(),
    )
    .start();

    let mut progress = handle.progress();
    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while progress.changed().await.is_ok() {
            seen.push(*progress.borrow_and_update());
        }
        seen.push(*progress.borrow());
        seen
    });

    let summary = handle.outcome().await.unwrap();
    let seen = observer.await.unwrap();

    assert_eq!(summary.drafts_written, 7);
    assert!(seen.windows(2).all(|w| w[0].percent <= w[1].percent));
    for snapshot in &seen {
        if snapshot.rows_written > 0 {
            let expected = ((200 * snapshot.rows_written + 7) / 14) as u8;
            assert!(snapshot.percent >= expected);
        }
    }

    let last = seen.last().unwrap();
    assert_eq!(last.state, BatchState::Completed);
    assert_eq!(last.percent, 100);
    assert_eq!(last.rows_written, 7);
}

#[tokio::test]
async fn test_empty_dataset_completes_without_drafts() {
    let fixture = Fixture::new("Dear [NAME]", &[]);
    let store = Arc::new(RecordingStore::new());

    let handle = BatchController::new(fixture.request(), store.clone(), BatchOptions::default())
        .start();
    let progress = handle.progress();
    let summary = handle.outcome().await.unwrap();

    assert_eq!(summary.total_rows, 0);
    assert_eq!(summary.drafts_written, 0);
    assert!(store.saved().is_empty());
    assert!(fixture.destination().is_dir());

    let snapshot = *progress.borrow();
    assert_eq!(snapshot.state, BatchState::Completed);
    assert_eq!(snapshot.percent, 0);
}

#[tokio::test]
async fn test_same_subject_overwrites_earlier_draft() {
    let fixture = Fixture::new(
        "Dear [NAME]",
        &[
            &["Alice", "Acme", "a@x.com", ""],
            &["Bob", "Acme", "b@x.com", ""],
        ],
    );

    let summary = BatchController::new(
        fixture.request(),
        Arc::new(RecordingStore::new()),
        BatchOptions::default(),
    )
    .start()
    .outcome()
    .await
    .unwrap();

    assert_eq!(summary.drafts_written, 2);
    assert_eq!(summary.duplicate_subjects, 1);
    assert_eq!(fixture.files().len(), 1);

    let body = std::fs::read_to_string(
        fixture
            .destination()
            .join("BROKER TURN OVER FOR Acme, Waybill No.msg"),
    )
    .unwrap();
    assert_eq!(body, "Dear Bob");
}

#[tokio::test]
async fn test_rich_message_template_through_store() {
    let fixture = Fixture::new("unused", &[&["Alice", "Acme", "a@x.com", ""]]);
    let template = fixture.dir.path().join("template.msg");
    std::fs::write(&template, "stored message").unwrap();

    let mut request = fixture.request();
    request.template_path = template;
    let store = Arc::new(RecordingStore::with_template_body("<b>Hi [NAME]</b>"));

    BatchController::new(request, store.clone(), BatchOptions::default())
        .start()
        .outcome()
        .await
        .unwrap();

    assert_eq!(store.saved()[0].1.body(), "<b>Hi Alice</b>");
}

#[tokio::test]
async fn test_mime_store_end_to_end() {
    let fixture = Fixture::new(
        "<p>Dear [NAME]</p>",
        &[&["Alice", "Acme", "a@x.com", "c@x.com"]],
    );
    let store = Arc::new(MimeMessageStore::new(Some("ops@example.com".to_string())));

    let summary = BatchController::new(fixture.request(), store.clone(), BatchOptions::default())
        .start()
        .outcome()
        .await
        .unwrap();

    let draft_path = &summary.written_paths[0];
    let body = store.read_html_body(draft_path).await.unwrap();
    assert_eq!(body.trim(), "<p>Dear Alice</p>");

    let raw = std::fs::read_to_string(draft_path).unwrap();
    assert!(raw.contains("Subject: BROKER TURN OVER FOR Acme, Waybil"));
    assert!(!raw.contains("Waybill No"));
}

#[tokio::test]
async fn test_named_sheet_not_found() {
    let fixture = Fixture::new("Dear [NAME]", &[&["Alice", "Acme", "a@x.com", ""]]);
    let request = fixture.request().with_sheet("Brokers");

    let err = BatchController::new(
        request,
        Arc::new(RecordingStore::new()),
        BatchOptions::default(),
    )
    .start()
    .outcome()
    .await
    .unwrap_err();

    assert!(matches!(err, MergeError::DatasetFormatError(_)));
}
