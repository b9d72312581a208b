// End-to-end scenarios for the standings table.
//
// These drive the real HTTP loader against a local listener serving canned
// responses, feed the results through the controller, and check what the
// recording target ends up showing.

use standings_core::config::TableConfig;
use standings_core::controller::{LoadOutcome, TableController};
use standings_core::loader::{FetchError, HttpTeamSource, TeamSource};
use standings_core::model::TeamRecord;
use standings_core::render::{RecordingTarget, NOT_AVAILABLE};
use standings_core::sort::Direction;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Serve each canned `(status_line, body)` pair to one connection, in order.
async fn serve(responses: Vec<(&'static str, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for (status_line, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
    });
    format!("http://{addr}/api/teams")
}

fn controller() -> TableController<RecordingTarget> {
    TableController::new(TableConfig::default(), RecordingTarget::default())
}

async fn load_into(
    ctl: &mut TableController<RecordingTarget>,
    source: &HttpTeamSource,
) -> LoadOutcome {
    let generation = ctl.begin_load().unwrap();
    let result = source.load().await;
    ctl.complete_load(generation, result).unwrap()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[tokio::test]
async fn wins_column_toggles_between_ascending_and_descending() {
    let url = serve(vec![(
        "200 OK",
        r#"[{"name":"A","wins":3,"losses":1},{"name":"B","wins":1,"losses":3}]"#,
    )])
    .await;
    let source = HttpTeamSource::new(url, None).unwrap();
    let mut ctl = controller();

    assert_eq!(load_into(&mut ctl, &source).await, LoadOutcome::Applied);
    assert_eq!(ctl.target().current_names(), vec!["A", "B"]);

    ctl.sort_by("wins").unwrap();
    assert_eq!(ctl.target().current_names(), vec!["B", "A"]);
    assert_eq!(ctl.sort_state().direction, Direction::Ascending);

    ctl.sort_by("wins").unwrap();
    assert_eq!(ctl.target().current_names(), vec!["A", "B"]);
    assert_eq!(ctl.sort_state().direction, Direction::Descending);

    assert_eq!(ctl.target().frames.len(), 3);
}

#[tokio::test]
async fn missing_strength_of_schedule_shows_na_and_sorts_last() {
    let url = serve(vec![(
        "200 OK",
        r#"[
            {"name":"NoSos","conference":"West","wins":2,"losses":2},
            {"name":"Hard","conference":"East","wins":1,"losses":3,"strength_of_schedule":0.7},
            {"name":"Easy","conference":"East","wins":3,"losses":1,"strength_of_schedule":0.3}
        ]"#,
    )])
    .await;
    let source = HttpTeamSource::new(url, None).unwrap();
    let mut ctl = controller();
    load_into(&mut ctl, &source).await;

    let rows = ctl.target().current_rows();
    assert_eq!(rows[0].name, "NoSos");
    assert_eq!(rows[0].strength_of_schedule, NOT_AVAILABLE);
    assert_eq!(rows[1].strength_of_schedule, "0.700");

    ctl.sort_by("strength_of_schedule").unwrap();
    assert_eq!(ctl.target().current_names(), vec!["Easy", "Hard", "NoSos"]);

    ctl.sort_by("strength_of_schedule").unwrap();
    assert_eq!(ctl.target().current_names(), vec!["Hard", "Easy", "NoSos"]);
}

#[tokio::test]
async fn server_error_leaves_previous_table_visible() {
    let url = serve(vec![
        (
            "200 OK",
            r#"[{"name":"A","wins":3,"losses":1},{"name":"B","wins":1,"losses":3}]"#,
        ),
        ("500 Internal Server Error", ""),
    ])
    .await;
    let source = HttpTeamSource::new(url, None).unwrap();
    let mut ctl = controller();

    assert_eq!(load_into(&mut ctl, &source).await, LoadOutcome::Applied);
    assert_eq!(ctl.target().current_rows().len(), 2);

    assert_eq!(load_into(&mut ctl, &source).await, LoadOutcome::Failed);
    assert_eq!(ctl.target().current_rows().len(), 2);
    assert_eq!(ctl.target().current_names(), vec!["A", "B"]);
    assert_eq!(ctl.target().frames.len(), 1);
    assert_eq!(ctl.diagnostics().count(), 1);
    assert_eq!(ctl.target().notices.len(), 1);
}

#[tokio::test]
async fn malformed_body_is_contained() {
    let url = serve(vec![("200 OK", "not json")]).await;
    let source = HttpTeamSource::new(url, None).unwrap();

    let err = source.load().await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed { .. }));

    let mut ctl = controller();
    let generation = ctl.begin_load().unwrap();
    assert_eq!(
        ctl.complete_load(generation, Err(err)).unwrap(),
        LoadOutcome::Failed
    );
    assert!(ctl.target().frames.is_empty());
}

#[tokio::test]
async fn record_sort_puts_unplayed_team_last() {
    let url = serve(vec![(
        "200 OK",
        r#"[
            {"name":"Fresh","wins":0,"losses":0},
            {"name":"Half","wins":2,"losses":2},
            {"name":"Best","wins":4,"losses":0}
        ]"#,
    )])
    .await;
    let source = HttpTeamSource::new(url, None).unwrap();
    let mut ctl = controller();
    load_into(&mut ctl, &source).await;

    ctl.sort_by("record").unwrap();
    assert_eq!(ctl.target().current_names(), vec!["Half", "Best", "Fresh"]);
    ctl.sort_by("record").unwrap();
    assert_eq!(ctl.target().current_names(), vec!["Best", "Half", "Fresh"]);

    let fresh = ctl.target().current_rows()[2].clone();
    assert_eq!(fresh.record, "0-0");
    assert_eq!(
        ctl.records().last(),
        Some(&TeamRecord::new("Fresh", 0, 0))
    );
}
