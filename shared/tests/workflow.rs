use imgsearch_shared::response::{parse_search_response, parse_upload_response};
use imgsearch_shared::{
    ApiError, ClientConfig, QueryError, QueryMode, QuerySpec, QueryState, SearchRequest,
    SearchSession, SourceFile, UploadError, UploadState,
};

type Sink = Vec<(String, u32)>;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn png(size: usize) -> SourceFile {
    SourceFile::from_bytes("cat.png", "image/png", vec![0x89; size])
}

/// Uploads a small png and answers with `path`.
fn ready_session(path: &str, sink: &mut Sink) -> SearchSession {
    let mut session = SearchSession::new(&ClientConfig::default());
    let pending = session.submit_file(png(100), sink).unwrap();
    let body = format!(r#"{{"path":"{path}"}}"#);
    assert!(session.finish_upload(pending.ticket, parse_upload_response(200, &body), sink));
    session
}

#[test]
fn bmp_too_large_fires_two_notifications_and_stays_idle() {
    init_logging();
    let mut session = SearchSession::new(&ClientConfig::default());
    let mut sink = Sink::new();

    let result = session.submit_file(
        SourceFile::from_bytes("scan.bmp", "image/bmp", vec![0; 200_000]),
        &mut sink,
    );

    assert!(matches!(result, Err(UploadError::Rejected(_))));
    assert_eq!(sink.len(), 2);
    assert!(sink[0].0.contains("image/bmp"));
    assert!(sink[1].0.contains("scan.bmp"));
    assert_eq!(session.upload().state(), &UploadState::Idle);
}

#[test]
fn small_png_issues_upload_request() {
    init_logging();
    let mut session = SearchSession::new(&ClientConfig::default());
    let mut sink = Sink::new();

    let pending = session.submit_file(png(100), &mut sink).unwrap();

    assert_eq!(pending.file.mime_type, "image/png");
    assert_eq!(pending.file.size_bytes, 100);
    assert!(session.upload().is_uploading());
    assert!(sink.is_empty());
}

#[test]
fn full_knn_round_trip() {
    init_logging();
    let mut sink = Sink::new();
    let mut session = ready_session("/img/42.png", &mut sink);
    assert_eq!(session.source_image().unwrap().path, "/img/42.png");

    session.query_mut().update_mode(QueryMode::Knn).unwrap();
    session.query_mut().update_parameter(5.0).unwrap();
    let pending = session.submit_query(&mut sink).unwrap();

    assert_eq!(pending.endpoint(), "/knn");
    assert_eq!(
        pending.request,
        SearchRequest {
            query: "5".into(),
            image: "/img/42.png".into()
        }
    );

    let body = r#"[{"imageInfo":{"path":"/r1.png"}},{"imageInfo":{"path":"/r2.png"}}]"#;
    let outcome = parse_search_response(200, body);
    assert!(session.finish_query(pending.ticket, outcome, &mut sink));

    let paths: Vec<_> = session
        .query()
        .results()
        .unwrap()
        .iter()
        .map(|d| d.path.clone())
        .collect();
    assert_eq!(paths, ["/r1.png", "/r2.png"]);
    assert!(sink.is_empty());
}

#[test]
fn remove_resets_both_machines() {
    init_logging();
    let mut sink = Sink::new();
    let mut session = ready_session("/img/42.png", &mut sink);
    session.query_mut().update_mode(QueryMode::RangeSearch).unwrap();
    session.query_mut().update_parameter(7.5).unwrap();
    let pending = session.submit_query(&mut sink).unwrap();
    session.finish_query(pending.ticket, Ok(vec![]), &mut sink);

    session.remove_image();

    assert_eq!(session.upload().state(), &UploadState::Idle);
    assert_eq!(
        session.query().state(),
        &QueryState::Composing(QuerySpec {
            mode: QueryMode::Knn,
            parameter: 0.0
        })
    );
}

#[test]
fn upload_error_body_message_reaches_the_sink() {
    init_logging();
    let mut session = SearchSession::new(&ClientConfig::default());
    let mut sink = Sink::new();
    let pending = session.submit_file(png(10), &mut sink).unwrap();

    let outcome = parse_upload_response(400, r#"{"message":"could not store image"}"#);
    session.finish_upload(pending.ticket, outcome, &mut sink);

    assert_eq!(sink, vec![("could not store image".to_string(), 2000)]);
    assert_eq!(session.upload().state(), &UploadState::Idle);
}

#[test]
fn unparsable_upload_error_still_notifies() {
    init_logging();
    let mut session = SearchSession::new(&ClientConfig::default());
    let mut sink = Sink::new();
    let pending = session.submit_file(png(10), &mut sink).unwrap();

    session.finish_upload(pending.ticket, parse_upload_response(502, "Bad Gateway"), &mut sink);

    assert_eq!(sink, vec![("Oops, something went wrong".to_string(), 2000)]);
    assert_eq!(session.upload().state(), &UploadState::Idle);
}

#[test]
fn query_without_source_image_is_refused() {
    let mut session = SearchSession::new(&ClientConfig::default());
    let mut sink = Sink::new();
    assert_eq!(
        session.submit_query(&mut sink).unwrap_err(),
        QueryError::NoSourceImage
    );
}

#[test]
fn timed_out_search_keeps_the_form() {
    init_logging();
    let mut sink = Sink::new();
    let mut session = ready_session("/img/1.png", &mut sink);
    session.query_mut().update_parameter(3.0).unwrap();
    let pending = session.submit_query(&mut sink).unwrap();

    session.finish_query(pending.ticket, Err(ApiError::Timeout(30_000)), &mut sink);
    // the real response shows up afterwards and must not resurrect the search
    let late = session.finish_query(pending.ticket, Ok(vec![]), &mut sink);

    assert!(!late);
    assert_eq!(session.query().draft().map(|s| s.parameter), Some(3.0));
    assert_eq!(sink.len(), 1);
}

#[test]
fn broken_result_image_resets_the_workflow() {
    init_logging();
    let mut sink = Sink::new();
    let mut session = ready_session("/img/1.png", &mut sink);
    let pending = session.submit_query(&mut sink).unwrap();
    session.finish_query(
        pending.ticket,
        parse_search_response(200, r#"[{"imageInfo":{"path":"/gone.png"}}]"#),
        &mut sink,
    );

    assert!(session.image_load_failed(&mut sink));

    assert_eq!(sink, vec![("Oops, something went wrong".to_string(), 2000)]);
    assert!(session.source_image().is_none());
    assert!(session.query().results().is_none());
}

#[test]
fn several_broken_results_notify_once() {
    init_logging();
    let mut sink = Sink::new();
    let mut session = ready_session("/img/1.png", &mut sink);
    let pending = session.submit_query(&mut sink).unwrap();
    session.finish_query(
        pending.ticket,
        parse_search_response(
            200,
            r#"[{"imageInfo":{"path":"/gone-1.png"}},{"imageInfo":{"path":"/gone-2.png"}},{"imageInfo":{"path":"/gone-3.png"}}]"#,
        ),
        &mut sink,
    );

    let handled: Vec<bool> = (0..3).map(|_| session.image_load_failed(&mut sink)).collect();

    assert_eq!(handled, vec![true, false, false]);
    assert_eq!(sink.len(), 1);
    assert_eq!(session.upload().state(), &UploadState::Idle);
}

#[test]
fn configured_policy_and_duration_are_used() {
    let config = ClientConfig::from_yaml_str(
        "notification_ms: 500\nupload:\n  max_size_bytes: 50\n",
    )
    .unwrap();
    let mut session = SearchSession::new(&config);
    let mut sink = Sink::new();

    assert!(session.submit_file(png(51), &mut sink).is_err());
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].1, 500);
}
