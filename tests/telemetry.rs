use hrm_leave::config::Config;
use hrm_leave::telemetry;

#[test]
fn init_writes_to_log_dir_and_refuses_second_install() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().to_string_lossy().into_owned();
    let config = Config::from_lookup(|key| match key {
        "LOG_DIR" => Some(log_dir.clone()),
        "LOG_LEVEL" => Some("debug".to_string()),
        _ => None,
    })
    .unwrap();

    let guard = telemetry::init(&config).unwrap();
    tracing::info!("telemetry smoke test");
    drop(guard);

    let written = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("app.log"));
    assert!(written);

    assert!(telemetry::init(&config).is_err());
}
