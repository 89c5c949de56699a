use crate::{ErrorHandler, ErrorSink};

#[test]
fn test_report_written_to_formatter() {
    let sink = ErrorSink::from_error("initialization failed".into());
    let output = format!("{sink:?}");
    assert!(output.contains("initialization failed"));
}

#[test]
fn test_log_now_without_logging_handler() {
    let sink = ErrorSink::from_error("config missing".into()).log_now();
    assert!(!sink.logged);
    assert!(format!("{sink:?}").contains("config missing"));
}

#[test]
fn test_builder_flags() {
    let handler = ErrorHandler::default()
        .with_log(true)
        .with_write_to_stderr(false);
    assert!(handler.log);
    assert!(!handler.write_to_stderr);

    let handler = ErrorHandler::default();
    assert!(!handler.log);
    assert!(handler.write_to_stderr);
}
