// slipclean-core/tests/headless_logging_tests.rs
use slipclean_core::{default_engine, sanitize_and_validate, SanitizationEngine};
use test_log::test;

#[test]
fn test_default_engine_logs_and_sanitizes() {
    log::info!("Running sanitize through the shared default engine.");
    assert_eq!(default_engine().sanitize("<b>x</b><i>y"), "<b>x</b>&lt;i&gt;y");
    assert_eq!(sanitize_and_validate("<em>ok</em>"), Ok("<em>ok</em>".to_string()));
}
