//! The process-wide logger is shared by every test in this binary, so the
//! whole lifecycle is exercised from a single test in order.

use std::fs;

use noticelog::{fields, Level, LogError, Options};

#[test]
fn test_global_logger_lifecycle() {
    // Nothing installed yet
    assert!(matches!(noticelog::try_logger(), Err(LogError::NotInitialized)));
    assert!(!noticelog::is_initialized());
    let panicked = std::panic::catch_unwind(|| noticelog::info("too early", &[]));
    assert!(panicked.is_err());

    let dir = tempfile::tempdir().unwrap();
    let first = Options::new("t1")
        .with_log_dir(dir.path())
        .with_level(Level::Debug);
    noticelog::init(first.clone()).unwrap();
    assert!(first.log_path().exists());

    noticelog::info("hello", fields!["k" => "v"]);
    noticelog::debug("debug message", &[]);
    noticelog::warn("warn message", &[]);
    noticelog::error("error message", &[]);
    noticelog::infof!("infof {}", "x");
    noticelog::errorf!("errorf {:.2}", 3.14159);

    noticelog::push_notice("a", 1);
    noticelog::push_notice("b", "two");
    noticelog::flush();
    noticelog::flush();

    let content = fs::read_to_string(first.log_path()).unwrap();
    assert!(content.contains("level=INFO msg=hello k=v"));
    assert!(content.contains(r#"level=DEBUG msg="debug message""#));
    assert!(content.contains(r#"level=WARN msg="warn message""#));
    assert!(content.contains(r#"level=ERROR msg="error message""#));
    assert!(content.contains(r#"msg="infof x""#));
    assert!(content.contains(r#"msg="errorf 3.14""#));
    assert!(content.contains("level=NOTICE msg=NoticeKV a=1 b=two"));
    assert_eq!(content.matches("NoticeKV").count(), 1);

    // Re-initializing swaps the handle and starts a fresh notice queue
    noticelog::push_notice("stale", true);
    let second = Options::new("t2")
        .with_log_dir(dir.path())
        .with_level(Level::Warn);
    noticelog::init(second.clone()).unwrap();
    assert!(noticelog::try_logger().unwrap().pending_notices().is_empty());

    noticelog::info("filtered out", &[]);
    noticelog::warn("kept", &[]);
    noticelog::flush();

    let content = fs::read_to_string(second.log_path()).unwrap();
    assert!(!content.contains("filtered out"));
    assert!(content.contains("msg=kept"));
    assert!(!content.contains("stale"));

    // Setup failures are returned instead of aborting
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let err = noticelog::init(Options::new("t3").with_log_dir(blocker.join("logs"))).unwrap_err();
    assert!(matches!(err, LogError::CreateDir { .. }));

    // The previous logger stays installed after a failed init
    noticelog::warn("still here", &[]);
    let content = fs::read_to_string(second.log_path()).unwrap();
    assert!(content.contains(r#"msg="still here""#));
}
