mod common;
use common::*;

use serial_test::serial;
use interpreter::environment::{clear_scope_log, get_scope_log, is_scope_logging_enabled};

#[cfg(test)]
mod scope_log_tests {
    use super::*;

    #[test]
    fn test_scope_logging_status() {
        #[cfg(feature = "debug-logging")]
        assert!(is_scope_logging_enabled(), "Logging should be enabled with the debug-logging feature");

        #[cfg(not(feature = "debug-logging"))]
        assert!(!is_scope_logging_enabled(), "Logging should be disabled without the debug-logging feature");
    }

    #[test]
    #[serial]
    #[cfg(feature = "debug-logging")]
    fn test_block_entry_and_eviction_are_logged() {
        clear_scope_log();
        test_program("var x = 1\nif x == 1 {\nvar y = 2\nvar a = 3\n}").unwrap();
        assert_eq!(
            get_scope_log(),
            vec![
                "Entering block level 1".to_string(),
                "Evicting a at block level 1".to_string(),
                "Evicting y at block level 1".to_string(),
            ]
        );
    }

    #[test]
    #[serial]
    #[cfg(feature = "debug-logging")]
    fn test_nested_levels_are_logged() {
        clear_scope_log();
        test_program("var i = 0\nwhile i < 2 {\ni = i + 1\nif i == 2 {\nvar deep = i\n}\n}").unwrap();
        let log = get_scope_log();

        let entries = log.iter().filter(|l| l.starts_with("Entering")).count();
        assert_eq!(entries, 3);
        assert!(log.contains(&"Entering block level 2".to_string()));
        assert!(log.contains(&"Evicting deep at block level 2".to_string()));
    }

    #[test]
    #[serial]
    #[cfg(not(feature = "debug-logging"))]
    fn test_long_loop_records_nothing_without_feature() {
        clear_scope_log();
        let run = test_program("var i = 0\nwhile i < 5000 {\nvar t = i\ni = i + 1\n}").unwrap();
        assert_int(&run, "i", 5000);
        assert!(get_scope_log().is_empty());
    }

    #[test]
    #[serial]
    fn test_clear_scope_log() {
        test_program("var x = 1\nif x == 1 {\n}").unwrap();
        clear_scope_log();
        assert!(get_scope_log().is_empty());
    }
}
