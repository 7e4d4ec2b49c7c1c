use std::env;
use std::sync::{Mutex, OnceLock};

use cartwise_cli::commands::{catalog, config, demo};
use serde_json::Value;

#[test]
fn demo_runs_a_scripted_session_locally() {
    with_env(&[], || {
        let result = demo::run(false, None);
        assert_eq!(result.exit_code, 0, "expected scripted session to succeed");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "demo");
        assert_eq!(payload["status"], "ok");

        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("scan 1: pasta-penne"));
        assert!(message.contains("nudge ["), "at least one nudge should be served");
        assert!(message.contains("served "));
    });
}

#[test]
fn demo_is_deterministic_apart_from_candidate_ids() {
    with_env(&[], || {
        let first = parse_payload(&demo::run(false, None).output);
        let second = parse_payload(&demo::run(false, None).output);
        assert_eq!(first["message"], second["message"]);
    });
}

#[test]
fn demo_refuses_rerank_when_reranker_disabled() {
    with_env(&[], || {
        let result = demo::run(true, None);
        assert_eq!(result.exit_code, 2, "expected refusal exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "demo");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "reranker_disabled");
    });
}

#[test]
fn demo_surfaces_bad_env_overrides_as_config_failures() {
    with_env(&[("CARTWISE_SCAN_SPACING", "not-a-number")], || {
        let result = demo::run(false, None);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn catalog_lists_seeded_products_and_missions() {
    let output = catalog::run();
    assert!(output.contains("pasta-500g"));
    assert!(output.contains("multibuy mezze-2-for-3"));
    assert!(output.contains("missions:"));
    assert!(output.contains("pasta_night"));
}

#[test]
fn config_reports_defaults_without_overrides() {
    with_env(&[], || {
        let output = config::run(None);
        assert!(output.contains("- throttle.scan_spacing = 3 (source: default)"));
        assert!(output.contains("- reranker.enabled = false (source: default)"));
        assert!(output.contains("- reranker.api_key = <unset> (source: default)"));
    });
}

#[test]
fn config_attributes_env_overrides_and_redacts_the_api_key() {
    with_env(
        &[("CARTWISE_SCAN_SPACING", "4"), ("CARTWISE_RERANKER_API_KEY", "sk-demo-key")],
        || {
            let output = config::run(None);
            assert!(output
                .contains("- throttle.scan_spacing = 4 (source: env (CARTWISE_SCAN_SPACING))"));
            assert!(output.contains(
                "- reranker.api_key = <redacted> (source: env (CARTWISE_RERANKER_API_KEY))"
            ));
            assert!(!output.contains("sk-demo-key"), "secret values must never be printed");
        },
    );
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "CARTWISE_RERANKER_ENDPOINT",
        "CARTWISE_RERANKER_API_KEY",
        "CARTWISE_RERANKER_ENABLED",
        "CARTWISE_SCAN_SPACING",
        "CARTWISE_LOG",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
