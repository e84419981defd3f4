use nlu_wait::kernel::config::DEFAULT_SENSOR_KEY;
use nlu_wait::kernel::error::ConfigError;
use nlu_wait::kernel::intent::MatchingPolicy;
use nlu_wait::{ExitStatus, TaskOptions, WaitConfig};

#[test]
fn test_defaults_with_intents() {
    let options = TaskOptions::new().with("intents", "greet;bye");
    let config = WaitConfig::from_options(&options).unwrap();

    assert_eq!(
        config.policy,
        MatchingPolicy::IntentSet(vec!["greet".into(), "bye".into()])
    );
    assert_eq!(config.timeout_ms, -1);
    assert!(!config.has_timeout());
    assert!(!config.set_language);
    assert_eq!(config.sensor_key, DEFAULT_SENSOR_KEY);
}

#[test]
fn test_blank_entries_are_skipped() {
    let options = TaskOptions::new().with("intents", ";greet;; ;bye ;");
    let config = WaitConfig::from_options(&options).unwrap();
    assert_eq!(
        config.policy,
        MatchingPolicy::IntentSet(vec!["greet".into(), "bye".into()])
    );
}

#[test]
fn test_only_blank_entries_is_an_error() {
    let options = TaskOptions::new().with("intents", " ; ;");
    assert_eq!(
        WaitConfig::from_options(&options),
        Err(ConfigError::EmptyIntentList("intents"))
    );
}

#[test]
fn test_duplicate_intent_is_an_error() {
    let options = TaskOptions::new().with("intents", "greet;bye;greet");
    assert_eq!(
        WaitConfig::from_options(&options),
        Err(ConfigError::DuplicateIntent("greet".into()))
    );
}

#[test]
fn test_any_and_intents_are_exclusive() {
    let options = TaskOptions::new().with("any", "true").with("intents", "greet");
    assert!(matches!(
        WaitConfig::from_options(&options),
        Err(ConfigError::MutuallyExclusive { .. })
    ));
}

#[test]
fn test_any_false_still_requires_intents() {
    let options = TaskOptions::new().with("any", "false");
    assert_eq!(
        WaitConfig::from_options(&options),
        Err(ConfigError::MissingOption("intents"))
    );
    assert_eq!(
        WaitConfig::from_options(&TaskOptions::new()),
        Err(ConfigError::MissingOption("intents"))
    );
}

#[test]
fn test_wildcard_exits() {
    let options = TaskOptions::new().with("any", "TRUE");
    let config = WaitConfig::from_options(&options).unwrap();
    assert_eq!(config.policy, MatchingPolicy::Wildcard);
    assert_eq!(
        config.declared_exits(),
        vec![ExitStatus::Success(None), ExitStatus::Fatal]
    );
}

#[test]
fn test_timeout_exit_only_when_positive() {
    let with_timeout = TaskOptions::new().with("intents", "greet").with("timeout", "100");
    let config = WaitConfig::from_options(&with_timeout).unwrap();
    let names: Vec<String> = config.declared_exits().iter().map(|e| e.to_string()).collect();
    assert_eq!(names, vec!["success.greet", "error.timeout", "fatal"]);

    let zero = TaskOptions::new().with("intents", "greet").with("timeout", "0");
    let config = WaitConfig::from_options(&zero).unwrap();
    assert!(!config.declared_exits().contains(&ExitStatus::ErrorTimeout));
}

#[test]
fn test_invalid_values_are_rejected() {
    let bad_bool = TaskOptions::new().with("any", "yes");
    assert!(matches!(
        WaitConfig::from_options(&bad_bool),
        Err(ConfigError::InvalidValue { .. })
    ));

    let bad_timeout = TaskOptions::new().with("intents", "greet").with("timeout", "soon");
    assert!(matches!(
        WaitConfig::from_options(&bad_timeout),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_unknown_option_is_rejected() {
    let options = TaskOptions::new().with("intents", "greet").with("timout", "100");
    assert_eq!(
        WaitConfig::from_options(&options),
        Err(ConfigError::UnknownOption("timout".into()))
    );
}

#[test]
fn test_options_from_pairs() {
    let options =
        TaskOptions::from_pairs(["intents=greet;bye", "timeout=250", "sensor_key=Mic"]).unwrap();
    let config = WaitConfig::from_options(&options).unwrap();
    assert_eq!(config.timeout_ms, 250);
    assert_eq!(config.sensor_key, "Mic");

    assert!(matches!(
        TaskOptions::from_pairs(["intents"]),
        Err(ConfigError::Malformed(_))
    ));
}

#[test]
fn test_options_from_json() {
    let options =
        TaskOptions::from_json(r#"{"any": true, "timeout": 1500, "set_language": "true"}"#).unwrap();
    let config = WaitConfig::from_options(&options).unwrap();
    assert_eq!(config.policy, MatchingPolicy::Wildcard);
    assert_eq!(config.timeout_ms, 1500);
    assert!(config.set_language);

    assert!(TaskOptions::from_json(r#"{"intents": ["greet"]}"#).is_err());
    assert!(TaskOptions::from_json("not json").is_err());
}
