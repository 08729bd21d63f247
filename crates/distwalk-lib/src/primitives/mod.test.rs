use super::*;

// =============================================================================
// VALUE ENUM PARSING
// =============================================================================

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant.to_possible_value();
                assert!(
                    possible_value.is_some(),
                    "PossibleValue should exist for all variants"
                );

                let possible_val = possible_value.unwrap();
                let primary_name = possible_val.get_name();
                let parsed: Result<$enum_type, _> = primary_name.parse();
                assert_eq!(
                    parsed.unwrap(),
                    *variant,
                    "Primary name '{}' should round-trip",
                    primary_name
                );
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert!(
                    parsed.is_ok(),
                    "Failed to parse '{}' for {}",
                    input,
                    stringify!($enum_type)
                );
                assert_eq!(
                    parsed.unwrap(),
                    *expected,
                    "Wrong variant for input '{}', expected {:?}",
                    input,
                    expected
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);
test_enum_completeness!(OutputFormat, test_output_format_completeness);
test_enum_completeness!(DependencyKind, test_dependency_kind_completeness);

test_fromstr_aliases!(
    LogLevel,
    test_log_level_aliases,
    [
        ("error", LogLevel::Error),
        ("err", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warn", LogLevel::Warning),
        ("warning", LogLevel::Warning),
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("trace", LogLevel::Trace),
        ("verbose", LogLevel::Trace),
    ]
);

test_fromstr_aliases!(
    LogFormat,
    test_log_format_aliases,
    [
        ("text", LogFormat::Text),
        ("txt", LogFormat::Text),
        ("plain", LogFormat::Text),
        ("json", LogFormat::Json),
        ("yaml", LogFormat::Yaml),
        ("pretty", LogFormat::Yaml),
    ]
);

test_fromstr_aliases!(
    ColorIntent,
    test_color_intent_aliases,
    [
        ("auto", ColorIntent::Auto),
        ("always", ColorIntent::Always),
        ("force", ColorIntent::Always),
        ("never", ColorIntent::Never),
        ("none", ColorIntent::Never),
    ]
);

test_fromstr_aliases!(
    DependencyKind,
    test_dependency_kind_aliases,
    [
        ("buildtool", DependencyKind::Buildtool),
        ("buildtool_depend", DependencyKind::Buildtool),
        ("build", DependencyKind::Build),
        ("BUILD", DependencyKind::Build),
        (" build_depend ", DependencyKind::Build),
        ("run", DependencyKind::Run),
        ("exec", DependencyKind::Run),
        ("run_depend", DependencyKind::Run),
        ("test", DependencyKind::Test),
        ("test_depend", DependencyKind::Test),
    ]
);

#[test]
fn test_unknown_dependency_kind_is_rejected() {
    let err = "doc".parse::<DependencyKind>().unwrap_err();
    match &err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "doc");
            assert!(reason.contains("dependency kind"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("'doc'"));
}

#[test]
fn test_dependency_kind_display_matches_primary_name() {
    for kind in DependencyKind::ALL {
        let name = kind.to_possible_value().unwrap();
        assert_eq!(kind.to_string(), name.get_name());
    }
}

#[test]
fn test_dependency_kind_serde_is_lowercase() {
    let json = serde_json::to_string(&DependencyKind::Buildtool).unwrap();
    assert_eq!(json, "\"buildtool\"");
    let back: DependencyKind = serde_json::from_str("\"test\"").unwrap();
    assert_eq!(back, DependencyKind::Test);
}

// =============================================================================
// LOG LEVEL BEHAVIOR
// =============================================================================

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_level_should_log_matrix() {
    let levels = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    for (i, message_level) in levels.iter().enumerate() {
        for (j, current_level) in levels.iter().enumerate() {
            assert_eq!(
                message_level.should_log(*current_level),
                i <= j,
                "message_level: {:?}, current_level: {:?}",
                message_level,
                current_level
            );
        }
    }
}

#[test]
fn test_filter_directives() {
    assert_eq!(LogLevel::Warning.as_filter_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_filter_directive(), "trace");
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::ValidationFailed {
        reason: "no release snapshot given".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Configuration validation failed: no release snapshot given"
    );

    let error = ConfigError::SnapshotNotFound {
        path: "/missing/release.yaml".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Release snapshot not found: /missing/release.yaml"
    );
}
