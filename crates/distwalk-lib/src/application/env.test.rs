use super::*;

fn vars(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
    .unwrap()
}

#[test]
fn test_empty_environment_keeps_intent() {
    let env = vars(&[]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Always);
}

#[test]
fn test_no_color_environment_variable() {
    let env = vars(&[("NO_COLOR", "1")]);
    assert_eq!(env.no_color.as_deref(), Some("1"));
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env = vars(&[("NO_COLOR", "")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_force_color_environment_variable() {
    let env = vars(&[("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_force_color_overrides_no_color_and_clicolor() {
    let env = vars(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "true")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_ci_disables_color_unconditionally() {
    let env = vars(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Never);
}

#[test]
fn test_unknown_force_color_value_is_ignored() {
    let env = vars(&[("FORCE_COLOR", "sometimes")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}
