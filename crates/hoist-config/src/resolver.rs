//! Precedence resolution for effective configuration values.
//!
//! One setting can be supplied from four competing sources. [`resolve`]
//! consults them in strict order, highest first:
//!
//! 1. an explicit command-line option matching `option_name`;
//! 2. the per-application override at `dotted_path` under
//!    `projects.<app_name>`;
//! 3. the global document value at the same `dotted_path`;
//! 4. the caller-supplied default ([`resolve_or`] only).
//!
//! Resolution is pure given its inputs and never fails: absence at every
//! level falls through, an unknown application name behaves exactly like
//! "no override", and a value that does not convert to the requested type
//! falls through to the next source. An explicitly supplied empty string is
//! present, not absent; only a genuinely unset option is skipped.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::Configuration;
use crate::input::Input;

/// Resolve the effective value for one setting, or `None` when no source
/// supplies it.
pub fn resolve<T: DeserializeOwned>(
    configuration: &Configuration,
    dotted_path: &str,
    app_name: &str,
    option_name: &str,
    options: &[Input],
) -> Option<T> {
    let candidates = [
        Input::lookup(options, option_name).and_then(|value| value.to_json()),
        configuration.override_for(app_name, dotted_path).cloned(),
        configuration.global(dotted_path).cloned(),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|value| convert(value))
}

/// [`resolve`] with a caller-supplied fallback default.
pub fn resolve_or<T: DeserializeOwned>(
    configuration: &Configuration,
    dotted_path: &str,
    app_name: &str,
    option_name: &str,
    options: &[Input],
    default: T,
) -> T {
    resolve(configuration, dotted_path, app_name, option_name, options).unwrap_or(default)
}

fn convert<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::OptionValue;
    use serde_json::json;

    fn fixture() -> Configuration {
        Configuration::from_value(json!({
            "compilerOptions": {
                "tsConfigPath": "tsconfig.global.json",
                "webpack": false
            },
            "projects": {
                "api": {
                    "compilerOptions": {
                        "tsConfigPath": "apps/api/tsconfig.json",
                        "webpack": true
                    }
                },
                "worker": {}
            }
        }))
        .unwrap()
    }

    #[test]
    fn explicit_option_wins_over_everything() {
        let config = fixture();
        let options = vec![Input::new("path", "custom/tsconfig.json")];
        let resolved: Option<String> = resolve(
            &config,
            "compilerOptions.tsConfigPath",
            "api",
            "path",
            &options,
        );
        assert_eq!(resolved.as_deref(), Some("custom/tsconfig.json"));
    }

    #[test]
    fn app_override_beats_global() {
        let config = fixture();
        let resolved: Option<String> =
            resolve(&config, "compilerOptions.tsConfigPath", "api", "path", &[]);
        assert_eq!(resolved.as_deref(), Some("apps/api/tsconfig.json"));
    }

    #[test]
    fn global_value_used_without_override() {
        let config = fixture();
        let resolved: Option<String> =
            resolve(&config, "compilerOptions.tsConfigPath", "worker", "path", &[]);
        assert_eq!(resolved.as_deref(), Some("tsconfig.global.json"));
    }

    #[test]
    fn unknown_app_behaves_like_no_override() {
        let config = fixture();
        let resolved: Option<bool> =
            resolve(&config, "compilerOptions.webpack", "gateway", "webpack", &[]);
        assert_eq!(resolved, Some(false));
    }

    #[test]
    fn fallback_default_returned_unchanged() {
        let config = fixture();
        let resolved: String = resolve_or(
            &config,
            "compilerOptions.webpackConfigPath",
            "api",
            "webpackPath",
            &[],
            "webpack.config.json".to_string(),
        );
        assert_eq!(resolved, "webpack.config.json");
    }

    #[test]
    fn unset_option_falls_through() {
        let config = fixture();
        let options = vec![Input::new("path", OptionValue::Unset)];
        let resolved: Option<String> = resolve(
            &config,
            "compilerOptions.tsConfigPath",
            "api",
            "path",
            &options,
        );
        assert_eq!(resolved.as_deref(), Some("apps/api/tsconfig.json"));
    }

    #[test]
    fn empty_string_option_short_circuits() {
        let config = fixture();
        let options = vec![Input::new("path", "")];
        let resolved: Option<String> = resolve(
            &config,
            "compilerOptions.tsConfigPath",
            "api",
            "path",
            &options,
        );
        assert_eq!(resolved.as_deref(), Some(""));
    }

    #[test]
    fn boolean_option_resolves_typed() {
        let config = fixture();
        let options = vec![Input::new("webpack", true)];
        let resolved: Option<bool> =
            resolve(&config, "compilerOptions.webpack", "worker", "webpack", &options);
        assert_eq!(resolved, Some(true));
    }

    #[test]
    fn mistyped_source_falls_through() {
        let config = Configuration::from_value(json!({
            "compilerOptions": { "webpack": "not-a-bool" }
        }))
        .unwrap();
        let resolved: bool =
            resolve_or(&config, "compilerOptions.webpack", "api", "webpack", &[], false);
        assert!(!resolved);
    }

    #[test]
    fn resolution_is_pure() {
        let config = fixture();
        let options = vec![Input::new("webpack", true)];
        let first: Option<bool> =
            resolve(&config, "compilerOptions.webpack", "api", "webpack", &options);
        let second: Option<bool> =
            resolve(&config, "compilerOptions.webpack", "api", "webpack", &options);
        assert_eq!(first, second);
    }
}
