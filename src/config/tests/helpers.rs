//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::StashConfig;

/// Merges `(source, value)` layers into a [`StashConfig`], lowest
/// precedence first. Sources are `defaults`, `file`, `environment` and `cli`.
pub fn merge_layers(layers: &[(&str, Value)]) -> StashConfig {
    let mut composer = MergeComposer::new();

    for (source, value) in layers.iter().cloned() {
        match source {
            "defaults" => composer.push_defaults(value),
            "file" => composer.push_file(value, None),
            "environment" => composer.push_environment(value),
            "cli" => composer.push_cli(value),
            other => panic!("unknown configuration source: {other}"),
        }
    }

    StashConfig::merge_from_layers(composer.layers()).expect("layers should merge")
}
