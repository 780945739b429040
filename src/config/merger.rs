//! Deep merge for layered YAML configuration.
//!
//! A project config (`gcr.yml`) can be overlaid by an uncommitted local file
//! (`gcr.local.yml`), typically to flip `dry_run` or point at a sandbox
//! project.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (a local `tags` list replaces the base one)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Deep merge two YAML values. `overlay` takes precedence.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple configs in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_scalar_wins() {
        let merged = deep_merge(&yaml("dry_run: false"), &yaml("dry_run: true"));
        assert_eq!(merged, yaml("dry_run: true"));
    }

    #[test]
    fn nested_sections_merge_recursively() {
        let base = yaml("auth:\n  method: service_account\n  key_file: /a.json");
        let overlay = yaml("auth:\n  key_file: /b.json");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(
            merged,
            yaml("auth:\n  method: service_account\n  key_file: /b.json")
        );
    }

    #[test]
    fn sequences_are_replaced() {
        let base = yaml("tags: [\"{{.Version}}\", latest]");
        let overlay = yaml("tags: [dev]");
        assert_eq!(deep_merge(&base, &overlay), yaml("tags: [dev]"));
    }

    #[test]
    fn null_deletes_key() {
        let base = yaml("project: prod\nimage: app");
        let overlay = yaml("project: null");
        assert_eq!(deep_merge(&base, &overlay), yaml("image: app"));
    }

    #[test]
    fn merge_configs_applies_in_order() {
        let configs = vec![
            yaml("region: us\nimage: a"),
            yaml("region: eu"),
            yaml("image: b"),
        ];
        assert_eq!(merge_configs(&configs), yaml("region: eu\nimage: b"));
    }
}
