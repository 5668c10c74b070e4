use std::collections::BTreeSet;

use regex::Regex;
use serde_yaml::Value;

const LOCALES: &[&str] = &["en", "he"];

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or_default();
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, v, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), format!("{other:?}"))),
    }
}

fn load(code: &str) -> Vec<(String, String)> {
    let path = format!("{}/locales/{code}.yml", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap();
    let value: Value = serde_yaml::from_str(&text).unwrap();
    let mut out = Vec::new();
    flatten("", &value, &mut out);
    out
}

fn placeholders(text: &str) -> BTreeSet<String> {
    let re = Regex::new(r"%\{(\w+)\}").unwrap();
    re.captures_iter(text).map(|c| c[1].to_string()).collect()
}

#[test]
fn every_locale_has_the_same_keys() {
    let reference: BTreeSet<String> = load("en").into_iter().map(|(k, _)| k).collect();
    for code in LOCALES {
        let keys: BTreeSet<String> = load(code).into_iter().map(|(k, _)| k).collect();
        let missing: Vec<_> = reference.difference(&keys).collect();
        let extra: Vec<_> = keys.difference(&reference).collect();
        assert!(missing.is_empty(), "{code} is missing {missing:?}");
        assert!(extra.is_empty(), "{code} has unknown keys {extra:?}");
    }
}

#[test]
fn translations_use_the_same_placeholders() {
    let english: Vec<(String, String)> = load("en");
    for code in LOCALES {
        let other = load(code);
        for (key, text) in &english {
            let Some((_, translated)) = other.iter().find(|(k, _)| k == key) else {
                continue;
            };
            assert_eq!(
                placeholders(text),
                placeholders(translated),
                "placeholder mismatch in {code}:{key}"
            );
        }
    }
}

#[test]
fn message_variants_exist_for_both_genders() {
    let keys: BTreeSet<String> = load("en").into_iter().map(|(k, _)| k).collect();
    for gender in ["boy", "girl"] {
        for i in 0..5 {
            assert!(keys.contains(&format!("praise.{gender}.m{i}")));
        }
        for i in 0..4 {
            assert!(keys.contains(&format!("try_again.{gender}.m{i}")));
        }
    }
}
