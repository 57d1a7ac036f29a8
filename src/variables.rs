//! Variable mapping and `{{TOKEN}}` substitution.

use crate::constants::PROJECT_KEY;
use indexmap::IndexMap;

/// Flat, ordered key to value bindings used for token substitution.
///
/// Built once before traversal and never mutated afterwards. Keys are applied
/// in insertion order, so when one value contains another key's placeholder the
/// outcome depends on that order. This is a known limitation, not resolved here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(IndexMap<String, String>);

impl Variables {
    /// Layers document defaults, caller overrides and the project name.
    ///
    /// Later layers replace earlier values while keeping the key's original
    /// position. The project name is applied last and always wins.
    pub fn layered<D, O>(defaults: D, overrides: O, project: &str) -> Self
    where
        D: IntoIterator<Item = (String, String)>,
        O: IntoIterator<Item = (String, String)>,
    {
        let mut map: IndexMap<String, String> = defaults.into_iter().collect();
        map.extend(overrides);
        map.insert(PROJECT_KEY.to_string(), project.to_string());
        Self(map)
    }

    /// Value bound to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates bindings in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replaces every `{{KEY}}` in `input` with its bound value.
    ///
    /// Unknown placeholders are left verbatim. Substitution is literal: no
    /// escaping, and the output of one key is only re-scanned by keys that
    /// come later in the mapping.
    pub fn render(&self, input: &str) -> String {
        let mut out = input.to_string();
        for (key, value) in &self.0 {
            let token = placeholder(key);
            if out.contains(&token) {
                out = out.replace(&token, value);
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Placeholder form of a key.
pub fn placeholder(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_placeholder_form() {
        assert_eq!(placeholder("PROJECT"), "{{PROJECT}}");
    }

    #[test]
    fn test_render_replaces_all_occurrences() {
        let vars: Variables = [("NAME", "demo")].into_iter().collect();
        assert_eq!(vars.render("{{NAME}}/{{NAME}}.txt"), "demo/demo.txt");
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let vars: Variables = [("NAME", "demo")].into_iter().collect();
        assert_eq!(vars.render("{{OTHER}}-{{NAME}}"), "{{OTHER}}-demo");
    }

    #[test]
    fn test_render_is_not_whitespace_tolerant() {
        let vars: Variables = [("NAME", "demo")].into_iter().collect();
        assert_eq!(vars.render("{{ NAME }}"), "{{ NAME }}");
    }

    #[test]
    fn test_render_depends_on_insertion_order() {
        let forward: Variables = [("A", "{{B}}"), ("B", "x")].into_iter().collect();
        assert_eq!(forward.render("{{A}}"), "x");

        let backward: Variables = [("B", "x"), ("A", "{{B}}")].into_iter().collect();
        assert_eq!(backward.render("{{A}}"), "{{B}}");
    }

    #[test]
    fn test_layered_priority() {
        let vars = Variables::layered(
            pairs(&[("sim", "cdssim"), ("PROJECT", "fromdefaults"), ("lang", "sv")]),
            pairs(&[("sim", "gtkwave"), ("PROJECT", "fromvars")]),
            "Demo",
        );
        assert_eq!(vars.get("sim"), Some("gtkwave"));
        assert_eq!(vars.get("lang"), Some("sv"));
        assert_eq!(vars.get("PROJECT"), Some("Demo"));
        let keys: Vec<&str> = vars.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["sim", "PROJECT", "lang"]);
    }

    #[test]
    fn test_layered_appends_project_key() {
        let vars = Variables::layered(Vec::new(), Vec::new(), "Demo");
        assert_eq!(vars.iter().count(), 1);
        assert_eq!(vars.render("{{PROJECT}}"), "Demo");
    }
}
