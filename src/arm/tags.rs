//! Resource tags given on the command line as `key=value`

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Parse `--tag` arguments into a tag dictionary.
///
/// No tags means the field is omitted from the request (`None`), not sent empty.
/// A tag without `=` gets an empty value.
pub fn parse_tags(raw: &[String]) -> Result<Option<BTreeMap<String, String>>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let mut tags = BTreeMap::new();
    for entry in raw {
        let (key, value) = match entry.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => (entry.trim(), ""),
        };

        if key.is_empty() {
            return Err(Error::InvalidInput(format!("tag '{entry}' has an empty name")));
        }
        if tags.keys().any(|k: &String| k.eq_ignore_ascii_case(key)) {
            return Err(Error::InvalidInput(format!("tag '{key}' is specified more than once")));
        }

        tags.insert(key.to_string(), value.to_string());
    }

    Ok(Some(tags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_tags_is_none() {
        assert_eq!(parse_tags(&[]).unwrap(), None);
    }

    #[test]
    fn test_parse_pairs() {
        let tags = parse_tags(&strings(&["env=prod", "owner = ops", "flag"]))
            .unwrap()
            .unwrap();
        assert_eq!(tags["env"], "prod");
        assert_eq!(tags["owner"], "ops");
        assert_eq!(tags["flag"], "");
    }

    #[test]
    fn test_rejects_empty_and_duplicate_keys() {
        assert!(matches!(
            parse_tags(&strings(&["=x"])),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            parse_tags(&strings(&["Env=a", "env=b"])),
            Err(Error::InvalidInput(_))
        ));
    }
}
