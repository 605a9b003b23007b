//! Helpers shared by the presentation <-> wire model mappings

use crate::error::{Error, Result};

/// Map an optional collection element by element.
///
/// `None` stays `None` and an empty list stays an empty list: the service
/// treats an omitted field differently from a field sent as `[]`.
pub fn synced_list<P, W, F>(source: Option<&[P]>, map: F) -> Option<Vec<W>>
where
    F: FnMut(&P) -> W,
{
    source.map(|items| items.iter().map(map).collect())
}

/// Fallible variant of [`synced_list`]; the first failing element aborts the mapping
pub fn try_synced_list<P, W, F>(source: Option<&[P]>, map: F) -> Result<Option<Vec<W>>>
where
    F: FnMut(&P) -> Result<W>,
{
    source
        .map(|items| items.iter().map(map).collect::<Result<Vec<W>>>())
        .transpose()
}

/// A wire enumeration whose presentation form is a string.
///
/// `VARIANTS` is the whole table; parsing accepts any case and rejects
/// anything outside the table instead of defaulting.
pub trait EnumMapping: Sized + Copy + 'static {
    const KIND: &'static str;
    const VARIANTS: &'static [Self];

    /// Presentation name of this variant
    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::InvalidEnumValue {
                kind: Self::KIND,
                value: value.to_string(),
                expected: Self::VARIANTS
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    fn parse_opt(value: Option<&str>) -> Result<Option<Self>> {
        value.map(Self::parse).transpose()
    }
}

/// Anything addressed by a user-visible name
pub trait Named {
    fn name(&self) -> &str;
}

/// Case-insensitive name comparison that does not depend on locale
pub fn names_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Fail with `DuplicateName` if `name` is already present in `items`
pub fn ensure_name_available<T: Named>(items: &[T], kind: &'static str, name: &str) -> Result<()> {
    if items.iter().any(|item| names_equal(item.name(), name)) {
        return Err(Error::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Index of the single item called `name`
pub fn position_by_name<T: Named>(items: &[T], kind: &'static str, name: &str) -> Result<usize> {
    let mut matches = items
        .iter()
        .enumerate()
        .filter(|(_, item)| names_equal(item.name(), name))
        .map(|(i, _)| i);

    match (matches.next(), matches.count()) {
        (None, _) => Err(Error::NotFound {
            kind,
            name: name.to_string(),
        }),
        (Some(i), 0) => Ok(i),
        (Some(_), rest) => Err(Error::AmbiguousMatch {
            kind,
            name: name.to_string(),
            count: rest + 1,
        }),
    }
}

/// The single item called `name`
pub fn find_by_name<'a, T: Named>(items: &'a [T], kind: &'static str, name: &str) -> Result<&'a T> {
    position_by_name(items, kind, name).map(|i| &items[i])
}

/// Exactly one element of a lookup result
pub fn exactly_one<T>(mut items: Vec<T>, kind: &'static str, name: &str) -> Result<T> {
    match items.len() {
        0 => Err(Error::NotFound {
            kind,
            name: name.to_string(),
        }),
        1 => Ok(items.remove(0)),
        count => Err(Error::AmbiguousMatch {
            kind,
            name: name.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Access {
        Allow,
        Deny,
    }

    impl EnumMapping for Access {
        const KIND: &'static str = "access";
        const VARIANTS: &'static [Self] = &[Access::Allow, Access::Deny];

        fn as_str(self) -> &'static str {
            match self {
                Access::Allow => "Allow",
                Access::Deny => "Deny",
            }
        }
    }

    struct Item(&'static str);

    impl Named for Item {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_synced_list_null_and_empty_stay_distinct() {
        let none: Option<&[u32]> = None;
        assert_eq!(synced_list(none, |x| x + 1), None);

        let empty: &[u32] = &[];
        assert_eq!(synced_list(Some(empty), |x| x + 1), Some(vec![]));

        let items = [3u32, 1, 2];
        assert_eq!(synced_list(Some(&items[..]), |x| x * 10), Some(vec![30, 10, 20]));
    }

    #[test]
    fn test_try_synced_list_propagates_errors() {
        let values = ["Allow", "nope"];
        let result = try_synced_list(Some(&values[..]), |v| Access::parse(v));
        assert!(matches!(result, Err(Error::InvalidEnumValue { .. })));

        let none: Option<&[&str]> = None;
        assert_eq!(try_synced_list(none, |v| Access::parse(v)).unwrap(), None);
    }

    #[test]
    fn test_enum_parse_is_case_insensitive_and_total() {
        assert_eq!(Access::parse("allow").unwrap(), Access::Allow);
        assert_eq!(Access::parse("DENY").unwrap(), Access::Deny);
        for v in Access::VARIANTS {
            assert_eq!(Access::parse(v.as_str()).unwrap(), *v);
        }
        match Access::parse("Maybe") {
            Err(Error::InvalidEnumValue { kind, expected, .. }) => {
                assert_eq!(kind, "access");
                assert_eq!(expected, "Allow, Deny");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let items = [Item("FE1"), Item("fe2")];
        assert!(matches!(
            ensure_name_available(&items, "FrontendIpConfiguration", "fe1"),
            Err(Error::DuplicateName { .. })
        ));
        assert!(ensure_name_available(&items, "FrontendIpConfiguration", "fe3").is_ok());
    }

    #[test]
    fn test_names_equal_beyond_ascii() {
        assert!(names_equal("Frontend-Ü1", "frontend-ü1"));
        assert!(!names_equal("fe1", "fe10"));
        assert!(names_equal("", ""));
    }

    #[test]
    fn test_find_by_name() {
        let items = [Item("a"), Item("B"), Item("b")];
        assert_eq!(find_by_name(&items, "item", "A").unwrap().0, "a");
        assert!(matches!(
            find_by_name(&items, "item", "c"),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            find_by_name(&items, "item", "b"),
            Err(Error::AmbiguousMatch { count: 2, .. })
        ));
    }

    #[test]
    fn test_exactly_one() {
        assert_eq!(exactly_one(vec![7], "user", "x").unwrap(), 7);
        assert!(matches!(
            exactly_one(Vec::<u8>::new(), "user", "x"),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            exactly_one(vec![1, 2, 3], "user", "x"),
            Err(Error::AmbiguousMatch { count: 3, .. })
        ));
    }
}
