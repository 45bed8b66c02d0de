//! Find-one-by-fuzzy-match over resource listings.
//!
//! Every `find_*` operation resolves a user supplied string against the
//! identifier and name of each listed resource with one policy:
//!
//! 1. An item whose id or name equals the search term is an exact match. The
//!    scan never stops early, so the last exact match in listing order wins.
//! 2. Otherwise an item whose id or name contains the search term is a partial
//!    match. Partial matches are only counted while no exact match has been
//!    seen.
//! 3. An exact match is returned if present; otherwise a single partial match
//!    is returned. Several partial matches are ambiguous and none is a miss.
//!
//! A blank search term matches nothing. Unnamed resources carry an empty name
//! and would otherwise resolve as exact matches.

use crate::error::{ClientError, ResourceKind};

/// Resources that can be resolved by [`find_one`].
pub trait Searchable {
    /// Returns the `(id, name)` pair matched against the search term.
    fn search_keys(&self) -> (&str, &str);
}

enum Hit {
    Exact,
    Partial,
    Miss,
}

fn classify(item: &impl Searchable, search: &str) -> Hit {
    let (id, name) = item.search_keys();
    if id == search || name == search {
        Hit::Exact
    } else if id.contains(search) || name.contains(search) {
        Hit::Partial
    } else {
        Hit::Miss
    }
}

/// Resolves a single item from `items` by exact or partial match.
///
/// # Errors
///
/// Returns [`ClientError::MultipleMatches`] when several items partially
/// match and none matches exactly, and [`ClientError::ZeroMatches`] when
/// nothing matches or `search` is blank.
pub fn find_one<T, I>(resource: ResourceKind, items: I, search: &str) -> Result<T, ClientError>
where
    T: Searchable,
    I: IntoIterator<Item = T>,
{
    if search.trim().is_empty() {
        return Err(ClientError::ZeroMatches {
            resource,
            search: search.to_owned(),
        });
    }

    let mut exact = None;
    let mut partial = None;
    let mut partial_count = 0_usize;

    for item in items {
        match classify(&item, search) {
            Hit::Exact => exact = Some(item),
            Hit::Partial if exact.is_none() => {
                partial_count += 1;
                partial = Some(item);
            }
            Hit::Partial | Hit::Miss => {}
        }
    }

    if let Some(found) = exact {
        return Ok(found);
    }
    match (partial, partial_count) {
        (Some(found), 1) => Ok(found),
        (Some(_), _) => Err(ClientError::MultipleMatches {
            resource,
            search: search.to_owned(),
        }),
        (None, _) => Err(ClientError::ZeroMatches {
            resource,
            search: search.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Debug, Eq, PartialEq)]
    struct Item {
        id: &'static str,
        name: &'static str,
    }

    impl Searchable for Item {
        fn search_keys(&self) -> (&str, &str) {
            (self.id, self.name)
        }
    }

    const fn item(id: &'static str, name: &'static str) -> Item {
        Item { id, name }
    }

    fn listing() -> Vec<Item> {
        vec![
            item("a1b2", "database"),
            item("c3d4", "database-replica"),
            item("e5f6", "web"),
        ]
    }

    #[rstest]
    #[case("database", "a1b2")]
    #[case("web", "e5f6")]
    #[case("e5f6", "e5f6")]
    #[case("replica", "c3d4")]
    #[case("c3", "c3d4")]
    fn resolves_exact_and_unique_partial_matches(#[case] search: &str, #[case] expected_id: &str) {
        let found = find_one(ResourceKind::Volume, listing(), search).expect("should resolve");
        assert_eq!(found.id, expected_id);
    }

    #[test]
    fn exact_match_beats_earlier_partial_matches() {
        let items = vec![
            item("1", "db-primary"),
            item("2", "db-secondary"),
            item("3", "db"),
        ];
        let found = find_one(ResourceKind::Volume, items, "db").expect("exact match");
        assert_eq!(found.id, "3");
    }

    #[test]
    fn last_exact_match_wins() {
        let items = vec![item("shared", "one"), item("two", "shared")];
        let found = find_one(ResourceKind::Firewall, items, "shared").expect("exact match");
        assert_eq!(found.id, "two");
    }

    #[test]
    fn several_partial_matches_are_ambiguous() {
        let err = find_one(ResourceKind::Firewall, listing(), "data").expect_err("ambiguous");
        assert_eq!(
            err,
            ClientError::MultipleMatches {
                resource: ResourceKind::Firewall,
                search: String::from("data"),
            }
        );
    }

    #[test]
    fn no_match_is_reported() {
        let err = find_one(ResourceKind::Volume, listing(), "nomatch").expect_err("miss");
        assert_eq!(
            err,
            ClientError::ZeroMatches {
                resource: ResourceKind::Volume,
                search: String::from("nomatch"),
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn blank_search_matches_nothing(#[case] search: &str) {
        let items = vec![item("a1b2", ""), item("c3d4", "web"), item("e5f6", "")];
        let err = find_one(ResourceKind::FirewallRule, items, search).expect_err("blank");
        assert_eq!(
            err,
            ClientError::ZeroMatches {
                resource: ResourceKind::FirewallRule,
                search: search.to_owned(),
            }
        );
    }

    #[test]
    fn empty_listing_has_zero_matches() {
        let err = find_one(ResourceKind::Volume, Vec::<Item>::new(), "x").expect_err("miss");
        assert!(matches!(err, ClientError::ZeroMatches { .. }));
    }
}
