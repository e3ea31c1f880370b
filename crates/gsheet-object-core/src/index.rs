//! Re-keying collections by a derived key

use ahash::AHashMap;
use std::hash::Hash;

/// Rows (or anything else) keyed by a caller-derived key
pub type IndexedCollection<K, V> = AHashMap<K, V>;

/// Key each item by `key(item)`
///
/// Items are visited in order and a later item replaces an earlier one with
/// the same key.
///
/// # Examples
/// ```
/// use gsheet_object_core::array_to_object;
///
/// let cities = vec![("Paris", "France"), ("Lyon", "France"), ("Paris", "USA")];
/// let by_name = array_to_object(cities, |c| c.0);
/// assert_eq!(by_name.len(), 2);
/// assert_eq!(by_name["Paris"].1, "USA");
/// ```
pub fn array_to_object<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> IndexedCollection<K, T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let items = items.into_iter();
    let mut out = AHashMap::with_capacity(items.size_hint().0);
    for item in items {
        out.insert(key(&item), item);
    }
    out
}

/// Key each item by `key(item)` and store `value(item, position)`
///
/// Same ordering and overwrite rules as [`array_to_object`].
pub fn array_to_object_with<T, K, U, F, G>(
    items: impl IntoIterator<Item = T>,
    mut key: F,
    mut value: G,
) -> IndexedCollection<K, U>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
    G: FnMut(&T, usize) -> U,
{
    let items = items.into_iter();
    let mut out = AHashMap::with_capacity(items.size_hint().0);
    for (i, item) in items.enumerate() {
        out.insert(key(&item), value(&item, i));
    }
    out
}
