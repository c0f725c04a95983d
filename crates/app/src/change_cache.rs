//! Change cache — an in-memory key/value store that notifies on mutation.
//!
//! Every [`set`](ChangeCache::set) and [`delete`](ChangeCache::delete) calls
//! the registered [`CacheObserver`] exactly once, synchronously, after the
//! write is visible to readers and before control returns to the caller.
//! No comparison with the previous value is made: writing an identical value
//! notifies again.
//!
//! Entries are kept until deleted; there is no expiry.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

/// Receives mutation notifications from a [`ChangeCache`].
pub trait CacheObserver<V>: Send + Sync {
    /// `value` was stored under `key`, replacing any previous value.
    fn on_set(&self, key: &str, value: &V);

    /// `key` was deleted (whether or not it was present).
    fn on_delete(&self, key: &str);
}

impl<V, T: CacheObserver<V> + ?Sized> CacheObserver<V> for Arc<T> {
    fn on_set(&self, key: &str, value: &V) {
        (**self).on_set(key, value);
    }

    fn on_delete(&self, key: &str) {
        (**self).on_delete(key);
    }
}

/// Key/value store with a single mutation observer.
///
/// Cloning is cheap and yields a handle onto the same entries and observer.
pub struct ChangeCache<V> {
    entries: Arc<RwLock<BTreeMap<String, V>>>,
    observer: Arc<dyn CacheObserver<V>>,
}

impl<V> Clone for ChangeCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<V: Clone> ChangeCache<V> {
    /// Create an empty cache that reports mutations to `observer`.
    pub fn new(observer: impl CacheObserver<V> + 'static) -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            observer: Arc::new(observer),
        }
    }

    /// Store or replace the value under `key`, then notify the observer.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(key.clone(), value.clone());
        }
        self.observer.on_set(&key, &value);
    }

    /// Remove the entry under `key`, then notify the observer.
    ///
    /// The observer is notified even when nothing was stored under `key`.
    /// Returns whether an entry was actually removed.
    pub fn delete(&self, key: &str) -> bool {
        let removed = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.remove(key).is_some()
        };
        self.observer.on_delete(key);
        removed
    }

    /// Look up the value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Look up several keys at once; keys without a value are left out.
    #[must_use]
    pub fn mget<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> HashMap<String, V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        keys.into_iter()
            .filter_map(|key| entries.get(key).map(|v| (key.to_string(), v.clone())))
            .collect()
    }

    /// All keys, in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.keys().cloned().collect()
    }

    /// All `(key, value)` pairs, in ascending key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    #[derive(Debug, Clone, PartialEq)]
    enum Notification {
        Set(String, u32),
        Delete(String),
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Notification>>,
    }

    impl Recorder {
        fn seen(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl CacheObserver<u32> for Recorder {
        fn on_set(&self, key: &str, value: &u32) {
            self.seen
                .lock()
                .unwrap()
                .push(Notification::Set(key.to_string(), *value));
        }

        fn on_delete(&self, key: &str) {
            self.seen
                .lock()
                .unwrap()
                .push(Notification::Delete(key.to_string()));
        }
    }

    fn recorded_cache() -> (ChangeCache<u32>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (ChangeCache::new(Arc::clone(&recorder)), recorder)
    }

    #[test]
    fn should_store_and_notify_on_set() {
        let (cache, recorder) = recorded_cache();

        cache.set("a", 1);

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(recorder.seen(), vec![Notification::Set("a".into(), 1)]);
    }

    #[test]
    fn should_notify_once_per_set_even_when_value_is_unchanged() {
        let (cache, recorder) = recorded_cache();

        cache.set("a", 7);
        cache.set("a", 7);
        cache.set("a", 8);

        assert_eq!(
            recorder.seen(),
            vec![
                Notification::Set("a".into(), 7),
                Notification::Set("a".into(), 7),
                Notification::Set("a".into(), 8),
            ]
        );
        assert_eq!(cache.get("a"), Some(8));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn should_remove_and_notify_on_delete() {
        let (cache, recorder) = recorded_cache();
        cache.set("a", 1);

        assert!(cache.delete("a"));

        assert_eq!(cache.get("a"), None);
        assert_eq!(
            recorder.seen(),
            vec![
                Notification::Set("a".into(), 1),
                Notification::Delete("a".into()),
            ]
        );
    }

    #[test]
    fn should_notify_delete_for_key_never_set() {
        let (cache, recorder) = recorded_cache();

        assert!(!cache.delete("ghost"));

        assert_eq!(recorder.seen(), vec![Notification::Delete("ghost".into())]);
    }

    #[test]
    fn should_report_missing_key_as_none() {
        let (cache, recorder) = recorded_cache();
        assert_eq!(cache.get("missing"), None);
        assert!(recorder.seen().is_empty());
    }

    #[test]
    fn should_return_only_present_keys_from_mget() {
        let (cache, _) = recorded_cache();
        cache.set("a", 1);
        cache.set("c", 3);

        let found = cache.mget(["a", "b", "c"]);

        assert_eq!(found.len(), 2);
        assert_eq!(found.get("a"), Some(&1));
        assert_eq!(found.get("c"), Some(&3));
        assert!(!found.contains_key("b"));
    }

    #[test]
    fn should_list_keys_in_order() {
        let (cache, _) = recorded_cache();
        cache.set("b", 2);
        cache.set("a", 1);

        assert_eq!(cache.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            cache.entries(),
            vec![("a".to_string(), 1), ("b".to_string(), 2)]
        );
    }

    #[test]
    fn should_share_entries_between_clones() {
        let (cache, recorder) = recorded_cache();
        let reader = cache.clone();

        cache.set("a", 1);

        assert_eq!(reader.get("a"), Some(1));
        assert_eq!(recorder.seen().len(), 1);
        assert!(!reader.is_empty());
    }

    struct ReadBack {
        cache: Arc<OnceLock<ChangeCache<u32>>>,
        observed: Mutex<Vec<Option<u32>>>,
    }

    impl CacheObserver<u32> for ReadBack {
        fn on_set(&self, key: &str, _value: &u32) {
            let current = self.cache.get().and_then(|c| c.get(key));
            self.observed.lock().unwrap().push(current);
        }

        fn on_delete(&self, key: &str) {
            let current = self.cache.get().and_then(|c| c.get(key));
            self.observed.lock().unwrap().push(current);
        }
    }

    #[test]
    fn should_make_write_visible_before_notifying() {
        let slot = Arc::new(OnceLock::new());
        let observer = Arc::new(ReadBack {
            cache: Arc::clone(&slot),
            observed: Mutex::new(Vec::new()),
        });
        let cache = ChangeCache::new(Arc::clone(&observer));
        let _ = slot.set(cache.clone());

        cache.set("a", 5);
        cache.delete("a");

        assert_eq!(*observer.observed.lock().unwrap(), vec![Some(5), None]);
    }
}
