//! Keyed Query Results
//!
//! Fetches are not cancelled when their parameters change, so a response for
//! an old date or user can arrive after the one the UI actually wants. Each
//! result slot remembers the key it is waiting for and drops anything else.

/// Latest result for the wanted key
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySlot<K, V> {
    wanted: Option<K>,
    /// Last stored response and the key it answered
    loaded: Option<(K, V)>,
    loading: bool,
}

impl<K, V> Default for QuerySlot<K, V> {
    fn default() -> Self {
        Self {
            wanted: None,
            loaded: None,
            loading: false,
        }
    }
}

impl<K: PartialEq + Clone, V> QuerySlot<K, V> {
    /// Start waiting for `key`. Returns `false` if that key is already
    /// loaded or in flight.
    pub fn request(&mut self, key: K) -> bool {
        let in_flight = self.loading && self.wanted.as_ref() == Some(&key);
        if in_flight {
            return false;
        }
        if self.loaded_key() == Some(&key) {
            self.wanted = Some(key);
            self.loading = false;
            return false;
        }
        self.wanted = Some(key);
        self.loading = true;
        true
    }

    /// Wait for `key` even if it is already loaded (after a mutation)
    pub fn reload(&mut self, key: K) {
        self.wanted = Some(key);
        self.loading = true;
    }

    /// Store a response. Stale keys are ignored and `false` is returned.
    pub fn resolve(&mut self, key: &K, value: V) -> bool {
        if self.wanted.as_ref() != Some(key) {
            log::debug!("[QUERY] Dropping stale response");
            return false;
        }
        self.loaded = Some((key.clone(), value));
        self.loading = false;
        true
    }

    /// A failed fetch keeps whatever was stored for the same key
    pub fn fail(&mut self, key: &K) {
        if self.wanted.as_ref() == Some(key) {
            self.loading = false;
        }
    }

    /// Data for the wanted key only; another key's data is never returned
    pub fn value(&self) -> Option<&V> {
        match &self.loaded {
            Some((key, value)) if self.wanted.as_ref() == Some(key) => Some(value),
            _ => None,
        }
    }

    pub fn loaded_key(&self) -> Option<&K> {
        self.loaded.as_ref().map(|(key, _)| key)
    }

    pub fn wanted(&self) -> Option<&K> {
        self.wanted.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_response_is_discarded() {
        let mut slot: QuerySlot<&str, u32> = QuerySlot::default();
        assert!(slot.request("monday"));
        assert!(slot.request("tuesday"));

        assert!(!slot.resolve(&"monday", 1));
        assert!(slot.value().is_none());
        assert!(slot.is_loading());

        assert!(slot.resolve(&"tuesday", 2));
        assert_eq!(slot.value(), Some(&2));
        assert!(!slot.is_loading());
    }

    #[test]
    fn test_duplicate_request_is_skipped() {
        let mut slot: QuerySlot<u8, ()> = QuerySlot::default();
        assert!(slot.request(1));
        assert!(!slot.request(1));
        slot.resolve(&1, ());
        assert!(!slot.request(1));
        slot.reload(1);
        assert!(slot.is_loading());
        assert_eq!(slot.wanted(), Some(&1));
    }

    #[test]
    fn test_failure_keeps_previous_value() {
        let mut slot: QuerySlot<u8, &str> = QuerySlot::default();
        slot.request(1);
        slot.resolve(&1, "old");
        slot.reload(1);
        slot.fail(&1);
        assert_eq!(slot.value(), Some(&"old"));
        assert!(!slot.is_loading());
    }

    #[test]
    fn test_failed_key_change_hides_old_value_and_retries() {
        let mut slot: QuerySlot<u8, &str> = QuerySlot::default();
        slot.request(3);
        slot.resolve(&3, "third");

        assert!(slot.request(4));
        assert!(slot.value().is_none());
        slot.fail(&4);
        assert!(slot.value().is_none());
        assert_eq!(slot.loaded_key(), Some(&3));

        // retry is sent, not mistaken for a loaded key
        assert!(slot.request(4));
        slot.resolve(&4, "fourth");
        assert_eq!(slot.value(), Some(&"fourth"));
    }

    #[test]
    fn test_switching_back_to_loaded_key_reuses_it() {
        let mut slot: QuerySlot<u8, &str> = QuerySlot::default();
        slot.request(3);
        slot.resolve(&3, "third");
        assert!(slot.request(4));
        assert!(!slot.request(3));
        assert!(!slot.is_loading());
        assert_eq!(slot.value(), Some(&"third"));
        assert!(!slot.resolve(&4, "late"));
        assert_eq!(slot.value(), Some(&"third"));
    }
}
