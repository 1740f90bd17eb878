//! Mock cache store for isolating the query client in tests.

use mockall::mock;

use crate::cache::{CacheEntry, CacheKey, CacheStore};

mock! {
    pub Store {}

    impl CacheStore for Store {
        fn get(&self, key: &CacheKey) -> Option<CacheEntry>;
        fn put(&self, key: CacheKey, entry: CacheEntry);
        fn invalidate(&self, key: &CacheKey);
    }
}
