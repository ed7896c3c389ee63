#![no_main]

use libfuzzer_sys::fuzz_target;
use sigungu_core::storage::{VISITED_KEY, WISHLIST_KEY, load_snapshot};
use sigungu_core::{MemoryStorage, Storage, VisitStateStore};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let mut storage = MemoryStorage::new();
    let visited = value.get("visited").cloned().unwrap_or_default();
    let wishlist = value.get("wishlist").cloned().unwrap_or_default();
    if storage.save(VISITED_KEY, &visited).is_err() || storage.save(WISHLIST_KEY, &wishlist).is_err() {
        return;
    }

    let Ok(snapshot) = load_snapshot(&storage) else {
        return;
    };
    let store = VisitStateStore::from_snapshot(snapshot);
    assert!(store.visited().all(|name| store.wishlist().all(|w| w != name)));
});
