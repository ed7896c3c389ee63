#![no_main]

use libfuzzer_sys::fuzz_target;
use sigungu_core::{Atlas, FeatureCollection, VisitStateStore};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(collection) = FeatureCollection::from_json(text) else {
        return;
    };

    let atlas = Atlas::new(collection);
    let mut store = VisitStateStore::new();
    for district in atlas.districts() {
        store.toggle_visited(&district.display_name);
        let conquest = atlas.conquest(&store, district);
        assert!(conquest.visited <= conquest.total);
        if district.province.is_none() {
            assert!(!conquest.conquered);
        }
    }
    let stats = store.stats(atlas.len());
    assert!(stats.percent.tenths() <= 1000);
});
