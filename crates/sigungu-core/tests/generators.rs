#![allow(dead_code)]

use proptest::prelude::*;
use sigungu_core::{DistrictFeature, Province};

/// Operation applied to a store during property tests.
#[derive(Debug, Clone)]
pub enum ToggleOp {
    Visited(String),
    Wishlist(String),
}

/// Small pool of display names so toggle sequences hit the same keys often.
pub fn arb_name() -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        Just("서울특별시 종로구".to_string()),
        Just("부산광역시 해운대구".to_string()),
        Just("대구광역시 군위군".to_string()),
        Just("경상북도 포항시".to_string()),
        Just("제주특별자치도 제주시".to_string()),
        "[가-힣]{1,4}[시군구]",
    ]
}

pub fn arb_op() -> impl Strategy<Value = ToggleOp> + Clone {
    prop_oneof![
        arb_name().prop_map(ToggleOp::Visited),
        arb_name().prop_map(ToggleOp::Wishlist),
    ]
}

pub fn arb_ops() -> impl Strategy<Value = Vec<ToggleOp>> + Clone {
    prop::collection::vec(arb_op(), 0..64)
}

pub fn arb_province() -> impl Strategy<Value = Province> + Clone {
    prop::sample::select(Province::all().collect::<Vec<_>>())
}

/// Two-character prefix that is not a listed province code.
pub fn arb_unlisted_prefix() -> impl Strategy<Value = String> + Clone {
    "[0-9]{2}".prop_filter("listed province code", |p| Province::from_code(p).is_none())
}

/// District with a code under `province` and a short numeric suffix.
pub fn arb_district_in(province: Province) -> impl Strategy<Value = DistrictFeature> + Clone {
    ("[0-9]{3}", "[가-힣]{1,3}[시군구]").prop_map(move |(suffix, name)| {
        DistrictFeature::new(format!("{}{suffix}", province.code()), name)
    })
}

pub fn arb_dataset() -> impl Strategy<Value = Vec<DistrictFeature>> {
    prop::collection::vec(arb_province().prop_flat_map(arb_district_in), 0..40)
}
