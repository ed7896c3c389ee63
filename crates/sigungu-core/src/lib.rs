//! sigungu-core library.
//!
//! Resolves Korean district codes to their province, tracks which districts
//! a user has visited or wants to visit, and reports province conquest.

pub mod atlas;
pub mod config;
pub mod error;
pub mod feature;
pub mod lock;
pub mod region;
pub mod storage;
pub mod store;

pub use atlas::{Atlas, District, ProvinceProgress};
pub use error::{Error, ErrorCode, Result};
pub use feature::{DistrictFeature, FeatureCollection};
pub use region::{DistrictCode, Province, display_name, province_code, province_name};
pub use storage::{JsonFileStorage, MemoryStorage, PersistentStore, Storage};
pub use store::{Conquest, DistrictStatus, Membership, Percent, Snapshot, Stats, VisitStateStore};
