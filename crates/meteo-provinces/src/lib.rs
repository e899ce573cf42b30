//! Static directory of Spanish provinces.
//!
//! Each record carries the URL slug, the display name, and the capital used
//! as the geocoding query.

pub mod directory;

pub use directory::{all, find_by_slug, ProvinceDirectory, ProvinceRecord, PROVINCES};
