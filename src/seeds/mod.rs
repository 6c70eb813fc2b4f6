//! Database seeding functionality
//!
//! The partner API endpoint catalogue is always seeded; demo organizations,
//! market rankings and metrics only when asked for and only into empty tables.

pub mod catalogue;
pub mod demo;

pub use catalogue::seed_api_endpoints;
pub use demo::seed_demo_data;
