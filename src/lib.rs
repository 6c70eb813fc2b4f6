//! # LicenseHub Admin Library
//!
//! Back-office API for the LicenseHub license-management platform: client
//! organizations, market intelligence, partner API keys, webhooks, data
//! exports, BI analytics and team access, served as JSON over HTTP.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod navigation;
pub mod normalization;
pub mod repositories;
pub mod secrets;
pub mod seeds;
pub mod server;
pub mod tabs;
pub mod telemetry;
pub use migration;
