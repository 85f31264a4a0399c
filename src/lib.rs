//! Library entry for menuboard exposing the locale store, site content, menu
//! export and contact form logic to the binary and integration tests.

pub mod contact;
pub mod content;
pub mod export;
pub mod i18n;
pub mod paths;
