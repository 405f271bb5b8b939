//! Movie catalog client library for marquee.
//!
//! Provides a client for the TMDB v3 API and helpers for the TMDB image CDN.

/// TMDB catalog client.
pub mod catalog;

/// Image CDN URL helpers.
pub mod images;
