// Copyright 2026 Flecta Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flecta — Romanian verb conjugation service.
//!
//! Resolves a verb's conjugated forms from a local JSON lexicon, falling
//! back to scraping the inflection tables of an external reference source,
//! and returns one deduplicated, ordinally sorted list of forms.
//!
//! This library crate exposes the core modules for integration testing.

pub mod backend;
pub mod cli;
pub mod config;
pub mod fallback;
pub mod pipeline;
pub mod rest;
pub mod scrape;
pub mod tree;
