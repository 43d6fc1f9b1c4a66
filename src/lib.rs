#![allow(dead_code, unused_imports, unused_variables)]
//! TokenScout - ERC-20 Token Risk Report Aggregator Library
//!
//! Aggregates token security properties, market data and liquidity analysis
//! from independent providers into a single chat-ready risk report.
//!
//! # Modules
//!
//! - `domain`: Core analysis logic (address classification, liquidity sums, rule tables, validation)
//! - `ports`: Trait abstractions for the five data sources and the audit job service
//! - `adapters`: External implementations (HTTP provider clients, CLI)
//! - `application`: Token resolver and audit polling task
//! - `render`: Report assembly, MarkdownV2 escaping, number abbreviation
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod render;
