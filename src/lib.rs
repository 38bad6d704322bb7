//! # Agroplan
//!
//! A prototype decision-support tool for smallholder agriculture planning.
//! Given soil information (a soil-photo filename or manual descriptors), a
//! plot area, and an optional daily water budget, it recommends crops, an
//! irrigation method, and a rough cost estimate.
//!
//! ## Usage
//!
//! ```bash
//! agroplan plan [--image soil.jpg] [--area 2.5] [--water-budget 250]
//! agroplan serve [--port 8080]
//! ```
//!
//! ## Modules
//!
//! - `pipeline` - The four-stage heuristic pipeline: soil classification,
//!   crop selection, irrigation planning, and cost estimation
//! - `server` - Thin axum wrapper exposing the pipeline over HTTP
//! - `config` - Optional `agroplan.toml` for server and request defaults
//! - `error` - Boundary-layer error type (the pipeline itself is total)

pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;
