//! HTTP API for scanner front-ends.
//!
//! A camera or handheld scanner front-end posts the decoded barcode and
//! renders the returned verdict.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! maa-scan serve
//!
//! # Custom port, bound to all interfaces
//! maa-scan serve --port 3000 --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/scan` - Resolve and classify `{"code": "..."}`
//! - `GET /api/catalog` - List all products with their safety status
//! - `GET /api/rules` - List the active rule table

pub mod server;
