//! Valentine card HTTP server.
//!
//! Endpoints:
//! - GET  /           : Card page, rendered from the flag cookies
//! - POST /api/notify : Email the card owner that the visitor said yes
//! - POST /api/evade  : Next position of the "No" button
//! - GET  /health     : Liveness check

pub mod cookies;
pub mod page;
pub mod routes;
pub mod state;
