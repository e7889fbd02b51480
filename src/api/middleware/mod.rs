//! API middleware stack.
//!
//! Only request logging; CORS comes from tower-http in the router.

pub mod audit;
