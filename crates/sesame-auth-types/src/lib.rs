//! Session types shared between the Sesame auth service and the gateway.
//!
//! Provides session-token validation, cookie builders, and the
//! `IdentityHeaders` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
