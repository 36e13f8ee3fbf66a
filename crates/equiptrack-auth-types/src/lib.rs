//! Auth types shared between the Equiptrack auth service and its consumers.
//!
//! Provides JWT validation, the refresh-token cookie builders, and the
//! `Identity` extractor for handlers behind the bearer-auth middleware.

pub mod cookie;
pub mod identity;
pub mod token;
