//! Entity Module

pub mod activity;
pub mod aggregate;
pub mod session;
pub mod user;
