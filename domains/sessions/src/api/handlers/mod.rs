//! HTTP handlers for the Sessions domain

pub mod pages;
pub mod session;
