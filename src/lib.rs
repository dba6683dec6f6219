//! Workout Planner - Multi-day training program tracking
//!
//! This crate implements workout programs made of training days and
//! exercises, with per-level quotas, merge-on-edit of day contents, and an
//! exercise rotation that advances as sessions are logged.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
