//! Lumen Core
//!
//! Core types shared by the Lumen gateway and its callers.
//!
//! This crate contains:
//! - Domain types: remote records as the media API reports them (Job, Asset, Style)
//! - DTOs: request and listing shapes plus the operation result envelope
//! - Model routing: static friendly-name to endpoint-slug tables

pub mod domain;
pub mod dto;
pub mod models;
