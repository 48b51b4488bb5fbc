//! Company Discovery - Guided company research and AI project scoping
//!
//! This crate drives a four-phase discovery workflow: validate a company
//! name, research the company and its strategic hypotheses, recommend AI
//! projects for the selected hypotheses, and run per-project ROI
//! calculators described by declarative schemas.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
