//! BENCH-SIM: Benchmark Simulation & Scoring Engine
//!
//! Simulates benchmark-suite executions for an agent-evaluation product
//! (synthetic success/latency/cost/token telemetry, failure insights,
//! rollups) and scores arbitrary prompt text with a deterministic
//! multi-factor heuristic.

pub mod catalog;
pub mod cli;
pub mod scoring;
pub mod sim;
pub mod storage;
pub mod web;
