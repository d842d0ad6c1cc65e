//! Subway network server.
//!
//! Manages lines as ordered chains of sections between stations and answers
//! "what is the shortest way from here to there, and what will it cost?"

pub mod config;
pub mod domain;
pub mod fare;
pub mod path;
pub mod sections;
pub mod service;
pub mod store;
pub mod web;
