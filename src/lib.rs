//! Scam Honeypot - conversational fraud honeypot.
//!
//! Engages suspected fraud senders through a believable persona, extracts
//! actionable identifiers (phone numbers, UPI ids, bank accounts, phishing
//! links) from what they send, and reports them to an external evaluator
//! once enough has been learned.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
