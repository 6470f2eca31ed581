//! Interrupt Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Interrupt
//! encoder and decoder. It includes:
//!
//! - **Identifiers**: The two-part `qualifier#label` key ([`qualified::Qualified`])
//! - **Frames**: Call-site locations and their textual form ([`frame::Frame`])
//! - **Context**: Insertion-ordered diagnostic data ([`context::Context`])
//! - **Causes**: Errors and values attached to a record ([`cause::Cause`])
//! - **Records**: The encoder's input ([`record::DiagnosticRecord`])
//! - **Nodes**: The decoder's output tree ([`node::Node`])
//! - **Format**: Section markers shared by both halves ([`format`] module)

pub mod cause;
pub mod context;
pub mod format;
pub mod frame;
pub mod interrupt;
pub mod node;
pub mod qualified;
pub mod record;
pub mod stack;
