//! Presentation router for the warming-atlas views.
//!
//! `router` turns a [`atlas_core::ViewState`] into a typed [`router::ViewReport`];
//! `render` prints that report as text or JSON. Nothing here computes
//! metrics of its own.

pub mod config;
pub mod render;
pub mod router;
