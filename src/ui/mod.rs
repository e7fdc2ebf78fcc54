//! UI module - reusable interface components

pub mod components;
