// Random sample generation
pub mod sampler;

// Form controller (prefill, submit, render)
pub mod form_controller;

// Service wiring and feature discovery
pub mod bootstrap;

// Background client for frame-driven UIs
pub mod client;
