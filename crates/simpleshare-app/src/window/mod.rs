//! Window lifecycle: the backend seam, the controller that owns the single
//! active window, and the winit-backed implementation.

pub mod backend;
pub mod controller;
pub mod winit_backend;

#[cfg(test)]
pub mod fake;
