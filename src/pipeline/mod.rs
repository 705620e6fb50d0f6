//! Pipeline stages for PDF-to-PNG conversion.
//!
//! Each submodule implements exactly one step, so a backend can be swapped
//! (a different renderer, a different probe) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ place ──▶ probe
//! (paths)   (tmpdir)   (move)    (size)
//! ```
//!
//! 1. [`input`] : expand file and directory arguments into an ordered PDF list
//! 2. [`render`]: run the platform renderer into a scoped temporary directory
//! 3. [`place`] : choose the output directory and move the PNG into it
//! 4. [`probe`] : best-effort pixel size for the report line
//!
//! [`tool`] holds the child-process plumbing shared by the command backends.

pub mod input;
pub mod place;
pub mod probe;
pub mod render;
pub mod tool;
