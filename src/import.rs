//! Import module: the guided flow that turns a local audio file into a
//! track record.
//!
//! The panel walks one file at a time through pick → cover-art extraction →
//! title edit → simulated upload, and hands the finished `Track` back to
//! the runtime for appending.

mod panel;
mod picker;
mod worker;

pub use panel::*;
pub use picker::*;

#[cfg(test)]
mod tests;
