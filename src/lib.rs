//! Core library for the subaward budget reviewer.
//!
//! The reviewer reads a folder of budget workbooks, picks out the subaward
//! lines of each and totals them per institution. IO adapters live under
//! [`io`], data representations inside [`model`], the per-sheet scan in
//! [`extract`], cross-file merging in [`aggregate`], and report rendering in
//! [`report`]. [`review`] ties them together for the command line.

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod io;
pub mod model;
pub mod progress;
pub mod report;
pub mod review;

pub use error::{Result, ReviewError};
