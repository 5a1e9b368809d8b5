//! In-place exchange of two integer slots.
//!
//! ```
//! let mut a = 5;
//! let mut b = 9;
//! exchange::exchange(&mut a, &mut b);
//! assert_eq!((a, b), (9, 5));
//!
//! if a > b {
//!     exchange::exchange(&mut a, &mut b);
//! }
//! assert_eq!((a, b), (5, 9));
//! ```
//!
//! [`exchange`] is the entry point for ordinary callers. Two `&mut` borrows can never denote the
//! same slot, so exchanging a slot with itself goes through [`exchange_cells`] or, at an FFI
//! boundary, [`exchange_raw`].
#![cfg_attr(not(test), no_std)]

mod swap;

pub use swap::{exchange, exchange_cells, exchange_raw};
