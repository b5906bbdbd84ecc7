//! Hardware-independent core library for single-board-computer I/O
//!
//! This crate contains the platform-agnostic foundations used by the wider
//! driver ecosystem: bounds-checked views over mapped register memory, the
//! register-bus seam that keeps drivers independent of the physical
//! transport, and the BMP280 barometer driver core (identity verification,
//! one-time calibration load, fixed-point temperature and pressure
//! compensation).
//!
//! It is `no_std` with `extern crate alloc` so it compiles on both embedded
//! targets and desktop hosts (for tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod bmp280;
pub mod bus;
pub mod memory;

pub use bmp280::{Bmp280, Bmp280Error, Reading};
pub use bus::{I2cRegisterBus, RegisterBus};
pub use memory::{MemoryBlock, MemoryError, MemoryView};
