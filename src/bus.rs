//! Register bus seam between drivers and the physical transport.
//!
//! Drivers in this crate talk to their device through [`RegisterBus`] so the
//! byte-level transport (I2C peripheral, bit-banged bus, test fake) stays
//! swappable. The model is a synchronous, ordered, byte-addressable register
//! bus: framing, clock stretching and retries are the transport's problem.

use embedded_hal::i2c::I2c;

/// Byte-addressable register transport consumed by device drivers.
///
/// A read is two steps: [`select`](Self::select) latches the register
/// pointer, [`read`](Self::read) then returns consecutive bytes starting
/// there. [`read_at`](Self::read_at) combines the two.
pub trait RegisterBus {
    type Error: core::fmt::Debug;

    /// Sets the register pointer for a subsequent [`read`](Self::read).
    fn select(&mut self, register: u8) -> Result<(), Self::Error>;

    /// Reads `buf.len()` consecutive bytes starting at the selected register.
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes one byte to one register.
    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Selects `register` and reads `buf.len()` bytes from it.
    fn read_at(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.select(register)?;
        self.read(buf)
    }
}

/// [`RegisterBus`] over a blocking `embedded-hal` I2C peripheral addressing
/// one device.
pub struct I2cRegisterBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cRegisterBus<I> {
    pub const fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Hands the I2C peripheral back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cRegisterBus<I> {
    type Error = I::Error;

    fn select(&mut self, register: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register])
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(self.address, buf)
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }
}
