//! BMP280 barometer driver core.
//!
//! Initialization verifies the device identity, then loads the factory
//! calibration constants once; readings decode the raw 20-bit ADC codes
//! through the datasheet's fixed-point compensation formulas.
//!
//! Pressure compensation is only valid against a fine temperature computed
//! in the same logical sample, so every pressure path here reads the
//! temperature registers first and threads the fine temperature through
//! explicitly. There is no stored intermediate state to go stale between
//! calls.

pub mod calibration;
pub mod registers;

use core::fmt::Debug;

use log::{error, info};
use thiserror_no_std::Error;

use crate::bmp280::calibration::Calibration;
use crate::bus::RegisterBus;

/// Errors raised by the BMP280 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Bmp280Error<E: Debug> {
    /// The identity register did not return the BMP280 chip ID. Fatal at
    /// initialization; no calibration reads happen after a mismatch.
    #[error("device is not a BMP280 barometer: chip id {found:#04x}, expected 0x58")]
    ChipIdMismatch { found: u8 },

    /// Transport failure, propagated unchanged from the register bus.
    #[error("register bus error: {0:?}")]
    Bus(E),
}

/// One calibrated sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Temperature in hundredths of a degree Celsius.
    pub temperature: i32,
    /// Pressure in 1/256 Pa (Q24.8). Zero is the degenerate-denominator
    /// sentinel, a valid reading.
    pub pressure: u32,
}

impl Reading {
    /// Temperature in degrees Celsius, two decimal places.
    pub fn temperature_celsius(&self) -> f32 {
        self.temperature as f32 / 100.0
    }

    /// Pressure in Pascals, rounded to two decimal places. The rounding
    /// happens in fixed point before the float conversion.
    pub fn pressure_pascals(&self) -> f32 {
        (((self.pressure as u64 * 100 + 128) >> 8) as f32) / 100.0
    }
}

/// Driver handle for one BMP280 device behind a [`RegisterBus`].
///
/// Readings are synchronous, blocking calls. One logical reading must run to
/// completion before another begins on the same handle; the handle is not
/// meant to be shared across threads without external serialization.
pub struct Bmp280<B> {
    bus: B,
    calibration: Calibration,
}

impl<B: RegisterBus> Bmp280<B> {
    /// Initializes the driver against the device behind `bus`.
    ///
    /// Verifies the identity register and loads the calibration block. A
    /// chip ID mismatch is fatal: no calibration read happens and no handle
    /// is returned.
    pub fn new(mut bus: B) -> Result<Self, Bmp280Error<B::Error>> {
        let id = read_u8(&mut bus, registers::REG_ID).map_err(Bmp280Error::Bus)?;
        if id != registers::CHIP_ID {
            error!(
                "BMP280 identity check failed: read {:#04x}, expected {:#04x}",
                id,
                registers::CHIP_ID
            );
            return Err(Bmp280Error::ChipIdMismatch { found: id });
        }

        let calibration = Calibration::read_from(&mut bus).map_err(Bmp280Error::Bus)?;
        info!("BMP280 ready, calibration constants loaded");

        Ok(Self { bus, calibration })
    }

    /// The calibration constants loaded at initialization.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Temperature in hundredths of a degree Celsius.
    ///
    /// Reads only the temperature registers; going through
    /// [`read`](Self::read) here would cost a pointless pressure register
    /// read and compensation pass.
    pub fn temperature(&mut self) -> Result<i32, Bmp280Error<B::Error>> {
        let (_, temperature) = self.sample_temperature()?;
        Ok(temperature)
    }

    /// Pressure in 1/256 Pa (Q24.8), 0 when the denominator degenerates.
    ///
    /// Always samples the temperature registers first: the compensation
    /// needs a fine temperature from the same logical reading.
    pub fn pressure(&mut self) -> Result<u32, Bmp280Error<B::Error>> {
        let (t_fine, _) = self.sample_temperature()?;
        self.sample_pressure(t_fine)
    }

    /// Both values from one logical sample.
    ///
    /// The temperature registers are read a single time and the resulting
    /// fine temperature feeds both outputs, so the pair is internally
    /// consistent.
    pub fn read(&mut self) -> Result<Reading, Bmp280Error<B::Error>> {
        let (t_fine, temperature) = self.sample_temperature()?;
        let pressure = self.sample_pressure(t_fine)?;
        Ok(Reading {
            temperature,
            pressure,
        })
    }

    /// Tears the driver down and hands the bus back.
    pub fn release(self) -> B {
        self.bus
    }

    fn sample_temperature(&mut self) -> Result<(i32, i32), Bmp280Error<B::Error>> {
        let adc_t = read_adc_20bit(&mut self.bus, registers::REG_TEMPERATURE_DATA)
            .map_err(Bmp280Error::Bus)?;
        Ok(self.calibration.compensate_temperature(adc_t))
    }

    fn sample_pressure(&mut self, t_fine: i32) -> Result<u32, Bmp280Error<B::Error>> {
        let adc_p = read_adc_20bit(&mut self.bus, registers::REG_PRESSURE_DATA)
            .map_err(Bmp280Error::Bus)?;
        Ok(self.calibration.compensate_pressure(adc_p, t_fine))
    }
}

fn read_u8<B: RegisterBus>(bus: &mut B, register: u8) -> Result<u8, B::Error> {
    let mut buf = [0u8; 1];
    bus.read_at(register, &mut buf)?;
    Ok(buf[0])
}

/// Reads a 3-byte big-endian sample register and right-shifts the 24-bit
/// code by 4 for the 20-bit ADC value.
fn read_adc_20bit<B: RegisterBus>(bus: &mut B, register: u8) -> Result<i32, B::Error> {
    let mut buf = [0u8; 3];
    bus.read_at(register, &mut buf)?;
    let raw = (u32::from(buf[0]) << 16) | (u32::from(buf[1]) << 8) | u32::from(buf[2]);
    Ok((raw >> 4) as i32)
}
