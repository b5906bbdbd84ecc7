//! Factory calibration constants and the fixed-point compensation formulas
//! from the Bosch BMP280 datasheet (BST-BMP280-DS001, section 3.11.3).
//!
//! The formulas are integer-only and their operation order is part of the
//! defined behavior: each shift stage truncates intermediates exactly the way
//! the manufacturer's reference code does, so the terms must not be
//! reassociated.

use crate::bmp280::registers;
use crate::bus::RegisterBus;

/// Factory-trimmed compensation constants, burned into the device at
/// manufacture. Read once at initialization and immutable for the life of
/// the driver handle.
///
/// `dig_t1` and `dig_p1` are unsigned, all other fields signed. Each field
/// lives at its own fixed register address, little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,

    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl Calibration {
    /// Reads every calibration field at its documented register address.
    pub(crate) fn read_from<B: RegisterBus>(bus: &mut B) -> Result<Self, B::Error> {
        Ok(Self {
            dig_t1: read_u16_le(bus, registers::REG_DIG_T1)?,
            dig_t2: read_i16_le(bus, registers::REG_DIG_T2)?,
            dig_t3: read_i16_le(bus, registers::REG_DIG_T3)?,

            dig_p1: read_u16_le(bus, registers::REG_DIG_P1)?,
            dig_p2: read_i16_le(bus, registers::REG_DIG_P2)?,
            dig_p3: read_i16_le(bus, registers::REG_DIG_P3)?,
            dig_p4: read_i16_le(bus, registers::REG_DIG_P4)?,
            dig_p5: read_i16_le(bus, registers::REG_DIG_P5)?,
            dig_p6: read_i16_le(bus, registers::REG_DIG_P6)?,
            dig_p7: read_i16_le(bus, registers::REG_DIG_P7)?,
            dig_p8: read_i16_le(bus, registers::REG_DIG_P8)?,
            dig_p9: read_i16_le(bus, registers::REG_DIG_P9)?,
        })
    }

    /// Two-term temperature compensation.
    ///
    /// Takes the 20-bit raw ADC code and returns `(t_fine, temperature)`
    /// where `t_fine` is the fine temperature the pressure formula depends
    /// on and `temperature` is in hundredths of a degree Celsius.
    pub fn compensate_temperature(&self, adc_t: i32) -> (i32, i32) {
        let var1 = (((adc_t >> 3) - ((self.dig_t1 as i32) << 1)) * (self.dig_t2 as i32)) >> 11;
        let var2 = (((((adc_t >> 4) - (self.dig_t1 as i32))
            * ((adc_t >> 4) - (self.dig_t1 as i32)))
            >> 12)
            * (self.dig_t3 as i32))
            >> 14;

        let t_fine = var1 + var2;
        (t_fine, (t_fine * 5 + 128) >> 8)
    }

    /// 64-bit pressure compensation cascade.
    ///
    /// Takes the 20-bit raw ADC code and a fine temperature computed from
    /// the same logical sample. Returns pressure in 1/256 Pa (Q24.8), or 0
    /// when the denominator term degenerates to zero; the sentinel is a
    /// valid reading, not an error.
    pub fn compensate_pressure(&self, adc_p: i32, t_fine: i32) -> u32 {
        let var1 = (t_fine as i64) - 128000;
        let mut var2 = var1 * var1 * (self.dig_p6 as i64);
        var2 += (var1 * (self.dig_p5 as i64)) << 17;
        var2 += (self.dig_p4 as i64) << 35;
        let var1 =
            ((var1 * var1 * (self.dig_p3 as i64)) >> 8) + ((var1 * (self.dig_p2 as i64)) << 12);
        let var1 = (((1i64 << 47) + var1) * (self.dig_p1 as i64)) >> 33;

        if var1 == 0 {
            // avoid division by zero
            return 0;
        }

        let p = 1_048_576 - (adc_p as i64);
        let p = (((p << 31) - var2) * 3125) / var1;
        let var1 = ((self.dig_p9 as i64) * (p >> 13) * (p >> 13)) >> 25;
        let var2 = ((self.dig_p8 as i64) * p) >> 19;

        (((p + var1 + var2) >> 8) + ((self.dig_p7 as i64) << 4)) as u32
    }
}

fn read_u16_le<B: RegisterBus>(bus: &mut B, register: u8) -> Result<u16, B::Error> {
    let mut buf = [0u8; 2];
    bus.read_at(register, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_i16_le<B: RegisterBus>(bus: &mut B, register: u8) -> Result<i16, B::Error> {
    Ok(read_u16_le(bus, register)? as i16)
}
