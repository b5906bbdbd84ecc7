//! BMP280 register map (Bosch datasheet BST-BMP280-DS001, section 4.2).

/// Value the identity register returns for a genuine BMP280.
pub const CHIP_ID: u8 = 0x58;

/// Default I2C device address (SDO pulled high).
pub const DEFAULT_ADDRESS: u8 = 0x77;

pub const REG_DIG_T1: u8 = 0x88;
pub const REG_DIG_T2: u8 = 0x8A;
pub const REG_DIG_T3: u8 = 0x8C;

pub const REG_DIG_P1: u8 = 0x8E;
pub const REG_DIG_P2: u8 = 0x90;
pub const REG_DIG_P3: u8 = 0x92;
pub const REG_DIG_P4: u8 = 0x94;
pub const REG_DIG_P5: u8 = 0x96;
pub const REG_DIG_P6: u8 = 0x98;
pub const REG_DIG_P7: u8 = 0x9A;
pub const REG_DIG_P8: u8 = 0x9C;
pub const REG_DIG_P9: u8 = 0x9E;

pub const REG_ID: u8 = 0xD0;
pub const REG_VERSION: u8 = 0xD1;
pub const REG_SOFT_RESET: u8 = 0xE0;

pub const REG_CONTROL: u8 = 0xF4;
pub const REG_CONFIG: u8 = 0xF5;

/// Pressure data, 3 bytes MSB first.
pub const REG_PRESSURE_DATA: u8 = 0xF7;
/// Temperature data, 3 bytes MSB first.
pub const REG_TEMPERATURE_DATA: u8 = 0xFA;
