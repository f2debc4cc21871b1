//! Controller command bytes and the power-up sequence

/// Default 7-bit bus address
pub const DISPLAY_ADDR: u8 = 0x3C;

/// Control byte: the following bytes are commands
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: the following bytes are display RAM data
pub const CONTROL_DATA: u8 = 0x40;

/// Controller commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SCROLL_RIGHT_SETUP: u8 = 0x26;

    /// Memory mode argument: horizontal addressing
    pub const HORIZONTAL_ADDRESSING: u8 = 0x00;
}

/// Length of [`INIT_SEQUENCE`] including its control byte
pub const INIT_SEQUENCE_LEN: usize = 35;

/// Power-up configuration, sent as one bus write
pub static INIT_SEQUENCE: [u8; INIT_SEQUENCE_LEN] = [
    CONTROL_COMMAND,
    cmd::DISPLAY_OFF,
    cmd::SET_MEMORY_MODE,
    cmd::HORIZONTAL_ADDRESSING,
    cmd::SET_PAGE_ADDR,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_LOW_COLUMN,
    cmd::SET_HIGH_COLUMN,
    cmd::SET_CONTRAST,
    0xFF,
    cmd::SET_SEG_REMAP,
    cmd::SET_NORMAL,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_CLOCK_DIV,
    0xF0, // Slowest oscillator, divide by 1
    cmd::SET_PRECHARGE,
    0x22,
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_VCOM_DETECT,
    0x20, // 0.77 x Vcc
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::RESUME_FROM_RAM,
    cmd::DISPLAY_ON,
    // Continuous right scroll over all pages, 2-frame interval
    cmd::SCROLL_RIGHT_SETUP,
    0x00,
    0x00, // start page
    0x07, // interval
    0x07, // end page
    0x00,
    0xFF,
];
