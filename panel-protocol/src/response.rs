//! Response bodies sent back to the host
//!
//! Every command produces exactly one response frame. Success is `_OK_`;
//! failures are 9-byte codes of the form `_GGGRRRR_` where `GGG` names the
//! subsystem.

/// Success marker
pub const OK: &[u8] = b"_OK_";

/// Placeholder for a code the decoder does not know
pub const UNEXPECTED: &[u8] = b"_NTEX_";

/// Every response the panel can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    Ok,
    // Field parsing
    StrWrongCharacter,
    StrWrongHexDigit,
    // Command lookup
    CmdNotFound,
    CmdCorruptedPackage,
    // Status LEDs
    LedWrongId,
    LedWrongState,
    // Character LCD
    LcdWrongLineId,
    LcdWrongPosition,
    // Buzzer
    BuzWrongTime,
    // Graphic display
    OledWrongControlByte,
    OledWrongCommandId,
    OledFailToStop,
    OledFailToStart,
    // Stepper
    MotWrongDirection,
    MotBusy,
    // Two-wire bus
    TwiBusy,
    /// Anything not in the table above
    Unexpected,
}

const TABLE: &[(Response, &[u8])] = &[
    (Response::Ok, OK),
    (Response::StrWrongCharacter, b"_STRWRCR_"),
    (Response::StrWrongHexDigit, b"_STRSWHX_"),
    (Response::CmdNotFound, b"_CMDCMNF_"),
    (Response::CmdCorruptedPackage, b"_CMDCRPG_"),
    (Response::LedWrongId, b"_LEDWLID_"),
    (Response::LedWrongState, b"_LEDWLST_"),
    (Response::LcdWrongLineId, b"_LCDWLID_"),
    (Response::LcdWrongPosition, b"_LCDWPOS_"),
    (Response::BuzWrongTime, b"_BUZWRTM_"),
    (Response::OledWrongControlByte, b"_OLDWRCB_"),
    (Response::OledWrongCommandId, b"_OLDWCID_"),
    (Response::OledFailToStop, b"_OLDFSOP_"),
    (Response::OledFailToStart, b"_OLDFSRT_"),
    (Response::MotWrongDirection, b"_MOTWDID_"),
    (Response::MotBusy, b"_MOTBUSY_"),
    (Response::TwiBusy, b"_TWIBUSY_"),
];

impl Response {
    /// Wire body for this response
    pub fn as_bytes(self) -> &'static [u8] {
        TABLE
            .iter()
            .find(|(r, _)| *r == self)
            .map(|(_, bytes)| *bytes)
            .unwrap_or(UNEXPECTED)
    }

    /// Map a received body back to a response
    ///
    /// Unknown bodies decode as [`Response::Unexpected`].
    pub fn from_bytes(body: &[u8]) -> Self {
        TABLE
            .iter()
            .find(|(_, bytes)| *bytes == body)
            .map(|(r, _)| *r)
            .unwrap_or(Response::Unexpected)
    }

    /// True for the success response
    pub fn is_ok(self) -> bool {
        self == Response::Ok
    }
}
