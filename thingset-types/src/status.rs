//! Wire status codes (§6, §7).
//!
//! Binary and text carry independent numberings, so this type exposes both
//! separately rather than deriving one from the other.

/// A protocol-level outcome, shared by the binary and text wire forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    Valid,
    Changed,
    Content,
    InternalError,
    UnknownFunction,
    UnknownDataObject,
    WrongCategory,
    WrongFormat,
    WrongType,
    Unauthorized,
    RequestTooLong,
    ResponseTooLong,
    InvalidValue,
    /// Auth password mismatch. Shares its binary code with `InvalidValue`,
    /// the same way a single `TS_STATUS_INVALID_VALUE` constant covers both
    /// meanings on the wire.
    Conflict,
}

impl StatusCode {
    /// The low-6-bit code carried in the binary status byte (§6 table).
    pub fn binary_code(self) -> u8 {
        match self {
            StatusCode::Success => 0x00,
            StatusCode::Valid => 0x03,
            StatusCode::Changed => 0x04,
            StatusCode::Content => 0x05,
            StatusCode::InternalError => 0x20,
            StatusCode::UnknownFunction => 0x21,
            StatusCode::UnknownDataObject => 0x22,
            StatusCode::WrongFormat => 0x23,
            StatusCode::WrongType => 0x24,
            StatusCode::Unauthorized => 0x26,
            StatusCode::RequestTooLong => 0x27,
            StatusCode::ResponseTooLong => 0x28,
            StatusCode::InvalidValue | StatusCode::Conflict => 0x29,
            StatusCode::WrongCategory => 0x2A,
        }
    }

    /// The full binary status byte: `0x80 | binary_code`.
    pub fn binary_byte(self) -> u8 {
        0x80 | self.binary_code()
    }

    /// The two-hex-digit code shown on the text wire, e.g. `0xA1` for
    /// `:A1 Unauthorized.`.
    pub fn text_code(self) -> u8 {
        match self {
            StatusCode::Success => 0x80,
            StatusCode::Valid => 0x83,
            StatusCode::Changed => 0x84,
            StatusCode::Content => 0x85,
            StatusCode::UnknownFunction | StatusCode::UnknownDataObject | StatusCode::WrongCategory => 0xA4,
            StatusCode::WrongFormat | StatusCode::WrongType => 0xA0,
            StatusCode::Unauthorized => 0xA1,
            StatusCode::RequestTooLong => 0xA7,
            StatusCode::ResponseTooLong => 0xA8,
            StatusCode::InvalidValue | StatusCode::Conflict => 0xA9,
            StatusCode::InternalError => 0xB0,
        }
    }

    /// The human-readable phrase following the text status code.
    pub fn text_phrase(self) -> &'static str {
        match self {
            StatusCode::Success => "OK.",
            StatusCode::Valid => "Valid.",
            StatusCode::Changed => "Changed.",
            StatusCode::Content => "Content.",
            StatusCode::UnknownFunction | StatusCode::UnknownDataObject | StatusCode::WrongCategory => "Not Found.",
            StatusCode::WrongFormat | StatusCode::WrongType => "Bad Request.",
            StatusCode::Unauthorized => "Unauthorized.",
            StatusCode::RequestTooLong => "Request Too Large.",
            StatusCode::ResponseTooLong => "Response Too Large.",
            StatusCode::InvalidValue => "Invalid Value.",
            StatusCode::Conflict => "Conflict.",
            StatusCode::InternalError => "Internal Error.",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            StatusCode::Success | StatusCode::Valid | StatusCode::Changed | StatusCode::Content
        )
    }

    /// Formats a complete text status line, e.g. `:85 Content.`.
    pub fn text_line(self) -> String {
        format!(":{:02X} {}", self.text_code(), self.text_phrase())
    }
}
