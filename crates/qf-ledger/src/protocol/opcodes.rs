//! # Operation Codes
//!
//! Leading payload byte of the explicit operations.

use std::fmt;

/// Explicit operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Configure the ledger. Only valid while uninitialized.
    Initialize = 0x00,
    /// Open a new campaign, paying the creation fee.
    CreateCampaign = 0x01,
    /// Close a campaign whose deadline has passed.
    FinalizeCampaign = 0x02,
    /// Pay out accrued dividends to the caller.
    ClaimDividends = 0x03,
}

impl OpCode {
    /// Explicit operations recognized on an initialized ledger, in match priority order.
    pub const EXPLICIT: [Self; 3] = [
        Self::CreateCampaign,
        Self::FinalizeCampaign,
        Self::ClaimDividends,
    ];

    /// Decodes an opcode byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Initialize),
            0x01 => Some(Self::CreateCampaign),
            0x02 => Some(Self::FinalizeCampaign),
            0x03 => Some(Self::ClaimDividends),
            _ => None,
        }
    }

    /// Returns the opcode byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Total encoded payload length, opcode included.
    #[must_use]
    pub const fn payload_len(self) -> usize {
        match self {
            // opcode + ipo_end_epoch + ipo_share_price + creation_fee
            Self::Initialize => 1 + 8 + 8 + 8,
            // opcode + beneficiary + goal + duration_epochs
            Self::CreateCampaign => 1 + 32 + 8 + 8,
            // opcode + campaign index
            Self::FinalizeCampaign => 1 + 2,
            Self::ClaimDividends => 1,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initialize => "INITIALIZE",
            Self::CreateCampaign => "CREATE_CAMPAIGN",
            Self::FinalizeCampaign => "FINALIZE_CAMPAIGN",
            Self::ClaimDividends => "CLAIM_DIVIDENDS",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte() {
        assert_eq!(OpCode::from_byte(0x00), Some(OpCode::Initialize));
        assert_eq!(OpCode::from_byte(0x03), Some(OpCode::ClaimDividends));
        assert_eq!(OpCode::from_byte(0x04), None);
        assert_eq!(OpCode::from_byte(0xFF), None);
    }

    #[test]
    fn test_payload_lengths() {
        assert_eq!(OpCode::Initialize.payload_len(), 25);
        assert_eq!(OpCode::CreateCampaign.payload_len(), 49);
        assert_eq!(OpCode::FinalizeCampaign.payload_len(), 3);
        assert_eq!(OpCode::ClaimDividends.payload_len(), 1);
    }

    #[test]
    fn test_explicit_priority_order() {
        let bytes: Vec<u8> = OpCode::EXPLICIT.iter().map(|op| op.as_byte()).collect();
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
