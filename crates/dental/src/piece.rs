//! Permanent teeth in FDI notation and their anatomical classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DentalError, DentalResult};

/// Anatomical group of a tooth. Drives which surfaces may be treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DentalPieceType {
    Incisivo,
    Canino,
    Premolar,
    Molar,
}

impl DentalPieceType {
    /// Upper-case wire name, e.g. `INCISIVO`.
    pub fn name(self) -> &'static str {
        match self {
            DentalPieceType::Incisivo => "INCISIVO",
            DentalPieceType::Canino => "CANINO",
            DentalPieceType::Premolar => "PREMOLAR",
            DentalPieceType::Molar => "MOLAR",
        }
    }

    /// Incisors and canines.
    pub fn is_anterior(self) -> bool {
        matches!(self, DentalPieceType::Incisivo | DentalPieceType::Canino)
    }
}

impl fmt::Display for DentalPieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A permanent tooth, identified by its two-digit FDI number (11..=48).
///
/// The first digit is the quadrant (1 upper right, 2 upper left, 3 lower left, 4 lower right),
/// the second the position from the midline (1..=8). Temporary teeth (51..=85) are not
/// representable here; see [`crate::catalog`] for display lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum DentalPiece {
    P11 = 11,
    P12 = 12,
    P13 = 13,
    P14 = 14,
    P15 = 15,
    P16 = 16,
    P17 = 17,
    P18 = 18,

    P21 = 21,
    P22 = 22,
    P23 = 23,
    P24 = 24,
    P25 = 25,
    P26 = 26,
    P27 = 27,
    P28 = 28,

    P31 = 31,
    P32 = 32,
    P33 = 33,
    P34 = 34,
    P35 = 35,
    P36 = 36,
    P37 = 37,
    P38 = 38,

    P41 = 41,
    P42 = 42,
    P43 = 43,
    P44 = 44,
    P45 = 45,
    P46 = 46,
    P47 = 47,
    P48 = 48,
}

impl DentalPiece {
    /// Every permanent tooth, in quadrant order.
    pub const ALL: [DentalPiece; 32] = [
        DentalPiece::P11,
        DentalPiece::P12,
        DentalPiece::P13,
        DentalPiece::P14,
        DentalPiece::P15,
        DentalPiece::P16,
        DentalPiece::P17,
        DentalPiece::P18,
        DentalPiece::P21,
        DentalPiece::P22,
        DentalPiece::P23,
        DentalPiece::P24,
        DentalPiece::P25,
        DentalPiece::P26,
        DentalPiece::P27,
        DentalPiece::P28,
        DentalPiece::P31,
        DentalPiece::P32,
        DentalPiece::P33,
        DentalPiece::P34,
        DentalPiece::P35,
        DentalPiece::P36,
        DentalPiece::P37,
        DentalPiece::P38,
        DentalPiece::P41,
        DentalPiece::P42,
        DentalPiece::P43,
        DentalPiece::P44,
        DentalPiece::P45,
        DentalPiece::P46,
        DentalPiece::P47,
        DentalPiece::P48,
    ];

    /// FDI number, e.g. `26`.
    pub fn fdi(self) -> u8 {
        self as u8
    }

    /// FDI number as rendered on the wire, e.g. `"26"`.
    pub fn fdi_code(self) -> String {
        self.fdi().to_string()
    }

    pub fn piece_type(self) -> DentalPieceType {
        match self.fdi() % 10 {
            1 | 2 => DentalPieceType::Incisivo,
            3 => DentalPieceType::Canino,
            4 | 5 => DentalPieceType::Premolar,
            _ => DentalPieceType::Molar,
        }
    }

    /// Look up a permanent tooth by FDI number.
    ///
    /// # Errors
    ///
    /// Returns [`DentalError::InvalidFdi`] for anything outside the permanent dentition,
    /// including temporary teeth.
    pub fn from_fdi(fdi: u8) -> DentalResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|piece| piece.fdi() == fdi)
            .ok_or(DentalError::InvalidFdi(fdi))
    }
}

impl fmt::Display for DentalPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fdi())
    }
}

impl From<DentalPiece> for u8 {
    fn from(piece: DentalPiece) -> Self {
        piece.fdi()
    }
}

impl TryFrom<u8> for DentalPiece {
    type Error = DentalError;

    fn try_from(fdi: u8) -> Result<Self, Self::Error> {
        Self::from_fdi(fdi)
    }
}

impl std::str::FromStr for DentalPiece {
    type Err = DentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let fdi = trimmed.parse::<u8>().map_err(|_| {
            DentalError::InvalidInput(format!("FDI tooth number must be numeric, got '{trimmed}'"))
        })?;
        Self::from_fdi(fdi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fdi_round_trips_every_piece() {
        for piece in DentalPiece::ALL {
            assert_eq!(DentalPiece::from_fdi(piece.fdi()).expect("known piece"), piece);
        }
    }

    #[test]
    fn from_fdi_rejects_temporary_and_out_of_range() {
        for fdi in [0, 10, 19, 20, 49, 51, 85, 99] {
            let err = DentalPiece::from_fdi(fdi).expect_err("should reject");
            assert!(matches!(err, DentalError::InvalidFdi(n) if n == fdi));
        }
    }

    #[test]
    fn classifies_by_position_in_quadrant() {
        assert_eq!(DentalPiece::P11.piece_type(), DentalPieceType::Incisivo);
        assert_eq!(DentalPiece::P32.piece_type(), DentalPieceType::Incisivo);
        assert_eq!(DentalPiece::P23.piece_type(), DentalPieceType::Canino);
        assert_eq!(DentalPiece::P44.piece_type(), DentalPieceType::Premolar);
        assert_eq!(DentalPiece::P35.piece_type(), DentalPieceType::Premolar);
        assert_eq!(DentalPiece::P26.piece_type(), DentalPieceType::Molar);
        assert_eq!(DentalPiece::P48.piece_type(), DentalPieceType::Molar);
    }

    #[test]
    fn parses_from_string() {
        assert_eq!(" 26 ".parse::<DentalPiece>().expect("valid"), DentalPiece::P26);
        assert!(matches!(
            "abc".parse::<DentalPiece>(),
            Err(DentalError::InvalidInput(_))
        ));
        assert!(matches!(
            "55".parse::<DentalPiece>(),
            Err(DentalError::InvalidFdi(55))
        ));
    }

    #[test]
    fn serializes_as_fdi_number() {
        assert_eq!(serde_json::to_string(&DentalPiece::P26).expect("serialize"), "26");
        let piece: DentalPiece = serde_json::from_str("47").expect("deserialize");
        assert_eq!(piece, DentalPiece::P47);
        assert!(serde_json::from_str::<DentalPiece>("61").is_err());
    }
}
