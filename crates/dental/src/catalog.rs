//! Static FDI (ISO 3950) tooth catalog for display and lookup.
//!
//! Covers both the permanent dentition (11..=48) and the temporary one (51..=85). Only permanent
//! teeth can be billed as a [`DentalPiece`]; temporary entries exist so editors can show a
//! description for any FDI number a user types.

use std::fmt;

use crate::{DentalPiece, DentalPieceType};

/// Which set of teeth to list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dentition {
    /// Adult teeth, FDI 11..=48.
    Permanent,
    /// Deciduous (child) teeth, FDI 51..=85.
    Temporary,
}

/// One tooth in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToothEntry {
    pub fdi: u8,
    pub description: &'static str,
    pub piece_type: DentalPieceType,
}

impl ToothEntry {
    const fn new(fdi: u8, description: &'static str, piece_type: DentalPieceType) -> Self {
        Self {
            fdi,
            description,
            piece_type,
        }
    }

    /// The billable piece for permanent teeth; `None` for temporary ones.
    pub fn piece(&self) -> Option<DentalPiece> {
        DentalPiece::from_fdi(self.fdi).ok()
    }

    pub fn dentition(&self) -> Dentition {
        if self.fdi >= 51 {
            Dentition::Temporary
        } else {
            Dentition::Permanent
        }
    }
}

impl fmt::Display for ToothEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.fdi, self.description, self.piece_type)
    }
}

use DentalPieceType::{Canino, Incisivo, Molar, Premolar};

static PERMANENT_TEETH: [ToothEntry; 32] = [
    // Upper right
    ToothEntry::new(11, "Upper right central incisor", Incisivo),
    ToothEntry::new(12, "Upper right lateral incisor", Incisivo),
    ToothEntry::new(13, "Upper right canine", Canino),
    ToothEntry::new(14, "Upper right first premolar", Premolar),
    ToothEntry::new(15, "Upper right second premolar", Premolar),
    ToothEntry::new(16, "Upper right first molar", Molar),
    ToothEntry::new(17, "Upper right second molar", Molar),
    ToothEntry::new(18, "Upper right third molar (wisdom tooth)", Molar),
    // Upper left
    ToothEntry::new(21, "Upper left central incisor", Incisivo),
    ToothEntry::new(22, "Upper left lateral incisor", Incisivo),
    ToothEntry::new(23, "Upper left canine", Canino),
    ToothEntry::new(24, "Upper left first premolar", Premolar),
    ToothEntry::new(25, "Upper left second premolar", Premolar),
    ToothEntry::new(26, "Upper left first molar", Molar),
    ToothEntry::new(27, "Upper left second molar", Molar),
    ToothEntry::new(28, "Upper left third molar (wisdom tooth)", Molar),
    // Lower left
    ToothEntry::new(31, "Lower left central incisor", Incisivo),
    ToothEntry::new(32, "Lower left lateral incisor", Incisivo),
    ToothEntry::new(33, "Lower left canine", Canino),
    ToothEntry::new(34, "Lower left first premolar", Premolar),
    ToothEntry::new(35, "Lower left second premolar", Premolar),
    ToothEntry::new(36, "Lower left first molar", Molar),
    ToothEntry::new(37, "Lower left second molar", Molar),
    ToothEntry::new(38, "Lower left third molar (wisdom tooth)", Molar),
    // Lower right
    ToothEntry::new(41, "Lower right central incisor", Incisivo),
    ToothEntry::new(42, "Lower right lateral incisor", Incisivo),
    ToothEntry::new(43, "Lower right canine", Canino),
    ToothEntry::new(44, "Lower right first premolar", Premolar),
    ToothEntry::new(45, "Lower right second premolar", Premolar),
    ToothEntry::new(46, "Lower right first molar", Molar),
    ToothEntry::new(47, "Lower right second molar", Molar),
    ToothEntry::new(48, "Lower right third molar (wisdom tooth)", Molar),
];

// Temporary molars sit where the permanent premolars erupt later; there are no temporary
// premolars.
static TEMPORARY_TEETH: [ToothEntry; 20] = [
    ToothEntry::new(51, "Upper right central incisor (temporary)", Incisivo),
    ToothEntry::new(52, "Upper right lateral incisor (temporary)", Incisivo),
    ToothEntry::new(53, "Upper right canine (temporary)", Canino),
    ToothEntry::new(54, "Upper right first molar (temporary)", Molar),
    ToothEntry::new(55, "Upper right second molar (temporary)", Molar),
    ToothEntry::new(61, "Upper left central incisor (temporary)", Incisivo),
    ToothEntry::new(62, "Upper left lateral incisor (temporary)", Incisivo),
    ToothEntry::new(63, "Upper left canine (temporary)", Canino),
    ToothEntry::new(64, "Upper left first molar (temporary)", Molar),
    ToothEntry::new(65, "Upper left second molar (temporary)", Molar),
    ToothEntry::new(71, "Lower left central incisor (temporary)", Incisivo),
    ToothEntry::new(72, "Lower left lateral incisor (temporary)", Incisivo),
    ToothEntry::new(73, "Lower left canine (temporary)", Canino),
    ToothEntry::new(74, "Lower left first molar (temporary)", Molar),
    ToothEntry::new(75, "Lower left second molar (temporary)", Molar),
    ToothEntry::new(81, "Lower right central incisor (temporary)", Incisivo),
    ToothEntry::new(82, "Lower right lateral incisor (temporary)", Incisivo),
    ToothEntry::new(83, "Lower right canine (temporary)", Canino),
    ToothEntry::new(84, "Lower right first molar (temporary)", Molar),
    ToothEntry::new(85, "Lower right second molar (temporary)", Molar),
];

/// All teeth of a dentition, in quadrant order.
pub fn teeth(dentition: Dentition) -> &'static [ToothEntry] {
    match dentition {
        Dentition::Permanent => &PERMANENT_TEETH,
        Dentition::Temporary => &TEMPORARY_TEETH,
    }
}

/// Find a tooth in either dentition by FDI number.
pub fn find_by_fdi(fdi: u8) -> Option<&'static ToothEntry> {
    PERMANENT_TEETH
        .iter()
        .chain(TEMPORARY_TEETH.iter())
        .find(|entry| entry.fdi == fdi)
}
