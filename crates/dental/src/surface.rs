//! Tooth surfaces and their single-letter wire codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::{DentalError, DentalResult};

/// A set of surfaces. Iteration follows declaration order of [`DentalSurface`]; use
/// [`DentalSurface::render`] for wire order.
pub type SurfaceSet = BTreeSet<DentalSurface>;

/// A treatable tooth surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DentalSurface {
    Mesial,
    Distal,
    /// Facial surface; `V` on the wire.
    Vestibular,
    Lingual,
    Occlusal,
    Incisal,
    Palatal,
}

impl DentalSurface {
    pub const ALL: [DentalSurface; 7] = [
        DentalSurface::Mesial,
        DentalSurface::Distal,
        DentalSurface::Vestibular,
        DentalSurface::Lingual,
        DentalSurface::Occlusal,
        DentalSurface::Incisal,
        DentalSurface::Palatal,
    ];

    /// Single-letter wire code.
    pub fn code(self) -> char {
        match self {
            DentalSurface::Mesial => 'M',
            DentalSurface::Distal => 'D',
            DentalSurface::Vestibular => 'V',
            DentalSurface::Lingual => 'L',
            DentalSurface::Occlusal => 'O',
            DentalSurface::Incisal => 'I',
            DentalSurface::Palatal => 'P',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DentalSurface::Mesial => "MESIAL",
            DentalSurface::Distal => "DISTAL",
            DentalSurface::Vestibular => "VESTIBULAR",
            DentalSurface::Lingual => "LINGUAL",
            DentalSurface::Occlusal => "OCCLUSAL",
            DentalSurface::Incisal => "INCISAL",
            DentalSurface::Palatal => "PALATAL",
        }
    }

    /// Position of the surface when rendered; lower comes first.
    pub fn priority(self) -> u8 {
        match self {
            DentalSurface::Vestibular => 0,
            DentalSurface::Occlusal => 1,
            DentalSurface::Distal => 2,
            DentalSurface::Mesial => 3,
            DentalSurface::Lingual => 4,
            DentalSurface::Incisal => 5,
            DentalSurface::Palatal => 6,
        }
    }

    /// Case-sensitive lookup by wire code.
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// Parse a run of wire codes such as `"VML"` into a set.
    ///
    /// Whitespace is ignored and duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`DentalError::UnknownSurface`] for the first letter that is not a surface code.
    pub fn from_codes(codes: &str) -> DentalResult<SurfaceSet> {
        codes
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Self::from_code(c).ok_or(DentalError::UnknownSurface(c)))
            .collect()
    }

    /// Concatenate the codes of `surfaces` in priority order, e.g. `{MESIAL, OCCLUSAL}` -> `"OM"`.
    pub fn render<'a>(surfaces: impl IntoIterator<Item = &'a DentalSurface>) -> String {
        let mut ordered: Vec<DentalSurface> = surfaces.into_iter().copied().collect();
        ordered.sort_by_key(|s| s.priority());
        ordered.dedup();
        ordered.into_iter().map(DentalSurface::code).collect()
    }
}

impl fmt::Display for DentalSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for surface in DentalSurface::ALL {
            assert_eq!(DentalSurface::from_code(surface.code()), Some(surface));
        }
        assert_eq!(DentalSurface::from_code('m'), None);
        assert_eq!(DentalSurface::from_code('X'), None);
    }

    #[test]
    fn from_codes_collects_a_set() {
        let set = DentalSurface::from_codes("VML").expect("valid codes");
        assert_eq!(set.len(), 3);
        assert!(set.contains(&DentalSurface::Vestibular));
        assert!(set.contains(&DentalSurface::Mesial));
        assert!(set.contains(&DentalSurface::Lingual));

        assert!(DentalSurface::from_codes("").expect("empty").is_empty());
        assert_eq!(DentalSurface::from_codes("O O").expect("dup").len(), 1);
    }

    #[test]
    fn from_codes_reports_unknown_letter() {
        let err = DentalSurface::from_codes("VXM").expect_err("X is not a surface");
        assert!(matches!(err, DentalError::UnknownSurface('X')));
    }

    #[test]
    fn render_uses_priority_not_insertion_order() {
        let surfaces = [
            DentalSurface::Palatal,
            DentalSurface::Mesial,
            DentalSurface::Occlusal,
            DentalSurface::Vestibular,
            DentalSurface::Distal,
        ];
        assert_eq!(DentalSurface::render(&surfaces), "VODMP");

        let set: SurfaceSet = [DentalSurface::Mesial, DentalSurface::Occlusal].into();
        assert_eq!(DentalSurface::render(&set), "OM");
        assert_eq!(DentalSurface::render(&SurfaceSet::new()), "");
    }
}
