//! Surface compatibility rules.
//!
//! Anterior teeth (incisors, canines) accept M, D, V, L, I, P. Posterior teeth (premolars,
//! molars) accept M, D, V, L, O, P. At most three surfaces may be treated at once, occlusal and
//! incisal are mutually exclusive, and surfaces without a tooth are never valid.

use serde::Serialize;

use crate::{DentalPiece, DentalSurface, SurfaceSet};

const ANTERIOR_SURFACES: [DentalSurface; 6] = [
    DentalSurface::Mesial,
    DentalSurface::Distal,
    DentalSurface::Vestibular,
    DentalSurface::Lingual,
    DentalSurface::Incisal,
    DentalSurface::Palatal,
];

const POSTERIOR_SURFACES: [DentalSurface; 6] = [
    DentalSurface::Mesial,
    DentalSurface::Distal,
    DentalSurface::Vestibular,
    DentalSurface::Lingual,
    DentalSurface::Occlusal,
    DentalSurface::Palatal,
];

/// Outcome of a dental combination check.
///
/// Either valid with no errors, or invalid with every violated rule listed in rule order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DentalValidationResult {
    valid: bool,
    errors: Vec<String>,
}

impl DentalValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Builds a result from accumulated messages; an empty list is valid.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// A single human-readable message: the only error, or all of them bullet-joined.
    pub fn message(&self) -> String {
        match self.errors.as_slice() {
            [] => "validation passed".to_string(),
            [only] => only.clone(),
            many => many.join("\n• "),
        }
    }
}

/// Surface compatibility matrix.
///
/// This is a zero-sized type used for namespacing the rule table. All methods are associated
/// functions.
pub struct DentalSurfaceMatrix;

impl DentalSurfaceMatrix {
    /// Maximum number of surfaces on a single benefit.
    pub const MAX_SURFACES: usize = 3;

    /// Surfaces that may be treated on `piece`. No piece permits no surfaces at all.
    pub fn allowed_surfaces(piece: Option<DentalPiece>) -> SurfaceSet {
        match piece {
            None => SurfaceSet::new(),
            Some(piece) if piece.piece_type().is_anterior() => {
                ANTERIOR_SURFACES.into_iter().collect()
            }
            Some(_) => POSTERIOR_SURFACES.into_iter().collect(),
        }
    }

    /// Check a piece/surfaces pair, collecting every violated rule.
    ///
    /// A piece with no surfaces is always valid (a general benefit on that tooth). Without a
    /// piece the only rule that applies is that no surfaces may be given.
    pub fn validate(piece: Option<DentalPiece>, surfaces: &SurfaceSet) -> DentalValidationResult {
        let mut errors = Vec::new();

        let Some(piece) = piece else {
            if !surfaces.is_empty() {
                errors.push("surfaces cannot be selected without a dental piece".to_string());
            }
            return DentalValidationResult::from_errors(errors);
        };

        let allowed = Self::allowed_surfaces(Some(piece));
        for surface in surfaces.iter().filter(|s| !allowed.contains(s)) {
            errors.push(format!(
                "surface {} ({}) is not allowed on piece {} ({})",
                surface.name(),
                surface.code(),
                piece.fdi(),
                piece.piece_type().name().to_lowercase()
            ));
        }

        if surfaces.len() > Self::MAX_SURFACES {
            errors.push(format!(
                "at most {} surfaces are allowed per benefit (selected: {})",
                Self::MAX_SURFACES,
                surfaces.len()
            ));
        }

        if surfaces.contains(&DentalSurface::Occlusal) && surfaces.contains(&DentalSurface::Incisal)
        {
            errors.push("occlusal (O) and incisal (I) surfaces cannot be combined".to_string());
        }

        tracing::debug!(
            piece = piece.fdi(),
            violations = errors.len(),
            "validated dental combination"
        );

        DentalValidationResult::from_errors(errors)
    }
}
