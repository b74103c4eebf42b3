//! The dental benefit: one treatment on (optionally) one tooth.

use hl7_types::DentalCode;

use crate::{
    DentalError, DentalPiece, DentalResult, DentalSurface, DentalSurfaceMatrix, SurfaceSet,
};

/// Longest dental value the backend accepts; it always travels in a single parameter.
pub const MAX_DENTAL_VALUE_LEN: usize = 255;

const TOTAL_COUNT: &str = "1";
const CODE_PREFIX: &str = "O";
const ORIGIN: &str = "P";
const ITEM_QUANTITY: &str = "1";

/// A dental benefit.
///
/// Immutable: the rendered HL7 fragment is computed once during construction, after the
/// piece/surface combination has passed [`DentalSurfaceMatrix::validate`].
///
/// Wire form: `1^*{fdi}*{surfaces}*O{code}*P*1**`, with an empty FDI when there is no piece and
/// the surface codes in priority order, e.g. `1^*26*OM*O020801*P*1**`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DentalBenefit {
    piece: Option<DentalPiece>,
    surfaces: SurfaceSet,
    code: DentalCode,
    value: String,
}

impl DentalBenefit {
    /// Build a dental benefit.
    ///
    /// # Errors
    ///
    /// - [`DentalError::InvalidCombination`] when the piece/surfaces pair breaks a matrix rule;
    /// - [`DentalError::ValueTooLong`] when the rendered value exceeds
    ///   [`MAX_DENTAL_VALUE_LEN`].
    pub fn new(
        piece: Option<DentalPiece>,
        surfaces: impl IntoIterator<Item = DentalSurface>,
        code: DentalCode,
    ) -> DentalResult<Self> {
        let surfaces: SurfaceSet = surfaces.into_iter().collect();

        let validation = DentalSurfaceMatrix::validate(piece, &surfaces);
        if !validation.is_valid() {
            return Err(DentalError::InvalidCombination(validation));
        }

        let value = render(piece, &surfaces, &code);
        if value.len() > MAX_DENTAL_VALUE_LEN {
            return Err(DentalError::ValueTooLong {
                len: value.len(),
                max: MAX_DENTAL_VALUE_LEN,
            });
        }

        Ok(Self {
            piece,
            surfaces,
            code,
            value,
        })
    }

    /// Build from raw editor input: optional FDI number, surface codes such as `"OM"`, and a
    /// numeric benefit code.
    pub fn parse(fdi: Option<u8>, surface_codes: &str, code: &str) -> DentalResult<Self> {
        let piece = fdi.map(DentalPiece::from_fdi).transpose()?;
        let surfaces = DentalSurface::from_codes(surface_codes)?;
        let code = DentalCode::new(code)?;
        Self::new(piece, surfaces, code)
    }

    /// Copy with some fields replaced. `None`, or an empty surface set, keeps the current value.
    ///
    /// The copy is validated like a fresh construction.
    pub fn with(
        &self,
        piece: Option<DentalPiece>,
        surfaces: Option<SurfaceSet>,
        code: Option<DentalCode>,
    ) -> DentalResult<Self> {
        let surfaces = surfaces
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.surfaces.clone());
        Self::new(
            piece.or(self.piece),
            surfaces,
            code.unwrap_or_else(|| self.code.clone()),
        )
    }

    pub fn piece(&self) -> Option<DentalPiece> {
        self.piece
    }

    pub fn surfaces(&self) -> &SurfaceSet {
        &self.surfaces
    }

    /// Benefit code without the `O` prefix.
    pub fn code(&self) -> &DentalCode {
        &self.code
    }

    /// Dental benefits always occupy the first (and only) position of a submission.
    pub fn order(&self) -> u32 {
        1
    }

    /// The HL7 fragment, without any parameter name.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

fn render(piece: Option<DentalPiece>, surfaces: &SurfaceSet, code: &DentalCode) -> String {
    let fdi = piece.map(DentalPiece::fdi_code).unwrap_or_default();
    format!(
        "{TOTAL_COUNT}^*{fdi}*{surfaces}*{CODE_PREFIX}{code}*{ORIGIN}*{ITEM_QUANTITY}**",
        surfaces = DentalSurface::render(surfaces),
    )
}
