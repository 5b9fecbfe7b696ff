use crate::core::io::arc::ArcFile;
use crate::core::io::car::CarFile;
use crate::core::io::traits::TextConverter;
use crate::workflows::error::ConversionError;
use tracing::{info, instrument};

/// Converts a Materials Studio CAR file into a single-frame BIOSYM archive.
///
/// Atoms are grouped by periodic-table order and stacked by ascending z within each element;
/// lines that do not look like atom records are dropped.
///
/// # Errors
///
/// Parsing never fails; an error is only returned if the output cannot be assembled.
#[instrument(skip_all, name = "car_to_archive")]
pub fn convert(input: &str) -> Result<String, ConversionError> {
    let structure = CarFile::parse(input);
    info!(atoms = structure.atoms.len(), "Writing archive.");

    let mut buffer = Vec::new();
    ArcFile::write_to(&structure, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// [`TextConverter`] adapter for [`convert`].
pub struct CarToArchive;

impl TextConverter for CarToArchive {
    type Error = ConversionError;

    fn convert_str(input: &str) -> Result<String, Self::Error> {
        convert(input)
    }
}
