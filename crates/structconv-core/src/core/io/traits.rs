use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for whole-file text conversions.
///
/// A converter is a pure function from one input text to one output text. Implementors only
/// provide [`TextConverter::convert_str`]; the reader, writer and path based helpers are
/// derived from it.
pub trait TextConverter {
    /// The error type for conversion and I/O failures.
    type Error: Error + From<io::Error>;

    /// Converts a complete input document into the complete output document.
    ///
    /// # Errors
    ///
    /// Returns an error if a required section of the input is missing or unreadable.
    /// Implementations never return partial output.
    fn convert_str(input: &str) -> Result<String, Self::Error>;

    /// Reads the whole of `reader`, converts it and writes the result to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, converting or writing fails.
    fn convert_reader(reader: &mut impl Read, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let output = Self::convert_str(&input)?;
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Converts the file at `input` and writes the result to `output`.
    ///
    /// The output file is only created once the conversion has succeeded, so a failed
    /// conversion never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, the conversion fails, or the output
    /// cannot be written.
    fn convert_path<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<(), Self::Error> {
        let text = fs::read_to_string(input)?;
        let converted = Self::convert_str(&text)?;
        let file = File::create(output)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(converted.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
