//! Xyz point clouds.
//!
//! One point per text line, either `x y z` or `x y z r g b` with colors
//! as 0-255 integers. A blank line ends the current scan line and starts
//! the next, so the sweep structure survives a round trip. This is the
//! only format with a reader; everything else here is write-only.

use lathe_geometry::{ScanLine, ScanPoint, Vec3};
use lathe_pipeline::errors::TaskError;
use lathe_scan::context::FileFilter;
use std::{
	error::Error,
	fmt::{Display, Formatter},
	io::{BufRead, Write},
	str::FromStr,
};

/// The usual file extension for this format
pub const EXTENSION: &str = "xyz";

/// The dialog filter for this format
pub const FILTER: FileFilter = FileFilter {
	description: "Xyz file",
	extension: EXTENSION,
};

/// An error produced while reading an xyz file
#[derive(Debug)]
pub enum XyzError {
	/// An i/o error while reading
	IoError(std::io::Error),

	/// A record with the wrong number of fields
	BadRecord {
		/// The 1-based line number of the bad record
		line: usize,
		/// How many fields it had
		n_fields: usize,
	},

	/// A field that should have been a number, but wasn't
	BadNumber {
		/// The 1-based line number of the bad field
		line: usize,
		/// The field as it appeared in the file
		value: String,
	},
}

impl Display for XyzError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::IoError(_) => write!(f, "i/o error while reading xyz"),
			Self::BadRecord { line, n_fields } => {
				write!(f, "line {line}: expected 3 or 6 fields, got {n_fields}")
			}
			Self::BadNumber { line, value } => {
				write!(f, "line {line}: `{value}` is not a number")
			}
		}
	}
}

impl Error for XyzError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(match self {
			Self::IoError(e) => e,
			_ => return None,
		})
	}
}

impl From<std::io::Error> for XyzError {
	fn from(value: std::io::Error) -> Self {
		Self::IoError(value)
	}
}

impl From<XyzError> for TaskError {
	fn from(value: XyzError) -> Self {
		match value {
			XyzError::IoError(e) => TaskError::IoError(e),
			x => TaskError::Other(Box::new(x)),
		}
	}
}

/// Write scan lines as xyz text, one blank-separated block per line.
pub fn write_lines<W>(out: &mut W, lines: &[ScanLine]) -> Result<(), std::io::Error>
where
	W: Write,
{
	for (i, line) in lines.iter().enumerate() {
		if i != 0 {
			writeln!(out)?;
		}
		for p in line.iter() {
			writeln!(
				out,
				"{} {} {} {} {} {}",
				p.position.x, p.position.y, p.position.z, p.color[0], p.color[1], p.color[2],
			)?;
		}
	}
	return Ok(());
}

/// Read blank-separated scan lines from xyz text.
///
/// Three-field records get a white color. Empty scan lines are dropped,
/// so reading back a written file reproduces the original grouping.
pub fn read_lines<R>(input: R) -> Result<Vec<ScanLine>, XyzError>
where
	R: BufRead,
{
	let mut lines = Vec::new();
	let mut current = ScanLine::new();

	for (i, text) in input.lines().enumerate() {
		let line_no = i + 1;
		let text = text?;
		let trimmed = text.trim();

		if trimmed.is_empty() {
			if !current.is_empty() {
				lines.push(std::mem::take(&mut current));
			}
			continue;
		}

		let fields: Vec<&str> = trimmed.split_whitespace().collect();
		if fields.len() != 3 && fields.len() != 6 {
			return Err(XyzError::BadRecord {
				line: line_no,
				n_fields: fields.len(),
			});
		}

		let position = Vec3::new(
			parse_field(fields[0], line_no)?,
			parse_field(fields[1], line_no)?,
			parse_field(fields[2], line_no)?,
		);
		let mut point = ScanPoint::new(position);
		if fields.len() == 6 {
			point = point.with_color([
				parse_field(fields[3], line_no)?,
				parse_field(fields[4], line_no)?,
				parse_field(fields[5], line_no)?,
			]);
		}
		current.push(point);
	}

	if !current.is_empty() {
		lines.push(current);
	}
	return Ok(lines);
}

fn parse_field<T>(value: &str, line: usize) -> Result<T, XyzError>
where
	T: FromStr,
{
	value.parse().map_err(|_| XyzError::BadNumber {
		line,
		value: value.into(),
	})
}
