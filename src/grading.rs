//! Student score import and grade report.
//!
//! Input is one `id,full_name,score` record per line. Blank lines are
//! skipped; every error names its 1-based line number.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors from reading score files or writing reports.
#[derive(Debug, Error)]
pub enum GradingError {
    /// Wrong field count or a blank name.
    #[error("Line {line}: {message}")]
    MissingField {
        line: usize,
        message: String,
    },

    /// The id is not a non-negative integer.
    #[error("Line {line}: Invalid ID format.")]
    InvalidId {
        line: usize,
    },

    /// The score is not an integer in 0..=100.
    #[error("Line {line}: {message}")]
    InvalidScore {
        line: usize,
        message: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GradingError {
    /// Line number the error refers to, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MissingField { line, .. }
            | Self::InvalidId { line }
            | Self::InvalidScore { line, .. } => Some(*line),
            Self::Io { .. } => None,
        }
    }
}

/// Letter grade bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    /// 80 to 100.
    A,
    /// 70 to 79.
    B,
    /// 60 to 69.
    C,
    /// 50 to 59.
    D,
    /// Below 50.
    F,
}

impl Grade {
    /// A: 80 to 100, B: 70 to 79, C: 60 to 69, D: 50 to 59, F: below 50.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=100 => Self::A,
            70..=79 => Self::B,
            60..=69 => Self::C,
            50..=59 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// One parsed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: u32,
    pub full_name: String,
    pub score: u8,
}

impl Student {
    /// Grade for this student's score.
    #[must_use]
    pub const fn grade(&self) -> Grade {
        Grade::from_score(self.score)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID: {}): Score = {}, Grade = {}",
            self.full_name,
            self.id,
            self.score,
            self.grade()
        )
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<Student, GradingError> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 3 {
        return Err(GradingError::MissingField {
            line: line_no,
            message: format!("Expected 3 fields, got {}.", parts.len()),
        });
    }

    let id = parts[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| GradingError::InvalidId { line: line_no })?;

    let full_name = parts[1].trim();
    if full_name.is_empty() {
        return Err(GradingError::MissingField {
            line: line_no,
            message: "Name is missing.".to_string(),
        });
    }

    let score = parts[2]
        .trim()
        .parse::<i64>()
        .map_err(|_| GradingError::InvalidScore {
            line: line_no,
            message: "Invalid score format.".to_string(),
        })?;
    let score = u8::try_from(score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| GradingError::InvalidScore {
            line: line_no,
            message: "Score must be between 0 and 100.".to_string(),
        })?;

    Ok(Student {
        id,
        full_name: full_name.to_string(),
        score,
    })
}

/// Parse every record from `reader`. Stops at the first bad line.
///
/// # Errors
/// The first malformed line, or a read failure (reported against `source`).
pub fn parse_students(reader: impl BufRead, source: &Path) -> Result<Vec<Student>, GradingError> {
    let mut students = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| GradingError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        students.push(parse_line(index + 1, &line)?);
    }
    Ok(students)
}

/// Read and parse a score file.
///
/// # Errors
/// `Io` if the file cannot be opened or read, otherwise see
/// [`parse_students`].
pub fn read_students(path: impl AsRef<Path>) -> Result<Vec<Student>, GradingError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GradingError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_students(BufReader::new(file), path)
}

/// Write one report line per student to `path`, replacing the file.
///
/// # Errors
/// `Io` on any write failure.
pub fn write_report(students: &[Student], path: impl AsRef<Path>) -> Result<(), GradingError> {
    let path = path.as_ref();
    let io_err = |e: std::io::Error| GradingError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    for student in students {
        writeln!(writer, "{student}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), count = students.len(), "wrote grade report");
    Ok(())
}
