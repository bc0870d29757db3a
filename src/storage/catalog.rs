//! The delimited course catalogue format.
//!
//! Each line holds one course: the identifier, the title, and zero or more
//! prerequisite identifiers, separated by [`DELIMITER`]. There is no header
//! line and no escaping, so titles cannot contain the delimiter.
//!
//! ```text
//! CSCI100,Introduction to Computer Science
//! CSCI200,Data Structures,CSCI101
//! CSCI300,Introduction to Algorithms,CSCI200,MATH201
//! ```

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::{Config, Course, CourseId, CourseIndex, DuplicatePolicy};

/// The field separator.
pub const DELIMITER: char = ',';

/// Reasons a line does not yield a course record.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line has no title field.
    #[error("expected at least an identifier and a title")]
    TooFewFields,

    /// The identifier field is blank.
    #[error("course identifier is blank")]
    EmptyId,
}

/// Parses a single catalogue line into a course.
///
/// Fields are trimmed of surrounding whitespace. A single trailing delimiter
/// does not start a new field, so `CS101,` has one field and is rejected.
/// Blank prerequisite fields are ignored.
///
/// # Errors
///
/// Returns an error if the line has fewer than two fields or if the
/// identifier is blank.
pub fn parse_line(line: &str) -> Result<Course, ParseError> {
    let line = line.trim_end();
    let line = line.strip_suffix(DELIMITER).unwrap_or(line);
    let mut fields = line.split(DELIMITER).map(str::trim);

    let (Some(id), Some(title)) = (fields.next(), fields.next()) else {
        return Err(ParseError::TooFewFields);
    };

    let id = CourseId::try_from(id).map_err(|_| ParseError::EmptyId)?;
    let prerequisites = fields.filter_map(|field| CourseId::try_from(field).ok()).collect();

    Ok(Course::new(id, title.to_string(), prerequisites))
}

/// Summary of a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records inserted into the index.
    pub loaded: usize,

    /// Non-blank lines that could not be parsed.
    pub skipped: usize,

    /// Records not inserted because their identifier was already indexed.
    ///
    /// Always zero under [`DuplicatePolicy::Keep`].
    pub duplicates: usize,
}

/// Errors that can occur while loading a catalogue file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The path that was opened.
        path: PathBuf,
    },

    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that was opened.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

/// Reads catalogue lines from `reader` into `index`.
///
/// Malformed lines are skipped and counted; they are never reported
/// individually. Blank lines are ignored entirely. Records are appended to
/// whatever the index already holds.
///
/// # Errors
///
/// Returns an error if reading from `reader` fails. Records read before the
/// failure remain in the index.
#[instrument(level = "debug", skip_all)]
pub fn load_reader<R: BufRead>(
    reader: R,
    index: &mut CourseIndex,
    config: &Config,
) -> io::Result<LoadReport> {
    let mut report = LoadReport::default();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let course = match parse_line(&line) {
            Ok(course) if config.normalize_ids => course.to_uppercase(),
            Ok(course) => course,
            Err(error) => {
                tracing::debug!(line = number + 1, %error, "skipping malformed line");
                report.skipped += 1;
                continue;
            }
        };

        if config.duplicates == DuplicatePolicy::Reject && index.contains(course.id()) {
            tracing::debug!(line = number + 1, id = %course.id(), "skipping duplicate course");
            report.duplicates += 1;
            continue;
        }

        index.insert(course);
        report.loaded += 1;
    }

    tracing::info!(
        loaded = report.loaded,
        skipped = report.skipped,
        duplicates = report.duplicates,
        "catalogue read"
    );
    tracing::debug!(
        records = index.len(),
        height = index.height(),
        "index shape"
    );

    Ok(report)
}

/// Opens the file at `path` and loads it into `index`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist, or
/// [`LoadError::Io`] if it cannot be opened or read.
#[instrument(level = "debug", skip(index, config))]
pub fn load_path(
    path: &Path,
    index: &mut CourseIndex,
    config: &Config,
) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    load_reader(BufReader::new(file), index, config).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use test_case::test_case;

    use super::*;

    fn prerequisites(course: &Course) -> Vec<&str> {
        course.prerequisites().iter().map(CourseId::as_str).collect()
    }

    #[test_case("CSCI100,Intro to CS", "CSCI100", "Intro to CS", &[]; "no prerequisites")]
    #[test_case("CS101,Intro to CS,", "CS101", "Intro to CS", &[]; "trailing delimiter")]
    #[test_case("CS102,Data Structures,CS101", "CS102", "Data Structures", &["CS101"]; "one")]
    #[test_case("CS3,Algorithms,CS2,MA2", "CS3", "Algorithms", &["CS2", "MA2"]; "two")]
    #[test_case("CS4, Software , CS3 ,CS35\r", "CS4", "Software", &["CS3", "CS35"]; "whitespace")]
    #[test_case("CS1,Title,,CS0", "CS1", "Title", &["CS0"]; "empty field between prerequisites")]
    #[test_case("CS1,,", "CS1", "", &[]; "empty title")]
    fn parses(line: &str, id: &str, title: &str, expected: &[&str]) {
        let course = parse_line(line).unwrap();
        assert_eq!(course.id().as_str(), id);
        assert_eq!(course.title(), title);
        assert_eq!(prerequisites(&course), expected);
    }

    #[test_case("CSCI100", ParseError::TooFewFields; "single field")]
    #[test_case("CS1,", ParseError::TooFewFields; "single field with trailing delimiter")]
    #[test_case("CS1, \r", ParseError::TooFewFields; "trailing delimiter and carriage return")]
    #[test_case("", ParseError::TooFewFields; "empty line")]
    #[test_case(",Orphan Title", ParseError::EmptyId; "blank identifier")]
    #[test_case("  ,Orphan Title,CS1", ParseError::EmptyId; "whitespace identifier")]
    fn rejects(line: &str, expected: ParseError) {
        assert_eq!(parse_line(line), Err(expected));
    }

    #[test]
    fn loads_two_records() {
        let input = "CS101,Intro to CS,\nCS102,Data Structures,CS101\n";
        let mut index = CourseIndex::new();

        let report = load_reader(Cursor::new(input), &mut index, &Config::default()).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(index.len(), 2);
        let course = index.find("CS102").unwrap();
        assert_eq!(prerequisites(course), ["CS101"]);
    }

    #[test]
    fn malformed_line_is_skipped() {
        let input = "CS101\nCS102,Data Structures,CS101\n";
        let mut index = CourseIndex::new();

        let report = load_reader(Cursor::new(input), &mut index, &Config::default()).unwrap();

        assert_eq!(
            report,
            LoadReport {
                loaded: 1,
                skipped: 1,
                duplicates: 0,
            }
        );
        assert!(!index.contains("CS101"));
    }

    #[test]
    fn trailing_delimiter_alone_is_not_a_title() {
        let input = "CS1,\nCS2,Two\n";
        let mut index = CourseIndex::new();

        let report = load_reader(Cursor::new(input), &mut index, &Config::default()).unwrap();

        assert_eq!(
            report,
            LoadReport {
                loaded: 1,
                skipped: 1,
                duplicates: 0,
            }
        );
        assert!(!index.contains("CS1"));
        assert!(index.contains("CS2"));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let input = "\nCS101,Intro\n   \n";
        let mut index = CourseIndex::new();

        let report = load_reader(Cursor::new(input), &mut index, &Config::default()).unwrap();

        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn normalization_applies_to_ids_and_prerequisites() {
        let input = "cs102,Data Structures,cs101\n";
        let mut index = CourseIndex::new();

        load_reader(Cursor::new(input), &mut index, &Config::default()).unwrap();

        let course = index.find("CS102").unwrap();
        assert_eq!(course.title(), "Data Structures");
        assert_eq!(prerequisites(course), ["CS101"]);
    }

    #[test]
    fn verbatim_ids_without_normalization() {
        let input = "cs102,Data Structures,cs101\n";
        let mut index = CourseIndex::new();
        let config = Config {
            normalize_ids: false,
            ..Config::default()
        };

        load_reader(Cursor::new(input), &mut index, &config).unwrap();

        assert!(index.contains("cs102"));
        assert!(!index.contains("CS102"));
    }

    #[test_case(DuplicatePolicy::Keep, 3, 0; "keep")]
    #[test_case(DuplicatePolicy::Reject, 2, 1; "reject")]
    fn duplicate_policy(policy: DuplicatePolicy, loaded: usize, duplicates: usize) {
        let input = "CS101,First\nCS102,Other\nCS101,Second\n";
        let mut index = CourseIndex::new();
        let config = Config {
            duplicates: policy,
            ..Config::default()
        };

        let report = load_reader(Cursor::new(input), &mut index, &config).unwrap();

        assert_eq!(report.loaded, loaded);
        assert_eq!(report.duplicates, duplicates);
        assert_eq!(index.find("CS101").unwrap().title(), "First");
    }

    #[test]
    fn repeated_loads_append() {
        let mut index = CourseIndex::new();
        let config = Config::default();

        load_reader(Cursor::new("B,Second\n"), &mut index, &config).unwrap();
        load_reader(Cursor::new("A,First\n"), &mut index, &config).unwrap();

        let ids: Vec<&str> = index.ids().map(CourseId::as_str).collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[test]
    fn load_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CSCI200,Data Structures,CSCI101\nCSCI101,Intro to C++,CSCI100\n")
            .unwrap();
        let mut index = CourseIndex::new();

        let report = load_path(file.path(), &mut index, &Config::default()).unwrap();

        assert_eq!(report.loaded, 2);
        let ids: Vec<&str> = index.ids().map(CourseId::as_str).collect();
        assert_eq!(ids, ["CSCI101", "CSCI200"]);
    }

    #[test]
    fn load_path_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.csv");
        let mut index = CourseIndex::new();

        let error = load_path(&missing, &mut index, &Config::default()).unwrap_err();

        assert!(matches!(error, LoadError::NotFound { path } if path == missing));
        assert!(index.is_empty());
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CS101,Intro\n\xff\xfe,Broken\n").unwrap();
        let mut index = CourseIndex::new();

        let error = load_path(file.path(), &mut index, &Config::default()).unwrap_err();

        assert!(matches!(error, LoadError::Io { .. }));
        assert!(index.contains("CS101"));
    }
}
