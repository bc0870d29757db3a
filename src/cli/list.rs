use std::{
    io::{self, Write},
    path::PathBuf,
};

use advisor::{Config, Course, CourseId, CourseIndex};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::instrument;

/// Command arguments for `advisor list`.
#[derive(Debug, Parser)]
#[command(about = "List every course in alphanumeric order")]
pub struct List {
    /// The catalogue file to load
    file: PathBuf,

    /// Output format (default: pretty).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// A course as it appears in JSON output.
#[derive(Debug, Serialize)]
pub struct CourseRow<'a> {
    id: &'a str,
    title: &'a str,
    prerequisites: Vec<&'a str>,
}

impl<'a> From<&'a Course> for CourseRow<'a> {
    fn from(course: &'a Course) -> Self {
        Self {
            id: course.id().as_str(),
            title: course.title(),
            prerequisites: course.prerequisites().iter().map(CourseId::as_str).collect(),
        }
    }
}

impl List {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let index = super::load_index(&self.file, config)?;
        let mut stdout = io::stdout().lock();
        render(&index, self.output, &mut stdout)?;
        Ok(())
    }
}

fn render<W: Write>(index: &CourseIndex, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Pretty => {
            for course in index {
                writeln!(out, "{}, {}", course.id(), course.title())?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<CourseRow> = index.iter().map(CourseRow::from).collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CourseIndex {
        let config = Config::default();
        let mut index = CourseIndex::new();
        let input = "CSCI200,Data Structures,CSCI101\nCSCI100,Introduction to Computer Science\n";
        advisor::storage::load_reader(input.as_bytes(), &mut index, &config).unwrap();
        index
    }

    #[test]
    fn pretty_lists_in_order() {
        let mut out = Vec::new();
        render(&index(), OutputFormat::Pretty, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "CSCI100, Introduction to Computer Science\nCSCI200, Data Structures\n"
        );
    }

    #[test]
    fn json_includes_prerequisites() {
        let mut out = Vec::new();
        render(&index(), OutputFormat::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"id": "CSCI100", "title": "Introduction to Computer Science", "prerequisites": []},
                {"id": "CSCI200", "title": "Data Structures", "prerequisites": ["CSCI101"]},
            ])
        );
    }

    #[test]
    fn empty_catalogue_is_an_empty_array() {
        let mut out = Vec::new();
        render(&CourseIndex::new(), OutputFormat::Json, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
