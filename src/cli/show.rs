use std::{io, path::PathBuf, process};

use advisor::{Config, Course, CourseId};
use clap::Parser;
use tracing::instrument;

use super::{list::OutputFormat, shell::write_course, terminal::Style};

#[derive(Debug, Parser)]
#[command(about = "Display a course and its prerequisites")]
pub struct Show {
    /// The catalogue file to load
    file: PathBuf,

    /// The identifier of the course to display
    id: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Show {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let index = super::load_index(&self.file, config)?;
        let key = config.normalize_key(&self.id);

        let Some(course) = index.find(&key) else {
            eprintln!("Course with ID {key} not found.");
            process::exit(1);
        };

        match self.output {
            OutputFormat::Pretty => {
                write_course(&mut io::stdout().lock(), course, Style::detect())?;
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(course))?),
        }

        Ok(())
    }
}

fn to_json(course: &Course) -> serde_json::Value {
    use serde_json::json;

    let prerequisites: Vec<_> = course.prerequisites().iter().map(CourseId::as_str).collect();

    json!({
        "id": course.id().as_str(),
        "title": course.title(),
        "prerequisites": prerequisites,
    })
}
