//! The interactive advising menu.

use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use advisor::{Config, Course, CourseId, CourseIndex, LoadError, storage};
use tracing::instrument;

use super::terminal::Style;

/// The options offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Load,
    List,
    Find,
    Exit,
}

impl TryFrom<i64> for MenuChoice {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Load),
            2 => Ok(Self::List),
            3 => Ok(Self::Find),
            9 => Ok(Self::Exit),
            other => Err(other),
        }
    }
}

/// A menu-driven session over a single course index.
///
/// The shell reads from any [`BufRead`] and writes to any [`Write`], so the
/// same loop drives the terminal and the tests. End of input ends the session
/// as if the exit option had been chosen.
pub struct Shell<'a, R, W> {
    input: R,
    output: W,
    index: &'a mut CourseIndex,
    config: &'a Config,
    style: Style,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub const fn new(
        input: R,
        output: W,
        index: &'a mut CourseIndex,
        config: &'a Config,
        style: Style,
    ) -> Self {
        Self {
            input,
            output,
            index,
            config,
            style,
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "{}",
            self.style.info("Welcome to the ABCU Advising Program!")
        )?;

        loop {
            self.write_menu()?;

            let Some(choice) = self.read_choice()? else {
                break;
            };

            match MenuChoice::try_from(choice) {
                Ok(MenuChoice::Load) => {
                    let Some(name) = self.prompt("Enter the name of the file to load: ")? else {
                        break;
                    };
                    self.load(Path::new(&name))?;
                }
                Ok(MenuChoice::List) => self.list()?,
                Ok(MenuChoice::Find) => {
                    let Some(key) = self.prompt("What course do you want to know about? ")? else {
                        break;
                    };
                    self.find(&key)?;
                }
                Ok(MenuChoice::Exit) => break,
                Err(other) => {
                    tracing::debug!(choice = other, "unknown menu choice");
                    writeln!(
                        self.output,
                        "{}",
                        self.style.warning("Invalid menu choice. Please try again.")
                    )?;
                }
            }
        }

        writeln!(
            self.output,
            "Thank you for using the advising program. Goodbye!"
        )?;
        self.output.flush()
    }

    /// Loads a catalogue file into the index and reports how many courses
    /// were added.
    ///
    /// A missing or unreadable file is reported to the user and is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the report fails.
    pub fn load(&mut self, path: &Path) -> io::Result<()> {
        match storage::load_path(path, self.index, self.config) {
            Ok(report) => {
                let message = format!("{} courses loaded successfully.", report.loaded);
                writeln!(self.output, "{}", self.style.success(&message))
            }
            Err(LoadError::NotFound { path }) => {
                tracing::warn!(path = %path.display(), "catalogue file not found");
                let message = format!("Error: Could not open file {}", path.display());
                writeln!(self.output, "{}", self.style.warning(&message))
            }
            Err(error @ LoadError::Io { .. }) => {
                tracing::warn!(%error, "catalogue file could not be read");
                let message = format!("Error: {error}");
                writeln!(self.output, "{}", self.style.warning(&message))
            }
        }
    }

    fn list(&mut self) -> io::Result<()> {
        let heading = "Here is a list of all courses in alphanumeric order:";
        writeln!(self.output, "\n{}", self.style.info(heading))?;
        for course in self.index.iter() {
            writeln!(self.output, "{}, {}", course.id(), course.title())?;
        }
        Ok(())
    }

    fn find(&mut self, raw_key: &str) -> io::Result<()> {
        let key = self.config.normalize_key(raw_key);
        match self.index.find(&key) {
            Some(course) => write_course(&mut self.output, course, self.style),
            None => {
                let message = format!("Course with ID {key} not found.");
                writeln!(self.output, "{}", self.style.warning(&message))
            }
        }
    }

    fn write_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", self.style.info("Menu:"))?;
        writeln!(self.output, "1. Load Data")?;
        writeln!(self.output, "2. Print All Courses")?;
        writeln!(self.output, "3. Find Course Information")?;
        writeln!(self.output, "9. Exit")
    }

    /// Prompts until a number is entered. Returns `None` at end of input.
    fn read_choice(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(answer) = self.prompt("Enter your choice: ")? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => writeln!(
                    self.output,
                    "{}",
                    self.style.warning("Invalid input. Please enter a number.")
                )?,
            }
        }
    }

    /// Writes `text` and reads the next non-blank line, trimmed.
    ///
    /// Blank lines are skipped without re-prompting. Returns `None` at end
    /// of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }
            let answer = line.trim();
            if !answer.is_empty() {
                return Ok(Some(answer.to_string()));
            }
        }
    }
}

/// Writes the detail view of a single course.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_course<W: Write>(out: &mut W, course: &Course, style: Style) -> io::Result<()> {
    writeln!(out, "\n{} {}", style.dim("Course ID:"), course.id())?;
    writeln!(out, "{} {}", style.dim("Title:"), course.title())?;

    let prerequisites = if course.has_prerequisites() {
        course
            .prerequisites()
            .iter()
            .map(CourseId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "None".to_string()
    };
    writeln!(out, "{} {prerequisites}", style.dim("Prerequisites:"))
}
