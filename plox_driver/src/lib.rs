use std::{
    fmt::Display,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

pub use clap::Parser;
use plox_base::{
    diagnostic::{Counter, Handler},
    log::Message,
    source_file::{self, SourceFile},
};
use plox_lexical::{error, token_stream::TokenStream};
use rustyline::{error::ReadlineError, DefaultEditor};
use thiserror::Error;

/// The prompt printed before every line read in the interactive mode.
pub const PROMPT: &str = "> ";

/// The name given to the source of every line read in the interactive mode.
pub const PROMPT_SOURCE_NAME: &str = "<prompt>";

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "plox",
    about = "Tokenizes plox scripts and prints their tokens.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The script to tokenize. Starts the interactive prompt when omitted.
    pub file: Option<PathBuf>,
}

/// The status the process exits with, following the BSD `sysexits` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// Everything went fine.
    Success,

    /// The command line arguments are malformed.
    Usage,

    /// The script has lexical errors or isn't valid UTF-8.
    DataError,

    /// The script can't be opened.
    NoInput,

    /// Reading the input or writing the output failed.
    IoError,
}

impl Status {
    /// Gets the numeric exit code of the status.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Usage => 64,
            Self::DataError => 65,
            Self::NoInput => 66,
            Self::IoError => 74,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self { Self::from(status.code()) }
}

/// Is an error that stops the driver before or while tokenizing the input.
#[derive(Debug, Error)]
pub enum Error {
    /// The given script path doesn't exist.
    #[error("{}: file not found", .0.display())]
    FileNotFound(PathBuf),

    /// The script exists but can't be loaded.
    #[error("{}: {}", .0.display(), .1)]
    SourceFile(PathBuf, #[source] source_file::Error),

    /// Writing the tokens failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Reading a line of the interactive prompt failed.
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

impl Error {
    /// Gets the status the process should exit with because of this error.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::FileNotFound(..) | Self::SourceFile(_, source_file::Error::IoError(..)) => {
                Status::NoInput
            }
            Self::SourceFile(_, source_file::Error::Utf8Error(..)) => Status::DataError,
            Self::Io(..) | Self::Readline(..) => Status::IoError,
        }
    }
}

/// A struct that implements [`Handler`] but prints all the message to the standard error stream.
#[derive(Debug, Default)]
pub struct Printer {
    counter: Counter,
}

impl Printer {
    /// Checks if any diagnostic has been printed since the last [`Printer::reset`].
    #[must_use]
    pub fn has_printed(&self) -> bool { self.counter.count() > 0 }

    /// Forgets about the diagnostics printed so far.
    pub fn reset(&self) { self.counter.reset(); }
}

impl<E: Display> Handler<E> for Printer {
    fn receive(&self, error: E) {
        eprintln!("{error}");
        self.counter.receive(error);
    }
}

/// Tokenizes the given source file and writes its tokens to `output`, one token per line.
///
/// # Errors
/// Returns the error of writing to `output`.
pub fn print_tokens(
    source_file: &Arc<SourceFile>,
    output: &mut impl Write,
    handler: &dyn Handler<error::Error>,
) -> io::Result<()> {
    let token_stream = TokenStream::tokenize(source_file, handler);
    write!(output, "{token_stream}")?;
    output.flush()
}

/// Loads the script at the given path and prints its tokens.
///
/// Lexical errors are reported to the `handler` and don't make this function fail.
///
/// # Errors
/// - [`Error::FileNotFound`]: The path doesn't point to an existing file.
/// - [`Error::SourceFile`]: The file can't be opened, mapped or isn't valid UTF-8.
/// - [`Error::Io`]: Writing to `output` failed.
pub fn run_file(
    path: &Path,
    output: &mut impl Write,
    handler: &dyn Handler<error::Error>,
) -> Result<(), Error> {
    let file = File::open(path).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_owned())
        } else {
            Error::SourceFile(path.to_owned(), error.into())
        }
    })?;

    let source_file = SourceFile::load(file, path.to_owned())
        .map_err(|error| Error::SourceFile(path.to_owned(), error))?;

    print_tokens(&source_file, output, handler)?;
    Ok(())
}

/// Tokenizes a single line read from the interactive prompt and prints its tokens.
///
/// Every line is a source on its own, so the line numbers start over at 1.
///
/// # Errors
/// Returns the error of writing to `output`.
pub fn run_line(
    line: &str,
    output: &mut impl Write,
    handler: &dyn Handler<error::Error>,
) -> io::Result<()> {
    let source_file = SourceFile::from_string(PROMPT_SOURCE_NAME, line);
    print_tokens(&source_file, output, handler)
}

/// Runs the interactive prompt until an empty line or the end of the input is reached.
///
/// # Errors
/// - [`Error::Readline`]: The terminal can't be read from.
/// - [`Error::Io`]: Writing to the standard output failed.
pub fn run_prompt(printer: &Printer) -> Result<(), Error> {
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(error) => return Err(error.into()),
        };

        if line.is_empty() {
            break;
        }

        editor.add_history_entry(line.as_str())?;

        run_line(&line, &mut io::stdout().lock(), printer)?;

        // a bad line never affects the following ones
        printer.reset();
    }

    Ok(())
}

/// Handles the arguments that failed to parse.
///
/// Help and version requests are printed as is; anything else, such as more than one script,
/// prints the usage line.
#[must_use]
pub fn usage(error: &clap::Error) -> Status {
    match error.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
            print!("{error}");
            Status::Success
        }
        _ => {
            println!("Usage: plox [script]");
            Status::Usage
        }
    }
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Argument) -> Status {
    let printer = Printer::default();

    let result = match &argument.file {
        Some(path) => run_file(path, &mut io::stdout().lock(), &printer),
        None => run_prompt(&printer),
    };

    match result {
        // only the file mode fails on lexical errors; the prompt resets after every line
        Ok(()) if printer.has_printed() => Status::DataError,
        Ok(()) => Status::Success,
        Err(error) => {
            eprintln!("{}", Message::new(&error));
            error.status()
        }
    }
}

#[cfg(test)]
mod tests;
