//! Output streams used by commands.
//!
//! Progress lines go to stdout and failures to stderr. Tests swap both for
//! in-memory buffers so the exact text can be asserted.

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Buffer = Arc<Mutex<Vec<u8>>>;

fn lock(buf: &Buffer) -> MutexGuard<'_, Vec<u8>> {
    buf.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Where one stream's lines end up.
#[derive(Debug)]
enum Sink {
    Stdout,
    Stderr,
    Captured(Buffer),
}

impl Sink {
    // Write errors (closed pipe and the like) are dropped, as `println!`
    // would otherwise panic on them.
    fn line(&self, args: fmt::Arguments<'_>) {
        fn emit(w: &mut impl Write, args: fmt::Arguments<'_>) {
            let _ = w.write_fmt(args);
            let _ = w.write_all(b"\n");
            let _ = w.flush();
        }

        match self {
            Self::Stdout => emit(&mut io::stdout().lock(), args),
            Self::Stderr => emit(&mut io::stderr().lock(), args),
            Self::Captured(buf) => emit(&mut *lock(buf), args),
        }
    }
}

/// Read side of the buffers behind [`IOStreams::test_with_output`].
#[derive(Debug, Clone)]
pub struct TestOutput {
    out: Buffer,
    err: Buffer,
}

impl TestOutput {
    /// Everything written to stdout so far.
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&lock(&self.out)).into_owned()
    }

    /// Everything written to stderr so far.
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&lock(&self.err)).into_owned()
    }
}

/// The pair of output streams a command writes to.
///
/// Use [`ios_println!`](crate::ios_println) and
/// [`ios_eprintln!`](crate::ios_eprintln) rather than `println!` so tests can
/// capture the output.
#[derive(Debug)]
pub struct IOStreams {
    out: Sink,
    err: Sink,
    stdout_is_tty: bool,
    no_color: bool,
}

impl IOStreams {
    /// Streams bound to the process stdout and stderr.
    ///
    /// Color is disabled when `NO_COLOR` is set or stdout is not a terminal.
    pub fn system() -> Self {
        Self {
            out: Sink::Stdout,
            err: Sink::Stderr,
            stdout_is_tty: io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
        }
    }

    /// Streams writing into memory, never colored.
    ///
    /// ```ignore
    /// let (ios, output) = IOStreams::test_with_output();
    /// ios_println!(ios, "hello");
    /// assert_eq!(output.stdout(), "hello\n");
    /// ```
    pub fn test_with_output() -> (Self, TestOutput) {
        let output = TestOutput {
            out: Buffer::default(),
            err: Buffer::default(),
        };
        let ios = Self {
            out: Sink::Captured(output.out.clone()),
            err: Sink::Captured(output.err.clone()),
            stdout_is_tty: false,
            no_color: true,
        };
        (ios, output)
    }

    /// Write one line to stdout.
    pub fn writeln_out(&self, args: fmt::Arguments<'_>) {
        self.out.line(args);
    }

    /// Write one line to stderr.
    pub fn writeln_err(&self, args: fmt::Arguments<'_>) {
        self.err.line(args);
    }

    /// Whether status icons are colored.
    pub fn color_enabled(&self) -> bool {
        self.stdout_is_tty && !self.no_color
    }

    /// Icon styling matching [`color_enabled`](Self::color_enabled).
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            enabled: self.color_enabled(),
        }
    }
}

/// Status icons for success and failure lines.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    fn paint(self, text: &str, style: &console::Style) -> String {
        if self.enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Whether icons carry ANSI colors.
    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Green check mark.
    pub fn success_icon(self) -> String {
        self.paint("✓", &console::Style::new().green().force_styling(true))
    }

    /// Red `X`.
    pub fn error_icon(self) -> String {
        self.paint("X", &console::Style::new().red().bold().force_styling(true))
    }
}

/// `println!` onto an [`IOStreams`] stdout.
#[macro_export]
macro_rules! ios_println {
    ($ios:expr) => {
        $ios.writeln_out(format_args!(""))
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_out(format_args!($($arg)*))
    };
}

/// `eprintln!` onto an [`IOStreams`] stderr.
#[macro_export]
macro_rules! ios_eprintln {
    ($ios:expr) => {
        $ios.writeln_err(format_args!(""))
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_err(format_args!($($arg)*))
    };
}
