//! Console listing: one `id /path` line per item
//!
//! `PathPrinter` writes to any `termcolor::WriteColor`, so the same code
//! drives stdout and in-memory buffers in tests.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::client::User;
use crate::error::Result;
use crate::tree::{Item, Visitor, WalkSummary};

use super::config::OutputConfig;

/// Format an item as its right-justified id followed by `/` and its path.
pub fn format_line(item: &Item, id_width: usize) -> String {
    format!("{:>id_width$} /{}", item.id, item.path())
}

/// Prints the listing, folders highlighted when color is enabled.
pub struct PathPrinter<W> {
    out: W,
    id_width: usize,
}

impl PathPrinter<StandardStream> {
    /// The caller has already resolved `--color`, so termcolor does not
    /// consult the environment again.
    pub fn stdout(config: &OutputConfig) -> Self {
        Self::new(
            StandardStream::stdout(color_choice(config.use_color)),
            config.id_width,
        )
    }
}

fn color_choice(use_color: bool) -> ColorChoice {
    if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}

impl<W: WriteColor> PathPrinter<W> {
    pub fn new(out: W, id_width: usize) -> Self {
        Self { out, id_width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the name and login of the authenticated user.
    pub fn user(&mut self, user: &User) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(self.out, "Authenticated User")?;
        self.out.reset()?;
        writeln!(self.out, "Name: {}", user.name)?;
        writeln!(self.out, "Login: {}", user.login)?;
        Ok(())
    }

    /// Print the section title and column headings.
    pub fn header(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(self.out, "File Listing")?;
        self.out.reset()?;
        writeln!(self.out, "{:>width$} Path", "ID", width = self.id_width)?;
        Ok(())
    }

    pub fn summary(&mut self, summary: &WalkSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} folders, {} files",
            summary.folders, summary.files
        )?;
        self.out.flush()
    }
}

impl<W: WriteColor> Visitor for PathPrinter<W> {
    fn handle(&mut self, item: &Item) -> Result<()> {
        write!(self.out, "{:>width$} ", item.id, width = self.id_width)?;
        if item.is_folder() {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        }
        write!(self.out, "/{}", item.path())?;
        self.out.reset()?;
        writeln!(self.out)?;
        Ok(())
    }
}
