use std::io::{self, BufWriter};

use crossterm::terminal;

use crate::docker::ContainerRuntime;
use crate::view::Presenter;

use super::App;

pub fn render<R: ContainerRuntime>(app: &App<R>) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    // One flush per frame
    let mut out = BufWriter::new(io::stdout().lock());
    Presenter::render_dashboard(&mut out, &app.dashboard, cols, rows)
}
