use std::{path::PathBuf, process};

use clap::Parser;
use trellis::{
    Root,
    backend::crossterm::{CrosstermBackend, runloop},
};
use trellis_examples::{formgym, init_logging};

/// A small form: tab between fields, Enter or space activates, Escape quits.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Write trace logs to this file.
    #[clap(short, long)]
    log: Option<PathBuf>,
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let mut root = Root::new(CrosstermBackend::default());
    let gym = formgym::build(root.tree_mut())?;
    root.set_root(gym.top)?;
    root.focus(false)?;
    let code = runloop(&mut root)?;
    process::exit(code);
}
