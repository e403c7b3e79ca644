use std::{path::PathBuf, process};

use clap::Parser;
use trellis::{
    Root,
    backend::crossterm::{CrosstermBackend, runloop},
};
use trellis_examples::{init_logging, scrollgym};

/// A long list in a scrolling viewport. Tab walks the list, page keys
/// scroll it, Escape quits.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of list items.
    #[clap(short, long, default_value_t = 40)]
    items: usize,

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
    let gym = scrollgym::build(root.tree_mut(), args.items)?;
    root.set_root(gym.top)?;
    root.focus(false)?;
    let code = runloop(&mut root)?;
    process::exit(code);
}
