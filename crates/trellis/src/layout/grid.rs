use crate::{
    Context, DrawCx, LayoutCx, NodeId, SizeCx,
    error::{Error, Result},
    geom::{Axis, Expanse, Mode, Point, distribute},
    layout::{Child, Slot},
    style::Style,
    widget::Widget,
};

/// Upper bound on cell indices. Every index below the largest one in use
/// gets a track.
pub const MAX_TRACKS: usize = 1024;

/// Configuration for one grid row or column.
///
/// Defaults: no growth, no minimum, unit shrink weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// Share of surplus space.
    pub weight: f64,
    /// Floor on the track's preferred and minimum length.
    pub min_size: u32,
    /// Share of any deficit.
    pub shrink: f64,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            weight: 0.0,
            min_size: 0,
            shrink: 1.0,
        }
    }
}

impl Track {
    /// A track with the given growth weight.
    pub fn weighted(weight: f64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    /// Set the minimum length.
    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the shrink weight.
    pub fn with_shrink(mut self, shrink: f64) -> Self {
        self.shrink = shrink;
        self
    }
}

/// Configuration for a [`GridContainer`].
///
/// Defaults: stretch on both axes, default background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Horizontal and vertical distribution modes.
    pub mode: (Mode, Mode),
    /// Fill for empty cells.
    pub background: Style,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            mode: (Mode::Stretch, Mode::Stretch),
            background: Style::default(),
        }
    }
}

impl GridConfig {
    /// Set the distribution mode on both axes.
    pub fn with_mode(mut self, h: Mode, v: Mode) -> Self {
        self.mode = (h, v);
        self
    }

    /// Set the background.
    pub fn with_background(mut self, style: Style) -> Self {
        self.background = style;
        self
    }
}

/// A two-dimensional grid. Each cell holds at most one child, and every
/// row and column is sized as a unit from the children in it and its
/// track configuration.
#[derive(Debug, Default)]
pub struct GridContainer {
    /// Configuration.
    config: GridConfig,
    /// Column configuration, by index.
    cols: Vec<Track>,
    /// Row configuration, by index.
    rows: Vec<Track>,
}

impl GridContainer {
    /// Construct with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with an explicit configuration.
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Configure a column.
    pub fn with_column(mut self, idx: usize, track: Track) -> Self {
        Self::put(&mut self.cols, idx, track);
        self
    }

    /// Configure a row.
    pub fn with_row(mut self, idx: usize, track: Track) -> Self {
        Self::put(&mut self.rows, idx, track);
        self
    }

    /// Reconfigure a column of a live grid.
    pub fn set_column(&mut self, idx: usize, track: Track, cx: &mut Context<'_>) -> Result<()> {
        Self::put(&mut self.cols, idx, track);
        cx.invalidate_layout()
    }

    /// Reconfigure a row of a live grid.
    pub fn set_row(&mut self, idx: usize, track: Track, cx: &mut Context<'_>) -> Result<()> {
        Self::put(&mut self.rows, idx, track);
        cx.invalidate_layout()
    }

    /// Store a track, padding with defaults.
    fn put(tracks: &mut Vec<Track>, idx: usize, track: Track) {
        if tracks.len() <= idx {
            tracks.resize(idx + 1, Track::default());
        }
        tracks[idx] = track;
    }

    /// Track configuration along an axis.
    fn tracks(&self, axis: Axis) -> &[Track] {
        match axis {
            Axis::Horizontal => &self.cols,
            Axis::Vertical => &self.rows,
        }
    }

    /// The mode along an axis.
    fn mode(&self, axis: Axis) -> Mode {
        match axis {
            Axis::Horizontal => self.config.mode.0,
            Axis::Vertical => self.config.mode.1,
        }
    }

    /// A child's track index along an axis.
    fn cell(child: &Child, axis: Axis) -> usize {
        match (&child.slot, axis) {
            (Slot::Cell { col, .. }, Axis::Horizontal) => *col,
            (Slot::Cell { row, .. }, Axis::Vertical) => *row,
            _ => 0,
        }
    }

    /// Per-track lengths along an axis, measured with a size function and
    /// raised to each track's minimum.
    fn lengths(&self, children: &[Child], axis: Axis, size: impl Fn(NodeId) -> Expanse) -> Vec<u32> {
        let tracks = self.tracks(axis);
        let n = children
            .iter()
            .map(|c| Self::cell(c, axis) + 1)
            .max()
            .unwrap_or(0)
            .max(tracks.len());
        let mut out: Vec<u32> = (0..n)
            .map(|i| tracks.get(i).map_or(0, |t| t.min_size))
            .collect();
        for c in children {
            let i = Self::cell(c, axis);
            out[i] = out[i].max(size(c.id).get(axis));
        }
        out
    }

    /// Total length of a run of tracks. In the equal modes every track is as
    /// long as the longest.
    fn total(&self, lengths: &[u32], axis: Axis) -> u32 {
        match self.mode(axis) {
            Mode::Equal | Mode::EqualForce => lengths
                .iter()
                .max()
                .map_or(0, |m| m.saturating_mul(lengths.len() as u32)),
            _ => lengths.iter().fold(0u32, |a, l| a.saturating_add(*l)),
        }
    }

    /// Split `full` across the tracks of an axis.
    fn split(&self, full: u32, prefs: &[u32], mins: &[u32], axis: Axis) -> Result<Vec<u32>> {
        let tracks = self.tracks(axis);
        let track = |i: usize| tracks.get(i).copied().unwrap_or_default();
        let grow: Vec<f64> = (0..prefs.len()).map(|i| track(i).weight).collect();
        let shrink: Vec<f64> = (0..prefs.len()).map(|i| track(i).shrink).collect();
        Ok(distribute(
            full,
            prefs,
            mins,
            &vec![true; prefs.len()],
            &grow,
            &shrink,
            self.mode(axis),
        )?)
    }
}

/// Running offsets of a run of lengths.
fn offsets(lengths: &[u32]) -> Vec<u32> {
    let mut acc = 0u32;
    lengths
        .iter()
        .map(|l| {
            let o = acc;
            acc = acc.saturating_add(*l);
            o
        })
        .collect()
}

impl Widget for GridContainer {
    fn min_size(&self, cx: &SizeCx<'_>) -> Expanse {
        Expanse::from_axes(|a| self.total(&self.lengths(cx.child_slots(), a, |c| cx.min_size(c)), a))
    }

    fn pref_size(&self, cx: &SizeCx<'_>) -> Expanse {
        Expanse::from_axes(|a| {
            self.total(&self.lengths(cx.child_slots(), a, |c| cx.pref_size(c)), a)
        })
    }

    fn relayout(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let rect = cx.rect();
        let children = cx.child_slots();
        let mut sizes = Vec::with_capacity(2);
        for axis in Axis::BOTH {
            let prefs = self.lengths(&children, axis, |c| cx.pref_size(c));
            let mins = self.lengths(&children, axis, |c| cx.min_size(c));
            sizes.push(self.split(rect.expanse().get(axis), &prefs, &mins, axis)?);
        }
        let (ox, oy) = (offsets(&sizes[0]), offsets(&sizes[1]));
        for c in &children {
            let (col, row) = (Self::cell(c, Axis::Horizontal), Self::cell(c, Axis::Vertical));
            cx.assign(
                c.id,
                rect.tl + Point::new(ox[col], oy[row]),
                Expanse::new(sizes[0][col], sizes[1][row]),
            )?;
        }
        Ok(())
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        let rect = cx.rect();
        cx.surface().fill_rect(rect, self.config.background, ' ');
        Ok(())
    }

    fn admit(&self, slot: &Slot, children: &[Child]) -> Result<Vec<NodeId>> {
        match slot {
            Slot::Cell { col, row } if *col >= MAX_TRACKS || *row >= MAX_TRACKS => {
                Err(Error::Config(format!(
                    "{} cell ({col}, {row}) is beyond the {MAX_TRACKS} track limit",
                    self.name()
                )))
            }
            Slot::Cell { .. } => Ok(children
                .iter()
                .filter(|c| c.slot == *slot)
                .map(|c| c.id)
                .collect()),
            other => Err(Error::Config(format!(
                "{} needs a cell slot, got {other:?}",
                self.name()
            ))),
        }
    }
}
