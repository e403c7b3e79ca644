use trellis::{
    Result, Tree, TypedId,
    layout::{Align, LinearContainer, LinearSlot, Slot, Viewport},
    widgets::{Button, ButtonConfig, Entry, Label, Scrollbar},
};

use crate::Shell;

/// Handles to the interesting nodes of a scroll gym.
#[derive(Debug, Clone, Copy)]
pub struct ScrollGym {
    /// The top node.
    pub top: TypedId<Shell>,
    /// The header, naming the last activated item.
    pub header: TypedId<Label>,
    /// The viewport over the item list.
    pub list: TypedId<Viewport>,
    /// The indicator bound to the list.
    pub bar: TypedId<Scrollbar>,
    /// The multi-line notes field.
    pub notes: TypedId<Entry>,
}

/// Build a scrolling list of `items` buttons with a bound scrollbar, and a
/// multi-line text field underneath. Tabbing through the list scrolls it,
/// and the list takes all of the squeeze when the screen is short.
pub fn build(tree: &mut Tree, items: usize) -> Result<ScrollGym> {
    let top = tree.create(Shell);
    let col = tree.add(top, LinearContainer::vertical(), Slot::Plain)?;
    let header = tree.add(
        col,
        Label::new("nothing selected"),
        LinearSlot::new().with_shrink(0.0),
    )?;

    let row = tree.add(
        col,
        LinearContainer::horizontal(),
        LinearSlot::new().with_grow(1.0),
    )?;
    let list = tree.add(row, Viewport::new(), LinearSlot::new().with_grow(1.0))?;
    let bar = tree.add(
        row,
        Scrollbar::vertical(),
        LinearSlot::new().with_shrink(0.0),
    )?;
    tree.bind_indicator(list, bar)?;

    let content = tree.add(list, LinearContainer::vertical(), Slot::Plain)?;
    for i in 0..items {
        let name = format!("item {i}");
        let line = format!("selected {name}");
        tree.add(
            content,
            Button::new(&name)
                .with_config(ButtonConfig::default().with_align(Align::Start, Align::Center))
                .on_activate(move |cx| {
                    cx.with_widget(header, |l: &mut Label, cx| l.set_text(&line, cx))?
                }),
            LinearSlot::new(),
        )?;
    }

    let notes = tree.add(col, Entry::multiline(), LinearSlot::new().with_shrink(0.0))?;
    Ok(ScrollGym {
        top,
        header,
        list,
        bar,
        notes,
    })
}
