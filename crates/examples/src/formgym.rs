use trellis::{
    Context, NodeId, Result, Tree, TypedId,
    layout::{BoxConfig, BoxContainer, LinearContainer, LinearSlot, Slot},
    widgets::{Button, CheckBox, Entry, Label, RadioBox, Spacer},
};

use crate::Shell;

/// Handles to the interesting nodes of a form gym.
#[derive(Debug, Clone, Copy)]
pub struct FormGym {
    /// The top node.
    pub top: TypedId<Shell>,
    /// The name field.
    pub name: TypedId<Entry>,
    /// The subscription box.
    pub subscribe: TypedId<CheckBox>,
    /// The plan choices.
    pub plans: [TypedId<RadioBox>; 2],
    /// The status line, rewritten on submit.
    pub status: TypedId<Label>,
}

/// The line the status label shows after a submit.
fn summary(
    cx: &Context<'_>,
    name: TypedId<Entry>,
    subscribe: TypedId<CheckBox>,
    plans: [TypedId<RadioBox>; 2],
) -> String {
    let name = cx.widget::<Entry>(name).map(Entry::text).unwrap_or_default();
    let subscribed = cx.widget::<CheckBox>(subscribe).is_some_and(CheckBox::is_checked);
    let plan = plans
        .iter()
        .filter_map(|p| cx.widget::<RadioBox>(*p))
        .find(|r| r.is_selected())
        .map_or("none", |r| r.label());
    format!("{name}: plan {plan}, subscribed {subscribed}")
}

/// Build a small form: a text field, a check box, a radio group and two
/// buttons inside a bordered box.
pub fn build(tree: &mut Tree) -> Result<FormGym> {
    let top = tree.create(Shell);
    let frame = tree.add(
        top,
        BoxContainer::with_config(
            BoxConfig::default()
                .with_border(&[true])?
                .with_padding(&[Some(0), Some(1)])?,
        ),
        Slot::Plain,
    )?;
    let col = tree.add(frame, LinearContainer::vertical(), Slot::Plain)?;

    tree.add(col, Label::new("Sign up"), LinearSlot::new())?;
    let name = tree.add(col, Entry::new(), LinearSlot::new())?;
    let subscribe = tree.add(col, CheckBox::new("subscribe"), LinearSlot::new())?;
    let plans = [
        tree.add(col, RadioBox::new("monthly", "plan"), LinearSlot::new())?,
        tree.add(col, RadioBox::new("yearly", "plan"), LinearSlot::new())?,
    ];

    let row = tree.add(col, LinearContainer::horizontal(), LinearSlot::new())?;
    let status = tree.create(Label::new(""));
    tree.add(
        row,
        Button::new("Submit").on_activate(move |cx| {
            let line = summary(cx, name, subscribe, plans);
            cx.with_widget(status, |l: &mut Label, cx| l.set_text(&line, cx))?
        }),
        LinearSlot::new(),
    )?;
    tree.add(row, Spacer::new((1, 1)), LinearSlot::new())?;
    tree.add(
        row,
        Button::new("Quit").on_activate(|cx| {
            cx.request_exit(0);
            Ok(())
        }),
        LinearSlot::new(),
    )?;
    tree.insert(col, status, LinearSlot::new().with_grow(1.0))?;

    Ok(FormGym {
        top,
        name,
        subscribe,
        plans,
        status,
    })
}

impl FormGym {
    /// The top node.
    pub fn id(&self) -> NodeId {
        self.top.id()
    }
}
