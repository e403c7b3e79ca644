//! Push buttons and the two toggle buttons built on the same face.

use std::fmt;

use tracing::debug;

use crate::{
    Context, DrawCx, NodeId, SizeCx,
    error::Result,
    event::{Event, KeyCode},
    geom::{Expanse, Point, Rect},
    layout::Align,
    style::{Attr, Style},
    widget::{EventOutcome, Widget},
    widgets::text::{TextBlock, width},
};

/// Configuration shared by the button widgets.
///
/// Defaults: default style, reversed while focused, text centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonConfig {
    /// Style when not focused.
    pub normal: Style,
    /// Style while focused.
    pub active: Style,
    /// Alignment of the label between the prefix and suffix.
    pub align: (Align, Align),
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            active: Style::default().with(Attr::Reverse),
            align: (Align::Center, Align::Center),
        }
    }
}

impl ButtonConfig {
    /// Set the styles.
    pub fn with_styles(mut self, normal: Style, active: Style) -> Self {
        self.normal = normal;
        self.active = active;
        self
    }

    /// Set the label alignment.
    pub fn with_align(mut self, h: Align, v: Align) -> Self {
        self.align = (h, v);
        self
    }
}

/// Activation callback.
type Callback = Box<dyn FnMut(&mut Context<'_>) -> Result<()>>;

/// Does this event activate a button?
fn activates(event: &Event) -> bool {
    event.is_key(KeyCode::Enter) || matches!(event, Event::Text(t) if t == " ")
}

/// The label, focus state and drawing common to every button.
#[derive(Debug, Default)]
struct Face {
    /// The label.
    text: TextBlock,
    /// Does the button hold focus?
    focused: bool,
    /// Configuration.
    config: ButtonConfig,
}

impl Face {
    /// A face with a label.
    fn new(label: &str) -> Self {
        Self {
            text: TextBlock::new(label),
            ..Self::default()
        }
    }

    /// A face whose label sits just after its decoration.
    fn leading(label: &str) -> Self {
        Self {
            config: ButtonConfig::default().with_align(Align::Start, Align::Center),
            ..Self::new(label)
        }
    }

    /// Preferred size with the given decorations.
    fn pref_size(&self, prefix: &str, suffix: &str) -> Expanse {
        let t = self.text.size();
        Expanse::new(t.w + width(prefix) + width(suffix), t.h.max(1))
    }

    /// Paint the decorations and the label.
    fn draw(&self, cx: &mut DrawCx<'_>, prefix: &str, suffix: &str) {
        let rect = cx.rect();
        let style = if self.focused {
            self.config.active
        } else {
            self.config.normal
        };
        let (pw, sw) = (width(prefix), width(suffix));
        let surface = cx.surface();
        surface.fill_rect(rect, style, ' ');
        if rect.is_empty() {
            return;
        }
        surface.draw_text(rect.tl, prefix, style);
        let inner = Rect::new(
            rect.tl.x + pw.min(rect.w),
            rect.tl.y,
            rect.w.saturating_sub(pw + sw),
            rect.h,
        );
        self.text.draw(surface, inner, self.config.align, style);
        if sw > 0 && rect.w >= pw + sw {
            let at = Point::new(rect.tl.x + rect.w - sw, rect.tl.y + rect.h - 1);
            surface.draw_text(at, suffix, style);
        }
    }

    /// Track focus entering or leaving. A focused button claims the cursor,
    /// parked on its first cell.
    fn set_focused(&mut self, focused: bool, cx: &mut Context<'_>) -> Result<()> {
        if self.focused == focused {
            return Ok(());
        }
        self.focused = focused;
        if focused {
            let size = cx.size();
            cx.grab_input(Rect::at(Point::zero(), size), Some(Point::zero()), true)?;
        } else {
            cx.release_input()?;
        }
        cx.invalidate()
    }

    /// Replace the label.
    fn set_label(&mut self, label: &str, cx: &mut Context<'_>) -> Result<()> {
        if self.text.set(label) {
            cx.invalidate_layout()?;
            cx.invalidate()?;
        }
        Ok(())
    }
}

/// A push button. Enter or Space runs its callback.
pub struct Button {
    /// Label and focus state.
    face: Face,
    /// Runs on activation.
    on_activate: Option<Callback>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("face", &self.face)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

impl Button {
    /// A button with a label and no action.
    pub fn new(label: &str) -> Self {
        Self {
            face: Face::new(label),
            on_activate: None,
        }
    }

    /// Set the activation callback.
    pub fn on_activate(mut self, f: impl FnMut(&mut Context<'_>) -> Result<()> + 'static) -> Self {
        self.on_activate = Some(Box::new(f));
        self
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ButtonConfig) -> Self {
        self.face.config = config;
        self
    }

    /// The label.
    pub fn label(&self) -> &str {
        self.face.text.raw()
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: &str, cx: &mut Context<'_>) -> Result<()> {
        self.face.set_label(label, cx)
    }

    /// Does the button hold focus?
    pub fn is_focused(&self) -> bool {
        self.face.focused
    }

    /// Run the activation callback.
    pub fn activate(&mut self, cx: &mut Context<'_>) -> Result<()> {
        match self.on_activate.as_mut() {
            Some(f) => f(cx),
            None => Ok(()),
        }
    }
}

impl Widget for Button {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::zero()
    }

    fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        self.face.pref_size("<", ">")
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        self.face.draw(cx, "<", ">");
        Ok(())
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_>) -> Result<EventOutcome> {
        match event {
            Event::Focus(f) => self.face.set_focused(*f, cx)?,
            e if activates(e) => self.activate(cx)?,
            _ => return Ok(EventOutcome::Ignore),
        }
        Ok(EventOutcome::Handle)
    }

    fn focus(&mut self, _reverse: bool, _cx: &mut Context<'_>) -> Result<bool> {
        Ok(!self.face.focused)
    }
}

/// A button that flips between checked and unchecked.
#[derive(Debug, Default)]
pub struct CheckBox {
    /// Label and focus state.
    face: Face,
    /// Is the box checked?
    checked: bool,
}

impl CheckBox {
    /// An unchecked box.
    pub fn new(label: &str) -> Self {
        Self {
            face: Face::leading(label),
            checked: false,
        }
    }

    /// Set the initial state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ButtonConfig) -> Self {
        self.face.config = config;
        self
    }

    /// The label text.
    pub fn label(&self) -> &str {
        self.face.text.raw()
    }

    /// Is the box checked?
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Change the state.
    pub fn set_checked(&mut self, checked: bool, cx: &mut Context<'_>) -> Result<()> {
        if self.checked != checked {
            self.checked = checked;
            cx.invalidate()?;
        }
        Ok(())
    }

    /// The decoration showing the state.
    fn prefix(&self) -> &'static str {
        if self.checked { "[X] " } else { "[ ] " }
    }
}

impl Widget for CheckBox {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::zero()
    }

    fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        self.face.pref_size(self.prefix(), "")
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        self.face.draw(cx, self.prefix(), "");
        Ok(())
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_>) -> Result<EventOutcome> {
        match event {
            Event::Focus(f) => self.face.set_focused(*f, cx)?,
            e if activates(e) => self.set_checked(!self.checked, cx)?,
            _ => return Ok(EventOutcome::Ignore),
        }
        Ok(EventOutcome::Handle)
    }

    fn focus(&mut self, _reverse: bool, _cx: &mut Context<'_>) -> Result<bool> {
        Ok(!self.face.focused)
    }
}

/// A button in a named group, of which at most one is selected. Selecting
/// one clears every other box in the same tree that shares its group name.
#[derive(Debug, Default)]
pub struct RadioBox {
    /// Label and focus state.
    face: Face,
    /// The group name.
    group: String,
    /// Is this box selected?
    selected: bool,
}

impl RadioBox {
    /// An unselected box in a group.
    pub fn new(label: &str, group: &str) -> Self {
        Self {
            face: Face::leading(label),
            group: group.to_string(),
            selected: false,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ButtonConfig) -> Self {
        self.face.config = config;
        self
    }

    /// The label text.
    pub fn label(&self) -> &str {
        self.face.text.raw()
    }

    /// The group name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Is this box selected?
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Select this box, clearing the rest of its group. Selection can only
    /// move, so there is no way to deselect directly.
    pub fn select(&mut self, cx: &mut Context<'_>) -> Result<()> {
        if self.selected {
            return Ok(());
        }
        self.selected = true;
        cx.invalidate()?;
        let peers: Vec<NodeId> = cx
            .tree()
            .node_ids()
            .into_iter()
            .filter(|id| {
                cx.widget::<Self>(*id)
                    .is_some_and(|r| r.selected && r.group == self.group)
            })
            .collect();
        for id in peers {
            debug!(group = %self.group, node = ?id, "radio clear");
            cx.with_widget(id, |r: &mut Self, cx| r.clear(cx))??;
        }
        Ok(())
    }

    /// Deselect after a peer was selected.
    fn clear(&mut self, cx: &mut Context<'_>) -> Result<()> {
        if self.selected {
            self.selected = false;
            cx.invalidate()?;
        }
        Ok(())
    }

    /// The decoration showing the state.
    fn prefix(&self) -> &'static str {
        if self.selected { "(*) " } else { "( ) " }
    }
}

impl Widget for RadioBox {
    fn min_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        Expanse::zero()
    }

    fn pref_size(&self, _cx: &SizeCx<'_>) -> Expanse {
        self.face.pref_size(self.prefix(), "")
    }

    fn draw(&mut self, cx: &mut DrawCx<'_>) -> Result<()> {
        self.face.draw(cx, self.prefix(), "");
        Ok(())
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_>) -> Result<EventOutcome> {
        match event {
            Event::Focus(f) => self.face.set_focused(*f, cx)?,
            e if activates(e) => self.select(cx)?,
            _ => return Ok(EventOutcome::Ignore),
        }
        Ok(EventOutcome::Handle)
    }

    fn focus(&mut self, _reverse: bool, _cx: &mut Context<'_>) -> Result<bool> {
        Ok(!self.face.focused)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        TermBuf, Tree,
        layout::{LinearContainer, LinearSlot},
    };

    #[test]
    fn decorations() -> Result<()> {
        let mut tree = Tree::new();
        let row = tree.create(LinearContainer::vertical());
        tree.add(row, Button::new("ok"), LinearSlot::new())?;
        tree.add(row, CheckBox::new("x").with_checked(true), LinearSlot::new())?;
        tree.add(row, RadioBox::new("y", "g"), LinearSlot::new())?;
        tree.assign(row, Point::zero(), Expanse::new(6, 3))?;
        tree.layout(row)?;
        let mut buf = TermBuf::blank((6, 3));
        tree.draw(row, &mut buf)?;
        assert_eq!(buf.lines(), vec!["< ok >", "[X] x ", "( ) y "]);
        Ok(())
    }

    #[test]
    fn activation_and_groups() -> Result<()> {
        let mut tree = Tree::new();
        let col = tree.create(LinearContainer::vertical());
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let b = tree.add(
            col,
            Button::new("go").on_activate(move |_| {
                h.set(h.get() + 1);
                Ok(())
            }),
            LinearSlot::new(),
        )?;
        let r1 = tree.add(col, RadioBox::new("a", "g"), LinearSlot::new())?;
        let r2 = tree.add(col, RadioBox::new("b", "g"), LinearSlot::new())?;
        let other = tree.add(col, RadioBox::new("c", "h"), LinearSlot::new())?;

        tree.event(b, &Event::from(KeyCode::Enter))?;
        tree.event(b, &Event::from(" "))?;
        assert_eq!(
            tree.event(b, &Event::from("x"))?,
            EventOutcome::Ignore
        );
        assert_eq!(hits.get(), 2);

        tree.event(other, &Event::from(KeyCode::Enter))?;
        tree.event(r1, &Event::from(KeyCode::Enter))?;
        assert!(tree.widget::<RadioBox>(r1)?.is_selected());
        tree.event(r2, &Event::from(KeyCode::Enter))?;
        assert!(!tree.widget::<RadioBox>(r1)?.is_selected());
        assert!(tree.widget::<RadioBox>(r2)?.is_selected());
        assert!(tree.widget::<RadioBox>(other)?.is_selected());
        Ok(())
    }
}
