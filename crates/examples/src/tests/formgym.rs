use trellis::{
    Result, Root,
    backend::test::{ScriptedInput, TestRender},
    event::{Key, KeyCode},
    widgets::{CheckBox, Entry, Label, RadioBox},
};

use crate::formgym::{self, FormGym};

fn setup() -> Result<(Root<TestRender>, FormGym)> {
    let (_, be) = TestRender::create((40, 10));
    let mut root = Root::new(be);
    let gym = formgym::build(root.tree_mut())?;
    root.set_root(gym.id())?;
    Ok((root, gym))
}

#[test]
fn submit_summarises_the_form() -> Result<()> {
    let (mut root, gym) = setup()?;
    let mut input = ScriptedInput::new()
        .event(KeyCode::Tab)
        .text("bob")
        .event(KeyCode::Tab)
        .text(" ")
        .event(KeyCode::Tab)
        .event(KeyCode::Tab)
        .event(KeyCode::Enter)
        .event(KeyCode::Tab)
        .event(KeyCode::Enter);
    assert_eq!(root.run(&mut input)?, 0);

    let tree = root.tree();
    assert_eq!(tree.widget::<Entry>(gym.name)?.text(), "bob");
    assert!(tree.widget::<CheckBox>(gym.subscribe)?.is_checked());
    assert!(!tree.widget::<RadioBox>(gym.plans[0])?.is_selected());
    assert!(tree.widget::<RadioBox>(gym.plans[1])?.is_selected());
    assert_eq!(
        tree.widget::<Label>(gym.status)?.text(),
        "bob: plan yearly, subscribed true"
    );
    Ok(())
}

#[test]
fn escape_quits_unless_consumed() -> Result<()> {
    let (mut root, gym) = setup()?;
    let mut input = ScriptedInput::new()
        .event(KeyCode::Tab)
        .text("a")
        .event(KeyCode::Esc)
        .text("never delivered");
    assert_eq!(root.run(&mut input)?, 0);
    assert_eq!(root.tree().widget::<Entry>(gym.name)?.text(), "a");

    let (mut root, gym) = setup()?;
    let mut input = ScriptedInput::new()
        .event(KeyCode::Tab)
        .event(Key::ctrl('c'))
        .text("b");
    assert_eq!(root.run(&mut input)?, 0);
    assert_eq!(root.tree().widget::<Entry>(gym.name)?.text(), "");
    Ok(())
}

#[test]
fn quit_button() -> Result<()> {
    let (mut root, gym) = setup()?;
    // Name, box, two radios, Submit, Quit.
    let mut input = ScriptedInput::new();
    for _ in 0..6 {
        input = input.event(KeyCode::Tab);
    }
    let mut input = input.event(KeyCode::Enter).text("x");
    assert_eq!(root.run(&mut input)?, 0);
    assert_eq!(root.tree().widget::<Label>(gym.status)?.text(), "");
    assert!(root.screen().line(0).starts_with('┌'));
    Ok(())
}
