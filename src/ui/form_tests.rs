use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::form::*;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(form: &mut Form, s: &str) {
    for c in s.chars() {
        assert_eq!(form.handle_key(key(KeyCode::Char(c))), FormEvent::Editing);
    }
}

#[test]
fn test_typing_fills_focused_field() {
    let mut form = Form::expense();
    type_str(&mut form, "food");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "12.5");
    assert_eq!(form.value(Form::CATEGORY), "food");
    assert_eq!(form.value(Form::AMOUNT), "12.5");
    assert_eq!(form.value(Form::NOTE), "");
}

#[test]
fn test_enter_advances_then_submits_on_last_field() {
    let mut form = Form::budget();
    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Editing);
    assert_eq!(form.focus, 1);
    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Submit);
}

#[test]
fn test_ctrl_s_submits_anywhere() {
    let mut form = Form::expense();
    let ev = form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert_eq!(ev, FormEvent::Submit);
    assert_eq!(form.value(Form::CATEGORY), "");
}

#[test]
fn test_escape_cancels() {
    let mut form = Form::expense();
    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancel);
}

#[test]
fn test_backspace_and_wraparound() {
    let mut form = Form::expense();
    type_str(&mut form, "ab");
    form.handle_key(key(KeyCode::Backspace));
    assert_eq!(form.value(Form::CATEGORY), "a");

    form.handle_key(key(KeyCode::BackTab));
    assert_eq!(form.focus, 2);
    form.handle_key(key(KeyCode::Down));
    assert_eq!(form.focus, 0);
}

#[test]
fn test_clear_resets_values_and_focus() {
    let mut form = Form::expense();
    type_str(&mut form, "rent");
    form.next_field();
    form.clear();
    assert_eq!(form.focus, 0);
    assert!(form.fields.iter().all(|f| f.value.is_empty()));
    assert_eq!(form.fields[form.focus].label, "Category");
}
