use crossterm::event::{KeyCode, KeyModifiers};
use geoinput_core::{KeyOutcome, NavKey};

use crate::app::App;

/// Browser key codes for the editing keys the terminal reports.
fn key_code(code: KeyCode) -> Option<u32> {
    Some(match code {
        KeyCode::Enter => NavKey::ENTER_CODE,
        KeyCode::Up => NavKey::UP_CODE,
        KeyCode::Down => NavKey::DOWN_CODE,
        KeyCode::Left => 37,
        KeyCode::Right => 39,
        KeyCode::Home => 36,
        KeyCode::End => 35,
        _ => return None,
    })
}

pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('l') | KeyCode::Char('u') => app.widget.clear(),
            _ => {}
        }
        return;
    }

    if let Some(browser_code) = key_code(code) {
        if app.widget.on_key_code(browser_code) == KeyOutcome::Consumed {
            return;
        }
        if code == KeyCode::Enter {
            app.accept();
            return;
        }
        let input = app.widget.surface_mut().text_input_mut();
        match code {
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Esc => {
            if app.widget.surface().text_input().value.is_empty() {
                app.should_quit = true;
            } else {
                app.widget.clear();
            }
        }
        // Focus leaves the input.
        KeyCode::Tab => app.widget.on_outside_click(),
        KeyCode::Backspace => {
            app.widget.surface_mut().text_input_mut().delete_back();
            app.widget.on_input();
        }
        KeyCode::Char(c) => {
            app.widget.surface_mut().text_input_mut().insert_char(c);
            app.widget.on_input();
        }
        _ => {}
    }
}
