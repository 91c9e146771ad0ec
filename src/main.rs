mod clock;
mod input;
mod market;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use clock::Clock;
use input::{pixel_to_cell, ClickState, InputEvent};
use market::state::TICKS_PER_SEC;
use market::ChanceApp;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Map a page-relative mouse position to a terminal cell.
///
/// The DomBackend renders its grid into a `<div>` directly under `<body>`.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = ChanceApp::new().map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    let app = Rc::new(RefCell::new(app));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(Clock::new(TICKS_PER_SEC)));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };
            web_sys::console::log_1(
                &format!(
                    "click: x={}, y={}, action={:?}",
                    mouse_event.x, mouse_event.y, action
                )
                .into(),
            );

            if let Some(id) = action {
                app.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Enter,
                KeyCode::Esc => InputEvent::Escape,
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Tab => InputEvent::Tab,
                _ => return,
            };
            app.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = clock.borrow_mut().advance(now_ms());
            if ticks > 0 {
                app.borrow_mut().tick(ticks);
            }

            let size = f.area();
            click_state.borrow_mut().reset(size.width, size.height);
            app.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
