//! Add, rename, hide, recolor and delete flows.

use seatplan_ui::{KeyCode, Modifiers, Point};
use web_time::Instant;

use super::{add_named, empty_editor};
use crate::editor::{FILL_PROMPT, Redraw, SELECT_FIRST};
use crate::message::{Message, SeatMessage};
use crate::panel::PanelTrigger;
use crate::platform::DialogRecord;

#[test]
fn test_three_adds_number_seats_and_select_the_last() {
    let mut editor = empty_editor();
    let mut ids = Vec::new();
    for _ in 0..3 {
        let id = add_named(&mut editor, "");
        assert_eq!(editor.selected().map(|s| &s.id), Some(&id));
        ids.push(id);
    }

    let labels: Vec<_> = editor.seats().iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["1", "2", "3"]);
    assert_eq!(editor.selected().map(|s| &s.id), ids.last());
    assert!(editor.editing().editing().is_none());
}

#[test]
fn test_rename_then_clear_falls_back_to_label() {
    let mut editor = empty_editor();
    let id = add_named(&mut editor, "Bob");
    assert_eq!(editor.seat(&id).unwrap().display_name(), "Bob");

    let _ = editor.update(Message::rename(id.clone()));
    assert_eq!(editor.rename_overlay().unwrap().draft, "Bob");
    let _ = editor.update(Message::draft_changed(""));
    let _ = editor.update(Message::commit_edit());

    let seat = editor.seat(&id).unwrap();
    assert_eq!(seat.name, "");
    assert_eq!(seat.display_name(), "1");
    assert!(editor.frame().texts().any(|(text, _)| text == "1"));
}

#[test]
fn test_hidden_seat_stays_listed_but_is_not_drawn() {
    let mut editor = empty_editor();
    let shown = add_named(&mut editor, "Shown");
    let hidden = add_named(&mut editor, "Hidden");

    let redraw = editor.update(Message::Seat(SeatMessage::ToggleVisible(hidden.clone())));
    assert_eq!(redraw, Redraw::ALL);

    let frame = editor.frame();
    let texts: Vec<_> = frame.texts().map(|(text, _)| text).collect();
    assert!(texts.contains(&"Shown"));
    assert!(!texts.contains(&"Hidden"));

    let rows = editor.panel_rows();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r.id == hidden && !r.visible));
    assert!(rows.iter().any(|r| r.id == shown && r.visible));

    // Hidden seats cannot be grabbed on the canvas
    let center = editor.seat(&hidden).unwrap().center();
    let _ = editor.update(Message::select(shown.clone()));
    let now = Instant::now();
    let _ = editor.update(Message::pressed(center, now));
    let _ = editor.update(Message::released(center, now));
    assert_eq!(editor.selected().map(|s| &s.id), Some(&shown));
}

#[test]
fn test_delete_selected_clears_selection_and_editing() {
    let mut editor = empty_editor();
    let id = add_named(&mut editor, "Gone");
    let _ = editor.update(Message::rename(id.clone()));
    assert!(editor.rename_overlay().is_some());

    editor.dialogs_mut().answer_confirm(true);
    let redraw = editor.update(Message::Seat(SeatMessage::DeleteSelected));
    assert_eq!(redraw, Redraw::ALL);

    assert!(editor.seats().is_empty());
    assert!(editor.selected().is_none());
    assert!(editor.editing().editing().is_none());
    assert!(editor.rename_overlay().is_none());
    assert_eq!(
        editor.dialogs().shown(),
        [DialogRecord::Confirm(format!("Delete circle \"Gone\" ({})?", id))]
    );
}

#[test]
fn test_declined_delete_keeps_seat() {
    let mut editor = empty_editor();
    let id = add_named(&mut editor, "");
    editor.dialogs_mut().answer_confirm(false);

    assert_eq!(editor.update(Message::delete(id.clone())), Redraw::NONE);
    assert!(editor.seat(&id).is_some());
    assert!(editor.selected().is_some());
}

#[test]
fn test_selected_actions_without_selection_alert() {
    let mut editor = empty_editor();
    for message in [
        SeatMessage::DeleteSelected,
        SeatMessage::RenameSelected,
        SeatMessage::RecolorSelected,
    ] {
        assert_eq!(editor.update(Message::Seat(message)), Redraw::NONE);
    }
    assert_eq!(editor.dialogs().alerts().collect::<Vec<_>>(), [SELECT_FIRST; 3]);
}

#[test]
fn test_recolor_selected_normalizes_answer() {
    let mut editor = empty_editor();
    let id = add_named(&mut editor, "");
    editor
        .dialogs_mut()
        .answer_prompt(Some("  FFCC00 "))
        .answer_prompt(Some("not a color"))
        .answer_prompt(None);

    let _ = editor.update(Message::Seat(SeatMessage::RecolorSelected));
    assert_eq!(editor.seat(&id).unwrap().fill, "#ffcc00");

    let _ = editor.update(Message::Seat(SeatMessage::RecolorSelected));
    let _ = editor.update(Message::Seat(SeatMessage::RecolorSelected));
    assert_eq!(editor.seat(&id).unwrap().fill, "#ffcc00");

    assert_eq!(
        editor.dialogs().shown()[0],
        DialogRecord::Prompt {
            message: FILL_PROMPT.to_string(),
            default: "#ffffff".to_string(),
        }
    );
}

#[test]
fn test_dark_fill_switches_label_to_white() {
    let mut editor = empty_editor();
    let id = add_named(&mut editor, "Dark");
    let _ = editor.update(Message::Seat(SeatMessage::SetFill(id, "#000000".to_string())));

    let frame = editor.frame();
    let (_, color) = frame.texts().find(|(text, _)| *text == "Dark").unwrap();
    assert_eq!(color, seatplan_ui::Color::WHITE);
}

#[test]
fn test_radius_slider_is_clamped() {
    let mut editor = empty_editor();
    let id = add_named(&mut editor, "");

    let _ = editor.update(Message::Seat(SeatMessage::SetRadius(id.clone(), 500.0)));
    assert_eq!(editor.seat(&id).unwrap().radius, 96.0);
    let _ = editor.update(Message::Seat(SeatMessage::SetRadius(id.clone(), 1.0)));
    assert_eq!(editor.seat(&id).unwrap().radius, 8.0);
    let redraw = editor.update(Message::Seat(SeatMessage::SetRadius(id.clone(), f32::NAN)));
    assert_eq!(redraw, Redraw::NONE);
    assert_eq!(editor.seat(&id).unwrap().radius, 8.0);
}

#[test]
fn test_panel_shortcut_ignored_while_typing() {
    let mut editor = empty_editor();
    let id = add_named(&mut editor, "");
    let _ = editor.update(Message::rename(id));

    let typing = Message::Key {
        key: KeyCode::P,
        modifiers: Modifiers::default(),
        input_focused: true,
    };
    assert_eq!(editor.update(typing), Redraw::NONE);
    assert!(editor.panel().is_open());

    let _ = editor.update(Message::commit_edit());
    let shortcut = Message::Key {
        key: KeyCode::P,
        modifiers: Modifiers::default(),
        input_focused: false,
    };
    assert_eq!(editor.update(shortcut), Redraw::PANEL);
    assert!(!editor.panel().is_open());
}

#[test]
fn test_drag_moves_only_the_grabbed_seat() {
    let mut editor = empty_editor();
    let below = add_named(&mut editor, "");
    let above = add_named(&mut editor, "");

    // Both sit at the viewport center; the later one is on top
    let now = Instant::now();
    let _ = editor.update(Message::pressed(Point::new(400.0, 300.0), now));
    let _ = editor.update(Message::moved(Point::new(300.0, 200.0)));
    let _ = editor.update(Message::released(Point::new(300.0, 200.0), now));

    assert_eq!(editor.seat(&above).unwrap().center(), Point::new(300.0, 200.0));
    assert_eq!(editor.seat(&below).unwrap().center(), Point::new(400.0, 300.0));
}

#[test]
fn test_panel_presses_act_while_a_rename_is_open() {
    let mut editor = empty_editor();
    let press = PanelTrigger::Press { button: 0 };
    let mouse_click = PanelTrigger::Click { detail: 1 };

    for _ in 0..3 {
        for trigger in [press, mouse_click] {
            for message in trigger.messages(Message::add_seat()) {
                let _ = editor.update(message);
            }
        }
        let _ = editor.update(Message::RenderCompleted);
        assert!(editor.rename_overlay().is_some());
    }
    assert_eq!(editor.seats().len(), 3);

    let _ = editor.update(Message::draft_changed("Anna"));
    for message in press.messages(Message::toggle_panel()) {
        let _ = editor.update(message);
    }
    assert!(!editor.panel().is_open());
    assert_eq!(editor.seats()[2].display_name(), "Anna");
    assert!(editor.editing().editing().is_none());
}
