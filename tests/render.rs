mod common;

use common::{default_entry, server_entry};
use quolab_setup::controller::SetupError;
use quolab_setup::ui::mvi::Reducer;
use quolab_setup::ui::render::draw;
use quolab_setup::ui::setup::{SetupIntent, SetupReducer, SetupState, EMPTY_MESSAGE};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render(state: &SetupState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
    terminal.draw(|frame| draw(frame, state)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn loaded(entries: Vec<quolab_setup::store::Entry>) -> SetupState {
    SetupReducer::reduce(SetupState::default(), SetupIntent::EntriesLoaded { entries })
}

#[test]
fn fetching_placeholder_is_shown_before_load() {
    let screen = render(&SetupState::default());
    assert!(screen.contains("Fetching configuration entries..."));
}

#[test]
fn empty_list_shows_empty_message() {
    let screen = render(&loaded(vec![default_entry()]));
    assert!(screen.contains(EMPTY_MESSAGE));
}

#[test]
fn table_lists_user_entries_without_secret() {
    let screen = render(&loaded(vec![default_entry(), server_entry("prod")]));

    assert!(screen.contains("prod"));
    assert!(screen.contains("Status"));
    assert!(screen.contains("enabled"));
    assert!(screen.contains("Edit | Delete"));
    assert!(!screen.contains("s3cr3t"));
    assert!(!screen.contains("template.example"));
}

#[test]
fn secret_input_is_masked() {
    let state = SetupReducer::reduce(loaded(vec![]), SetupIntent::StartCreate);
    let state = SetupReducer::reduce(
        state,
        SetupIntent::UpdateField {
            name: "secret".into(),
            value: "hunter2".into(),
        },
    );

    let screen = render(&state);
    assert!(screen.contains("New Server"));
    assert!(screen.contains("•••••••"));
    assert!(!screen.contains("hunter2"));
}

#[test]
fn banner_shows_resolved_error() {
    let state = SetupReducer::reduce(
        loaded(vec![server_entry("prod")]),
        SetupIntent::FetchFailed {
            error: SetupError::Fetch("Splunk is restarting".into()),
        },
    );

    let screen = render(&state);
    assert!(screen.contains("Error getting configuration entries: Splunk is restarting"));
    assert!(screen.contains("Ctrl+X: Dismiss"));
}

#[test]
fn submit_hint_is_hidden_while_in_flight() {
    let state = SetupReducer::reduce(loaded(vec![]), SetupIntent::StartCreate);
    assert!(render(&state).contains("Ctrl+S: Submit"));

    let state = SetupReducer::reduce(state, SetupIntent::RequestStarted);
    let screen = render(&state);
    assert!(!screen.contains("Ctrl+S: Submit"));
    assert!(screen.contains("Saving..."));
}
