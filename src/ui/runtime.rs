use crate::controller::SetupController;
use crate::store::EntryStore;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::render::draw;
use crate::ui::setup::SetupState;
use crate::ui::terminal_guard::setup_terminal;
use crossterm::event::KeyEvent;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::sync::watch;

/// How a store call ended for the panel.
#[derive(Debug)]
pub enum Settled<T> {
    Done(T),
    /// The operator quit before or right after the call settled.
    Quit,
}

impl<T> Settled<T> {
    pub fn is_quit(&self) -> bool {
        matches!(self, Settled::Quit)
    }
}

/// Drive a controller call to completion while the panel stays live.
///
/// Every state the controller publishes is redrawn, so the busy header and
/// hints show while the call runs. Keys pressed meanwhile are consumed here
/// and only quit keys act on them. Whatever is still buffered once the call
/// settles is discarded the same way, so a repeated Enter or `d` never turns
/// into a second request.
pub async fn await_settled<F, T, R>(
    pending: F,
    events: &mut EventHandler,
    view: &mut watch::Receiver<SetupState>,
    mut redraw: R,
) -> io::Result<Settled<T>>
where
    F: Future<Output = T>,
    R: FnMut(&SetupState) -> io::Result<()>,
{
    tokio::pin!(pending);

    let result = loop {
        tokio::select! {
            biased;
            result = &mut pending => break result,
            Ok(()) = view.changed() => redraw(&view.borrow_and_update())?,
            Some(event) = events.next() => match event {
                AppEvent::Key(key) if quits(&view.borrow(), key) => return Ok(Settled::Quit),
                AppEvent::Resize => redraw(&view.borrow())?,
                AppEvent::Key(_) | AppEvent::Tick => {}
            },
        }
    };

    while let Some(event) = events.try_next() {
        if let AppEvent::Key(key) = event {
            if quits(&view.borrow(), key) {
                return Ok(Settled::Quit);
            }
        }
    }
    Ok(Settled::Done(result))
}

fn quits(state: &SetupState, key: KeyEvent) -> bool {
    handle_key(state, key) == InputAction::Quit
}

/// Run the panel until the operator quits.
///
/// Store failures never end the loop; they are already on the banner and in
/// the log by the time the controller returns them.
pub async fn run<S: EntryStore>(mut controller: SetupController<S>) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let mut events = EventHandler::new(Duration::from_millis(250));
    let mut view = controller.subscribe();
    let mut redraw = |state: &SetupState| terminal.draw(|frame| draw(frame, state)).map(|_| ());

    redraw(controller.state())?;
    let mut quit = await_settled(controller.load_entries(), &mut events, &mut view, &mut redraw)
        .await?
        .is_quit();

    while !quit {
        redraw(controller.state())?;

        let Some(event) = events.next().await else {
            break;
        };
        let AppEvent::Key(key) = event else {
            continue;
        };

        quit = match handle_key(controller.state(), key) {
            InputAction::None => false,
            InputAction::Quit => true,
            InputAction::Intent(intent) => {
                controller.dispatch(intent);
                false
            }
            InputAction::Create => {
                controller.start_create();
                false
            }
            InputAction::Edit(name) => {
                let _ = controller.start_edit(&name);
                false
            }
            InputAction::Refresh => {
                await_settled(controller.load_entries(), &mut events, &mut view, &mut redraw)
                    .await?
                    .is_quit()
            }
            InputAction::Delete(name) => {
                await_settled(controller.delete_entry(&name), &mut events, &mut view, &mut redraw)
                    .await?
                    .is_quit()
            }
            InputAction::Submit => {
                await_settled(controller.submit(), &mut events, &mut view, &mut redraw)
                    .await?
                    .is_quit()
            }
        };
    }

    drop(guard);
    tracing::info!("setup panel closed");
    Ok(())
}
