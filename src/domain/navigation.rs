//! Screen state for a directory front end.
//!
//! The current screen and its payload live in one value, and a successful
//! save bumps a monotonically increasing revision that the list screen hands
//! to [`crate::DirectoryManager::refresh`].

use crate::domain::cliente::ClienteRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Clientes,
    NuevoCliente,
    EditarCliente(ClienteRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    OpenCreate,
    OpenEdit(ClienteRecord),
    /// Leave a form without saving.
    Close,
    /// A form saved successfully; the list must refresh.
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    screen: Screen,
    revision: u64,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies `event` and returns whether the screen changed.
    ///
    /// Forms open only from the list; an edit needs a persisted record.
    pub fn apply(&mut self, event: NavEvent) -> bool {
        let next = match (&self.screen, event) {
            (Screen::Clientes, NavEvent::OpenCreate) => Screen::NuevoCliente,
            (Screen::Clientes, NavEvent::OpenEdit(record)) if record.id.is_some() => {
                Screen::EditarCliente(record)
            }
            (Screen::NuevoCliente | Screen::EditarCliente(_), NavEvent::Close) => Screen::Clientes,
            (Screen::NuevoCliente | Screen::EditarCliente(_), NavEvent::Saved) => {
                self.revision += 1;
                Screen::Clientes
            }
            _ => return false,
        };
        tracing::debug!(from = ?self.screen, to = ?next, revision = self.revision, "navigation");
        self.screen = next;
        true
    }
}
