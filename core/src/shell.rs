use rand::prelude::*;

use crate::*;

#[derive(Clone, Debug)]
pub enum Screen<C: Clock = SystemClock> {
    /// Waiting for a difficulty
    Menu,
    Playing(Session<C>),
}

/// Outer application loop state: difficulty selection, then a session until the player exits back to the menu.
///
/// Every selection builds a brand-new session, nothing is cached between games.
#[derive(Clone, Debug)]
pub struct Shell<C: Clock + Clone = SystemClock> {
    clock: C,
    layout: Layout,
    seeds: SmallRng,
    screen: Screen<C>,
}

impl Shell<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, rand::random())
    }
}

impl Default for Shell<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> Shell<C> {
    pub fn with_clock(clock: C, seed: u64) -> Self {
        Self {
            clock,
            layout: Layout::default(),
            seeds: SmallRng::seed_from_u64(seed),
            screen: Screen::Menu,
        }
    }

    /// Layout handed to every session started from now on.
    pub fn with_layout(mut self, layout: Layout) -> Result<Self> {
        layout.validate()?;
        self.layout = layout;
        Ok(self)
    }

    pub fn screen(&self) -> &Screen<C> {
        &self.screen
    }

    pub fn is_menu(&self) -> bool {
        matches!(self.screen, Screen::Menu)
    }

    pub fn session(&self) -> Option<&Session<C>> {
        match &self.screen {
            Screen::Menu => None,
            Screen::Playing(session) => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session<C>> {
        match &mut self.screen {
            Screen::Menu => None,
            Screen::Playing(session) => Some(session),
        }
    }

    /// Leaves the menu (or abandons the current game) for a fresh session.
    pub fn select(&mut self, difficulty: Difficulty) -> Result<()> {
        log::debug!("Selected difficulty {}", difficulty.label());
        let session = Session::for_difficulty(difficulty, self.seeds.random(), self.clock.clone())
            .with_layout(self.layout)?;
        self.screen = Screen::Playing(session);
        Ok(())
    }

    /// Forwards input to the running session, dropping back to the menu once it reports `Exited`.
    pub fn handle(&mut self, event: InputEvent) -> SessionUpdate {
        let Some(session) = self.session_mut() else {
            log::trace!("Ignoring {:?} on the menu", event);
            return SessionUpdate::Ignored;
        };

        let update = session.handle(event);
        if session.status() == GameStatus::Exited {
            log::debug!("Returning to menu");
            self.screen = Screen::Menu;
        }
        update
    }

    pub fn tick(&mut self) {
        if let Some(session) = self.session_mut() {
            session.tick();
        }
    }
}
