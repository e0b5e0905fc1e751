//! Phase transitions.
//!
//! Each transition consumes a `Game<From>` and produces a `Game<To>`, so a
//! game can only be moved along edges that exist. [`ImposterState`] wraps
//! these behind `&mut self` methods that quietly ignore requests made in
//! the wrong phase.

use log::{debug, info};

use super::constants::{DEFAULT_PLAYER_COUNT, MAX_PLAYERS, MIN_PLAYERS};
use super::entities::Card;
use super::functional::{assign_imposters, select_card};
use super::state_machine::{
    Game, GameData, GameError, GameEvent, GameSettings, GameStateManagement, ImposterState,
    clamp_player_count,
};
use super::states::{Finished, Idle, Ready, Revealing};
use super::timer::{TimerEvent, TimerToken};

impl GameData {
    /// Assign imposters and a card for a fresh round.
    fn deal_round(&mut self, deck: &[Card], settings: &GameSettings) {
        self.timer.cancel();
        self.round_settings = settings.clone();
        self.current_player_index = 0;
        self.imposter_indices = assign_imposters(self.player_count, settings.wild_mode, &mut self.rng);

        let card = select_card(
            deck,
            self.last_card_used.as_ref(),
            settings.prevent_consecutive_card,
            &mut self.rng,
        )
        .cloned();
        if card.is_none() {
            debug!("dealing a round without a card");
        }
        self.last_card_used = card.clone();
        self.current_card = card;

        self.rounds_dealt = self.rounds_dealt.saturating_add(1);
        self.events.push_back(GameEvent::RoundDealt(self.rounds_dealt));
    }

    /// Back to a blank setup, keeping the timer and rng.
    fn reset(&mut self) {
        self.timer.cancel();
        self.player_count = DEFAULT_PLAYER_COUNT;
        self.current_player_index = 0;
        self.imposter_indices.clear();
        self.current_card = None;
        self.last_card_used = None;
        self.rounds_dealt = 0;
        self.events.push_back(GameEvent::GameReset);
    }
}

impl Default for Game<Idle> {
    fn default() -> Self {
        Self::new()
    }
}

impl Game<Idle> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: GameData::new(),
            state: Idle {},
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            data: GameData::with_seed(seed),
            state: Idle {},
        }
    }

    /// Set the player count for the next game, clamped to the supported range.
    pub fn set_player_count(&mut self, requested: usize) -> usize {
        let player_count = clamp_player_count(requested);
        if player_count != self.data.player_count {
            self.data.player_count = player_count;
            self.data
                .events
                .push_back(GameEvent::PlayerCountChanged(player_count));
        }
        player_count
    }

    /// Check a game can be started with these inputs.
    pub fn validate_start(player_count: usize, deck: &[Card]) -> Result<(), GameError> {
        if player_count < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                min: MIN_PLAYERS,
                requested: player_count,
            });
        }
        if player_count > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers {
                max: MAX_PLAYERS,
                requested: player_count,
            });
        }
        if deck.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        Ok(())
    }

    /// Deal the first round. Inputs must already be validated.
    fn start(mut self, player_count: usize, deck: &[Card], settings: &GameSettings) -> Game<Ready> {
        self.data.player_count = player_count;
        self.data.last_card_used = None;
        self.data
            .events
            .push_back(GameEvent::GameStarted { player_count });
        self.data.deal_round(deck, settings);
        Game {
            data: self.data,
            state: Ready {},
        }
    }
}

impl Game<Ready> {
    fn reveal(mut self) -> Game<Revealing> {
        let duration_ms = self.data.round_settings.reveal_duration_ms();
        let token = self.data.timer.start(duration_ms);
        self.data
            .events
            .push_back(GameEvent::RevealStarted(self.data.current_player_index));
        Game {
            data: self.data,
            state: Revealing { token },
        }
    }
}

impl Game<Revealing> {
    pub fn token(&self) -> TimerToken {
        self.state.token
    }

    /// Feed one countdown tick. On expiry the device moves to the next
    /// player, or the round finishes after the last one.
    fn tick(mut self, token: TimerToken) -> (ImposterState, Option<TimerEvent>) {
        let event = self.data.timer.tick(token);
        match event {
            None | Some(TimerEvent::Progress { .. }) => (self.into(), event),
            Some(TimerEvent::Expired) => {
                let player = self.data.current_player_index;
                self.data.events.push_back(GameEvent::RevealEnded(player));

                let next = player + 1;
                let state: ImposterState = if next < self.data.player_count {
                    self.data.current_player_index = next;
                    Game {
                        data: self.data,
                        state: Ready {},
                    }
                    .into()
                } else {
                    self.data.events.push_back(GameEvent::AllRolesSeen);
                    Game {
                        data: self.data,
                        state: Finished {},
                    }
                    .into()
                };
                (state, event)
            }
        }
    }
}

impl Game<Finished> {
    fn next_round(mut self, deck: &[Card], settings: &GameSettings) -> Game<Ready> {
        self.data.deal_round(deck, settings);
        Game {
            data: self.data,
            state: Ready {},
        }
    }
}

impl<T> Game<T> {
    fn into_idle(mut self) -> Game<Idle> {
        self.data.reset();
        Game {
            data: self.data,
            state: Idle {},
        }
    }
}

impl Default for ImposterState {
    fn default() -> Self {
        Self::new()
    }
}

impl ImposterState {
    #[must_use]
    pub fn new() -> Self {
        Game::<Idle>::new().into()
    }

    /// Move the current state out, leaving a fixed-seed idle game behind.
    fn take(&mut self) -> Self {
        let placeholder = Game {
            data: GameData::placeholder(),
            state: Idle {},
        };
        std::mem::replace(self, placeholder.into())
    }

    /// A game whose deals are reproducible for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Game::<Idle>::with_seed(seed).into()
    }

    /// Start the first round.
    ///
    /// Returns `Ok(false)` when a game is already running. Fails without
    /// changing anything when there are too few players or no cards.
    pub fn start_game(
        &mut self,
        player_count: usize,
        deck: &[Card],
        settings: &GameSettings,
    ) -> Result<bool, GameError> {
        if !matches!(self, Self::Idle(_)) {
            return Ok(false);
        }
        Game::<Idle>::validate_start(player_count, deck)?;

        *self = match self.take() {
            Self::Idle(game) => game.start(player_count, deck, settings).into(),
            other => other,
        };
        info!("game started with {player_count} players");
        Ok(true)
    }

    /// Show the current player their role and start the countdown. Only
    /// does something when a player is ready.
    pub fn reveal_role(&mut self) -> bool {
        if !matches!(self, Self::Ready(_)) {
            debug!("ignoring reveal during {}", self.phase());
            return false;
        }

        *self = match self.take() {
            Self::Ready(game) => game.reveal().into(),
            other => other,
        };
        true
    }

    /// Deliver a countdown tick. Ticks are dropped outside of a reveal or
    /// when they belong to an earlier countdown.
    pub fn tick(&mut self, token: TimerToken) -> Option<TimerEvent> {
        if !matches!(self, Self::Revealing(_)) {
            log::trace!("ignoring tick during {}", self.phase());
            return None;
        }

        let (state, event) = match self.take() {
            Self::Revealing(game) => game.tick(token),
            other => (other, None),
        };
        *self = state;
        event
    }

    /// Deal another round with the same players once everyone has looked.
    pub fn new_round(&mut self, deck: &[Card], settings: &GameSettings) -> bool {
        if !matches!(self, Self::Finished(_)) {
            debug!("ignoring new round during {}", self.phase());
            return false;
        }

        *self = match self.take() {
            Self::Finished(game) => game.next_round(deck, settings).into(),
            other => other,
        };
        true
    }

    /// Abandon whatever is going on and go back to setup.
    pub fn new_game(&mut self) {
        *self = match self.take() {
            Self::Idle(game) => game.into_idle(),
            Self::Ready(game) => game.into_idle(),
            Self::Revealing(game) => game.into_idle(),
            Self::Finished(game) => game.into_idle(),
        }
        .into();
        info!("game reset");
    }

    /// Change the player count during setup. Returns `false` outside of
    /// setup, where the count is fixed.
    pub fn update_player_count(&mut self, requested: usize) -> bool {
        match self {
            Self::Idle(game) => {
                let player_count = game.set_player_count(requested);
                debug!("player count set to {player_count}");
                true
            }
            _ => false,
        }
    }

    /// Token of the running countdown, if a role is on screen.
    pub fn active_timer(&self) -> Option<TimerToken> {
        match self {
            Self::Revealing(game) => Some(game.token()),
            _ => None,
        }
    }

    /// Countdown text for the view, e.g. `"2.7s"`.
    pub fn countdown_label(&self) -> Option<String> {
        self.get_state().countdown_label()
    }

    pub fn data(&self) -> &GameData {
        match self {
            Self::Idle(game) => &game.data,
            Self::Ready(game) => &game.data,
            Self::Revealing(game) => &game.data,
            Self::Finished(game) => &game.data,
        }
    }
}
