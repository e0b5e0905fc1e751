//! Session actor implementation with async message handling.

use super::{
    config::SessionConfig,
    errors::{SessionError, SessionResult},
    messages::{
        SessionMessage, SessionResponse, SessionSnapshot, StateChangeNotification, SubscriberId,
    },
};
use crate::{
    game::{
        GameError, GameSettings, GameStateManagement, ImposterState, RoleManagement,
        constants::TICK_INTERVAL_MS,
        entities::{Card, PlayerIndex, PlayerRole, RoundSummary},
        timer::{TimerEvent, TimerToken},
    },
    settings::SettingsRepository,
};
use log::{debug, info, trace, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, MissedTickBehavior, interval},
};

/// Session actor handle for sending messages
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    /// Create a new session handle
    pub fn new(sender: mpsc::Sender<SessionMessage>) -> Self {
        Self { sender }
    }

    /// Send a message to the session
    pub async fn send(&self, message: SessionMessage) -> SessionResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> SessionResult<T> {
        let (response, receiver) = oneshot::channel();
        self.send(message(response)).await?;
        receiver.await.map_err(|_| SessionError::Closed)
    }

    pub async fn start_game(&self, player_count: usize) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::StartGame {
            player_count,
            response,
        })
        .await
    }

    pub async fn reveal_role(&self) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::RevealRole { response })
            .await
    }

    pub async fn new_round(&self) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::NewRound { response })
            .await
    }

    pub async fn new_game(&self) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::NewGame { response })
            .await
    }

    pub async fn update_player_count(&self, player_count: usize) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::UpdatePlayerCount {
            player_count,
            response,
        })
        .await
    }

    pub async fn update_settings(&self, settings: GameSettings) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::UpdateSettings { settings, response })
            .await
    }

    pub async fn replace_deck(&self, cards: Vec<Card>) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::ReplaceDeck { cards, response })
            .await
    }

    pub async fn get_state(&self) -> SessionResult<SessionSnapshot> {
        self.request(|response| SessionMessage::GetState { response })
            .await
    }

    pub async fn settings(&self) -> SessionResult<GameSettings> {
        self.request(|response| SessionMessage::GetSettings { response })
            .await
    }

    pub async fn role_of(&self, player: PlayerIndex) -> SessionResult<Option<PlayerRole>> {
        self.request(|response| SessionMessage::GetRole { player, response })
            .await
    }

    pub async fn round_summary(&self) -> SessionResult<Option<RoundSummary>> {
        self.request(|response| SessionMessage::GetRoundSummary { response })
            .await
    }

    /// Inject a countdown tick. Ticks for anything but the running
    /// countdown are ignored by the actor.
    pub async fn tick(&self, token: TimerToken) -> SessionResult<()> {
        self.send(SessionMessage::Tick { token }).await
    }

    /// Subscribe to state changes. The current state is sent right away.
    pub async fn subscribe(
        &self,
        capacity: usize,
    ) -> SessionResult<(SubscriberId, mpsc::Receiver<StateChangeNotification>)> {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let id = self
            .request(|response| SessionMessage::Subscribe { sender, response })
            .await?;
        Ok((id, receiver))
    }

    pub async fn unsubscribe(&self, subscriber_id: SubscriberId) -> SessionResult<()> {
        self.send(SessionMessage::Unsubscribe { subscriber_id })
            .await
    }

    pub async fn close(&self) -> SessionResult<SessionResponse> {
        self.request(|response| SessionMessage::Close { response })
            .await
    }
}

/// Session actor owning one pass-the-device game
pub struct SessionActor {
    /// Game state (FSM)
    state: ImposterState,

    /// Card pool for the next deal
    deck: Vec<Card>,

    /// Settings for the next deal
    settings: GameSettings,

    /// Where settings are persisted
    repository: Arc<dyn SettingsRepository>,

    /// Message inbox
    inbox: mpsc::Receiver<SessionMessage>,

    /// Subscribers for state change notifications
    subscribers: HashMap<SubscriberId, mpsc::Sender<StateChangeNotification>>,

    next_subscriber_id: SubscriberId,

    /// Is session closed
    is_closed: bool,
}

impl SessionActor {
    /// Create a new session actor
    ///
    /// # Returns
    ///
    /// * `(SessionActor, SessionHandle)` - Actor and handle for sending messages
    pub fn new(
        config: SessionConfig,
        deck: Vec<Card>,
        settings: GameSettings,
        repository: Arc<dyn SettingsRepository>,
    ) -> (Self, SessionHandle) {
        if let Err(e) = config.validate() {
            warn!("{e}, using an inbox of 1");
        }
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));

        let state = match config.seed {
            Some(seed) => ImposterState::with_seed(seed),
            None => ImposterState::new(),
        };

        let actor = Self {
            state,
            deck,
            settings,
            repository,
            inbox,
            subscribers: HashMap::new(),
            next_subscriber_id: 0,
            is_closed: false,
        };

        (actor, SessionHandle::new(sender))
    }

    /// Create a session actor with settings loaded from `repository`
    pub async fn load(
        config: SessionConfig,
        deck: Vec<Card>,
        repository: Arc<dyn SettingsRepository>,
    ) -> (Self, SessionHandle) {
        let settings = repository.load().await;
        Self::new(config, deck, settings, repository)
    }

    /// Run the session actor event loop
    pub async fn run(mut self) {
        info!("Session starting with {} cards", self.deck.len());

        let mut ticker = interval(Duration::from_millis(TICK_INTERVAL_MS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut armed: Option<TimerToken> = None;

        loop {
            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => self.handle_message(message).await,
                    None => {
                        debug!("All session handles dropped");
                        break;
                    }
                },

                // Only polled while a countdown is running
                _ = ticker.tick(), if armed.is_some() => {
                    if let Some(token) = armed {
                        self.tick(token);
                    }
                }
            }

            if self.is_closed {
                break;
            }

            let active = self.state.active_timer();
            if active != armed {
                if active.is_some() {
                    ticker.reset();
                }
                armed = active;
            }
        }

        self.notify_state_change(StateChangeNotification::Closed);
        info!("Session closed");
    }

    /// Handle a session message
    async fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::StartGame {
                player_count,
                response,
            } => {
                let result = self.handle_start(player_count);
                let _ = response.send(result);
            }

            SessionMessage::RevealRole { response } => {
                let applied = self.state.reveal_role();
                if applied {
                    self.after_mutation();
                }
                let _ = response.send(applied.into());
            }

            SessionMessage::NewRound { response } => {
                let applied = self.state.new_round(&self.deck, &self.settings);
                if applied {
                    self.after_mutation();
                }
                let _ = response.send(applied.into());
            }

            SessionMessage::NewGame { response } => {
                self.state.new_game();
                self.after_mutation();
                let _ = response.send(SessionResponse::Success);
            }

            SessionMessage::UpdatePlayerCount {
                player_count,
                response,
            } => {
                let applied = self.state.update_player_count(player_count);
                if applied {
                    self.after_mutation();
                }
                let _ = response.send(applied.into());
            }

            SessionMessage::UpdateSettings { settings, response } => {
                let result = self.handle_update_settings(settings).await;
                let _ = response.send(result);
            }

            SessionMessage::ReplaceDeck { cards, response } => {
                let result = self.handle_replace_deck(cards);
                let _ = response.send(result);
            }

            SessionMessage::GetState { response } => {
                let _ = response.send(self.snapshot());
            }

            SessionMessage::GetSettings { response } => {
                let _ = response.send(self.settings.clone());
            }

            SessionMessage::GetRole { player, response } => {
                let _ = response.send(self.state.role_of(player));
            }

            SessionMessage::GetRoundSummary { response } => {
                let _ = response.send(self.state.round_summary());
            }

            SessionMessage::Tick { token } => {
                self.tick(token);
            }

            SessionMessage::Subscribe { sender, response } => {
                let id = self.next_subscriber_id;
                self.next_subscriber_id += 1;

                let _ = sender.try_send(self.state_changed());
                self.subscribers.insert(id, sender);
                debug!("Subscriber {id} subscribed to session state changes");
                let _ = response.send(id);
            }

            SessionMessage::Unsubscribe { subscriber_id } => {
                self.subscribers.remove(&subscriber_id);
                debug!("Subscriber {subscriber_id} unsubscribed from session state changes");
            }

            SessionMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(SessionResponse::Success);
            }
        }
    }

    fn handle_start(&mut self, player_count: usize) -> SessionResponse {
        match self
            .state
            .start_game(player_count, &self.deck, &self.settings)
        {
            Ok(true) => {
                self.after_mutation();
                SessionResponse::Success
            }
            Ok(false) => SessionResponse::Ignored,
            Err(e) => {
                debug!("Refusing to start: {e}");
                SessionResponse::Rejected(e)
            }
        }
    }

    async fn handle_update_settings(&mut self, settings: GameSettings) -> SessionResponse {
        if let Err(msg) = settings.validate() {
            return SessionResponse::Error(msg);
        }

        self.settings = settings;
        match self.repository.save(&self.settings).await {
            Ok(()) => SessionResponse::Success,
            Err(e) => {
                warn!("Settings applied but not saved: {e}");
                SessionResponse::SuccessWithMessage(format!("Settings applied but not saved: {e}"))
            }
        }
    }

    fn handle_replace_deck(&mut self, cards: Vec<Card>) -> SessionResponse {
        let offered = cards.len();
        let cards: Vec<Card> = cards
            .into_iter()
            .filter(|card| !card.name.trim().is_empty())
            .collect();

        if cards.is_empty() {
            return SessionResponse::Rejected(GameError::EmptyDeck);
        }

        let skipped = offered - cards.len();
        self.deck = cards;
        debug!("Deck replaced with {} cards", self.deck.len());

        if skipped > 0 {
            SessionResponse::SuccessWithMessage(format!("Skipped {skipped} cards without a name"))
        } else {
            SessionResponse::Success
        }
    }

    /// Advance the countdown
    fn tick(&mut self, token: TimerToken) {
        match self.state.tick(token) {
            Some(TimerEvent::Progress { remaining_ms }) => {
                trace!("Countdown at {remaining_ms}ms");
                self.after_mutation();
            }
            Some(TimerEvent::Expired) => {
                trace!("Countdown expired");
                self.after_mutation();
            }
            None => {}
        }
    }

    fn after_mutation(&mut self) {
        for event in self.state.drain_events() {
            debug!("Session event: {event}");
        }
        let notification = self.state_changed();
        self.notify_state_change(notification);
    }

    fn state_changed(&self) -> StateChangeNotification {
        StateChangeNotification::StateChanged {
            state: self.state.get_state(),
            countdown: self.state.countdown_label(),
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.get_state(),
            countdown: self.state.countdown_label(),
            active_timer: self.state.active_timer(),
            deck_size: self.deck.len(),
        }
    }

    /// Broadcast state change notification to all subscribers
    fn notify_state_change(&mut self, notification: StateChangeNotification) {
        self.subscribers
            .retain(|id, sender| match sender.try_send(notification.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("Subscriber {id} channel full, dropping notification");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!("Subscriber {id} disconnected, removing");
                    false
                }
            });
    }
}
