/// Integration tests for game flow scenarios
///
/// These tests drive the state machine through whole games the way a
/// front-end would: start, let every player look, deal again, reset.
use imposter::{
    Card, GameError, GamePhase, GameSettings, GameStateManagement, ImposterState, PlayerRole,
    RoleManagement, deck::find_preset,
};

fn quick_settings() -> GameSettings {
    GameSettings::new(0.3, true, false, false)
}

/// Tick the running countdown until it expires.
fn run_countdown(game: &mut ImposterState) -> usize {
    let mut ticks = 0;
    while let Some(token) = game.active_timer() {
        game.tick(token);
        ticks += 1;
    }
    ticks
}

#[test]
fn test_three_player_game_reaches_finished() {
    let deck = find_preset("Places").unwrap().cards;
    let mut game = ImposterState::with_seed(1);

    assert_eq!(game.start_game(3, &deck, &quick_settings()), Ok(true));

    for player in 0..3 {
        let state = game.get_state();
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.current_player_index, player);

        assert!(game.reveal_role());
        assert_eq!(game.phase(), GamePhase::Revealing);
        assert_eq!(game.countdown_label().as_deref(), Some("0.3s"));

        assert_eq!(run_countdown(&mut game), 3);
    }

    assert_eq!(game.phase(), GamePhase::Finished);
    let summary = game.round_summary().unwrap();
    assert_eq!(summary.imposters.len(), 1);
    assert!(summary.card.is_some());
}

#[test]
fn test_crew_sees_card_and_imposter_sees_hint() {
    let deck = vec![Card::new("Lighthouse", Some("beam"))];
    let mut game = ImposterState::with_seed(5);
    game.start_game(4, &deck, &GameSettings::default()).unwrap();

    let state = game.get_state();
    for player in 0..4 {
        let role = game.role_of(player).unwrap();
        if state.is_imposter(player) {
            assert_eq!(
                role,
                PlayerRole::Imposter {
                    hint: Some("beam".to_string())
                }
            );
        } else {
            assert_eq!(
                role,
                PlayerRole::Crew {
                    card: Some(deck[0].clone())
                }
            );
        }
    }
}

#[test]
fn test_new_round_after_finish_keeps_players() {
    let deck = find_preset("Food").unwrap().cards;
    let mut game = ImposterState::with_seed(9);
    game.start_game(5, &deck, &quick_settings()).unwrap();
    let first_card = game.get_state().current_card;

    for _ in 0..5 {
        game.reveal_role();
        run_countdown(&mut game);
    }
    assert_eq!(game.phase(), GamePhase::Finished);

    assert!(game.new_round(&deck, &quick_settings()));
    let state = game.get_state();
    assert_eq!(state.phase, GamePhase::Ready);
    assert_eq!(state.player_count, 5);
    assert_eq!(state.current_player_index, 0);
    assert_ne!(state.current_card, first_card);
    assert_eq!(state.last_card_used, state.current_card);
}

#[test]
fn test_new_game_mid_reveal_ignores_old_ticks() {
    let deck = find_preset("Animals").unwrap().cards;
    let mut game = ImposterState::with_seed(3);
    game.start_game(3, &deck, &quick_settings()).unwrap();
    game.reveal_role();
    let stale = game.active_timer().unwrap();

    game.new_game();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert_eq!(game.tick(stale), None);
    assert_eq!(game.phase(), GamePhase::Idle);

    game.start_game(3, &deck, &quick_settings()).unwrap();
    game.reveal_role();
    assert_eq!(game.tick(stale), None);
    assert_eq!(game.get_state().remaining_ms, 300);
}

#[test]
fn test_invalid_setup_stays_idle() {
    let deck = find_preset("Places").unwrap().cards;
    let mut game = ImposterState::with_seed(0);

    assert_eq!(
        game.start_game(2, &deck, &GameSettings::default()),
        Err(GameError::NotEnoughPlayers {
            min: 3,
            requested: 2
        })
    );
    assert_eq!(
        game.start_game(3, &[], &GameSettings::default()),
        Err(GameError::EmptyDeck)
    );
    assert_eq!(game.phase(), GamePhase::Idle);
}

#[test]
fn test_player_count_only_changes_in_setup() {
    let deck = find_preset("Places").unwrap().cards;
    let mut game = ImposterState::with_seed(0);

    assert!(game.update_player_count(1));
    assert_eq!(game.get_state().player_count, 3);

    game.start_game(6, &deck, &GameSettings::default()).unwrap();
    assert!(!game.update_player_count(8));
    assert_eq!(game.get_state().player_count, 6);
}

#[test]
fn test_settings_change_applies_next_round() {
    let deck = find_preset("Places").unwrap().cards;
    let mut game = ImposterState::with_seed(4);
    let mut settings = quick_settings();
    game.start_game(3, &deck, &settings).unwrap();

    settings.reveal_duration_seconds = 1.0;
    for _ in 0..3 {
        game.reveal_role();
        assert_eq!(game.get_state().remaining_ms, 300);
        run_countdown(&mut game);
    }

    game.new_round(&deck, &settings);
    game.reveal_role();
    assert_eq!(game.get_state().remaining_ms, 1000);
}
