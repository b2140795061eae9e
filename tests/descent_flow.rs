//! Scenario coverage for the descend and explore loop.

use std::convert::Infallible;

use abyssal_game::{
    ContentData, ContentLoader, Effect, GameEngine, GameSession, MemoryRepo, PlayerState,
    Repository, SessionConfig,
};

struct StaticLoader(ContentData);

impl ContentLoader for StaticLoader {
    type Error = Infallible;

    fn load_content(&self) -> Result<ContentData, Self::Error> {
        Ok(self.0.clone())
    }
}

fn harmless_content() -> ContentData {
    ContentData::from_json(
        r#"{
            "items": [
                {
                    "id": "rusty-shiv",
                    "name": "Rusty Shiv",
                    "type": "weapon",
                    "valid_slot": "main_hand",
                    "stats": { "damage": 1 }
                },
                {
                    "id": "bone-charm",
                    "name": "Bone Charm",
                    "type": "junk"
                }
            ],
            "monsters": [
                {
                    "id": "mireling",
                    "name": "Mireling",
                    "hp": 4,
                    "attack": 0,
                    "defense": 0,
                    "gold_reward": 3,
                    "xp_reward": 10
                }
            ]
        }"#,
    )
    .unwrap()
}

fn session_with(player: PlayerState, seed: u64) -> GameSession<MemoryRepo> {
    let mut repo = MemoryRepo::new();
    let user_id = player.id.clone();
    repo.put_player(player);
    GameEngine::new(StaticLoader(harmless_content()))
        .start_session(repo, &user_id, seed, SessionConfig::default())
        .unwrap()
}

fn hardy_player() -> PlayerState {
    let mut player = PlayerState::new("u1");
    player.max_stamina = 500;
    player.current_stamina = 500;
    player
}

#[test]
fn descend_deepens_drains_and_always_logs() {
    let mut session = session_with(PlayerState::new("u1"), 11);
    for step in 1..=10 {
        let result = session.descend().unwrap();
        assert!(!result.log.is_empty());
        assert!(result.log.iter().any(|line| line.contains(&format!(
            "depth {step}"
        ))));
    }
    assert_eq!(session.player().depth, 10);
    assert_eq!(session.player().max_depth, 10);
    assert_eq!(session.player().current_stamina, 10, "one stamina per step");
}

#[test]
fn gold_effects_reconcile_with_the_player_record() {
    let mut session = session_with(hardy_player(), 23);
    let mut gold_from_effects = 0;
    for _ in 0..120 {
        let result = session.descend().unwrap();
        for effect in &result.effects {
            if let Effect::Gold { amount } = effect {
                gold_from_effects += amount;
            }
        }
        assert!(result.death.is_none(), "nothing here can kill a rested player");
    }
    assert!(gold_from_effects > 0, "120 steps should strike gold at least once");
    assert_eq!(session.player().gold, gold_from_effects);
}

#[test]
fn exhausted_descend_still_resolves_but_hurts() {
    let mut player = PlayerState::new("u1");
    player.current_stamina = 0;
    let mut session = session_with(player, 5);

    let result = session.descend().unwrap();
    assert!(result.log[0].contains("Exhausted"));
    assert!(matches!(result.effects[0], Effect::Damage { amount: 10 }));
    assert_eq!(session.player().depth, 1, "the step still happens");
    assert!(session.player().health <= 90);
}

#[test]
fn exhaustion_can_kill() {
    let mut player = PlayerState::new("u1");
    player.current_stamina = 0;
    player.health = 5;
    player.depth = 30;
    player.max_depth = 30;
    let mut session = session_with(player, 5);

    let result = session.descend().unwrap();
    assert!(result.death.is_some());
    assert_eq!(session.player().depth, 0);
    assert_eq!(session.player().health, session.player().max_health);
    assert_eq!(session.player().max_depth, 30, "best depth survives");

    let grave = session.repo().load_grave("u1").unwrap().unwrap();
    assert_eq!(grave.depth, 30, "death struck before the step");
}

#[test]
fn explore_refuses_without_stamina_and_mutates_nothing() {
    let mut player = PlayerState::new("u1");
    player.current_stamina = 0;
    let mut session = session_with(player, 9);

    let result = session.explore().unwrap();
    assert_eq!(result.log.len(), 1);
    assert!(result.log[0].contains("too exhausted"));
    assert!(result.effects.is_empty());
    assert_eq!(session.player().depth, 0);
    assert_eq!(session.player().health, 100, "refusal costs nothing");
}

#[test]
fn explore_searches_without_descending() {
    let mut session = session_with(hardy_player(), 31);
    session.descend().unwrap();
    let depth_after_step = session.player().depth;

    for _ in 0..20 {
        let result = session.explore().unwrap();
        assert!(!result.log.is_empty());
    }
    assert_eq!(session.player().depth, depth_after_step);
    assert!(session.player().current_stamina < 499);
}

#[test]
fn survivor_unlocks_exactly_once() {
    let mut session = session_with(hardy_player(), 17);
    let mut unlocks = 0;
    for _ in 0..30 {
        let result = session.descend().unwrap();
        unlocks += result
            .effects
            .iter()
            .filter(|effect| {
                matches!(effect, Effect::Achievement { title, .. } if title == "Survivor")
            })
            .count();
    }
    assert!(session.player().max_depth >= 10);
    assert_eq!(unlocks, 1);
}

#[test]
fn session_log_is_capped() {
    let mut session = session_with(hardy_player(), 41);
    for _ in 0..150 {
        session.descend().unwrap();
    }
    assert!(session.logs().len() <= 50);
    assert!(!session.logs().is_empty());
}
