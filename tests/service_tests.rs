use std::time::Duration;

use duo_games::dictionary::{
    Dictionary, ValidationMode, ValidatorConfig, Verdict, WordListDictionary, WordValidator,
};
use duo_games::store::{decode, encode};
use duo_games::{
    DotsMove, DotsState, GameError, InMemoryStore, LetterLinkState, LineKind, MatchId,
    MatchService, MatchStore, PlayerId, ServiceError, StoreError, Tile, TileBag, TilePlacement,
    CENTER,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn players() -> [PlayerId; 2] {
    [PlayerId::from("ann"), PlayerId::from("bob")]
}

struct Unreachable;

#[async_trait::async_trait]
impl Dictionary for Unreachable {
    async fn is_real_word(&self, _word: &str) -> anyhow::Result<bool> {
        anyhow::bail!("connection refused")
    }
}

struct Slow;

#[async_trait::async_trait]
impl Dictionary for Slow {
    async fn is_real_word(&self, _word: &str) -> anyhow::Result<bool> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(true)
    }
}

fn validator<D: Dictionary>(dictionary: D, mode: ValidationMode) -> WordValidator<D> {
    WordValidator::new(dictionary, ValidatorConfig { mode, ..ValidatorConfig::default() })
}

fn cat() -> Vec<TilePlacement> {
    vec![
        TilePlacement::new(0, CENTER, CENTER - 1),
        TilePlacement::new(1, CENTER, CENTER),
        TilePlacement::new(2, CENTER, CENTER + 1),
    ]
}

/// Letter-Link match where ann holds C, A, T first.
async fn letter_link(service: &MatchService<InMemoryStore>, id: &str) -> MatchId {
    let [a, b] = players();
    let mut tiles: Vec<Tile> = "EEEEEEEEEE".chars().map(Tile::Letter).collect();
    tiles.extend("DOGLINE".chars().rev().map(Tile::Letter));
    tiles.extend("CATSRON".chars().rev().map(Tile::Letter));
    let state = LetterLinkState::deal(&[a.clone(), b.clone()], TileBag::from_tiles(tiles));
    let id = MatchId::from(id);
    service.create(id.clone(), [a, b], state).await.unwrap();
    id
}

async fn dots(service: &MatchService<InMemoryStore>, id: &str) -> MatchId {
    let id = MatchId::from(id);
    service
        .create(id.clone(), players(), DotsState::new(3).unwrap())
        .await
        .unwrap();
    id
}

fn line(row: usize, col: usize, kind: LineKind) -> DotsMove {
    DotsMove { row, col, kind }
}

#[tokio::test]
async fn test_create_and_load() {
    let service = MatchService::new(InMemoryStore::new());
    let id = dots(&service, "d1").await;
    let game = service.load::<DotsState>(&id).await.unwrap();
    assert_eq!(game.revision(), 0);
    assert_eq!(service.store().match_count().await, 1);

    let err = service
        .create(id.clone(), players(), DotsState::new(3).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Store(StoreError::AlreadyExists(id.clone())));

    let err = service.load::<LetterLinkState>(&id).await.unwrap_err();
    assert_eq!(err, ServiceError::Game(GameError::WrongGameType));

    let missing = MatchId::from("nope");
    let err = service.load::<DotsState>(&missing).await.unwrap_err();
    assert_eq!(err, ServiceError::Store(StoreError::NotFound(missing)));
}

#[tokio::test]
async fn test_submit_persists_and_notifies() {
    let mut rng = SmallRng::seed_from_u64(1);
    let [a, b] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = dots(&service, "d2").await;

    let applied = service
        .submit::<DotsState, _>(&id, &a, &line(0, 0, LineKind::Horizontal), &mut rng)
        .await
        .unwrap();
    assert_eq!(applied.game.revision(), 1);
    assert_eq!(applied.notifications.len(), 1);
    assert_eq!(applied.notifications[0].recipient, b);

    let stored = service.load::<DotsState>(&id).await.unwrap();
    assert_eq!(stored, applied.game);

    let err = service
        .submit::<DotsState, _>(&id, &a, &line(0, 1, LineKind::Horizontal), &mut rng)
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Game(GameError::NotYourTurn));
    assert!(!err.is_retryable());
    assert_eq!(service.load::<DotsState>(&id).await.unwrap().revision(), 1);
}

#[tokio::test]
async fn test_stale_write_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(2);
    let [a, _] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = dots(&service, "d3").await;

    let snapshot = service.load::<DotsState>(&id).await.unwrap();
    service
        .commit(&snapshot, &a, &line(0, 0, LineKind::Horizontal), &mut rng)
        .await
        .unwrap();
    // Same player, same turn, read before the first write landed.
    let err = service
        .commit(&snapshot, &a, &line(2, 1, LineKind::Horizontal), &mut rng)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::Store(StoreError::StaleRevision { expected: 0, actual: 1 })
    );
    assert!(err.is_retryable());

    let stored = service.load::<DotsState>(&id).await.unwrap();
    assert_eq!(stored.state().lines().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_commits_apply_once() {
    let [a, _] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = dots(&service, "d4").await;
    let snapshot = service.load::<DotsState>(&id).await.unwrap();

    let mut rng1 = SmallRng::seed_from_u64(3);
    let mut rng2 = SmallRng::seed_from_u64(4);
    let first = line(0, 0, LineKind::Horizontal);
    let second = line(0, 0, LineKind::Vertical);
    let (r1, r2) = tokio::join!(
        service.commit(&snapshot, &a, &first, &mut rng1),
        service.commit(&snapshot, &a, &second, &mut rng2),
    );
    assert_eq!(r1.is_ok() as u8 + r2.is_ok() as u8, 1);
    assert_eq!(service.load::<DotsState>(&id).await.unwrap().revision(), 1);
}

#[tokio::test]
async fn test_subscribers_see_updates() {
    let mut rng = SmallRng::seed_from_u64(5);
    let [a, b] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = dots(&service, "d5").await;
    let mut updates = service.store().subscribe(&id).await.unwrap();

    service
        .submit::<DotsState, _>(&id, &a, &line(0, 0, LineKind::Horizontal), &mut rng)
        .await
        .unwrap();
    let doc = updates.recv().await.unwrap();
    assert_eq!(doc.revision(), 1);
    assert_eq!(doc.current_turn(), Some(&b));
}

#[tokio::test]
async fn test_bincode_document_roundtrip() {
    let service = MatchService::new(InMemoryStore::new());
    let id = letter_link(&service, "ll0").await;
    let doc = service.store().load(&id).await.unwrap();
    let bytes = encode(&doc).unwrap();
    assert_eq!(decode(&bytes).unwrap(), doc);
    assert!(matches!(decode(&bytes[..3]), Err(StoreError::Codec(_))));
}

#[tokio::test]
async fn test_play_word_with_word_list() {
    let mut rng = SmallRng::seed_from_u64(6);
    let [a, b] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = letter_link(&service, "ll1").await;
    let words = validator(WordListDictionary::from_text("cat\ndog\n"), ValidationMode::Strict);

    let applied = service.play_word(&id, &a, &cat(), &words, &mut rng).await.unwrap();
    assert_eq!(applied.game.state().score(&a), 10);
    assert_eq!(applied.game.current_turn(), Some(&b));

    // b tries "DA" down through the A; not in the list.
    let da = [TilePlacement::new(0, CENTER - 1, CENTER)];
    let err = service.play_word(&id, &b, &da, &words, &mut rng).await.unwrap_err();
    assert_eq!(err, ServiceError::Game(GameError::WordRejected("DA".to_string())));
    assert_eq!(service.load::<LetterLinkState>(&id).await.unwrap().revision(), 1);
}

#[tokio::test]
async fn test_lenient_accepts_when_dictionary_fails() {
    let mut rng = SmallRng::seed_from_u64(7);
    let [a, _] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = letter_link(&service, "ll2").await;
    let words = validator(Unreachable, ValidationMode::Lenient);
    assert_eq!(words.validate_word("CAT").await, Verdict::Unverified);

    let applied = service.play_word(&id, &a, &cat(), &words, &mut rng).await.unwrap();
    assert_eq!(applied.game.revision(), 1);
}

#[tokio::test]
async fn test_strict_refuses_when_dictionary_fails() {
    let mut rng = SmallRng::seed_from_u64(8);
    let [a, _] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = letter_link(&service, "ll3").await;
    let words = validator(Unreachable, ValidationMode::Strict);
    assert_eq!(words.validate_word("CAT").await, Verdict::Unavailable);

    let err = service.play_word(&id, &a, &cat(), &words, &mut rng).await.unwrap_err();
    assert_eq!(err, ServiceError::DictionaryUnavailable("CAT".to_string()));
    assert!(err.is_retryable());
    assert_eq!(service.load::<LetterLinkState>(&id).await.unwrap().revision(), 0);
}

#[tokio::test]
async fn test_validation_timeout_abandons_move() {
    let mut rng = SmallRng::seed_from_u64(9);
    let [a, _] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = letter_link(&service, "ll4").await;
    let config = ValidatorConfig {
        mode: ValidationMode::Lenient,
        timeout: Duration::from_millis(20),
    };
    let words = WordValidator::new(Slow, config);

    let err = service.play_word(&id, &a, &cat(), &words, &mut rng).await.unwrap_err();
    assert_eq!(err, ServiceError::ValidationTimedOut);
    let game = service.load::<LetterLinkState>(&id).await.unwrap();
    assert_eq!(game.revision(), 0);
    assert_eq!(game.current_turn(), Some(&a));
}

#[tokio::test]
async fn test_play_word_checks_turn_before_lookup() {
    let mut rng = SmallRng::seed_from_u64(10);
    let [_, b] = players();
    let service = MatchService::new(InMemoryStore::new());
    let id = letter_link(&service, "ll5").await;
    let words = WordValidator::new(Slow, ValidatorConfig::default());
    let err = service.play_word(&id, &b, &cat(), &words, &mut rng).await.unwrap_err();
    assert_eq!(err, ServiceError::Game(GameError::NotYourTurn));
}
