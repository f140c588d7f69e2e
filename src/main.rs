use duo_games::{
    ai, init_logging, AttackResult, BattleshipMove, BattleshipOutcome, BattleshipState, DotsMove,
    DotsState, InMemoryStore, MatchId, MatchResult, MatchService, MatchStore, PlayerId,
    DEFAULT_DOTS_GRID_SIZE,
};

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::broadcast::error::TryRecvError;

#[derive(Parser)]
#[command(author, version, about = "Simulate computer-vs-computer matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Two computer players place fleets and trade shots until one fleet sinks.
    Battleship {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Two computer players claim lines until every box is owned.
    Dots {
        #[arg(long, default_value_t = DEFAULT_DOTS_GRID_SIZE, help = "Dots per side")]
        grid_size: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn players() -> [PlayerId; 2] {
    [PlayerId::from("alex"), PlayerId::from("sam")]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Battleship { seed } => run_battleship(make_rng(seed)).await,
        Commands::Dots { grid_size, seed } => run_dots(grid_size, make_rng(seed)).await,
    }
}

async fn run_battleship(mut rng: SmallRng) -> anyhow::Result<()> {
    let service = MatchService::new(InMemoryStore::new());
    let id = MatchId::from("battleship-sim");
    let [a, b] = players();
    service
        .create(id.clone(), [a.clone(), b.clone()], BattleshipState::new(&[a.clone(), b.clone()]))
        .await?;
    let mut updates = service.store().subscribe(&id).await?;

    for p in [&a, &b] {
        service
            .submit::<BattleshipState, _>(&id, p, &BattleshipMove::AutoPlace, &mut rng)
            .await?;
        service
            .submit::<BattleshipState, _>(&id, p, &BattleshipMove::ConfirmFleet, &mut rng)
            .await?;
    }

    let mut shots = 0;
    loop {
        let game = service.load::<BattleshipState>(&id).await?;
        let Some(mover) = game.current_turn().cloned() else {
            break;
        };
        let defender = game.next_player(&mover).clone();
        let state = game.state();
        let (log, afloat) = match (state.board(&mover), state.board(&defender)) {
            (Some(own), Some(theirs)) => (own.attack_log().clone(), theirs.afloat_kinds()),
            _ => anyhow::bail!("match is missing a board"),
        };
        let (row, col) = ai::choose_attack(&log, &afloat, &mut rng)
            .ok_or_else(|| anyhow::anyhow!("no target left for {}", mover))?;
        let applied = service
            .submit::<BattleshipState, _>(&id, &mover, &BattleshipMove::Attack { row, col }, &mut rng)
            .await?;
        shots += 1;
        if let BattleshipOutcome::Attack(AttackResult::Sunk(kind)) = applied.outcome {
            println!("{} sank {}'s {}", mover, defender, kind);
        }
    }

    let game = service.load::<BattleshipState>(&id).await?;
    let mut seen = 0;
    loop {
        match updates.try_recv() {
            Ok(_) => seen += 1,
            Err(TryRecvError::Lagged(missed)) => seen += missed,
            Err(_) => break,
        }
    }
    println!("{} shots fired, {} updates published", shots, seen);
    report(game.result());
    Ok(())
}

async fn run_dots(grid_size: usize, mut rng: SmallRng) -> anyhow::Result<()> {
    let service = MatchService::new(InMemoryStore::new());
    let id = MatchId::from("dots-sim");
    let [a, b] = players();
    service
        .create(id.clone(), [a.clone(), b.clone()], DotsState::new(grid_size)?)
        .await?;

    loop {
        let game = service.load::<DotsState>(&id).await?;
        let Some(mover) = game.current_turn().cloned() else {
            break;
        };
        let mv: DotsMove = ai::choose_line(game.state(), &mut rng)
            .ok_or_else(|| anyhow::anyhow!("no open line left"))?;
        let applied = service.submit::<DotsState, _>(&id, &mover, &mv, &mut rng).await?;
        if !applied.outcome.completed.is_empty() {
            println!("{} closed {} box(es)", mover, applied.outcome.completed.len());
        }
    }

    let game = service.load::<DotsState>(&id).await?;
    for (player, boxes) in game.state().scores() {
        println!("{}: {} boxes", player, boxes);
    }
    report(game.result());
    Ok(())
}

fn report(result: Option<&MatchResult>) {
    match result {
        Some(MatchResult::Winner(p)) => println!("Winner: {}", p),
        Some(MatchResult::Draw) => println!("Draw"),
        None => println!("Match unfinished"),
    }
}
