use anyhow::{Context, Result};
use combat::DungeonRng;
use dungeon_crawler::{CoreConfig, GameSession, StairsDirection};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless run: walk out of the tavern and wander level 1 for a while.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            CoreConfig::from_json_str(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => CoreConfig::default(),
    };

    let rng = DungeonRng::from_entropy();
    info!(seed = rng.seed(), "starting session");
    let mut session = GameSession::new(config, Box::new(rng));

    // walk to the tavern door; moving around the tavern is free
    let door = session.door().context("tavern has no door")?;
    for _ in 0..100 {
        if session.check_door_interaction() {
            break;
        }
        let (px, py) = session.player().position();
        let (dx, dy) = ((door.0 - px).signum(), (door.1 - py).signum());
        session.handle_player_move(dx, dy);
        if session.player().position() == (px, py) {
            // blocked on the diagonal, try one axis at a time
            session.handle_player_move(dx, 0);
            session.handle_player_move(0, dy);
        }
    }
    if session.check_door_interaction() {
        session.use_door();
    } else {
        warn!("could not reach the tavern door, starting on level 1");
        session.generate_level(1, true);
    }

    // a short scripted walk: keep heading for the stairs, or wander east
    for _ in 0..200 {
        if session.is_game_over() {
            break;
        }
        // changing level leaves the turn open
        if session.check_stairs_interaction() == Some(StairsDirection::Down) {
            session.descend();
            continue;
        }
        let (px, py) = session.player().position();
        let (tx, ty) = session.stairs_down().unwrap_or((px + 1, py));
        if session.handle_player_move((tx - px).signum(), (ty - py).signum())
            || session.handle_player_move(0, 0)
        {
            session.advance_turn();
        }
    }

    for message in session.messages().iter() {
        info!("{}", message.text);
    }
    info!(
        depth = session.depth(),
        level = session.player().level,
        hp = session.player().hp,
        "session finished"
    );
    Ok(())
}
