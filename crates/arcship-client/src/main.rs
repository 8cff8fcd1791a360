mod config;
mod script;
mod store;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use arcship_core::identity;
use arcship_core::{Evented, Ship, ShipEvent, ShipEventKind, ShipView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::script::Command;
use crate::store::{FileIdStore, OfflineLink};
use crate::surface::LogSurface;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Wires host-side observers onto the ship's bus.
fn attach_observers(ship: &mut Ship, surface: &Rc<RefCell<LogSurface>>) {
    let target = Rc::clone(surface);
    ship.on(ShipEventKind::Render, move |ship, _| {
        let mut surface = target.borrow_mut();
        let previous = surface.begin_frame();
        ShipView::draw(ship, &mut *surface);
        if previous != surface.primitives() {
            debug!(primitives = surface.primitives(), "frame shape changed");
        }
    });
    ship.on(ShipEventKind::Stop, |ship, _| {
        info!(x = ship.coords().x, y = ship.coords().y, "ship stopped");
    });
    ship.on(ShipEventKind::Shot, |ship, event| {
        if let ShipEvent::Shot { spawned } = event {
            if *spawned > 0 {
                info!(spawned, queue = ship.bullets_in_queue(), "shot");
            }
        }
    });
    ship.on(ShipEventKind::Register, |_, event| {
        if let ShipEvent::Register { id } = event {
            info!(%id, "registered");
        }
    });
}

fn apply(ship: &mut Ship, command: Command) {
    match command {
        Command::Key(event) => ship.key(event),
        Command::Color => ship.change_color(),
        Command::MoveTo(coords) => ship.move_to(coords),
        Command::Quit => ship.destroy(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ClientConfig::from_env().context("loading client config")?;
    let mut ship =
        Ship::new(config.ship.clone(), config.bounds).context("building the ship")?;

    let surface = Rc::new(RefCell::new(LogSurface::default()));
    attach_observers(&mut ship, &surface);

    let mut store = FileIdStore::new(&config.id_file);
    let mut link = OfflineLink::default();
    identity::identify(&store, &mut link, &config.id_key);
    let id = link.assign(&mut rand::thread_rng());
    identity::complete_registration(&mut store, &config.id_key, &id, &mut ship);

    ship.render();

    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    info!(
        x = ship.coords().x,
        y = ship.coords().y,
        tick_ms = config.tick_interval_ms,
        "ship launched"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                // Each ship beat emits `render`; the observer draws it.
                ship.advance(now - last);
                last = now;

                if ship.is_destroyed() && ship.opacity() <= 0.0 {
                    ship.stop_beating();
                    break;
                }
            }
            line = lines.next_line(), if input_open => {
                match line.context("reading stdin")? {
                    Some(line) => match script::parse_line(&line) {
                        Ok(Some(command)) => apply(&mut ship, command),
                        Ok(None) => {}
                        Err(error) => warn!(%error, line = %line, "skipping script line"),
                    },
                    None => {
                        // Stdin closed: fade out and exit.
                        input_open = false;
                        ship.destroy();
                    }
                }
            }
            result = tokio::signal::ctrl_c(), if !ship.is_destroyed() => {
                result.context("waiting for ctrl-c")?;
                info!("interrupted");
                ship.destroy();
            }
        }
    }

    info!(
        frames = surface.borrow().frames(),
        id = ship.id().unwrap_or_default(),
        "ship faded out"
    );
    Ok(())
}
