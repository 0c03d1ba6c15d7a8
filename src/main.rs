//! Plinko Sim entry point
//!
//! Native: a headless driver that drops balls and steps the board at 60 Hz of
//! simulated time, the way a browser animation loop would. The web build uses
//! `platform::WebBoard` from JavaScript instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use rand::Rng;

    use plinko_sim::Settings;
    use plinko_sim::consts::FRAME_MS;
    use plinko_sim::sim::{RiskTier, Session};

    /// Safety cap on simulated frames
    const MAX_FRAMES: u64 = 100_000;

    #[derive(Debug, Parser)]
    #[command(name = "plinko-sim", about = "Drop balls through a Plinko peg board")]
    struct Args {
        /// Settings file (created with defaults if missing and --save is given)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Peg rows: 8, 12 or 16
        #[arg(long)]
        rows: Option<u32>,
        /// Risk tier: low, normal or high
        #[arg(long)]
        risk: Option<String>,
        /// Bet per ball
        #[arg(long)]
        bet: Option<i64>,
        /// Number of balls to drop
        #[arg(long, default_value_t = 1)]
        balls: u32,
        /// Frames between drops
        #[arg(long, default_value_t = 6)]
        stagger: u64,
        /// Starting coin balance (drops stop when it can't cover the bet)
        #[arg(long, default_value_t = 1000)]
        balance: i64,
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Write the effective settings back to --settings
        #[arg(long)]
        save: bool,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::parse();

        let mut settings = match &args.settings {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        if let Some(rows) = args.rows {
            settings.rows = rows.try_into()?;
        }
        if let Some(risk) = &args.risk {
            settings.risk = RiskTier::parse(risk)?;
        }
        if let Some(bet) = args.bet {
            settings.bet = bet;
        }
        if let (true, Some(path)) = (args.save, &args.settings) {
            settings.save_to(path)?;
        }

        let seed = args.seed.unwrap_or_else(|| rand::rng().random());
        let config = settings.board_config()?;
        let mut session = Session::new(config, seed);
        log::info!(
            "Seed {}, {} rows, {} risk, multipliers: {}",
            seed,
            config.rows.get(),
            config.risk,
            session
                .payouts()
                .multipliers()
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );

        // Host-side bookkeeping: the board never sees the balance
        let mut balance = args.balance;
        let mut dropped = 0;
        let mut landed = 0;
        let mut now = 0.0;

        for frame in 0..MAX_FRAMES {
            let drop_due = dropped < args.balls && frame % args.stagger.max(1) == 0;
            if drop_due && balance >= settings.bet {
                session.spawn_ball(settings.bet)?;
                balance -= settings.bet;
                dropped += 1;
            } else if drop_due {
                log::warn!("Balance {} can't cover bet {}, stopping drops", balance, settings.bet);
                dropped = args.balls;
            }

            now += FRAME_MS;
            for event in session.step(now) {
                // Stake was already taken; credit the gross return
                balance = balance.saturating_add(event.bet).saturating_add(event.payout);
                landed += 1;
                log::info!(
                    "Ball {} -> slot {} ({}) payout {:+} balance {}",
                    event.ball_id,
                    event.slot_index,
                    event.multiplier,
                    event.payout,
                    balance
                );
            }

            if dropped >= args.balls && session.is_idle() {
                break;
            }
        }

        println!(
            "{} ball(s) landed in {:.1}s of board time, balance {} -> {} ({:+})",
            landed,
            now / 1000.0,
            args.balance,
            balance,
            balance.saturating_sub(args.balance)
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Plinko Sim (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is platform::WebBoard, constructed from JavaScript
}
