//! Dueling Monsters
//!
//! Top-down arena prototype: swing at trolls and goblins, drag fireball
//! cards out of your hand and throw them.

use dueling_monsters::{cli, frontend, run_headless, VERSION};

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dueling Monsters v{}", VERSION);

    let args = cli::parse_args();
    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    if args.headless {
        let report = run_headless(&config, &args.headless_options());
        println!("{}", report);
        return;
    }

    frontend::run(config);
}
