use std::io;

use gridworld_core::{GridSpec, TableLayout, write_table};
use gridworld_sim::SimulationConfig;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "random".to_string());
    let config_path = args.next();

    let table = GridSpec::reference()
        .and_then(|spec| spec.build_table())
        .expect("reference grid should build");

    let load = |fallback: fn() -> Result<SimulationConfig, gridworld_sim::SimError>| {
        match &config_path {
            Some(path) => SimulationConfig::from_yaml_path(path),
            None => fallback(),
        }
        .expect("failed to load simulation config")
    };

    match mode.as_str() {
        "random" | "optimal" => {
            let config = if mode == "random" {
                load(SimulationConfig::from_default_yaml)
            } else {
                load(SimulationConfig::reference_optimal)
            };
            let stats = config.run(&table).expect("simulation failed");
            match stats.summary() {
                Some(summary) => println!("{summary}"),
                None => println!("no episodes completed"),
            }
        }
        "estimate" => {
            let config = load(SimulationConfig::from_default_yaml);
            let estimate = config.estimate(&table).expect("estimate failed");
            println!("conditional probability: {estimate}");
        }
        "table" => {
            let layout = TableLayout::action_major(&table, &["left", "up", "right", "down"])
                .expect("reference grid has cardinal actions");
            write_table(&mut io::stdout().lock(), &table, &layout).expect("failed to write table");
        }
        other => {
            eprintln!("unknown mode `{other}`; expected random, optimal, estimate or table");
            std::process::exit(2);
        }
    }
}
