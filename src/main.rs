use std::process::ExitCode;

use ants_vs_spores::game;
use ants_vs_spores::sim::level::LevelData;
use ants_vs_spores::sim::session::RunMode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("endless") => game::run(RunMode::Endless, None),
        Some("tutorial") => game::run(RunMode::Tutorial, None),
        Some("test") => {
            let Some(path) = args.next() else {
                eprintln!("usage: ants-vs-spores test <level.json>");
                return ExitCode::FAILURE;
            };
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("cannot read {path}: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match LevelData::from_json(&text) {
                Ok(level) => game::run(RunMode::Test, Some(level)),
                Err(e) => {
                    eprintln!("{path}: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        _ => game::run(RunMode::Campaign, None),
    }
    ExitCode::SUCCESS
}
