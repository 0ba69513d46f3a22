use anyhow::Result;
use ezsched::cli;
use ezsched::context::{AppContext, StandardContext};
use ezsched::logic::{ExecuteError, Logic};
use ezsched::storage::{JsonStorage, Storage};
use ezsched::store::Model;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        cli::print_help("ezsched");
        return Ok(());
    }

    let override_root = args
        .iter()
        .position(|a| a == "--root" || a == "-r")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);
    let ctx = StandardContext::new(override_root);

    init_logging(&ctx);

    let mut storage = JsonStorage::from_context(&ctx)?;
    let prefs = storage.load_prefs()?.unwrap_or_default();
    if let Some(path) = &prefs.scheduler_file {
        // Preferences may point the scheduler data at a custom location.
        storage = JsonStorage::new(path.clone(), ctx.get_prefs_file_path()?);
    }
    let scheduler = storage.load_scheduler()?.unwrap_or_default();
    log::info!("Loaded {} event(s)", scheduler.len());

    let model = Model::new(scheduler, prefs);
    let mut logic = Logic::new(model, Box::new(storage));

    println!(
        "Ezsched v{} - type 'help' for the command summary",
        env!("CARGO_PKG_VERSION")
    );
    print_event_list(&logic);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }

        match logic.execute(&line) {
            Ok(result) => {
                println!("{}", result.feedback);
                if result.exit {
                    break;
                }
                print_event_list(&logic);
            }
            // The two failure kinds render differently on purpose: parse
            // failures are input mistakes, command failures are scheduler
            // state the user has to resolve.
            Err(ExecuteError::Parse(e)) => println!("Invalid input: {e}"),
            Err(ExecuteError::Command(e)) => println!("Command failed: {e}"),
        }
    }

    Ok(())
}

fn print_event_list(logic: &Logic) {
    let shown = logic.filtered_events();
    let show_completed = logic.model().prefs().show_completed;
    println!("{}", cli::render_events(&shown, show_completed));
}

fn init_logging(ctx: &dyn AppContext) {
    // Best-effort; the scheduler still runs if the log file cannot be made.
    if let Ok(path) = ctx.get_log_file_path()
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = simplelog::WriteLogger::init(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            file,
        );
    }
}
