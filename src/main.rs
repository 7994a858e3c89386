use beacon::cli::{
    build_monitor, handle_completions, handle_config_init, launch, load_config_with_overrides,
    settings, status, Cli, Commands, ConfigCommands, SettingsCommands,
};
use beacon::logging::init_tracing;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Commands that never touch the servers run without config or logging
    match cli.command {
        Commands::Completions(ref args) => {
            handle_completions(args);
            return Ok(());
        }
        Commands::Config(ConfigCommands::Init(ref args)) => {
            println!("{}", handle_config_init(args)?);
            return Ok(());
        }
        _ => {}
    }

    let config = load_config_with_overrides(&cli)?;
    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let monitor = build_monitor(&config)?;

    let output = match cli.command {
        Commands::Status(ref args) => status::handle_status(args, &monitor).await?,
        Commands::Settings(SettingsCommands::Show(ref args)) => {
            settings::handle_settings_show(args, &monitor)?
        }
        Commands::Settings(SettingsCommands::Set(ref args)) => {
            settings::handle_settings_set(args, &monitor).await?
        }
        Commands::Launch(ref args) => launch::handle_launch(args, &monitor).await?,
        Commands::Completions(_) | Commands::Config(_) => return Ok(()),
    };

    println!("{}", output);
    Ok(())
}
