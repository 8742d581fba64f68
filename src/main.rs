use clap::Parser;
use onramp::structs::cli::Cli;
use onramp::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = CommandRunner::new().run_command(cli.command).await {
        eprintln!("{} {}", e.severity().emoji(), e.user_message());
        std::process::exit(1);
    }
}
