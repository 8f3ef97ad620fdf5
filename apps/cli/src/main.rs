use partner_cli::cli::Cli;
use partner_cli::config::AppConfig;
use partner_cli::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_tracing();

    let config = AppConfig::load()?.with_database_override(cli.db.clone());
    let json = cli.json;

    if let Err(err) = run(cli, config).await {
        if json {
            eprintln!("{}", serde_json::to_string(&err)?);
        } else {
            eprintln!("{}", err);
        }
        std::process::exit(err.code.exit_code());
    }

    Ok(())
}
