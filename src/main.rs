use dotenvy::dotenv;
use k4rt::{
    app::AppData,
    config::{database, settings},
    errors::Result,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn write_lines(stdout: &mut tokio::io::Stdout, lines: &[String]) -> Result<()> {
    for line in lines {
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible); stderr keeps stdout for the screens
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load settings (config.toml is optional)
    let app_settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Open the database and bring the schema up to date
    let database_url = database::get_database_url();
    let db = database::open_database(&database_url)
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Splash pause, then the first screen
    tokio::time::sleep(Duration::from_millis(app_settings.splash_delay_ms)).await;
    let mut app = AppData::start(db, app_settings).await?;
    info!("Ready on {:?} screen", app.screen());

    let mut stdout = tokio::io::stdout();
    write_lines(&mut stdout, &app.screen_intro()).await?;

    // 6. One command per line until `quit` or end of input
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let reply = app.handle_line(&line).await;
        write_lines(&mut stdout, &reply.lines).await?;
        if reply.quit {
            break;
        }
    }

    app.database.close().await?;
    Ok(())
}
