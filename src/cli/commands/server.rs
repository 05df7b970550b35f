use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::{load_environment_config, save_environment_config};
use crate::cli::utils::{field, output_records, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Point the CLI at a server URL")]
    Set {
        #[arg(help = "Server URL, e.g. http://localhost:3000")]
        url: String,
    },

    #[command(about = "Show the configured server")]
    Current,

    #[command(about = "Health check the configured server")]
    Ping,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut env = load_environment_config()?;

    match cmd {
        ServerCommands::Set { url } => {
            url::Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;
            if env.server_url != url {
                // A token from another server is meaningless here
                env.sign_out();
            }
            env.server_url = url.clone();
            save_environment_config(&env)?;
            output_success(output_format, &format!("Server set to {}", url), Some(json!({ "server_url": url })))
        }
        ServerCommands::Current => output_success(
            output_format,
            &format!("Current server: {}", env.server_url),
            Some(json!({ "server_url": env.server_url })),
        ),
        ServerCommands::Ping => {
            let data = ApiClient::from_env(&env)?.get("/health").await?;
            output_records(output_format, &data, "", |health| {
                format!(
                    "{} is {} (database: {})",
                    env.server_url,
                    field(health, "status"),
                    field(health, "database")
                )
            })
        }
    }
}
