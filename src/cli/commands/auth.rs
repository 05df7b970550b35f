use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::{load_environment_config, save_environment_config};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new user and store its token")]
    Signup {
        #[arg(help = "Email")]
        email: String,
        #[arg(help = "Display name")]
        nickname: String,
        #[arg(long, env = "EXPERT_PASSWORD", help = "Password")]
        password: String,
        #[arg(long, help = "Register with the ADMIN role")]
        admin: bool,
    },

    #[command(about = "Sign in and store the token")]
    Signin {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "EXPERT_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Forget the stored token")]
    Logout,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut env = load_environment_config()?;

    match cmd {
        AuthCommands::Signup { email, nickname, password, admin } => {
            let body = json!({
                "email": email,
                "password": password,
                "nickname": nickname,
                "user_role": if admin { "ADMIN" } else { "USER" }
            });
            let data = ApiClient::new(&env.server_url, None)?.post("/auth/signup", &body).await?;
            store_token(&mut env, &email, &data)?;
            output_success(output_format, &format!("Signed up as {}", email), Some(json!({ "email": email })))
        }
        AuthCommands::Signin { email, password } => {
            let body = json!({ "email": email, "password": password });
            let data = ApiClient::new(&env.server_url, None)?.post("/auth/signin", &body).await?;
            store_token(&mut env, &email, &data)?;
            output_success(output_format, &format!("Signed in as {}", email), Some(json!({ "email": email })))
        }
        AuthCommands::Status => {
            let message = match (&env.email, &env.signed_in_at) {
                (Some(email), Some(at)) => format!("Signed in to {} as {} since {}", env.server_url, email, at),
                _ => format!("Not signed in to {}", env.server_url),
            };
            output_success(
                output_format,
                &message,
                Some(json!({
                    "server_url": env.server_url,
                    "email": env.email,
                    "authenticated": env.token.is_some()
                })),
            )
        }
        AuthCommands::Logout => {
            env.sign_out();
            save_environment_config(&env)?;
            output_success(output_format, "Logged out", None)
        }
    }
}

fn store_token(env: &mut crate::cli::config::EnvironmentConfig, email: &str, data: &serde_json::Value) -> anyhow::Result<()> {
    let token = data["bearer_token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Server response did not include a bearer token"))?;
    env.sign_in(email, token.to_string());
    save_environment_config(env)
}
