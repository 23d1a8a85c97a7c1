use chrono::{TimeZone, Utc};
use clap::Subcommand;
use serde_json::json;

use crate::auth::JwtManager;
use crate::cli::utils::output_details;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Verify a token with the configured secret and print its claims")]
    Inspect {
        #[arg(help = "Bearer token, without the 'Bearer ' prefix")]
        token: String,
    },
}

pub async fn handle(cmd: TokenCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Inspect { token } => {
            let jwt = JwtManager::from_config(&config.security)?;
            let claims = jwt.verify(token.trim())?;

            let expires = Utc
                .timestamp_opt(claims.exp, 0)
                .single()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| claims.exp.to_string());

            output_details(
                output_format,
                &json!({
                    "subject": claims.sub,
                    "user_id": claims.uid,
                    "roles": claims.roles.join(","),
                    "issuer": claims.iss,
                    "expires": expires,
                    "token_id": claims.jti.to_string(),
                }),
            )
        }
    }
}
