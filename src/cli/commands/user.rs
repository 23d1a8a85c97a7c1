use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::{AppConfig, StorageBackend};
use crate::dto::UserSaveDto;
use crate::state::AppState;
use crate::types::Role;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create an administrator account")]
    CreateAdmin {
        #[arg(long, help = "Display name")]
        name: String,
        #[arg(long, help = "Login email")]
        email: String,
        #[arg(long, help = "Initial password")]
        password: String,
    },
}

pub async fn handle(cmd: UserCommands, config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::CreateAdmin { name, email, password } => {
            if config.database.backend == StorageBackend::Memory {
                anyhow::bail!("An administrator created in memory would be lost on exit; use the postgres backend");
            }

            let state = AppState::connect(config).await?;
            let user = state
                .users
                .save(UserSaveDto {
                    name,
                    email,
                    password,
                    role: Role::Administrator,
                })
                .await?;

            output_success(
                output_format,
                &format!("Administrator '{}' created with id {}", user.email, user.id),
                Some(json!({ "user": user })),
            )
        }
    }
}
