use {
    anyhow::{Result, bail},
    clap::Subcommand,
    wabridge_gateway::{BridgeClient, with_link},
};

#[derive(Subcommand)]
pub enum ClientAction {
    /// Show whether the gateway's session is connected.
    Status {
        /// Gateway base URL (defaults to config / WABRIDGE_URL).
        #[arg(long)]
        url: Option<String>,
    },
    /// List the group chats of the connected account.
    Groups {
        #[arg(long)]
        url: Option<String>,
    },
    /// Send a message to one or more chats.
    Send {
        /// Chat id (repeatable). Defaults to `client.default_targets`.
        #[arg(long)]
        to: Vec<String>,
        #[arg(short, long)]
        message: String,
        /// Image (or other media) to attach, with the message as caption.
        #[arg(long)]
        image_url: Option<String>,
        /// Affiliate link appended below the message.
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
}

pub async fn handle(action: ClientAction) -> Result<()> {
    let config = wabridge_config::discover_and_load();
    let client_for = |url: Option<String>| {
        BridgeClient::new(url.as_deref().unwrap_or(&config.client.bridge_url))
    };

    match action {
        ClientAction::Status { url } => {
            let status = client_for(url).status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        },
        ClientAction::Groups { url } => {
            let groups = client_for(url).groups().await?;
            for group in &groups {
                println!("{}\t{}", group.id, group.name);
            }
            Ok(())
        },
        ClientAction::Send {
            to,
            message,
            image_url,
            link,
            url,
        } => {
            let targets = resolve_targets(to, &config.client.default_targets)?;
            let message = with_link(&message, link.as_deref());
            let report = client_for(url)
                .broadcast(&targets, &message, image_url.as_deref())
                .await?;
            for chat_id in &report.delivered {
                println!("sent\t{chat_id}");
            }
            for (chat_id, error) in &report.failed {
                println!("failed\t{chat_id}\t{error}");
            }
            Ok(())
        },
    }
}

fn resolve_targets(explicit: Vec<String>, defaults: &[String]) -> Result<Vec<String>> {
    let targets = if explicit.is_empty() {
        defaults.to_vec()
    } else {
        explicit
    };
    if targets.is_empty() {
        bail!("no target chats: pass --to or set client.default_targets / WABRIDGE_TARGETS");
    }
    Ok(targets)
}
