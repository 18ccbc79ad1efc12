//! Command dispatch.

use fabriq_api::Client;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

mod listings;

pub async fn dispatch(
    command: Command,
    client: &Client,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Templates => listings::templates(client, global).await,
        Command::Anps => listings::anps(client, global).await,
        Command::Vrfs => listings::vrfs(client, global).await,
        Command::Bds => listings::bds(client, global).await,
        Command::Epgs => listings::epgs(client, global).await,
        Command::StaticPorts => listings::static_ports(client, global).await,
    }
}
