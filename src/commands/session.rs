use crate::commands::Out;
use crate::session::Session;
use crate::{Config, Result};
use anyhow::Context;

/// Runs an interactive session on stdin and stdout until the user quits or input ends.
pub async fn session(config: &Config) -> Result<Out<()>> {
    let factors = *config.factors();
    tokio::task::spawn_blocking(move || {
        let mut session = Session::new(&factors);
        session.run(std::io::stdin().lock(), std::io::stdout().lock())
    })
    .await
    .context("The interactive session stopped unexpectedly")??;
    Ok(Out::new_message(""))
}
