use anyhow::Result;
use tracing::info;

use gobang_proto::ProtoEngine;

fn main() -> Result<()> {
    // stdout carries protocol replies only.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("gobang starting");
    ProtoEngine::new().run()?;
    Ok(())
}
