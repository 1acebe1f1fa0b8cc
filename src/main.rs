use anyhow::Result;
use coinpad::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
