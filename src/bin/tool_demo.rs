//! Demo that invokes every tool once and prints the JSON the agent framework would see.

use chatty_kelly::{logging, KellyConfig, ToolName, Toolbox};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    let cfg = KellyConfig::load_default()?;
    let toolbox = Toolbox::from_config(&cfg)?;
    println!("news strategy: {}", toolbox.news_strategy());

    for tool in ToolName::ALL {
        let out = toolbox.invoke(tool).await;
        println!("{tool} => {}", serde_json::to_string_pretty(&out)?);
    }

    println!("tool-demo done");
    Ok(())
}
