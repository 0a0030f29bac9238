// This main function is the entry point when running `cargo run -p web-server`.
// It loads the same configuration sources as `infinity-algo serve`, without CLI flags.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config(None)?;
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(config).await
}
