#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tos_analyzer_lib::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    tos_analyzer_lib::run(args).await
}
