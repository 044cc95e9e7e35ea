#[tokio::main]
async fn main() -> std::io::Result<()> {
    duel_arena::run_with_config().await
}
