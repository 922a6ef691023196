use winrate_cli::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    cli::run().await;
}
