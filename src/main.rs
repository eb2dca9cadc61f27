#[tokio::main]
async fn main() {
    bookline::run().await;
}
