mod domain;
mod frameworks;
mod interface_adapters;
mod use_cases;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    frameworks::server::run().await
}
