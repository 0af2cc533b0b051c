use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bookshelf_mcp::interface::logging::init_tracing();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    bookshelf_mcp::interface::mcp::run(data_dir).await
}
