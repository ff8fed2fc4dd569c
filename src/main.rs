#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    mastermind::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
