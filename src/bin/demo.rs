use sprite_pick::app::{run_app, DemoConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run_app(DemoConfig::default())
}
