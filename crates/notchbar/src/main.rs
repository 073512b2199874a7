use clap::Parser;
use notchbar::config;
use notchbar::gui::app::AppModel;
use notchbar::sys::runtime;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(version, about = "Bottom tab bar with an animated notch")]
struct Args {
    /// Override the number of tabs, padding or truncating the configured ones
    #[arg(long)]
    segments: Option<usize>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let config = match args.segments {
        Some(n) => config.with_segment_count(n),
        None => config,
    };

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    // clap already consumed the arguments, keep GTK from parsing them again
    let app = RelmApp::new("org.notchbar.NotchBar").with_args(Vec::new());
    app.run::<AppModel>((config, args.segments, rx));
    Ok(())
}
