use anyhow::Result;
use clap::Parser;
use fanmenu::config;
use fanmenu::sys::host::Host;
use fanmenu::sys::runtime;
use fanmenu::sys::server::DEFAULT_SOCKET_PATH;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fanmenu", version, about, long_about = None)]
struct Cli {
    /// Control socket to listen on
    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    /// Write the default config file if none exists, print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let mut host = Host::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, cli.socket);

    while let Ok(event) = rx.recv_blocking() {
        host.handle_event(event);
    }
    Ok(())
}
