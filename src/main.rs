use std::process::exit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use libc::{EXIT_FAILURE, EXIT_SUCCESS};

use deauth_oxide::attack::{Deauthenticator, Termination};
use deauth_oxide::cli::Arguments;
use deauth_oxide::rawsocks::RawSocket;
use deauth_oxide::status::MessageLog;

fn run(args: Arguments) -> Result<Termination> {
    let mut log = MessageLog::new(args.verbose, None);

    let config = args.into_config()?;

    let socket = RawSocket::open(&config.iface)?;
    log.info(format!(
        "Socket opened on {} (ifindex {}): {}",
        config.iface,
        socket.ifindex(),
        socket.raw_fd()
    ));

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    println!("{}", config.exec_info());

    let mut deauth = Deauthenticator::new(socket, &config.target, &config.bssid, running);
    drop(config);

    log.status("Transmitting...");
    let result = deauth.run();
    match &result {
        Ok(Termination::Interrupted { frames_sent }) => {
            log.status(format!("Stopped after {} frames.", frames_sent))
        }
        Err(e) => log.error(format!(
            "Stopped after {} frames: {}",
            deauth.frames_sent(),
            e
        )),
    }
    Ok(result?)
}

fn main() {
    let args = Arguments::parse();

    match run(args) {
        Ok(Termination::Interrupted { .. }) => {
            println!("\nExecution interrupted by the user");
            exit(EXIT_SUCCESS);
        }
        Err(e) => {
            println!("[ ERROR ] {}", e);
            exit(EXIT_FAILURE);
        }
    }
}
