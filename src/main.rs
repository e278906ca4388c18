use std::process::ExitCode;

use terraform_provider_pingdom::{
    init_logging, serve, PingdomProvider, MAGIC_COOKIE_KEY, MAGIC_COOKIE_VALUE,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var(MAGIC_COOKIE_KEY).ok().as_deref() != Some(MAGIC_COOKIE_VALUE) {
        eprintln!(
            "This binary is a plugin. These are not meant to be executed directly.\n\
             Please execute the program that consumes these plugins, which will\n\
             load any plugins automatically."
        );
        return ExitCode::FAILURE;
    }

    init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "starting Pingdom provider");

    match serve(PingdomProvider::new(env!("CARGO_PKG_VERSION"))).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "provider server failed");
            ExitCode::FAILURE
        }
    }
}
