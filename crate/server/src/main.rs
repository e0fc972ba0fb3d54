use cosmian_envelope_server::{
    config::{ClapConfig, ServerParams},
    result::EResult,
    start_envelope_server::start_envelope_server,
};
use cosmian_logger::tracing_init;
use dotenvy::dotenv;
use tracing::{debug, info, span};

/// The main entrypoint of the program.
///
/// This function sets up the necessary environment variables and logging options,
/// loads the configuration, then starts the envelope encryption server.
#[tokio::main]
async fn main() -> EResult<()> {
    // Set up environment variables and logging options
    if std::env::var("RUST_BACKTRACE").is_err() {
        unsafe {
            std::env::set_var("RUST_BACKTRACE", "full");
        }
    }
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var(
                "RUST_LOG",
                "info,cosmian=info,cosmian_envelope_server=info,actix_web=info",
            );
        }
    }

    // Load variable from a .env file
    dotenv().ok();

    let clap_config = ClapConfig::load_from_file()?;

    let info_only = clap_config.info;
    if info_only {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_init(&clap_config.logging.tracing_config())?;

    {
        let span = span!(tracing::Level::INFO, "start");
        let _guard = span.enter();

        match ClapConfig::location() {
            Some(path) => info!("Configuration loaded from {}", path.display()),
            None => info!("Configuration loaded from the command line"),
        }

        info!(
            "OpenSSL version: {}, in {}, number: {:x}",
            openssl::version::version(),
            openssl::version::dir(),
            openssl::version::number()
        );

        debug!("Command line config: {clap_config:#?}");
    }

    // Parse the Server Config from the command line arguments.
    // An unusable key pair stops the process here.
    let server_params = ServerParams::try_from(clap_config)?;
    info!("Server parameters: {server_params:?}");

    if info_only {
        info!("Server started with --info. Exiting");
        return Ok(());
    }

    start_envelope_server(server_params).await
}
