use actix_web::{App, HttpServer, middleware::Logger, web};
use butterfly::clipboard::SystemClipboard;
use butterfly::{AppState, Config, EngineClient, handlers, shell};
use clap::{Args, Parser, Subcommand};
use log::info;
use reqwest::Client;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "butterfly", version, about = "Front-end for the Metamorphosis Engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Used when no subcommand is given.
    #[command(flatten)]
    serve: ServeArgs,
}

impl Cli {
    /// Serving is the default when no subcommand is given.
    fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[derive(Args, Debug, PartialEq, Eq)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Serve the page and proxy /api/metamorphosis to BACKEND_URL
    Serve(ServeArgs),
    /// Unfold seeds from the terminal through a running server
    Shell {
        /// Origin of the server that applies the proxy rule
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    match Cli::parse().into_command() {
        Command::Serve(ServeArgs { port }) => serve(port).await,
        Command::Shell { url } => {
            let client = EngineClient::new(build_client()?, &url);
            info!("Submitting to {}", client.endpoint());
            println!("Type a seed and press enter. :copy copies the result, :quit exits.");
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(input, client, &mut SystemClipboard).await?;
            Ok(())
        }
    }
}

async fn serve(port: u16) -> std::io::Result<()> {
    let config = Config::from_env();
    let state = Arc::new(AppState {
        config: config.clone(),
        client: build_client()?,
    });

    info!(
        "\n┌───────────────────────────────────────────┐\
         \n│        Butterfly Face - Metamorphosis     │\
         \n└───────────────────────────────────────────┘\n"
    );
    info!("Server running at http://localhost:{port}");
    info!("Proxying /api/metamorphosis to: {}", config.backend_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(state.clone()))
            .app_data(web::PayloadConfig::default().limit(10 * 1024 * 1024))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

fn build_client() -> std::io::Result<Client> {
    Client::builder().build().map_err(std::io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().into_command()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_serves() {
        assert_eq!(
            parse(&["butterfly", "--port", "8080"]),
            Command::Serve(ServeArgs { port: 8080 })
        );
        assert!(matches!(parse(&["butterfly"]), Command::Serve(_)));
    }

    #[test]
    fn serve_subcommand_takes_port() {
        assert_eq!(
            parse(&["butterfly", "serve", "-p", "9000"]),
            Command::Serve(ServeArgs { port: 9000 })
        );
    }

    #[test]
    fn shell_defaults_to_local_server() {
        assert_eq!(
            parse(&["butterfly", "shell"]),
            Command::Shell {
                url: "http://localhost:3000".into()
            }
        );
    }
}
