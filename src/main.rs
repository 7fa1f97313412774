use std::io::Read;
use std::path::PathBuf;

use chatmark::config;
use chatmark::gateway;
use chatmark::markdown::Renderer;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(about = "Render chat Markdown into safe HTML fragments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown to an HTML fragment on stdout
    Render {
        /// Input file (stdin when omitted or "-")
        path: Option<PathBuf>,

        /// Wrap numbered items in <ol>
        #[arg(long)]
        ordered_lists: bool,

        /// Merge consecutive quoted lines into one <blockquote>
        #[arg(long)]
        merge_quotes: bool,
    },

    /// Start the render gateway
    Serve {
        /// Port to bind to
        #[arg(short, long, env = "CHATMARK_PORT")]
        port: Option<u16>,

        /// Bind address
        #[arg(short, long, env = "CHATMARK_BIND")]
        bind: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = config::load()?;

    match cli.command {
        Commands::Render {
            path,
            ordered_lists,
            merge_quotes,
        } => {
            let mut options = config.markdown;
            options.ordered_list_container |= ordered_lists;
            options.merge_blockquotes |= merge_quotes;

            let input = read_input(path.as_ref())?;
            println!("{}", Renderer::new(options).render(&input));
            Ok(())
        }
        Commands::Serve { port, bind } => {
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(bind) = bind {
                config.gateway.bind = bind;
            }
            gateway::run(config).await
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
            Ok(input)
        }
    }
}
