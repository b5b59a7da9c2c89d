use anyhow::Result;
use clap::Parser;
use scan_notes::app::{App, Source};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "scan-notes")]
#[command(about = "Turn a photographed page into structured HTML notes")]
struct CliArgs {
    /// Image to read text from (or a text file with --text).
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Treat INPUT as UTF-8 text and skip text detection.
    #[arg(long)]
    text: bool,

    /// Also print the generated HTML to stdout.
    #[arg(long)]
    print: bool,
}

impl CliArgs {
    fn source(&self) -> Source {
        if self.text {
            Source::Text(self.input.clone())
        } else {
            Source::Image(self.input.clone())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scan_notes=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting scan-notes");

    let args = CliArgs::parse();

    match App::new() {
        Ok(app) => match app.run(&args.source()).await {
            Ok(output) => {
                info!(
                    "Notes written to {} (output directory {})",
                    output.html_path.display(),
                    app.output_dir().display()
                );
                if args.print {
                    println!("{}", output.html);
                }
                Ok(())
            }
            Err(e) => {
                error!("Notes generation failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
