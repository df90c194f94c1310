// SPDX-License-Identifier: MPL-2.0
use leaf_lens::app::{self, Flags};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "leaf_lens=info";

const HELP: &str = "\
LeafLens - potato leaf disease classifier

USAGE:
  leaf_lens [OPTIONS] [IMAGE]

OPTIONS:
  --lang <ID>          Interface language (e.g. en-US, fr)
  --endpoint <URL>     Classifier base URL (default: http://localhost:8000)
  --config-dir <DIR>   Directory holding settings.toml
  -h, --help           Print this help

ENV:
  LEAF_LENS_ENDPOINT, LEAF_LENS_CONFIG_DIR, RUST_LOG
";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        endpoint: args.opt_value_from_str("--endpoint")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        file_path: args.opt_free_from_str()?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring extra arguments");
    }
    Ok(Some(flags))
}

fn main() -> iced::Result {
    init_tracing();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting LeafLens");
    app::run(flags)
}
