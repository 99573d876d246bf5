mod cli;
mod info_cmd;
mod page_range;
mod shared;
mod text_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Text(ref args) => text_cmd::run(args),
        cli::Commands::Info {
            ref file,
            ref pages,
            format,
        } => info_cmd::run(file, pages.as_deref(), format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
