mod cli;
mod compare_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Compare {
            ref html,
            ref pdf,
            ref filter_images,
            similarity_threshold,
            hash_threshold,
            ref algorithm,
            ref method,
            ref exclude_names,
            ref format,
            pairs,
        } => compare_cmd::run(
            html,
            pdf,
            filter_images,
            similarity_threshold,
            hash_threshold,
            algorithm,
            method,
            exclude_names,
            format,
            pairs,
        ),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
