use std::process::ExitCode;

use topoframes::cli::{self, PropagationCli};
use topoframes::logging::init_logging;
use topoframes::run_propagation;

fn main() -> ExitCode {
    let args: PropagationCli = match cli::parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    if let Err(err) = init_logging(args.common.log_level) {
        eprintln!("error: {err:#}");
        return ExitCode::from(1);
    }

    let result = args.common.render_settings().and_then(|settings| {
        let fonts = args.common.label_fonts()?;
        run_propagation(&args.dot_dir, &args.output_dir, &settings, &fonts)
    });
    cli::finish(&args.dot_dir, &args.output_dir, result)
}
