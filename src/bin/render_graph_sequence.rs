use std::process::ExitCode;

use topoframes::cli::{self, SequenceCli};
use topoframes::logging::init_logging;
use topoframes::run_dual;

fn main() -> ExitCode {
    let args: SequenceCli = match cli::parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    if let Err(err) = init_logging(args.common.log_level) {
        eprintln!("error: {err:#}");
        return ExitCode::from(1);
    }

    let result = args.common.render_settings().and_then(|settings| {
        let fonts = args.common.label_fonts()?;
        run_dual(
            &args.dot_dir,
            &args.output_dir,
            args.selection(),
            &settings,
            &fonts,
        )
    });
    cli::finish(&args.dot_dir, &args.output_dir, result)
}
