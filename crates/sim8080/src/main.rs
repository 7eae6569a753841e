use sim8080::cli::{CliArgs, USAGE};
use sim8080::program::{load_program_source, parse_hex_program, DEFAULT_PROGRAM};
use sim8080::ConsoleFrontend;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{:#}\n{}", err, USAGE);
            std::process::exit(1);
        }
    };

    let program = match args.program.as_deref() {
        Some(source) => load_program_source(source)?,
        None => {
            log::info!("No program provided, running the bundled sample");
            parse_hex_program(DEFAULT_PROGRAM)?
        }
    };

    let config = args.to_config();
    let stdout = std::io::stdout();
    let mut frontend = ConsoleFrontend::new(stdout.lock(), &config);
    sim8080::run(&program, &config, &mut frontend)?;
    Ok(())
}
