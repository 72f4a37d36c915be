// plume: front end for a small procedural language

use std::process;

use clap::Parser;
use log::info;

use plume::args::Args;
use plume::codegen::Generator;
use plume::error::FrontendError;
use plume::ir::dump::write_dump;
use plume::parser::parse_file;

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level_filter())
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }

    println!("done.");
}

fn run(args: &Args) -> Result<(), FrontendError> {
    let module = parse_file(&args.file)?;
    info!(
        "parsed {}: {} vars, {} procs, {} exports",
        module.name,
        module.vars.len(),
        module.procs.len(),
        module.exports.len()
    );

    write_dump(&module, &args.dump).map_err(|source| FrontendError::Io {
        path: args.dump.clone(),
        source,
    })?;
    info!("wrote IR dump to {}", args.dump.display());

    let ctx = Generator::new().generate(&module);
    info!("generator built {} nodes", ctx.len());

    Ok(())
}
