use sensorstat::analyze;
use std::io::{BufWriter, Write};

fn main() {
    env_logger::init();
    let opts = analyze::options().run();
    match main2(opts) {
        Ok(()) => (),
        Err(e) => {
            // Ignore EPIPE
            if analyze::is_broken_pipe(&e) {
                return;
            }
            eprintln!("Error: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn main2(opts: analyze::Options) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut stdout = BufWriter::new(stdout.lock());
    analyze::analyze(opts, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
