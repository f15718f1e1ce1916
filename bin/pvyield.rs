/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use clap::Parser;
use pvyield::run_simulation::{list_components, run_file, Command, SimOptions};
use pvyield::{ModelChain, SimulationError, TracingLogger};
use tracing_subscriber::EnvFilter;

fn simulate(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
) -> Result<(), SimulationError> {
    let results = run_file(input, &ModelChain::default(), &TracingLogger)?;
    match output {
        Some(path) => results.write_json_file(path),
        None => results
            .write_json(std::io::stdout().lock())
            .map_err(|e| SimulationError::Output {
                path: "<stdout>".into(),
                source: e.into(),
            }),
    }
}

fn main() {
    // e.g., PVYIELD_LOG=debug pvyield simulate -i request.json5 -o results.json
    let filter = EnvFilter::try_from_env("PVYIELD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = SimOptions::parse();

    let res = match &options.command {
        Command::Simulate { input, output } => simulate(input, output.as_deref()),
        Command::Components { databases, out } => {
            let out = out.as_ref().unwrap_or(databases);
            list_components(databases, out, &TracingLogger).map(|_| ())
        }
    };

    if let Err(e) = res {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
