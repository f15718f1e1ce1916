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
use crate::error::SimulationError;
use crate::results::{PvResult, SimulationResult};
use model::ComponentDatabasePaths;
use photovoltaic::{ComponentCatalogue, DatabaseType};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Turns anything writing a file into a [`SimulationError::Output`]
fn output_error<E: Into<io::Error>>(path: &Path) -> impl Fn(E) -> SimulationError + '_ {
    move |e| SimulationError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    }
}

/// Writes the hourly profiles of every plant and of the whole fleet.
///
/// There is one row per hour, and two columns per plant (energy and
/// energy per unit of area) followed by the two fleet columns.
pub fn write_energy_profiles<W: Write>(results: &SimulationResult, writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let plants = results.plants();
    let summary = results.summary();

    let mut header = Vec::with_capacity(2 * plants.len() + 2);
    for i in 0..plants.len() {
        header.push(format!("Plant {}: energy [kWh]", i));
        header.push(format!("Plant {}: energy per area [kWh/m2]", i));
    }
    header.push("All plants: energy [kWh]".to_string());
    header.push("All plants: energy per area [kWh/m2]".to_string());
    wtr.write_record(&header)?;

    let cell = |v: &[crate::Float], i: usize| v.get(i).map(|x| x.to_string()).unwrap_or_default();
    let n_rows = plants
        .iter()
        .chain(std::iter::once(summary))
        .map(|r| r.energy_profile.len())
        .max()
        .unwrap_or(0);
    for i in 0..n_rows {
        let mut row = Vec::with_capacity(header.len());
        for p in plants.iter().chain(std::iter::once(summary)) {
            row.push(cell(&p.energy_profile, i));
            row.push(cell(&p.energy_area_profile, i));
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the annual figures of every plant and of the whole fleet.
pub fn write_summary<W: Write>(results: &SimulationResult, writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let plants = results.plants();
    let mut header = vec!["Value".to_string()];
    header.extend((0..plants.len()).map(|i| format!("Plant {}", i)));
    header.push("All plants".to_string());
    wtr.write_record(&header)?;

    let rows: [(&str, fn(&PvResult) -> crate::Float); 3] = [
        ("Annual energy [kWh]", |r| r.sum_of_energy_per_year),
        ("Work specific yield [kWh/kWp]", |r| {
            r.work_specific_energy_per_year
        }),
        ("Area specific yield [kWh/m2]", |r| {
            r.area_specific_energy_per_year
        }),
    ];
    for (name, value) in rows {
        let mut row = vec![name.to_string()];
        row.extend(
            plants
                .iter()
                .chain(std::iter::once(results.summary()))
                .map(|r| value(r).to_string()),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `<uuid>_energy_profiles.csv` and `<uuid>_summary.csv` into
/// `dir` (which is created if needed). Returns the paths of both files.
pub fn export_tables<P: AsRef<Path>>(
    results: &SimulationResult,
    dir: P,
    uuid: &str,
) -> Result<[PathBuf; 2], SimulationError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(output_error::<io::Error>(dir))?;

    let profiles = dir.join(format!("{}_energy_profiles.csv", uuid));
    let file = std::fs::File::create(&profiles).map_err(output_error::<io::Error>(&profiles))?;
    write_energy_profiles(results, io::BufWriter::new(file))
        .map_err(output_error::<csv::Error>(&profiles))?;

    let summary = dir.join(format!("{}_summary.csv", uuid));
    let file = std::fs::File::create(&summary).map_err(output_error::<io::Error>(&summary))?;
    write_summary(results, io::BufWriter::new(file))
        .map_err(output_error::<csv::Error>(&summary))?;

    Ok([profiles, summary])
}

/// Writes the (normalized) names in a catalogue, one per line
pub fn write_names<W: Write>(catalogue: &ComponentCatalogue, mut writer: W) -> io::Result<()> {
    for name in catalogue.names() {
        writeln!(writer, "{}", name)?;
    }
    writer.flush()
}

/// Name of the file listing the modules of a catalogue
fn module_listing(date: &str, database: DatabaseType) -> String {
    match database {
        DatabaseType::Cec => format!("{}_PV_Modulnamen.txt", date),
        DatabaseType::Sandia => format!("{}_PV_Modulnamen_Sandia.txt", date),
    }
}

/// Writes the names of the components in the catalogues into `dir`,
/// so they can be copied into a request.
///
/// The CEC module and inverter catalogues are required. The Sandia
/// catalogue is listed only if it exists. Files are prefixed with `date`
/// (e.g., `2024-05-01_PV_Inverter.txt`). Returns the paths of the
/// written files.
pub fn list_components<P: AsRef<Path>>(
    databases: &ComponentDatabasePaths,
    dir: P,
    date: &str,
) -> Result<Vec<PathBuf>, SimulationError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(output_error::<io::Error>(dir))?;

    let mut catalogues = Vec::with_capacity(3);
    for database in [DatabaseType::Cec, DatabaseType::Sandia] {
        let path = databases.modules(database);
        if database == DatabaseType::Sandia && !path.exists() {
            continue;
        }
        let catalogue = ComponentCatalogue::from_file(path).map_err(SimulationError::Catalogue)?;
        catalogues.push((module_listing(date, database), catalogue));
    }
    let inverters =
        ComponentCatalogue::from_file(&databases.inverters).map_err(SimulationError::Catalogue)?;
    catalogues.push((format!("{}_PV_Inverter.txt", date), inverters));

    let mut written = Vec::with_capacity(catalogues.len());
    for (filename, catalogue) in catalogues {
        let path = dir.join(filename);
        let file = std::fs::File::create(&path).map_err(output_error::<io::Error>(&path))?;
        write_names(&catalogue, io::BufWriter::new(file))
            .map_err(output_error::<io::Error>(&path))?;
        written.push(path);
    }
    Ok(written)
}
