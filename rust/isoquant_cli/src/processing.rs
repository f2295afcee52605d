use super::config::{
    InputConfig,
    OutputConfig,
};
use super::errors::CliError;
use isoquant::models::{
    Evidence,
    ProteinInference,
    SequenceDatabase,
    Spectrum,
};
use isoquant::{
    QuantConfig,
    RunSummary,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{
    BufReader,
    BufWriter,
};
use std::path::Path;
use std::time::Instant;
use tracing::info;

fn required<'a>(path: &'a Option<std::path::PathBuf>, what: &str) -> Result<&'a Path, CliError> {
    path.as_deref().ok_or_else(|| CliError::Config {
        source: format!(
            "No {} input provided, please provide one in the config file",
            what
        ),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let st = Instant::now();
    let file = File::open(path).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    let out = serde_json::from_reader(BufReader::new(file)).map_err(|e| CliError::ParseError {
        msg: format!("{}: {}", path.display(), e),
    })?;
    info!("Loaded {:?}, took: {:?}", path, st.elapsed());
    Ok(out)
}

fn write_json<T: Serialize>(data: &T, path: &Path) -> Result<(), CliError> {
    let io_err = |e: String| CliError::Io {
        source: e,
        path: Some(path.to_string_lossy().to_string()),
    };
    let file = File::create(path).map_err(|e| io_err(e.to_string()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), data).map_err(|e| io_err(e.to_string()))?;
    info!("Wrote {:?}", path);
    Ok(())
}

pub fn process_inputs(
    input: &InputConfig,
    quant_config: &QuantConfig,
    output: &OutputConfig,
) -> Result<RunSummary, CliError> {
    let mut spectra: Vec<Spectrum> = read_json(required(&input.spectra, "spectra")?)?;
    let mut evidence: Evidence = read_json(required(&input.evidence, "evidence")?)?;
    let database: SequenceDatabase = read_json(required(&input.database, "database")?)?;
    let inference = match &input.inference {
        Some(path) => read_json::<ProteinInference>(path)?,
        None => {
            info!("No inference input, using the decisions stored on the evidence proteins");
            ProteinInference::from_proteins(&evidence.proteins)
        }
    };

    let summary = isoquant::run(
        quant_config,
        &mut spectra,
        &mut evidence,
        &database,
        &inference,
    )?;

    write_json(&evidence, &output.directory.join("evidence.json"))?;
    write_json(&summary, &output.directory.join("summary.json"))?;
    Ok(summary)
}
