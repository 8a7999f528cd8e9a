use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fortune::api::{compute, draw_sites, ReplayToken, SiteCfg};
use fortune::{Diagram, Point};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod dump;
mod input;
mod provenance;

use dump::DiagramDump;
use provenance::{current_git_rev, write_sidecar, Payload};

/// Sites of the reference scenario used by `demo`.
const DEMO_SITES: [(f64, f64); 6] = [
    (84.0, 25.0),
    (36.0, 11.0),
    (97.0, 25.0),
    (82.0, 49.0),
    (19.0, 53.0),
    (61.0, 67.0),
];

#[derive(Parser)]
#[command(name = "fortune-cli")]
#[command(about = "Voronoi diagrams via Fortune's sweep: run, sample, inspect")]
struct Cmd {
    /// Optional free-form tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute the diagram of sites read from a CSV/Parquet file (columns x,y)
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Compute the diagram of a reproducible random site set
    Random {
        #[arg(long, default_value_t = 64)]
        count: usize,
        #[arg(long)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Snap coordinates to integers
        #[arg(long)]
        integer: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Run the six-site reference scenario and log its counts
    Demo {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { input, out } => run(&input, &out, cmd.tag),
        Action::Random {
            count,
            seed,
            index,
            integer,
            out,
        } => random(count, seed, index, integer, &out, cmd.tag),
        Action::Demo { out } => demo(out.as_deref(), cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn run(input: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "run");
    let sites = input::read_sites(input)?;
    let d = compute(&sites).with_context(|| format!("computing diagram of {}", input.display()))?;
    emit(
        &d,
        out,
        json!({ "source": "csv", "input": input.to_string_lossy(), "sites": sites.len() }),
        tag,
    )
}

fn random(
    count: usize,
    seed: u64,
    index: u64,
    integer: bool,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(count, seed, index, integer, tag = ?tag, "random");
    let cfg = SiteCfg {
        count,
        integer,
        ..SiteCfg::default()
    };
    let sites = draw_sites(cfg, ReplayToken { seed, index });
    let d = compute(&sites).context("computing diagram of random sites")?;
    emit(
        &d,
        out,
        json!({
            "source": "random",
            "count": count,
            "seed": seed,
            "index": index,
            "integer": integer,
            "sites": sites.len()
        }),
        tag,
    )
}

fn demo(out: Option<&Path>, tag: Option<String>) -> Result<()> {
    let sites: Vec<Point> = DEMO_SITES.iter().map(|&(x, y)| Point::new(x, y)).collect();
    let d = compute(&sites).context("computing demo diagram")?;
    d.mesh.validate().context("demo mesh failed validation")?;
    tracing::info!(
        faces = d.mesh.num_faces(),
        vertices = d.mesh.num_vertices(),
        half_edges = d.mesh.num_half_edges(),
        finished = d.mesh.finished_half_edges(),
        circles_fired = d.stats.circles_fired,
        tag = ?tag,
        "demo"
    );
    if let Some(out) = out {
        emit(&d, out, json!({ "source": "demo" }), tag)?;
    }
    Ok(())
}

/// Write the JSON dump and its provenance sidecar.
fn emit(d: &Diagram, out: &Path, params: Value, tag: Option<String>) -> Result<()> {
    let dump = DiagramDump::from_diagram(d);
    dump.write(out)?;
    let stats = serde_json::to_value(dump.stats)?;
    let prov = write_sidecar(out, Payload::new(params).with_tag(tag).with_stats(stats))?;
    tracing::info!(
        out = %out.display(),
        provenance = %prov.display(),
        vertices = dump.vertices.len(),
        "wrote diagram"
    );
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": current_git_rev(),
        "fortune_version": fortune::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn random_writes_dump_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("r.json");
        random(50, 1, 2, false, &out, Some("smoke".into())).unwrap();
        let dump: DiagramDump = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(dump.faces.len(), 50);
        let prov: Value =
            serde_json::from_slice(&fs::read(dir.path().join("r.provenance.json")).unwrap())
                .unwrap();
        assert_eq!(prov["tag"], "smoke");
        assert_eq!(prov["params"]["seed"], 1);
        assert_eq!(prov["stats"]["circles_fired"], dump.vertices.len());
    }

    #[test]
    fn run_reads_csv() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sites.csv");
        let body: String = std::iter::once("x,y\n".to_string())
            .chain(DEMO_SITES.iter().map(|(x, y)| format!("{x},{y}\n")))
            .collect();
        fs::write(&input, body).unwrap();
        let out = dir.path().join("out/d.json");
        run(&input, &out, None).unwrap();
        let dump: DiagramDump = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(dump.sites.len(), 6);
        assert_eq!(dump.vertices.len(), 5);
    }

    #[test]
    fn run_rejects_duplicate_sites() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("dup.csv");
        fs::write(&input, "x,y\n1,1\n2,3\n1,1\n").unwrap();
        let err = run(&input, &dir.path().join("d.json"), None).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate"));
    }
}
