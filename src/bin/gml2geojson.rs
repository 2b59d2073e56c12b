//! CLI tool converting the GML geometries in an XML file to GeoJSON
//!
//! Usage:
//!   cargo run --release --bin gml2geojson -- <xml_file> [options]
//!
//! Options:
//!   --stride <n>        Components per coordinate when srsDimension is absent
//!   --scale <f>         Multiply every coordinate component by f
//!   --max-depth <n>     Nesting limit for composite surfaces
//!   --tree              Print the parsed XML tree instead of converting
//!
//! Prints one GeoJSON geometry per line. Set RUST_LOG=debug for timings.

use std::env;

use anyhow::Context;
use gml_geojson::{find_geometries, parse_many, parse_xml_file, print_xml_tree, ParseOptions, TransformFn};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <xml_file> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --stride <n>       Components per coordinate when srsDimension is absent (default 2)");
        eprintln!("  --scale <f>        Multiply every coordinate component by f");
        eprintln!("  --max-depth <n>    Nesting limit for composite surfaces (default {})", gml_geojson::DEFAULT_MAX_DEPTH);
        eprintln!("  --tree             Print the parsed XML tree instead of converting");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} parcels.gml", args[0]);
        eprintln!("  {} buildings.gml --stride 3 --scale 0.001", args[0]);
        return Ok(());
    }

    let xml_path = &args[1];

    let mut options = ParseOptions::default();
    let mut scale: Option<f64> = None;
    let mut dump_tree = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--stride" => {
                i += 1;
                let value = args.get(i).context("--stride needs a value")?;
                options.stride = value.parse().with_context(|| format!("invalid stride '{}'", value))?;
            }
            "--scale" => {
                i += 1;
                let value = args.get(i).context("--scale needs a value")?;
                scale = Some(value.parse().with_context(|| format!("invalid scale '{}'", value))?);
            }
            "--max-depth" => {
                i += 1;
                let value = args.get(i).context("--max-depth needs a value")?;
                options.max_depth = value.parse().with_context(|| format!("invalid depth '{}'", value))?;
            }
            "--tree" => dump_tree = true,
            other => anyhow::bail!("unknown option '{}'", other),
        }
        i += 1;
    }

    let start = std::time::Instant::now();
    let root = parse_xml_file(xml_path)?;
    log::debug!("XML parsed in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    if dump_tree {
        print_xml_tree(&root, 0);
        return Ok(());
    }

    let geometries = find_geometries(&root);
    anyhow::ensure!(!geometries.is_empty(), "no GML geometry found in {}", xml_path);

    let scaler = scale.map(|factor| move |coords: Vec<f64>| -> Vec<f64> {
        coords.into_iter().map(|v| v * factor).collect()
    });
    let transform = scaler.as_ref().map(|f| f as &TransformFn);

    let results = parse_many(&geometries, transform, &options);

    let mut failures = 0usize;
    for (node, result) in geometries.iter().zip(results) {
        match result {
            Ok(geometry) => println!("{}", geometry.to_json()?),
            Err(err) => {
                failures += 1;
                let id = node.attribute("id").unwrap_or("?");
                eprintln!("{} (gml:id={}): {}: {}", node.name, id, err.kind(), err);
            }
        }
    }

    anyhow::ensure!(failures == 0, "{} of {} geometries failed", failures, geometries.len());
    Ok(())
}
