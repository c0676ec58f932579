//! Rosette Demo
//!
//! Rings of rounded polygons with interpolated colors, written as SVG to
//! stdout or to the path given as the first argument.
//!
//! Run with: cargo run -p mandala_svg --example rosette -- rosette.svg

use std::path::PathBuf;

use mandala_core::{
    attrs, circle, color_steps, group, parametrize_in, randomize_in, reg_poly, ring, steps,
    CompileOptions, CssColors, MandalaError, RandomOptions, Result, Value, Vec2,
};
use mandala_svg::{center_canvas, render, surface_with};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = match std::env::var_os("MANDALA_CONFIG") {
        Some(path) => CompileOptions::load(&PathBuf::from(path))?,
        None => CompileOptions::default(),
    };

    let mut canvas = surface_with(&attrs! { width: 400, height: 400 }, options);
    center_canvas(&mut canvas, 400.0, 400.0);

    let radii = steps(40.0, 160.0, 4);
    let fills = color_steps("#1d3557", "rgba(230, 57, 70, 0.8)", radii.len(), &CssColors)?;

    let petal = reg_poly(attrs! { sides: 6, width: 14, r: 3, origin: "center" });
    for (radius, fill) in radii.iter().zip(fills) {
        let count = (*radius / 8.0) as usize;
        let layer = ring(&petal.with("fill", fill), *radius, count, Vec2::ZERO);
        let layer = randomize_in(&layer, "rotate", (0.0, 60.0), &RandomOptions::seeded(7, count).as_int());
        render(&mut canvas, &layer)?;
    }

    let hub = group(
        vec![circle(attrs! { r: 24 }), circle(attrs! { r: 12 }), circle(attrs! { r: 4 })],
        attrs! { fill: "none", stroke: "#457b9d" },
    );
    let hub = parametrize_in(&hub, "strokeWidth", vec![Value::from(1), Value::from(2), Value::from(3)]);
    render(&mut canvas, &hub)?;

    let svg = canvas.to_svg_string();
    match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::write(&path, svg).map_err(|source| MandalaError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote rosette");
        }
        None => println!("{svg}"),
    }

    Ok(())
}
