// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use image::{ImageFormat, ImageReader};
use seamshift::{PixelBuffer, Retargeter, SeamCarver};
use std::convert::TryFrom;
use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("seamcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware resizing by seam carving")
        .arg(
            Arg::new("image")
                .help("The image to resize")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .short('W')
                .help("Target width (defaults to the current width)")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .short('H')
                .help("Target height (defaults to the current height)")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Where to write the result; PNG on stdout if absent")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("energy")
                .long("energy")
                .help("Write the energy map instead of the image")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("draw-seam")
                .long("draw-seam")
                .help("Paint the next seam onto the result")
                .value_parser(["vertical", "horizontal"]),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every seam to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let path = matches
        .get_one::<PathBuf>("image")
        .context("no input image given")?;
    let source = ImageReader::open(path)
        .with_context(|| format!("cannot open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("cannot read {}", path.display()))?
        .decode()
        .with_context(|| format!("cannot decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = source.dimensions();
    let buffer = PixelBuffer::try_from(source)?;
    tracing::info!(width, height, "loaded {}", path.display());

    let mut carver = SeamCarver::new(&buffer);
    let target_width = matches.get_one::<u32>("width").copied().unwrap_or(width);
    let target_height = matches.get_one::<u32>("height").copied().unwrap_or(height);
    carver
        .carve_to(target_width, target_height)
        .with_context(|| {
            format!(
                "cannot resize {}x{} to {}x{}",
                width, height, target_width, target_height
            )
        })?;

    match matches.get_one::<String>("draw-seam").map(String::as_str) {
        Some("vertical") => {
            carver.draw_vertical_seam();
        }
        Some("horizontal") => {
            carver.draw_horizontal_seam();
        }
        _ => {}
    }

    let result = if matches.get_flag("energy") {
        carver.energy_image()
    } else {
        carver.into_image()
    };
    let result = result.into_image();

    match matches.get_one::<PathBuf>("output") {
        Some(out) => result
            .save(out)
            .with_context(|| format!("cannot write {}", out.display()))?,
        None => {
            let mut bytes = Cursor::new(Vec::new());
            result.write_to(&mut bytes, ImageFormat::Png)?;
            io::stdout().lock().write_all(bytes.get_ref())?;
        }
    }
    Ok(())
}
