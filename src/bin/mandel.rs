// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate mandelview;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use image::ColorType;
use mandelview::navigate::{format_complex, zoom_at, zoom_level};
use mandelview::orbit::SUPER_TRACE_DEPTH;
use mandelview::{trace, ColorMode, FrameRenderer, MandelError, RasterSize, RenderConfig, Viewport};
use num::Complex;
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const MIN: &str = "min";
const MAX: &str = "max";
const ITERATIONS: &str = "iterations";
const COLOR: &str = "color";
const STRIPES: &str = "stripes";
const ZOOM: &str = "zoom";
const AT: &str = "at";
const TRACE: &str = "trace";
const SUPER_TRACE: &str = "super-trace";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output image; the format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u32>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(MIN)
                .long(MIN)
                .takes_value(true)
                .default_value("-2.5,-1")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse upper left corner"))
                .help("Upper left corner of the view, as x,y"),
        )
        .arg(
            Arg::with_name(MAX)
                .long(MAX)
                .takes_value(true)
                .default_value("1,1")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse lower right corner"))
                .help("Lower right corner of the view, as x,y"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("200")
                .validator(|s| {
                    validate_range(
                        &s,
                        2,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 2 and 200000",
                    )
                })
                .help("Iteration budget per point"),
        )
        .arg(
            Arg::with_name(COLOR)
                .long(COLOR)
                .short("c")
                .takes_value(true)
                .default_value("cubic")
                .possible_values(&["cubic", "hsv"])
                .help("Palette"),
        )
        .arg(
            Arg::with_name(STRIPES)
                .long(STRIPES)
                .short("t")
                .takes_value(true)
                .default_value("8")
                .validator(|s| {
                    if s == "auto" {
                        return Ok(());
                    }
                    validate_range(
                        &s,
                        1,
                        256,
                        "Could not parse stripe count",
                        "Stripe count must be between 1 and 256",
                    )
                })
                .help("Column stripes rendered in parallel, or 'auto' for one per core"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .takes_value(true)
                .requires(AT)
                .validator(|s| match f64::from_str(&s) {
                    Ok(f) if f > 0.0 && f.is_finite() => Ok(()),
                    _ => Err("Zoom factor must be a positive number".to_string()),
                })
                .help("Scale the view about --at before rendering; below 1 zooms in"),
        )
        .arg(
            Arg::with_name(AT)
                .long(AT)
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse zoom centre"))
                .help("Complex point to zoom about, as x,y"),
        )
        .arg(
            Arg::with_name(TRACE)
                .long(TRACE)
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse trace point"))
                .help("Report the orbit of a complex point, as x,y"),
        )
        .arg(
            Arg::with_name(SUPER_TRACE)
                .long(SUPER_TRACE)
                .requires(TRACE)
                .help("Trace orbits to a fixed depth instead of the iteration budget"),
        )
        .get_matches()
}

fn complex_arg(matches: &ArgMatches, name: &str) -> Result<Option<Complex<f64>>, MandelError> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(s) => parse_complex(s).map(Some).ok_or_else(|| {
            MandelError::InvalidArgument(format!("Could not parse --{} '{}'", name, s))
        }),
    }
}

fn number_arg<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, MandelError> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| MandelError::InvalidArgument(format!("Could not parse --{}", name)))
}

fn write_image(outfile: &str, pixels: &[u8], raster: RasterSize) -> Result<(), Error> {
    image::save_buffer(
        Path::new(outfile),
        pixels,
        raster.width(),
        raster.height(),
        ColorType::RGBA(8),
    )?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<u32>(s, 'x'))
        .ok_or_else(|| MandelError::InvalidArgument("Could not parse --size".to_string()))?;
    let raster = RasterSize::new(width, height)?;

    let upper_left = complex_arg(matches, MIN)?.unwrap_or_else(|| Complex::new(-2.5, -1.0));
    let lower_right = complex_arg(matches, MAX)?.unwrap_or_else(|| Complex::new(1.0, 1.0));
    let mut viewport = Viewport::new(upper_left.re, lower_right.re, upper_left.im, lower_right.im)?;

    if let (Some(factor), Some(at)) = (matches.value_of(ZOOM), complex_arg(matches, AT)?) {
        let factor = f64::from_str(factor)
            .map_err(|_| MandelError::InvalidArgument("Could not parse --zoom".to_string()))?;
        viewport = zoom_at(&viewport, at, factor)?;
    }

    let budget: u32 = number_arg(matches, ITERATIONS)?;
    let stripes: usize = match matches.value_of(STRIPES) {
        Some("auto") => num_cpus::get(),
        _ => number_arg(matches, STRIPES)?,
    };
    let mode: ColorMode = matches.value_of(COLOR).unwrap_or("cubic").parse()?;

    info!(
        "viewport {:?}, zoom {:.2}x, {} iterations, {} palette",
        viewport,
        zoom_level(&viewport),
        budget,
        mode
    );

    let renderer = FrameRenderer::new(RenderConfig {
        stripes,
        ..RenderConfig::default()
    });
    let pixels = renderer.render(raster, viewport, budget, mode)?;
    write_image(matches.value_of(OUTPUT).unwrap_or("mandel.png"), &pixels, raster)?;

    if let Some(point) = complex_arg(matches, TRACE)? {
        let depth = if matches.is_present(SUPER_TRACE) {
            SUPER_TRACE_DEPTH
        } else {
            budget
        };
        let orbit = trace(point, depth)?;
        println!("c = {}", format_complex(&point));
        println!("orbit points: {}", orbit.points.len());
        println!("escape count: {}", orbit.label());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
