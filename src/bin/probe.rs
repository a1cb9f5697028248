extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num_cpus;
extern crate orbitprobe;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::Error;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use orbitprobe::{Classification, Complex, Counts, Extent, Grid, GridResult, Orbit, Params};
use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

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

fn validate_number<T: FromStr>(s: &str, isnotanumber_err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(isnotanumber_err.to_string()),
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

const POINT: &str = "point";
const GRID: &str = "grid";
const C: &str = "c";
const CENTER: &str = "center";
const Z0: &str = "z0";
const ITERATIONS: &str = "iterations";
const POINTS: &str = "points";
const VIEW: &str = "view";
const EXTENT: &str = "extent";
const THREADS: &str = "threads";
const OUTPUT: &str = "output";

// Nord11 and Nord8.
const DIVERGE_RGB: [u8; 3] = [0xBF, 0x61, 0x6A];
const CONVERGE_RGB: [u8; 3] = [0x88, 0xC0, 0xD0];

fn z0_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(Z0)
        .long(Z0)
        .short("z")
        .takes_value(true)
        .allow_hyphen_values(true)
        .default_value("0,0")
        .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse seed z0"))
        .help("Seed of every orbit, as RE,IM")
}

// Negative budgets get past the parser on purpose; the library is the
// one that turns them down.
fn iterations_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(ITERATIONS)
        .long(ITERATIONS)
        .short("i")
        .takes_value(true)
        .allow_hyphen_values(true)
        .default_value("100")
        .validator(|s| validate_number::<i64>(&s, "Could not parse iteration count"))
        .help("Maximum number of steps per orbit")
}

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("probe")
        .version("0.1.0")
        .about("Escape-time orbit probe for z <- z^2 + c")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name(POINT)
                .about("Follow the orbit of a single parameter value")
                .arg(
                    Arg::with_name(C)
                        .required(true)
                        .long(C)
                        .short("c")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse parameter c"))
                        .help("Parameter value, as RE,IM"),
                )
                .arg(z0_arg())
                .arg(iterations_arg()),
        )
        .subcommand(
            SubCommand::with_name(GRID)
                .about("Classify a grid of parameter values around a center")
                .arg(
                    Arg::with_name(CENTER)
                        .required(true)
                        .long(CENTER)
                        .short("c")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse grid center"))
                        .help("Center of the grid, as RE,IM"),
                )
                .arg(z0_arg())
                .arg(iterations_arg())
                .arg(
                    Arg::with_name(POINTS)
                        .long(POINTS)
                        .short("n")
                        .takes_value(true)
                        .default_value("11")
                        .validator(|s| validate_number::<usize>(&s, "Could not parse point count"))
                        .help("Points per side of the grid"),
                )
                .arg(
                    Arg::with_name(VIEW)
                        .long(VIEW)
                        .short("v")
                        .takes_value(true)
                        .default_value("2.5x2.5")
                        .validator(|s| validate_pair::<f64>(&s, 'x', "Could not parse view size"))
                        .help("Width and height of the visible region; the grid spans a fifth of it each way"),
                )
                .arg(
                    Arg::with_name(EXTENT)
                        .long(EXTENT)
                        .short("e")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse grid extent"))
                        .help("Half-width and half-height of the grid, overriding --view"),
                )
                .arg(
                    Arg::with_name(THREADS)
                        .long(THREADS)
                        .short("t")
                        .takes_value(true)
                        .default_value("1")
                        .validator(move |s| {
                            validate_range(
                                &s,
                                1,
                                max_threads,
                                "Could not parse thread count",
                                &format!("Thread count must be between 1 and {}", max_threads),
                            )
                        })
                        .help("Number of threads to use in the classifier"),
                )
                .arg(
                    Arg::with_name(OUTPUT)
                        .long(OUTPUT)
                        .short("o")
                        .takes_value(true)
                        .help("Write the grid as a PPM image, one pixel per point"),
                ),
        )
        .get_matches()
}

// Validators have already run on everything read through these.
fn complex_of(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    parse_complex(raw).ok_or_else(|| failure::err_msg(format!("Could not parse {}", name)))
}

fn number_of<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    T::from_str(raw).map_err(|_| failure::err_msg(format!("Could not parse {}", name)))
}

fn params_of(matches: &ArgMatches) -> Result<Params, Error> {
    Ok(Params {
        z0: complex_of(matches, Z0)?,
        max_iter: number_of(matches, ITERATIONS)?,
        ..Params::default()
    })
}

fn report_orbit(c: Complex<f64>, orbit: &Orbit) {
    println!("Point: c = {:.3} + {:.3}i", c.re, c.im);
    match orbit.escape_step() {
        Some(step) => println!("Behavior: {} (escaped at step {})", orbit.classification(), step),
        None => println!("Behavior: {}", orbit.classification()),
    }
    println!();
    println!("Sequence:");
    for (i, z) in orbit.trajectory().iter().enumerate() {
        println!("z_{:<2} = {:>8.3} + {:>8.3}i", i, z.re, z.im);
    }
}

fn colour(classification: Classification) -> [u8; 3] {
    match classification {
        Classification::Diverges => DIVERGE_RGB,
        Classification::Converges => CONVERGE_RGB,
    }
}

// Row 0 of the grid is the lowest imaginary value; row 0 of the image
// is the top.  Flip as we go.
fn pixelate(grid: &Grid, result: &GridResult) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(result.len() * 3);
    for row in (0..grid.rows()).rev() {
        for column in 0..grid.columns() {
            let offset = row * grid.columns() + column;
            pixels.extend_from_slice(&colour(result.classifications()[offset]));
        }
    }
    pixels
}

fn image_bounds(bounds: (usize, usize)) -> Result<(u32, u32), Error> {
    Ok((u32::try_from(bounds.0)?, u32::try_from(bounds.1)?))
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), Error> {
    let (width, height) = image_bounds(bounds)?;
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, width, height, ColorType::RGB(8))?;
    Ok(())
}

fn run_point(matches: &ArgMatches) -> Result<(), Error> {
    let params = params_of(matches)?;
    let c = complex_of(matches, C)?;
    info!("probing c = {}, z0 = {}, budget {}", c, params.z0, params.max_iter);

    let orbit = params.probe(c)?;
    debug!("{} after {} iterates", orbit.classification(), orbit.trajectory().len());
    report_orbit(c, &orbit);
    Ok(())
}

fn run_grid(matches: &ArgMatches) -> Result<(), Error> {
    let mut params = params_of(matches)?;
    params.points_per_side = number_of(matches, POINTS)?;
    let center = complex_of(matches, CENTER)?;
    let threads: usize = number_of(matches, THREADS)?;

    let grid = match matches.value_of(EXTENT) {
        Some(raw) => {
            let (rx, ry) = parse_pair::<f64>(raw, ',')
                .ok_or_else(|| failure::err_msg("Could not parse grid extent"))?;
            Grid::new(
                center,
                Extent(rx, ry),
                Counts(params.points_per_side, params.points_per_side),
            )?
        }
        None => {
            params.view = parse_pair::<f64>(matches.value_of(VIEW).unwrap_or_default(), 'x')
                .ok_or_else(|| failure::err_msg("Could not parse view size"))?;
            params.grid_around(center)?
        }
    };
    info!(
        "classifying {}x{} grid around {}, z0 = {}, budget {}, {} thread(s)",
        grid.columns(),
        grid.rows(),
        center,
        params.z0,
        params.max_iter,
        threads
    );

    let started = Instant::now();
    let result = if threads == 1 {
        orbitprobe::classify_grid(&grid, params.z0, params.max_iter)?
    } else {
        orbitprobe::classify_grid_threaded(&grid, params.z0, params.max_iter, threads)?
    };
    debug!("classified {} points in {:?}", result.len(), started.elapsed());

    for (point, classification, _) in result.iter() {
        println!("{} {} {}", point.re, point.im, classification);
    }
    println!(
        "{} points: {} diverge, {} converge",
        result.len(),
        result.count(Classification::Diverges),
        result.count(Classification::Converges)
    );

    if let Some(outfile) = matches.value_of(OUTPUT) {
        write_image(outfile, &pixelate(&grid, &result), (grid.columns(), grid.rows()))?;
        info!("wrote {}", outfile);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();

    let outcome = match matches.subcommand() {
        (POINT, Some(sub)) => run_point(sub),
        (GRID, Some(sub)) => run_grid(sub),
        _ => Err(failure::err_msg("a subcommand is required")),
    };
    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
