use seamcarve::{
    change_hue, cq, greyscale, nearest_neighbor, ProtectionMask, RgbWeights, SeamsCarver,
    TwoDimensionalMap,
};
use std::process;

extern crate clap;
extern crate image;

use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::{format_err, Error};
use image::{GrayImage, ImageBuffer, Luma, Pixel, Rgb};
use log::info;

fn weights_arg() -> Arg<'static, 'static> {
    Arg::with_name("weights")
        .long("weights")
        .takes_value(true)
        .default_value("30,59,11")
        .help("Channel weights as r,g,b or r,g,b,divisor (each weight 0-100)")
}

fn io_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("input")
            .help("The image to read")
            .required(true)
            .index(1),
        Arg::with_name("output")
            .help("Where to write the result")
            .required(true)
            .index(2),
    ]
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    args.value_of(name)
        .ok_or_else(|| format_err!("missing argument: {}", name))
}

fn parse_weights(spec: &str) -> Result<RgbWeights, Error> {
    let parts = spec
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()?;
    match parts.as_slice() {
        [r, g, b] => Ok(RgbWeights::new(*r, *g, *b)),
        [r, g, b, amount] => Ok(RgbWeights::with_amount(*r, *g, *b, *amount)),
        _ => Err(format_err!("weights must be r,g,b or r,g,b,divisor: {}", spec)),
    }
}

fn parse_color(spec: &str) -> Result<Rgb<u8>, Error> {
    let hex = spec.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format_err!("colors are six hex digits: {}", spec));
    }
    let rgb = u32::from_str_radix(hex, 16)?;
    Ok(Rgb([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]))
}

// Any non-black mask pixel is protected.
fn load_mask(path: &str) -> Result<ProtectionMask, Error> {
    let grey = image::open(path)?.to_luma();
    let (width, height) = grey.dimensions();
    Ok(TwoDimensionalMap::from_fn(width, height, |x, y| {
        grey.get_pixel(x, y).channels()[0] > 0
    }))
}

fn mask_to_image(mask: &ProtectionMask) -> GrayImage {
    ImageBuffer::from_fn(mask.width, mask.height, |x, y| {
        Luma([cq!(mask[(x, y)], 255, 0)])
    })
}

fn carve(args: &ArgMatches) -> Result<(), Error> {
    let weights = parse_weights(required(args, "weights")?)?;
    let image = image::open(required(args, "input")?)?.to_rgb();
    let (width, height) = image.dimensions();
    let target = value_t!(args, "width", u32)?;
    let mask = match args.value_of("mask") {
        Some(path) => load_mask(path)?,
        None => ProtectionMask::new(width, height),
    };
    info!(
        "{}: {}x{}, {} protected pixels",
        required(args, "input")?,
        width,
        height,
        mask.protected_count()
    );

    let carver = SeamsCarver::new(&image, target, weights, &mask)?;
    carver.resize().save(required(args, "output")?)?;

    if let Some(path) = args.value_of("seams") {
        let color = parse_color(required(args, "seam-color")?)?;
        carver.show_seams(color).save(path)?;
    }
    if let Some(path) = args.value_of("mask-out") {
        mask_to_image(carver.mask_after_carving()).save(path)?;
    }
    Ok(())
}

fn point_op(args: &ArgMatches, name: &str) -> Result<(), Error> {
    let image = image::open(required(args, "input")?)?.to_rgb();
    let out = match name {
        "greyscale" => greyscale(&image, &parse_weights(required(args, "weights")?)?)?,
        "hue" => change_hue(&image, &parse_weights(required(args, "weights")?)?)?,
        _ => nearest_neighbor(
            &image,
            value_t!(args, "width", u32)?,
            value_t!(args, "height", u32)?,
        )?,
    };
    out.save(required(args, "output")?)?;
    Ok(())
}

fn run() -> Result<(), Error> {
    let matches = App::new("seamcarve")
        .version("0.1.0")
        .about("Content-aware image resizing by seam carving")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("carve")
                .about("Remove or insert vertical seams until the image is --width wide")
                .args(&io_args())
                .arg(weights_arg())
                .arg(
                    Arg::with_name("width")
                        .short("w")
                        .long("width")
                        .takes_value(true)
                        .required(true)
                        .help("Target width in pixels"),
                )
                .arg(
                    Arg::with_name("mask")
                        .short("m")
                        .long("mask")
                        .takes_value(true)
                        .help("Protection mask image; non-black pixels are never cut if avoidable"),
                )
                .arg(
                    Arg::with_name("seams")
                        .long("seams")
                        .takes_value(true)
                        .help("Also write the source with every seam painted in"),
                )
                .arg(
                    Arg::with_name("seam-color")
                        .long("seam-color")
                        .takes_value(true)
                        .default_value("ff0000")
                        .help("Seam paint color, as hex rrggbb"),
                )
                .arg(
                    Arg::with_name("mask-out")
                        .long("mask-out")
                        .takes_value(true)
                        .help("Also write the protection mask after carving"),
                ),
        )
        .subcommand(
            SubCommand::with_name("greyscale")
                .about("Convert to weighted greyscale")
                .args(&io_args())
                .arg(weights_arg()),
        )
        .subcommand(
            SubCommand::with_name("hue")
                .about("Scale each channel by its weight")
                .args(&io_args())
                .arg(weights_arg()),
        )
        .subcommand(
            SubCommand::with_name("nearest")
                .about("Nearest-neighbour resize")
                .args(&io_args())
                .arg(
                    Arg::with_name("width")
                        .long("width")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("height")
                        .long("height")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("carve", Some(args)) => carve(args),
        (name, Some(args)) => point_op(args, name),
        _ => Err(format_err!("no command given")),
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("seamcarve: {}", err);
        process::exit(1);
    }
}
