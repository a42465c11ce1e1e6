mod capture;

use anyhow::Context;
use log::*;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use stereo::camera::pinhole::CalibrationParameters;
use stereo::mvg::reconstruction::{ReconstructionSettings, StereoReconstruction};
use stereo::DegeneratePolicy;
use structopt::StructOpt;

/// Reconstructed points are drawn in blue.
const POINT_COLOR: [u8; 3] = [0, 0, 255];

#[derive(StructOpt, Clone)]
#[structopt(
    name = "stereo-sandbox",
    about = "A tool for reconstructing picked points from a rectified stereo pair"
)]
struct Opt {
    /// The file where the rectified calibration is specified.
    ///
    /// This is in the format of `stereo_pinhole::CalibrationParameters`. The `rectified_*` keys written by
    /// rectification tools are accepted. The reference 1280x720 rig is used if this is omitted.
    #[structopt(short, long)]
    calibration: Option<PathBuf>,
    /// The file where settings are specified.
    ///
    /// This is in the format of `stereo_reconstruction::ReconstructionSettings`.
    #[structopt(short, long, default_value = "stereo-settings.json")]
    settings: PathBuf,
    /// Override the number of correspondences to capture
    #[structopt(short = "n", long)]
    points: Option<usize>,
    /// Drop correspondences with zero disparity instead of failing
    #[structopt(long)]
    skip_degenerate: bool,
    /// Output PLY file to deposit point cloud
    #[structopt(short, long)]
    output: Option<PathBuf>,
    /// File with the capture commands
    ///
    /// One command per line: `l <x> <y>` picks on the left image, `r <x>` picks on the right image
    /// and `q` aborts. Commands are read from stdin if this is omitted.
    #[structopt(parse(from_os_str))]
    picks: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let calibration = match &opt.calibration {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("unable to open calibration {}", path.display()))?;
            let calibration: CalibrationParameters = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid calibration {}", path.display()))?;
            info!("loaded calibration");
            calibration
        }
        None => {
            info!("used reference calibration");
            CalibrationParameters::reference()
        }
    };

    let settings = File::open(&opt.settings)
        .ok()
        .and_then(|file| serde_json::from_reader(BufReader::new(file)).ok());
    if settings.is_some() {
        info!("loaded existing settings");
    } else {
        info!("used default settings");
    }
    let mut settings: ReconstructionSettings = settings.unwrap_or_default();
    if let Some(points) = opt.points {
        settings.num_points = points;
    }
    if opt.skip_degenerate {
        settings.degenerate_policy = DegeneratePolicy::Skip;
    }

    let reconstruction = StereoReconstruction::new(calibration, settings);
    let mut set = reconstruction.correspondence_set()?;

    info!("capturing {} correspondences", set.capacity());
    match &opt.picks {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("unable to open picks {}", path.display()))?;
            capture::capture(BufReader::new(file), &mut set, io::sink())?;
        }
        None => capture::capture(io::stdin().lock(), &mut set, io::stderr())?,
    }

    let points = reconstruction.reconstruct(&set)?;
    for p in &points {
        println!("{}", p.report(reconstruction.settings().report_decimals));
    }

    if let Some(path) = opt.output {
        info!("exporting the reconstruction");
        let file = File::create(&path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        reconstruction
            .export_ply(file, &points, POINT_COLOR)
            .with_context(|| format!("unable to export to {}", path.display()))?;
    }

    Ok(())
}
