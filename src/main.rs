use std::path::PathBuf;
use std::process;

use clap::Parser;

use trackstitch_rs::ConsolidationPipeline;
use trackstitch_rs::ledger::{
    DEFAULT_BOUNDARY_THRESHOLD, DEFAULT_IOU_THRESHOLD, DEFAULT_MIN_COUNT_DURATION, LedgerConfig,
};
use trackstitch_rs::table::{read_detections_from_path, write_records_to_path};

/// Stitch tracker fragments into persistent objects and classify their boundary behaviour.
#[derive(Parser)]
#[command(name = "trackstitch")]
struct Cli {
    /// Detection CSV with object_id, frame_number, object_name, x1, y1, x2, y2 columns.
    input: PathBuf,

    /// Consolidated object table.
    #[arg(long, default_value = "postprocess.csv")]
    objects: PathBuf,

    /// Raw fragment table with the object each fragment was merged into.
    #[arg(long)]
    fragments: Option<PathBuf>,

    /// Input rows re-emitted with a unique_id column.
    #[arg(long)]
    annotated: Option<PathBuf>,

    /// Total number of frames in the video.
    #[arg(long)]
    video_length: u32,

    /// Maximum frame gap for merging (default: 1% of the video length).
    #[arg(long)]
    gap_threshold: Option<u32>,

    /// Frames from either end of the video that count as the boundary.
    #[arg(long, default_value_t = DEFAULT_BOUNDARY_THRESHOLD)]
    boundary_threshold: u32,

    /// Minimum IoU between a fragment's first box and an object's last box.
    #[arg(long, default_value_t = DEFAULT_IOU_THRESHOLD)]
    iou_threshold: f32,

    /// Objects must last longer than this many frames to be counted.
    #[arg(long, default_value_t = DEFAULT_MIN_COUNT_DURATION)]
    min_duration: u32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = LedgerConfig::for_video(cli.video_length)
        .with_boundary_threshold(cli.boundary_threshold)
        .with_iou_threshold(cli.iou_threshold)
        .with_min_count_duration(cli.min_duration);
    if let Some(gap) = cli.gap_threshold {
        config = config.with_gap_threshold(gap);
    }

    let rows = read_detections_from_path(&cli.input)?;
    let result = ConsolidationPipeline::new(config)?.run(&rows)?;

    write_records_to_path(&cli.objects, &result.objects)?;
    if let Some(path) = &cli.fragments {
        write_records_to_path(path, &result.fragments)?;
    }
    if let Some(path) = &cli.annotated {
        write_records_to_path(path, &result.annotated_rows)?;
    }

    println!(
        "There are {} objects in the video ({} consolidated objects from {} fragments).",
        result.counted_objects,
        result.objects.len(),
        result.fragments.len()
    );
    Ok(())
}
