use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cinereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a cutscene authoring file.
    Validate(ValidateArgs),
    /// Print the camera state of a cutscene at a given time.
    Sample(SampleArgs),
    /// Summarize a recorded session file.
    RecordingInfo(RecordingInfoArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input cutscene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Id to register the cutscene under (defaults to the file stem).
    #[arg(long)]
    id: Option<String>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input cutscene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Playback time in seconds.
    #[arg(long)]
    time: f32,
}

#[derive(Parser, Debug)]
struct RecordingInfoArgs {
    /// Input recording JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::RecordingInfo(args) => cmd_recording_info(args),
    }
}

fn file_id(path: &std::path::Path, explicit: Option<&str>) -> anyhow::Result<cinereel::ResourceId> {
    let raw = match explicit {
        Some(s) => s.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("cutscene")
            .to_ascii_lowercase(),
    };
    cinereel::ResourceId::parse(&raw).with_context(|| format!("cutscene id '{raw}'"))
}

fn read_cutscene(path: &PathBuf, id: Option<&str>) -> anyhow::Result<cinereel::Cutscene> {
    let bytes =
        std::fs::read(path).with_context(|| format!("open cutscene '{}'", path.display()))?;
    let id = file_id(path, id)?;
    let cutscene = cinereel::CutsceneLoader::parse(&bytes, id)
        .with_context(|| format!("parse cutscene '{}'", path.display()))?;
    Ok(cutscene)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let cutscene = read_cutscene(&args.in_path, args.id.as_deref())?;

    eprintln!("{}:", cutscene.id);
    eprintln!("  name:      {}", cutscene.name);
    eprintln!("  duration:  {}s", cutscene.duration);
    eprintln!("  pauses:    {}", cutscene.pause_on_play);
    match (&cutscene.camera, &cutscene.external_camera) {
        (Some(path), _) => eprintln!("  camera:    inline, {} keyframes", path.keyframes.len()),
        (None, Some(id)) => eprintln!("  camera:    external '{id}'"),
        (None, None) => eprintln!("  camera:    none (zero state)"),
    }
    eprintln!("  objects:   {}", cutscene.composition.len());
    eprintln!("  frames:    {}", cutscene.frames.len());
    if cutscene.is_from_recording() {
        eprintln!("  recording-backed");
    }
    eprintln!("ok");
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let cutscene = read_cutscene(&args.in_path, None)?;
    let state = cutscene.camera_state_at(args.time);

    println!(
        "t={} position=({}, {}, {}) rotation=({}, {}, {})",
        args.time,
        state.position.x,
        state.position.y,
        state.position.z,
        state.rotation.x,
        state.rotation.y,
        state.rotation.z,
    );
    if let Some(frame) = cutscene.frame_at(args.time) {
        println!("frame t={} with {} entities", frame.time, frame.entities.len());
    }
    Ok(())
}

fn cmd_recording_info(args: RecordingInfoArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("open recording '{}'", args.in_path.display()))?;
    let doc: cinereel::RecordingDocument =
        serde_json::from_slice(&bytes).with_context(|| "parse recording JSON")?;

    eprintln!("{}:", doc.name);
    eprintln!("  duration: {}s", doc.duration);
    eprintln!("  samples:  {}", doc.player_path.len());
    eprintln!("  blocks:   {}", doc.world_snapshot.len());
    Ok(())
}
