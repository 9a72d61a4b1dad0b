//! humscribe: turn a hummed pitch track into MIDI and audio

mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use humscribe_core::{pipeline, scales_by_category, EnhanceMode, Groove, PipelineConfig};
use humscribe_services::{
    load_frames_file, publish_atomically, write_midi_file, write_wav_file, AudioRenderer, Instrument, RenderConfig,
};

#[derive(Parser)]
#[command(name = "humscribe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/humscribe/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a melody from a pitch-frame JSON file and write .mid, .wav and .json
    Render(RenderArgs),
    /// List the scale catalog by category
    Scales {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List instruments, enhancement modes and grooves
    Instruments,
}

#[derive(Args)]
struct RenderArgs {
    /// JSON array of {"time", "frequency"} frames
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Output file stem (default: input file stem)
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    instrument: Option<String>,
    #[arg(long)]
    root: Option<String>,
    #[arg(long)]
    scale: Option<String>,
    /// Use C minor (or the given root/scale) instead of detecting the key
    #[arg(long)]
    no_detect_key: bool,
    /// Rhythm grid: 1/4, 1/8, 1/16 or 1/32
    #[arg(long)]
    grid: Option<String>,
    #[arg(long)]
    bpm: Option<f64>,
    #[arg(long)]
    groove: Option<String>,
    #[arg(long)]
    humanize: Option<f64>,
    /// smooth, bounce, trap_run, afro_vibe or choir
    #[arg(long)]
    mode: Option<String>,
    #[arg(long)]
    intensity: Option<f64>,
    /// grace or trill
    #[arg(long)]
    ornament: Option<String>,
    /// staccato, normal or legato
    #[arg(long)]
    articulation: Option<String>,
    /// Minimum melody length in seconds
    #[arg(long)]
    min_duration: Option<f64>,
    #[arg(long)]
    sample_rate: Option<u32>,
    /// Fix the random source for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

impl RenderArgs {
    /// Command-line values take precedence over the config file
    fn apply(&self, pipeline: &mut PipelineConfig, render: &mut RenderConfig) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        set_opt(&mut pipeline.root, &self.root);
        set_opt(&mut pipeline.scale, &self.scale);
        if self.no_detect_key {
            pipeline.auto_detect_key = false;
        }
        set_opt(&mut pipeline.quantize_grid, &self.grid);
        set_opt(&mut pipeline.bpm, &self.bpm);
        set(&mut pipeline.groove, &self.groove);
        set(&mut pipeline.humanize, &self.humanize);
        set_opt(&mut pipeline.enhancement, &self.mode);
        set(&mut pipeline.intensity, &self.intensity);
        set_opt(&mut pipeline.ornament, &self.ornament);
        set_opt(&mut pipeline.articulation, &self.articulation);
        set(&mut pipeline.min_duration, &self.min_duration);
        set_opt(&mut pipeline.seed, &self.seed);

        set(&mut render.instrument, &self.instrument);
        set(&mut render.sample_rate, &self.sample_rate);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("humscribe=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render(&args, cli.config.as_deref()),
        Commands::Scales { json } => list_scales(json),
        Commands::Instruments => {
            list_instruments();
            Ok(())
        }
    }
}

fn render(args: &RenderArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut app = config::load_config(config_path);
    args.apply(&mut app.pipeline, &mut app.render);

    let frames = load_frames_file(&args.input)
        .with_context(|| format!("Failed to load pitch frames from {}", args.input.display()))?;

    let mut rng = app.pipeline.rng();
    let Some(melody) = pipeline::run(&frames, &app.pipeline, &mut rng) else {
        bail!("Could not detect a clear melody in {}", args.input.display());
    };
    tracing::info!(
        key = %melody.key,
        bpm = melody.bpm,
        notes = melody.notes.len(),
        duration = melody.analysis.duration,
        "Melody ready"
    );

    let stem = args
        .name
        .clone()
        .or_else(|| args.input.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "melody".to_string());
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let midi_path = args.out_dir.join(format!("{stem}.mid"));
    write_midi_file(&midi_path, &melody.score(app.render.ticks_per_beat)).context("Failed to write MIDI")?;

    let renderer = AudioRenderer::from_config(&app.render);
    let pcm = renderer.render(&melody.notes, &mut rng).context("Failed to render audio")?;
    let wav_path = args.out_dir.join(format!("{stem}.wav"));
    write_wav_file(&wav_path, &pcm, renderer.sample_rate).context("Failed to write WAV")?;

    let json_path = args.out_dir.join(format!("{stem}.json"));
    let json = serde_json::to_vec_pretty(&melody)?;
    publish_atomically(&json_path, &json).context("Failed to write melody JSON")?;

    println!("{}", serde_json::to_string_pretty(&melody.analysis)?);
    Ok(())
}

fn list_scales(json: bool) -> anyhow::Result<()> {
    let catalog = scales_by_category();
    if json {
        let out: Vec<_> = catalog
            .iter()
            .map(|(category, scales)| {
                serde_json::json!({
                    "category": category.name(),
                    "scales": scales.iter().map(|s| s.info()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (category, scales) in catalog {
        println!("{}:", category.name());
        for scale in scales {
            println!("  {:<18} {:?}", scale.name(), scale.intervals());
        }
    }
    Ok(())
}

fn list_instruments() {
    println!("Instruments:");
    for inst in Instrument::ALL {
        let p = inst.profile();
        println!(
            "  {:<8} partials={} attack={}s release={}s brightness={}",
            inst.name(),
            p.harmonics.len(),
            p.envelope.attack,
            p.envelope.release,
            p.brightness
        );
    }
    println!("Enhancement modes:");
    for mode in EnhanceMode::ALL {
        println!("  {}", mode.name());
    }
    println!("Grooves:");
    for groove in Groove::ALL {
        println!("  {}", groove.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "humscribe", "render", "--input", "hum.json", "--mode", "bounce", "--seed", "3", "--instrument", "pads",
            "--no-detect-key",
        ]);
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        let mut pipeline = PipelineConfig { intensity: 0.2, ..Default::default() };
        let mut render = RenderConfig::default();
        args.apply(&mut pipeline, &mut render);

        assert_eq!(pipeline.enhancement.as_deref(), Some("bounce"));
        assert_eq!(pipeline.seed, Some(3));
        assert_eq!(pipeline.intensity, 0.2);
        assert!(!pipeline.auto_detect_key);
        assert_eq!(render.instrument, "pads");
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
