use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use dg_app::{
    AppError, AppResult, ModelImportRequest, SceneConfigRequest, derive_sky, ensure_model,
    ensure_scene_config, evaluate_hdr, fetch_outputs, list_views, load_settings, render_preview,
    request_status, submit, SubmitRequest,
};
use dg_core::SimStatus;
use dg_session::{ContentCache, SessionContext};
use dg_tools::SystemRunner;

/// Session-state file holding the submitted job's URL.
const JOB_URL_FILE: &str = "job.url";

#[derive(Parser)]
#[command(name = "dg-cli")]
#[command(about = "Dayglare CLI - daylight/glare simulation workflow tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the glass material and scene configuration
    Config {
        /// Session working directory (created if absent)
        #[arg(long)]
        workdir: PathBuf,
        /// Reference radiance material file to extend
        reference_material: PathBuf,
        /// Layer names to treat as glazing apertures
        #[arg(long = "glass")]
        glass_layers: Vec<String>,
        /// Layer names to drop from the import
        #[arg(long = "ignore")]
        ignore_layers: Vec<String>,
        /// Glass visible transmittance, strictly between 0 and 1
        #[arg(long)]
        transmittance: f64,
    },
    /// Convert a CAD model to the intermediate JSON document
    Import {
        #[arg(long)]
        workdir: PathBuf,
        /// Path to the model file
        model: PathBuf,
        /// Scene configuration (defaults to config.json in the workdir)
        #[arg(long)]
        config: Option<PathBuf>,
        /// External converter binary
        #[arg(long, default_value = "model-convert")]
        converter: PathBuf,
    },
    /// Derive the climate-based sky for the brightest hour
    Sky {
        /// Path to the EPW weather file
        epw: PathBuf,
        /// North axis rotation in degrees
        #[arg(long, default_value_t = 0)]
        north: i32,
    },
    /// List named camera views of an imported model
    Views {
        /// Path to the imported model JSON
        model_json: PathBuf,
    },
    /// Upload the model and submit a simulation job
    Submit {
        #[arg(long)]
        workdir: PathBuf,
        /// Cloud settings YAML file
        #[arg(long)]
        settings: PathBuf,
        /// Path to the imported model JSON
        model_json: PathBuf,
        /// Path to the EPW weather file
        epw: PathBuf,
        #[arg(long, default_value_t = 0)]
        north: i32,
        /// Simulation name
        #[arg(long, default_value = "daylight study")]
        name: String,
        /// Simulation description
        #[arg(long, default_value = "glare visualization")]
        description: String,
    },
    /// Check the status of the submitted job
    Status {
        #[arg(long)]
        workdir: PathBuf,
        #[arg(long)]
        settings: PathBuf,
        /// Job URL (defaults to the one stored in the workdir)
        #[arg(long)]
        job_url: Option<String>,
    },
    /// Download and unpack the job's output bundle
    Fetch {
        #[arg(long)]
        workdir: PathBuf,
        #[arg(long)]
        settings: PathBuf,
        #[arg(long)]
        job_url: Option<String>,
        /// Named output to download
        #[arg(long, default_value = "results")]
        output_name: String,
    },
    /// Evaluate glare on an HDR rendering
    Evaluate {
        #[arg(long)]
        workdir: PathBuf,
        /// Path to the HDR image
        hdr: PathBuf,
        /// External glare-analysis binary
        #[arg(long, default_value = "evalglare")]
        evalglare: PathBuf,
    },
    /// Convert an evaluated HDR to a GIF preview
    Render {
        #[arg(long)]
        workdir: PathBuf,
        hdr: PathBuf,
        /// External HDR-to-GIF binary
        #[arg(long, default_value = "ra_gif")]
        ra_gif: PathBuf,
    },
    /// Remove the session working directory
    Clean {
        #[arg(long)]
        workdir: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config {
            workdir,
            reference_material,
            glass_layers,
            ignore_layers,
            transmittance,
        } => cmd_config(
            &workdir,
            &reference_material,
            &glass_layers,
            &ignore_layers,
            transmittance,
        ),
        Commands::Import {
            workdir,
            model,
            config,
            converter,
        } => cmd_import(&workdir, &model, config.as_deref(), &converter),
        Commands::Sky { epw, north } => cmd_sky(&epw, north),
        Commands::Views { model_json } => cmd_views(&model_json),
        Commands::Submit {
            workdir,
            settings,
            model_json,
            epw,
            north,
            name,
            description,
        } => cmd_submit(&workdir, &settings, &model_json, &epw, north, name, description),
        Commands::Status {
            workdir,
            settings,
            job_url,
        } => cmd_status(&workdir, &settings, job_url),
        Commands::Fetch {
            workdir,
            settings,
            job_url,
            output_name,
        } => cmd_fetch(&workdir, &settings, job_url, &output_name),
        Commands::Evaluate {
            workdir,
            hdr,
            evalglare,
        } => cmd_evaluate(&workdir, &hdr, &evalglare),
        Commands::Render {
            workdir,
            hdr,
            ra_gif,
        } => cmd_render(&workdir, &hdr, &ra_gif),
        Commands::Clean { workdir } => cmd_clean(workdir),
    }
}

fn open_session(workdir: &Path) -> AppResult<(SessionContext, ContentCache)> {
    let session = SessionContext::open("cli", workdir.to_path_buf())?;
    let cache = ContentCache::for_workspace(session.workspace())?;
    Ok((session, cache))
}

fn stored_job_url(workdir: &Path, explicit: Option<String>) -> Option<String> {
    explicit.or_else(|| {
        fs::read_to_string(workdir.join(JOB_URL_FILE))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

fn cmd_config(
    workdir: &Path,
    reference_material: &Path,
    glass_layers: &[String],
    ignore_layers: &[String],
    transmittance: f64,
) -> AppResult<()> {
    let (session, cache) = open_session(workdir)?;

    let response = ensure_scene_config(
        &session,
        &cache,
        &SceneConfigRequest {
            reference_material,
            glass_layers,
            ignore_layers,
            transmittance,
        },
    )?;

    if response.loaded_from_cache {
        println!("✓ Reused cached configuration: {}", response.config_path.display());
    } else {
        println!("✓ Wrote configuration: {}", response.config_path.display());
    }
    println!("  Material: {} ({})", response.material_name, response.material_path.display());
    println!("  Glass layers: {}", glass_layers.len());
    println!("  Ignored layers: {}", ignore_layers.len());
    Ok(())
}

fn cmd_import(
    workdir: &Path,
    model: &Path,
    config: Option<&Path>,
    converter: &Path,
) -> AppResult<()> {
    let (session, cache) = open_session(workdir)?;
    let default_config = session.path("config.json");
    let config_path = config.unwrap_or(&default_config);

    let response = ensure_model(
        &session,
        &cache,
        &SystemRunner,
        &ModelImportRequest {
            converter,
            model_path: model,
            config_path,
        },
    )?;

    if response.loaded_from_cache {
        println!("✓ Reused cached model: {}", response.model_json.display());
    } else {
        println!("✓ Imported model: {}", response.model_json.display());
    }
    Ok(())
}

fn cmd_sky(epw: &Path, north: i32) -> AppResult<()> {
    let response = derive_sky(epw, north)?;
    println!("✓ Brightest hour of year: {}", response.hour_of_year);
    println!(
        "  {}-{:02} {:02}:00, dni={} W/m2, dhi={} W/m2",
        response.sky.month,
        response.sky.day,
        response.sky.hour,
        response.sky.direct_normal_irradiance,
        response.sky.diffuse_horizontal_irradiance
    );
    println!("{}", response.sky_string);
    Ok(())
}

fn cmd_views(model_json: &Path) -> AppResult<()> {
    let views = list_views(model_json)?;
    println!("Named views:");
    for view in views {
        println!("  {} {}", view.name, view.to_view_string());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_submit(
    workdir: &Path,
    settings_path: &Path,
    model_json: &Path,
    epw: &Path,
    north: i32,
    name: String,
    description: String,
) -> AppResult<()> {
    let (mut session, _cache) = open_session(workdir)?;
    let settings = load_settings(settings_path)?;

    let sky = derive_sky(epw, north)?;
    println!("Submitting simulation with sky: {}", sky.sky_string);

    let job = submit(
        &mut session,
        &SubmitRequest {
            settings: &settings,
            model_json,
            sky: sky.sky_string,
            name,
            description,
        },
    )?;

    let url = session.job_url.clone().ok_or(AppError::MissingJobReference)?;
    fs::write(session.path(JOB_URL_FILE), &url)?;
    println!("✓ Submitted job {}", job.id);
    println!("  {}", url);
    Ok(())
}

fn cmd_status(workdir: &Path, settings_path: &Path, job_url: Option<String>) -> AppResult<()> {
    let settings = load_settings(settings_path)?;
    let job_url = stored_job_url(workdir, job_url);

    let status = request_status(&settings, job_url.as_deref())?;
    println!("Status: {}", status);
    if status == SimStatus::Incomplete {
        println!("  Run this command again to refresh.");
    }
    Ok(())
}

fn cmd_fetch(
    workdir: &Path,
    settings_path: &Path,
    job_url: Option<String>,
    output_name: &str,
) -> AppResult<()> {
    let (_session, cache) = open_session(workdir)?;
    let settings = load_settings(settings_path)?;
    let job_url = stored_job_url(workdir, job_url).ok_or(AppError::MissingJobReference)?;

    let folder = fetch_outputs(&cache, &settings, &job_url, output_name)?;
    println!("✓ Output '{}' extracted to {}", output_name, folder.display());
    Ok(())
}

fn cmd_evaluate(workdir: &Path, hdr: &Path, evalglare: &Path) -> AppResult<()> {
    let (session, _cache) = open_session(workdir)?;

    let report = evaluate_hdr(&session, &SystemRunner, evalglare, hdr)?;
    println!("✓ Evaluated {}", hdr.display());
    println!("  DGP: {:.3}", report.dgp);
    println!("  Category: {}", report.category);
    println!("  Check image: {}", report.check_image.display());
    Ok(())
}

fn cmd_render(workdir: &Path, hdr: &Path, ra_gif: &Path) -> AppResult<()> {
    let (session, cache) = open_session(workdir)?;

    let gif = render_preview(&session, &cache, &SystemRunner, ra_gif, hdr)?;
    println!("✓ Preview written to {}", gif.display());
    Ok(())
}

fn cmd_clean(workdir: PathBuf) -> AppResult<()> {
    let session = SessionContext::open("cli", workdir)?;
    let path = session.workspace().to_path_buf();
    session.cleanup()?;
    println!("✓ Removed {}", path.display());
    Ok(())
}
